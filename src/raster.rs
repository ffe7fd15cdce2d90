// ============================================================================
// RASTERISATION
// ============================================================================
//
// Software rendering of a `DialFrame` into an RGBA frame buffer, used by the
// desktop viewer. The 100×100 viewport is scaled uniformly to fit the
// buffer and centered in it.

use rusttype::{point, Font, PositionedGlyph, Scale};

use crate::config::{Color, VIEWPORT_SIZE};
use crate::render::{ArcPath, DialFrame};

pub struct Canvas<'a> {
    pub frame: &'a mut [u8],
    pub width: usize,
    pub height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    pub fn clear(&mut self, color: Color) {
        let (r, g, b) = color.as_tuple();
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[r, g, b, 0xff]);
        }
    }

    /// Pixels per viewport unit.
    fn scale(&self) -> f64 {
        self.width.min(self.height) as f64 / VIEWPORT_SIZE
    }

    /// Viewport coordinates to buffer coordinates.
    fn to_buffer(&self, x: f64, y: f64) -> (f64, f64) {
        let scale = self.scale();
        let offset_x = (self.width as f64 - VIEWPORT_SIZE * scale) / 2.0;
        let offset_y = (self.height as f64 - VIEWPORT_SIZE * scale) / 2.0;
        (offset_x + x * scale, offset_y + y * scale)
    }

    fn blend_pixel(&mut self, x: i32, y: i32, color: Color, alpha: f32) {
        if x < 0 || y < 0 || x as usize >= self.width || y as usize >= self.height {
            return;
        }
        let idx = (y as usize * self.width + x as usize) * 4;
        let Some(px) = self.frame.get_mut(idx..idx + 4) else {
            return;
        };
        let alpha = alpha.clamp(0.0, 1.0);
        let mix = |dst: u8, src: u8| (src as f32 * alpha + dst as f32 * (1.0 - alpha)).round() as u8;
        px[0] = mix(px[0], color.r);
        px[1] = mix(px[1], color.g);
        px[2] = mix(px[2], color.b);
        px[3] = 0xff;
    }
}

/// Paints the track and then the indicator.
pub fn render_frame(
    canvas: &mut Canvas,
    frame: &DialFrame,
    background_color: Color,
    foreground_color: Color,
) {
    render_arc(canvas, &frame.background, background_color);
    render_arc(canvas, &frame.foreground, foreground_color);
}

/// Strokes `path` centered on its radius with butt ends.
pub fn render_arc(canvas: &mut Canvas, path: &ArcPath, color: Color) {
    let arc = path.arc;
    let sweep = arc.sweep_deg();
    if sweep <= 0.0 {
        return;
    }

    let scale = canvas.scale();
    let (cx, cy) = canvas.to_buffer(arc.center.x, arc.center.y);
    let r = arc.radius * scale;
    let half = path.stroke_width * scale / 2.0;
    let (inner, outer) = ((r - half).max(0.0), r + half);

    let min_x = (cx - outer - 1.0).floor().max(0.0) as i32;
    let max_x = (cx + outer + 1.0).ceil().min(canvas.width as f64) as i32;
    let min_y = (cy - outer - 1.0).floor().max(0.0) as i32;
    let max_y = (cy + outer + 1.0).ceil().min(canvas.height as f64) as i32;

    for y in min_y..max_y {
        for x in min_x..max_x {
            let dx = x as f64 + 0.5 - cx;
            let dy = y as f64 + 0.5 - cy;
            let dist = (dx * dx + dy * dy).sqrt();

            let radial = if dist > outer {
                1.0 - (dist - outer).min(1.0)
            } else if dist < inner {
                1.0 - (inner - dist).min(1.0)
            } else {
                1.0
            };
            if radial <= 0.0 {
                continue;
            }

            // Screen y grows downwards; flip it back to get the math angle.
            let angle = (-dy).atan2(dx).to_degrees();
            let travelled = (arc.start_deg - angle).rem_euclid(360.0);
            if travelled > sweep {
                continue;
            }

            canvas.blend_pixel(x, y, color, radial as f32);
        }
    }
}

/// Draws `text` centered on the viewport point (`x`, `y`).
pub fn draw_text(
    canvas: &mut Canvas,
    x: f64,
    y: f64,
    text: &str,
    font: &Font,
    font_size: f32,
    color: Color,
) {
    let scale = Scale::uniform(font_size * canvas.scale() as f32);
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();

    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    if min_x >= max_x || min_y >= max_y {
        return;
    }

    let (bx, by) = canvas.to_buffer(x, y);
    let offset_x = bx.round() as i32 - (max_x - min_x) / 2;
    let offset_y = by.round() as i32 - (max_y - min_y) / 2;
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                canvas.blend_pixel(px, py, color, v);
            });
        }
    }
}
