// ============================================================================
// DESKTOP VIEWER
// ============================================================================

use std::sync::mpsc::Receiver;
use std::time::{Duration, Instant};

use pixels::{Pixels, SurfaceTexture};
use rusttype::Font;
use tracing::{debug, info};
use winit::dpi::LogicalSize;
use winit::event::{Event, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

use crate::config::{
    Color, WindowConfig, CENTER, DEFAULT_FOREGROUND_COLOR, DEFAULT_INACTIVE_COLOR,
};
use crate::raster::{draw_text, render_frame, Canvas};
use crate::style::StyleHints;
use crate::widget::DialWidget;

const LABEL_FONT_SIZE: f32 = 24.0;
const LABEL_COLOR: Color = Color::new(0x20, 0x20, 0x20);

/// Input changes delivered to a running viewer
#[derive(Debug, Clone)]
pub enum DialUpdate {
    SetValue(String),
    SetStyle(StyleHints),
}

/// A dial shown in its own window.
pub struct Viewer {
    widget: DialWidget,
    window: WindowConfig,
    font: Option<Font<'static>>,
}

impl Viewer {
    pub fn new(widget: DialWidget, window: WindowConfig) -> Self {
        Self {
            widget,
            window,
            font: None,
        }
    }

    /// Shows the numeric value in the middle of the dial.
    pub fn with_font(mut self, font: Font<'static>) -> Self {
        self.font = Some(font);
        self
    }

    pub fn show(self) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(None)
    }

    pub fn show_with_updates(
        self,
        receiver: Receiver<DialUpdate>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        self.run_window(Some(receiver))
    }

    fn run_window(
        self,
        receiver: Option<Receiver<DialUpdate>>,
    ) -> Result<(), Box<dyn std::error::Error>> {
        let Viewer {
            mut widget,
            window: window_config,
            font,
        } = self;
        let logical_size = window_config.size as f64;

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title("dial-meter")
            .with_inner_size(LogicalSize::new(logical_size, logical_size))
            .with_resizable(false)
            .build(&event_loop)?;

        let window = std::sync::Arc::new(window);

        let mut style = widget.style().clone();
        widget.on_mounted(style.clone());
        let background = Color::parse_or(&window_config.background, Color::new(0xff, 0xff, 0xff));
        let mut palette = Palette::resolve(&widget);

        let window_clone = window.clone();
        let size = window.inner_size();
        let mut fb_width = size.width as usize;
        let mut fb_height = size.height as usize;
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(size.width, size.height, surface_texture)?;

        let frame_duration = Duration::from_secs_f64(1.0 / window_config.max_framerate.max(1.0));
        let mut last_frame = Instant::now();
        info!(size = window_config.size, "viewer window opened");

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(ControlFlow::Poll);
            match event {
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        fb_width = new_size.width as usize;
                        fb_height = new_size.height as usize;
                        let _ = pixels.resize_buffer(new_size.width, new_size.height);
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                    }
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            if apply_updates(receiver, &mut widget, &mut style) {
                                palette = Palette::resolve(&widget);
                            }
                        }

                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, fb_width, fb_height);
                        canvas.clear(background);
                        render_frame(
                            &mut canvas,
                            widget.frame(),
                            palette.inactive,
                            palette.foreground,
                        );
                        if let Some(ref font) = font {
                            let label = widget.value().to_string();
                            draw_text(
                                &mut canvas,
                                CENTER.x,
                                CENTER.y,
                                &label,
                                font,
                                LABEL_FONT_SIZE,
                                LABEL_COLOR,
                            );
                        }
                        let _ = pixels.render();
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if last_frame.elapsed() >= frame_duration {
                        window_clone.request_redraw();
                        last_frame = Instant::now();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

/// Applies every pending update in arrival order without blocking.
///
/// Style updates are merged into `style`, so a partial update keeps the
/// hints it does not mention. Returns whether any style update arrived.
pub(crate) fn apply_updates(
    receiver: &Receiver<DialUpdate>,
    widget: &mut DialWidget,
    style: &mut StyleHints,
) -> bool {
    let mut restyled = false;
    while let Ok(update) = receiver.try_recv() {
        match update {
            DialUpdate::SetValue(raw) => {
                widget.on_value_changed(raw);
            }
            DialUpdate::SetStyle(hints) => {
                *style = style.merged_with(&hints);
                widget.on_style_context_changed(style.clone());
                restyled = true;
            }
        }
    }
    restyled
}

/// Arc colors as the rasteriser needs them.
#[derive(Debug, Clone, Copy)]
struct Palette {
    foreground: Color,
    inactive: Color,
}

impl Palette {
    fn resolve(widget: &DialWidget) -> Self {
        let fallback = |name: &str| Color::parse_or(name, Color::new(0, 0, 0));
        let palette = Self {
            foreground: Color::parse_or(
                widget.foreground_color(),
                fallback(DEFAULT_FOREGROUND_COLOR),
            ),
            inactive: Color::parse_or(widget.inactive_color(), fallback(DEFAULT_INACTIVE_COLOR)),
        };
        debug!(?palette, "palette resolved");
        palette
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::DialOptions;
    use std::sync::mpsc;

    fn mounted(value: &str, style: StyleHints) -> DialWidget {
        let mut widget = DialWidget::new(DialOptions::builder().value(value).build());
        widget.on_mounted(style);
        widget
    }

    #[test]
    fn updates_apply_in_order() {
        let mut style = StyleHints::builder().radius("40").foreground_color("red").build();
        let mut widget = mounted("10", style.clone());
        let (sender, receiver) = mpsc::channel();

        sender.send(DialUpdate::SetValue("70".to_string())).unwrap();
        sender
            .send(DialUpdate::SetStyle(
                StyleHints::builder().foreground_color("green").build(),
            ))
            .unwrap();
        sender.send(DialUpdate::SetValue("20".to_string())).unwrap();

        assert!(apply_updates(&receiver, &mut widget, &mut style));
        assert_eq!(widget.value().get(), 20);
        assert_eq!(widget.foreground_color(), "green");
        // The partial style update keeps the radius it did not mention.
        assert_eq!(style.radius.as_deref(), Some("40"));
        assert_eq!(widget.radius(), 40.0);
        assert!(widget.frame().foreground.d.contains(" A 40 40 "));
    }

    #[test]
    fn value_only_updates_leave_style_alone() {
        let mut style = StyleHints::default();
        let mut widget = mounted("10", style.clone());
        let (sender, receiver) = mpsc::channel();
        sender.send(DialUpdate::SetValue("oops".to_string())).unwrap();

        assert!(!apply_updates(&receiver, &mut widget, &mut style));
        assert_eq!(widget.value().get(), 0);
        assert_eq!(widget.diagnostics().len(), 1);
        assert_eq!(style, StyleHints::default());
    }

    #[test]
    fn empty_channel_is_a_no_op() {
        let mut style = StyleHints::default();
        let mut widget = mounted("55", style.clone());
        let before = widget.frame().clone();
        let (_sender, receiver) = mpsc::channel::<DialUpdate>();

        assert!(!apply_updates(&receiver, &mut widget, &mut style));
        assert_eq!(widget.frame(), &before);
    }
}
