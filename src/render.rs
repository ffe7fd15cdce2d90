// ============================================================================
// RENDER OUTPUT
// ============================================================================

use crate::config::VIEWPORT_SIZE;
use crate::geometry::{format_number, Arc};

const SVG_NS: &str = "http://www.w3.org/2000/svg";
const HOST_STYLE: &str = ":host { display: block; }";

/// One stroked path of the dial.
#[derive(Debug, Clone, PartialEq)]
pub struct ArcPath {
    pub arc: Arc,
    pub stroke: String,
    pub stroke_width: f64,
    /// SVG path data.
    pub d: String,
}

impl ArcPath {
    pub fn new(arc: Arc, stroke: &str, stroke_width: f64) -> Self {
        Self {
            arc,
            stroke: stroke.to_string(),
            stroke_width,
            d: arc.to_path_data(),
        }
    }

    fn to_svg_element(&self) -> String {
        format!(
            r#"<path stroke="{}" stroke-width="{}" fill="transparent" d="{}"/>"#,
            escape_attr(&self.stroke),
            format_number(self.stroke_width),
            self.d,
        )
    }
}

/// Everything one draw produces: the track, then the indicator on top.
#[derive(Debug, Clone, PartialEq)]
pub struct DialFrame {
    pub background: ArcPath,
    pub foreground: ArcPath,
}

impl DialFrame {
    /// Standalone SVG document with a 100×100 view box.
    pub fn to_svg(&self) -> String {
        let size = format_number(VIEWPORT_SIZE);
        format!(
            r#"<svg xmlns="{SVG_NS}" viewBox="0 0 {size} {size}">{}{}</svg>"#,
            self.background.to_svg_element(),
            self.foreground.to_svg_element(),
        )
    }

    /// `<dial-meter>` element whose shadow root holds the drawing, so page
    /// styles do not reach the paths.
    pub fn to_html(&self) -> String {
        format!(
            concat!(
                "<dial-meter>",
                r#"<template shadowrootmode="open">"#,
                "<style>{}</style>",
                "<div>{}</div>",
                "</template>",
                "</dial-meter>",
            ),
            HOST_STYLE,
            self.to_svg(),
        )
    }
}

fn escape_attr(raw: &str) -> String {
    let mut out = String::with_capacity(raw.len());
    for c in raw.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            c => out.push(c),
        }
    }
    out
}
