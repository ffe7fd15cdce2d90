use std::str::FromStr;

use bon::Builder;
use serde::Deserialize;

use crate::error::DialError;
use crate::geometry::Point;
use crate::style::{scalar_as_text, StyleHints};

// ============================================================================
// DIAL DEFAULTS
// ============================================================================

/// Side of the square viewport every dial is drawn in.
pub const VIEWPORT_SIZE: f64 = 100.0;
pub const CENTER: Point = Point::new(50.0, 50.0);
pub const DEFAULT_RADIUS: f64 = 45.0;
pub const DEFAULT_STROKE_WIDTH: f64 = 10.0;
pub const DEFAULT_FOREGROUND_COLOR: &str = "blue";
pub const DEFAULT_INACTIVE_COLOR: &str = "gray";

/// Initial inputs for a [`crate::DialWidget`].
#[derive(Debug, Clone, Default, Builder)]
pub struct DialOptions {
    /// Raw declarative value, parsed on every draw.
    #[builder(into)]
    pub value: Option<String>,
    #[builder(default)]
    pub style: StyleHints,
}

// ============================================================================
// COLOR CONFIGURATION
// ============================================================================

/// Color representation for rasterised dial elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Parses `raw`, falling back to `default` when it is not understood.
    pub fn parse_or(raw: &str, default: Color) -> Color {
        match raw.parse() {
            Ok(color) => color,
            Err(err) => {
                tracing::warn!(%err, "using fallback color");
                default
            }
        }
    }
}

const NAMED_COLORS: &[(&str, Color)] = &[
    ("black", Color::new(0x00, 0x00, 0x00)),
    ("white", Color::new(0xff, 0xff, 0xff)),
    ("gray", Color::new(0x80, 0x80, 0x80)),
    ("grey", Color::new(0x80, 0x80, 0x80)),
    ("silver", Color::new(0xc0, 0xc0, 0xc0)),
    ("lightgray", Color::new(0xd3, 0xd3, 0xd3)),
    ("lightgrey", Color::new(0xd3, 0xd3, 0xd3)),
    ("darkgray", Color::new(0xa9, 0xa9, 0xa9)),
    ("darkgrey", Color::new(0xa9, 0xa9, 0xa9)),
    ("red", Color::new(0xff, 0x00, 0x00)),
    ("maroon", Color::new(0x80, 0x00, 0x00)),
    ("orange", Color::new(0xff, 0xa5, 0x00)),
    ("yellow", Color::new(0xff, 0xff, 0x00)),
    ("olive", Color::new(0x80, 0x80, 0x00)),
    ("lime", Color::new(0x00, 0xff, 0x00)),
    ("green", Color::new(0x00, 0x80, 0x00)),
    ("teal", Color::new(0x00, 0x80, 0x80)),
    ("aqua", Color::new(0x00, 0xff, 0xff)),
    ("cyan", Color::new(0x00, 0xff, 0xff)),
    ("blue", Color::new(0x00, 0x00, 0xff)),
    ("navy", Color::new(0x00, 0x00, 0x80)),
    ("fuchsia", Color::new(0xff, 0x00, 0xff)),
    ("magenta", Color::new(0xff, 0x00, 0xff)),
    ("purple", Color::new(0x80, 0x00, 0x80)),
];

impl FromStr for Color {
    type Err = DialError;

    /// Accepts basic CSS names, `#rgb`, `#rrggbb` and `rgb(r, g, b)`.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let invalid = || DialError::InvalidColor {
            raw: raw.to_string(),
        };
        let text = raw.trim().to_ascii_lowercase();

        if let Some(hex) = text.strip_prefix('#') {
            if !hex.chars().all(|c| c.is_ascii_hexdigit()) {
                return Err(invalid());
            }
            let channel = |s: &str| u8::from_str_radix(s, 16).map_err(|_| invalid());
            return match hex.len() {
                3 => {
                    let expand = |i: usize| channel(&hex[i..i + 1]).map(|v| v * 0x11);
                    Ok(Color::new(expand(0)?, expand(1)?, expand(2)?))
                }
                6 => Ok(Color::new(
                    channel(&hex[0..2])?,
                    channel(&hex[2..4])?,
                    channel(&hex[4..6])?,
                )),
                _ => Err(invalid()),
            };
        }

        if let Some(args) = text
            .strip_prefix("rgb(")
            .and_then(|rest| rest.strip_suffix(')'))
        {
            let channels: Vec<u8> = args
                .split(',')
                .map(|part| part.trim().parse::<u8>())
                .collect::<Result<_, _>>()
                .map_err(|_| invalid())?;
            return match channels[..] {
                [r, g, b] => Ok(Color::new(r, g, b)),
                _ => Err(invalid()),
            };
        }

        NAMED_COLORS
            .iter()
            .find(|(name, _)| *name == text)
            .map(|(_, color)| *color)
            .ok_or_else(invalid)
    }
}

// ============================================================================
// VIEWER CONFIGURATION
// ============================================================================

/// Contents of a viewer TOML file.
///
/// ```toml
/// value = 42
///
/// [style]
/// radius = 40
/// stroke-width = 8
/// color = "orange"
/// inactive-color = "#dddddd"
///
/// [window]
/// size = 400
/// max_framerate = 30.0
/// background = "white"
/// ```
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ViewerConfig {
    #[serde(deserialize_with = "scalar_as_text")]
    pub value: Option<String>,
    pub style: StyleHints,
    pub window: WindowConfig,
}

impl ViewerConfig {
    pub fn from_toml_str(text: &str) -> Result<Self, toml::de::Error> {
        toml::from_str(text)
    }
}

/// Configuration for the viewer window
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    /// Logical width and height of the square window.
    pub size: u32,
    pub max_framerate: f64,
    pub background: String,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            size: 300,
            max_framerate: 60.0,
            background: "white".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn named_and_hex_colors() {
        assert_eq!("blue".parse::<Color>().unwrap(), Color::new(0, 0, 0xff));
        assert_eq!(" Gray ".parse::<Color>().unwrap(), Color::new(0x80, 0x80, 0x80));
        assert_eq!("#ccc".parse::<Color>().unwrap(), Color::new(0xcc, 0xcc, 0xcc));
        assert_eq!("#1a2B3c".parse::<Color>().unwrap(), Color::new(0x1a, 0x2b, 0x3c));
        assert_eq!(
            "rgb(10, 20, 30)".parse::<Color>().unwrap(),
            Color::new(10, 20, 30)
        );
    }

    #[test]
    fn bad_colors_are_rejected() {
        for raw in ["", "#12", "#ggg", "rgb(1,2)", "rgb(1,2,300)", "chartreuse-ish"] {
            assert!(
                matches!(raw.parse::<Color>(), Err(DialError::InvalidColor { .. })),
                "{raw}"
            );
        }
        assert_eq!(Color::parse_or("nope", Color::new(1, 2, 3)), Color::new(1, 2, 3));
    }

    #[test]
    fn viewer_config_from_toml() {
        let config = ViewerConfig::from_toml_str(
            r##"
            value = 42

            [style]
            radius = 40
            inactive-color = "#ddd"

            [window]
            size = 400
            "##,
        )
        .unwrap();
        assert_eq!(config.value.as_deref(), Some("42"));
        assert_eq!(config.style.radius.as_deref(), Some("40"));
        assert_eq!(config.style.inactive_color.as_deref(), Some("#ddd"));
        assert_eq!(config.window.size, 400);
        assert_eq!(config.window.max_framerate, 60.0);
        assert_eq!(config.window.background, "white");
    }

    #[test]
    fn value_accepts_any_scalar() {
        let text = ViewerConfig::from_toml_str(r#"value = "65%""#).unwrap();
        assert_eq!(text.value.as_deref(), Some("65%"));

        let float = ViewerConfig::from_toml_str("value = 12.5").unwrap();
        assert_eq!(float.value.as_deref(), Some("12.5"));

        let hints = ViewerConfig::from_toml_str("[style]\nstroke-width = 2.5").unwrap();
        assert_eq!(hints.style.stroke_width.as_deref(), Some("2.5"));
    }

    #[test]
    fn empty_config_uses_defaults() {
        let config = ViewerConfig::from_toml_str("").unwrap();
        assert!(config.value.is_none());
        assert_eq!(config.style, StyleHints::default());
        assert_eq!(config.window.size, 300);
    }

    #[test]
    fn options_builder() {
        let options = DialOptions::builder().value("30").build();
        assert_eq!(options.value.as_deref(), Some("30"));
        assert_eq!(options.style, StyleHints::default());
    }
}
