//! Circular dial gauge drawn as two SVG arcs.
//!
//! A [`DialWidget`] turns a declarative value (0–100) and a few style hints
//! into a [`DialFrame`]: a 300° background track and a foreground indicator
//! whose end angle moves linearly with the value. Frames serialise to SVG
//! or to a self-contained HTML element, and can be rasterised into a pixel
//! buffer for the desktop [`Viewer`].
//!
//! ```
//! use dial_meter::{DialOptions, DialWidget, StyleHints};
//!
//! let mut dial = DialWidget::new(DialOptions::builder().value("50").build());
//! dial.on_mounted(StyleHints::from_declarations("color: teal"));
//! assert!(dial.frame().foreground.d.ends_with("A 45 45 0 0 1 50 5"));
//! ```

// ============================================================================
// MODULES
// ============================================================================

pub mod config;
pub mod error;
pub mod geometry;
pub mod raster;
pub mod render;
pub mod style;
pub mod value;
pub mod viewer;
mod widget;

// ============================================================================
// PUBLIC API
// ============================================================================

pub use config::{Color, DialOptions, ViewerConfig, WindowConfig};
pub use error::DialError;
pub use geometry::{end_angle, Arc, Point};
pub use render::{ArcPath, DialFrame};
pub use style::StyleHints;
pub use value::Value;
pub use viewer::{DialUpdate, Viewer};
pub use widget::DialWidget;
