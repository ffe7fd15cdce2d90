// ============================================================================
// DIAL WIDGET
// ============================================================================

use tracing::{debug, warn};

use crate::config::{
    DialOptions, CENTER, DEFAULT_FOREGROUND_COLOR, DEFAULT_INACTIVE_COLOR, DEFAULT_RADIUS,
    DEFAULT_STROKE_WIDTH,
};
use crate::error::DialError;
use crate::geometry::{end_angle, Arc, Point, TRACK_END_DEG, TRACK_START_DEG};
use crate::render::{ArcPath, DialFrame};
use crate::style::{present, parse_length, StyleHints, RADIUS_HINT, STROKE_WIDTH_HINT};
use crate::value::Value;

/// A circular gauge showing a value between 0 and 100.
///
/// The widget keeps two observed inputs, the raw declarative value and the
/// current style context, and rebuilds its whole [`DialFrame`] from them on
/// every draw. Invalid input never fails a draw: it is logged, recorded in
/// [`DialWidget::diagnostics`] and replaced by a safe value.
#[derive(Debug, Clone)]
pub struct DialWidget {
    raw_value: Option<String>,
    style: StyleHints,

    value: Value,
    radius: f64,
    stroke_width: f64,
    center: Point,
    foreground_color: String,
    inactive_color: String,

    frame: DialFrame,
    diagnostics: Vec<DialError>,
}

impl Default for DialWidget {
    fn default() -> Self {
        Self::new(DialOptions::default())
    }
}

impl DialWidget {
    /// Creates an unmounted widget. Nothing is resolved until the first draw;
    /// until then the frame shows the defaults at value 0.
    pub fn new(options: DialOptions) -> Self {
        Self {
            raw_value: options.value,
            style: options.style,
            value: Value::MIN,
            radius: DEFAULT_RADIUS,
            stroke_width: DEFAULT_STROKE_WIDTH,
            center: CENTER,
            foreground_color: DEFAULT_FOREGROUND_COLOR.to_string(),
            inactive_color: DEFAULT_INACTIVE_COLOR.to_string(),
            frame: build_frame(
                Value::MIN,
                CENTER,
                DEFAULT_RADIUS,
                DEFAULT_STROKE_WIDTH,
                DEFAULT_FOREGROUND_COLOR,
                DEFAULT_INACTIVE_COLOR,
            ),
            diagnostics: Vec::new(),
        }
    }

    // ------------------------------------------------------------------------
    // Lifecycle hooks
    // ------------------------------------------------------------------------

    /// Called once the widget is inserted into a host tree.
    pub fn on_mounted(&mut self, style: StyleHints) -> &DialFrame {
        self.style = style;
        self.draw()
    }

    /// Called when the widget moves to a new parent context.
    pub fn on_adopted(&mut self, style: StyleHints) -> &DialFrame {
        self.style = style;
        self.draw()
    }

    pub fn on_value_changed(&mut self, raw: impl Into<String>) -> &DialFrame {
        self.set_value(raw)
    }

    /// Called when class or inline style changes alter the style context.
    pub fn on_style_context_changed(&mut self, style: StyleHints) -> &DialFrame {
        self.style = style;
        self.draw()
    }

    // ------------------------------------------------------------------------
    // Operations
    // ------------------------------------------------------------------------

    /// Stores a new raw value and redraws.
    pub fn set_value(&mut self, raw: impl Into<String>) -> &DialFrame {
        self.raw_value = Some(raw.into());
        self.draw()
    }

    /// Applies every present hint. A numeric hint that does not parse is
    /// recorded and the current setting kept.
    pub fn refresh_style(&mut self, hints: &StyleHints) {
        if let Some(raw) = present(&hints.stroke_width) {
            match parse_length(raw) {
                Some(width) => self.stroke_width = width,
                None => self.record(DialError::InvalidStyleHint {
                    name: STROKE_WIDTH_HINT,
                    raw: raw.to_string(),
                }),
            }
        }

        if let Some(raw) = present(&hints.radius) {
            match parse_length(raw) {
                Some(radius) => self.radius = radius,
                None => self.record(DialError::InvalidStyleHint {
                    name: RADIUS_HINT,
                    raw: raw.to_string(),
                }),
            }
        }

        if let Some(color) = present(&hints.foreground_color) {
            self.foreground_color = color.to_string();
        }
        if let Some(color) = present(&hints.inactive_color) {
            self.inactive_color = color.to_string();
        }
    }

    /// Re-reads the style context, resolves the value and rebuilds both arcs.
    ///
    /// Diagnostics from the previous draw are discarded first.
    pub fn draw(&mut self) -> &DialFrame {
        self.diagnostics.clear();

        let style = std::mem::take(&mut self.style);
        self.refresh_style(&style);
        self.style = style;

        self.value = match Value::parse(self.raw_value.as_deref()) {
            Ok(value) => value,
            Err(err) => {
                self.record(err);
                Value::MIN
            }
        };

        self.frame = build_frame(
            self.value,
            self.center,
            self.radius,
            self.stroke_width,
            &self.foreground_color,
            &self.inactive_color,
        );
        debug!(
            value = self.value.get(),
            radius = self.radius,
            stroke_width = self.stroke_width,
            "dial redrawn"
        );
        &self.frame
    }

    fn record(&mut self, err: DialError) {
        warn!("{err}");
        self.diagnostics.push(err);
    }

    // ------------------------------------------------------------------------
    // Accessors
    // ------------------------------------------------------------------------

    pub fn value(&self) -> Value {
        self.value
    }

    pub fn raw_value(&self) -> Option<&str> {
        self.raw_value.as_deref()
    }

    pub fn style(&self) -> &StyleHints {
        &self.style
    }

    pub fn radius(&self) -> f64 {
        self.radius
    }

    pub fn stroke_width(&self) -> f64 {
        self.stroke_width
    }

    pub fn center(&self) -> Point {
        self.center
    }

    pub fn foreground_color(&self) -> &str {
        &self.foreground_color
    }

    pub fn inactive_color(&self) -> &str {
        &self.inactive_color
    }

    pub fn frame(&self) -> &DialFrame {
        &self.frame
    }

    /// Problems found since the current draw began.
    pub fn diagnostics(&self) -> &[DialError] {
        &self.diagnostics
    }
}

/// The track never depends on `value`; only the indicator does.
fn build_frame(
    value: Value,
    center: Point,
    radius: f64,
    stroke_width: f64,
    foreground_color: &str,
    inactive_color: &str,
) -> DialFrame {
    let track = Arc::new(TRACK_START_DEG, TRACK_END_DEG, center, radius);
    let indicator = Arc::new(TRACK_START_DEG, end_angle(value), center, radius);
    DialFrame {
        background: ArcPath::new(track, inactive_color, stroke_width),
        foreground: ArcPath::new(indicator, foreground_color, stroke_width),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn mounted(value: &str) -> DialWidget {
        let mut widget = DialWidget::new(DialOptions::builder().value(value).build());
        widget.on_mounted(StyleHints::default());
        widget
    }

    #[test]
    fn half_scale_frame() {
        let widget = mounted("50");
        let frame = widget.frame();
        assert_eq!(widget.value().get(), 50);
        assert_eq!(frame.foreground.arc.end_deg, 90.0);
        assert_eq!(frame.foreground.arc.large_arc_flag(), 0);
        assert!(frame.foreground.d.ends_with(" A 45 45 0 0 1 50 5"));
        assert_eq!(frame.foreground.stroke, "blue");
        assert_eq!(frame.background.stroke, "gray");
        assert_eq!(frame.foreground.stroke_width, 10.0);
        assert!(widget.diagnostics().is_empty());
    }

    #[test]
    fn full_and_empty_flags() {
        assert_eq!(mounted("0").frame().foreground.arc.large_arc_flag(), 0);
        assert_eq!(mounted("100").frame().foreground.arc.large_arc_flag(), 1);
        assert_eq!(mounted("100").frame().foreground.d, mounted("100").frame().background.d);
    }

    #[test]
    fn out_of_range_values_clamp_without_diagnostics() {
        let low = mounted("-20");
        assert_eq!(low.value(), Value::MIN);
        assert!(low.diagnostics().is_empty());

        let high = mounted("250");
        assert_eq!(high.value(), Value::MAX);
        assert!(high.diagnostics().is_empty());
    }

    #[test]
    fn non_numeric_value_resolves_to_zero() {
        let mut widget = mounted("75");
        widget.set_value("lots");
        assert_eq!(widget.value(), Value::MIN);
        assert_eq!(
            widget.diagnostics(),
            [DialError::InvalidValue {
                raw: "lots".to_string()
            }]
        );
        assert_eq!(widget.frame().foreground.arc.end_deg, 240.0);
    }

    #[test]
    fn missing_value_is_reported() {
        let mut widget = DialWidget::default();
        widget.on_mounted(StyleHints::default());
        assert_eq!(widget.value(), Value::MIN);
        assert_eq!(widget.diagnostics().len(), 1);
    }

    #[test]
    fn background_ignores_value() {
        let mut widget = mounted("10");
        let track = widget.frame().background.clone();
        widget.set_value("90");
        assert_eq!(widget.frame().background, track);
        assert_ne!(widget.frame().foreground.d, track.d);
    }

    #[test]
    fn style_hints_apply() {
        let mut widget = mounted("50");
        widget.on_style_context_changed(StyleHints::from_declarations(
            "--radius: 40; --stroke-width: 6px; color: red; --inactive-color: #eee",
        ));
        assert_eq!(widget.radius(), 40.0);
        assert_eq!(widget.stroke_width(), 6.0);
        let frame = widget.frame();
        assert_eq!(frame.foreground.stroke, "red");
        assert_eq!(frame.background.stroke, "#eee");
        assert_eq!(frame.background.stroke_width, 6.0);
        assert!(frame.foreground.d.ends_with(" A 40 40 0 0 1 50 10"), "{}", frame.foreground.d);
    }

    #[test]
    fn invalid_radius_keeps_previous() {
        let mut widget = mounted("50");
        widget.on_style_context_changed(StyleHints::builder().radius("30").build());
        assert_eq!(widget.radius(), 30.0);

        widget.on_style_context_changed(StyleHints::builder().radius("big").build());
        assert_eq!(widget.radius(), 30.0);
        assert_eq!(
            widget.diagnostics(),
            [DialError::InvalidStyleHint {
                name: RADIUS_HINT,
                raw: "big".to_string()
            }]
        );
        assert!(widget.frame().foreground.d.contains(" A 30 30 "));
    }

    #[test]
    fn invalid_stroke_width_keeps_default() {
        let mut widget = mounted("50");
        widget.refresh_style(&StyleHints::builder().stroke_width("-4").build());
        assert_eq!(widget.stroke_width(), DEFAULT_STROKE_WIDTH);
        assert_eq!(widget.diagnostics().len(), 1);
    }

    #[test]
    fn absent_hints_leave_settings() {
        let mut widget = mounted("50");
        widget.on_style_context_changed(StyleHints::builder().foreground_color("green").build());
        widget.on_adopted(StyleHints::default());
        assert_eq!(widget.foreground_color(), "green");
        assert_eq!(widget.radius(), DEFAULT_RADIUS);
    }

    #[test]
    fn draws_are_idempotent() {
        let mut widget = mounted("33");
        let first = widget.frame().clone();
        widget.draw();
        assert_eq!(widget.frame(), &first);
    }
}
