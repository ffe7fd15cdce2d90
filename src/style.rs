// ============================================================================
// STYLE HINTS
// ============================================================================

use bon::Builder;
use serde::{Deserialize, Deserializer};
use tracing::debug;

/// Declaration name of each recognised hint.
pub const STROKE_WIDTH_HINT: &str = "--stroke-width";
pub const RADIUS_HINT: &str = "--radius";
pub const FOREGROUND_COLOR_HINT: &str = "color";
pub const INACTIVE_COLOR_HINT: &str = "--inactive-color";

/// Presentation values consulted on every draw.
///
/// Every hint is the raw text the surrounding context supplied. `None` (or
/// an empty string) leaves the widget's current setting alone. Numeric
/// hints are validated by the widget, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Builder, Deserialize)]
#[serde(default, rename_all = "kebab-case")]
pub struct StyleHints {
    #[builder(into)]
    #[serde(deserialize_with = "scalar_as_text")]
    pub stroke_width: Option<String>,
    #[builder(into)]
    #[serde(deserialize_with = "scalar_as_text")]
    pub radius: Option<String>,
    #[builder(into)]
    #[serde(alias = "color")]
    pub foreground_color: Option<String>,
    #[builder(into)]
    pub inactive_color: Option<String>,
}

impl StyleHints {
    /// Reads a CSS declaration list such as
    /// `--radius: 40; color: red; --inactive-color: #ccc`.
    ///
    /// Unknown properties are skipped; a later declaration of the same
    /// property wins.
    pub fn from_declarations(text: &str) -> Self {
        let mut hints = Self::default();
        for declaration in text.split(';') {
            let Some((name, value)) = declaration.split_once(':') else {
                continue;
            };
            let name = name.trim();
            let value = Some(value.trim().to_string()).filter(|v| !v.is_empty());
            match name {
                STROKE_WIDTH_HINT => hints.stroke_width = value,
                RADIUS_HINT => hints.radius = value,
                FOREGROUND_COLOR_HINT => hints.foreground_color = value,
                INACTIVE_COLOR_HINT => hints.inactive_color = value,
                other => debug!(property = other, "ignoring unknown style property"),
            }
        }
        hints
    }

    /// Hints from `overrides` replace ours wherever they are present.
    pub fn merged_with(&self, overrides: &StyleHints) -> StyleHints {
        let pick = |ours: &Option<String>, theirs: &Option<String>| {
            present(theirs).or(present(ours)).map(str::to_string)
        };
        StyleHints {
            stroke_width: pick(&self.stroke_width, &overrides.stroke_width),
            radius: pick(&self.radius, &overrides.radius),
            foreground_color: pick(&self.foreground_color, &overrides.foreground_color),
            inactive_color: pick(&self.inactive_color, &overrides.inactive_color),
        }
    }
}

/// The hint's text, unless it is missing or blank.
pub(crate) fn present(hint: &Option<String>) -> Option<&str> {
    hint.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

/// Reads a length hint: a finite positive number with an optional `px`.
pub(crate) fn parse_length(raw: &str) -> Option<f64> {
    let raw = raw.trim();
    let number = raw.strip_suffix("px").unwrap_or(raw).trim_end();
    number
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v > 0.0)
}

/// Config files may write `radius = 40` as well as `radius = "40"`.
pub(crate) fn scalar_as_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(Option::<Scalar>::deserialize(deserializer)?.map(Scalar::into_text))
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Int(i64),
    Float(f64),
    Text(String),
}

impl Scalar {
    fn into_text(self) -> String {
        match self {
            Scalar::Int(v) => v.to_string(),
            Scalar::Float(v) => v.to_string(),
            Scalar::Text(v) => v,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn declarations_are_read() {
        let hints = StyleHints::from_declarations(
            " --stroke-width: 8 ; --radius:40px; color: red; --inactive-color: #ccc; margin: 0",
        );
        assert_eq!(hints.stroke_width.as_deref(), Some("8"));
        assert_eq!(hints.radius.as_deref(), Some("40px"));
        assert_eq!(hints.foreground_color.as_deref(), Some("red"));
        assert_eq!(hints.inactive_color.as_deref(), Some("#ccc"));
    }

    #[test]
    fn empty_declaration_is_absent() {
        let hints = StyleHints::from_declarations("--radius: ; color:");
        assert_eq!(hints, StyleHints::default());
    }

    #[test]
    fn builder_sets_only_given_hints() {
        let hints = StyleHints::builder().radius("30").foreground_color("green").build();
        assert_eq!(hints.radius.as_deref(), Some("30"));
        assert_eq!(hints.foreground_color.as_deref(), Some("green"));
        assert!(hints.stroke_width.is_none());
        assert!(hints.inactive_color.is_none());
    }

    #[test]
    fn merge_prefers_present_overrides() {
        let base = StyleHints::builder().radius("30").inactive_color("black").build();
        let overrides = StyleHints::builder().radius("20").inactive_color("  ").build();
        let merged = base.merged_with(&overrides);
        assert_eq!(merged.radius.as_deref(), Some("20"));
        assert_eq!(merged.inactive_color.as_deref(), Some("black"));
    }

    #[test]
    fn lengths() {
        assert_eq!(parse_length("40"), Some(40.0));
        assert_eq!(parse_length(" 12.5px "), Some(12.5));
        assert_eq!(parse_length("0"), None);
        assert_eq!(parse_length("-3"), None);
        assert_eq!(parse_length("wide"), None);
        assert_eq!(parse_length("inf"), None);
        assert_eq!(parse_length("NaN"), None);
    }

    #[test]
    fn toml_accepts_numbers_and_text() {
        let hints: StyleHints = toml::from_str(
            r#"
            stroke-width = 6
            radius = "38px"
            color = "orange"
            "#,
        )
        .unwrap();
        assert_eq!(hints.stroke_width.as_deref(), Some("6"));
        assert_eq!(hints.radius.as_deref(), Some("38px"));
        assert_eq!(hints.foreground_color.as_deref(), Some("orange"));
        assert!(hints.inactive_color.is_none());
    }
}
