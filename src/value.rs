use tracing::debug;

use crate::error::DialError;

/// Gauge reading, always an integer in `0..=100`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Value(u8);

impl Value {
    pub const MIN: Value = Value(0);
    pub const MAX: Value = Value(100);

    /// Clamps any integer into range.
    pub fn new(raw: i64) -> Self {
        Self(raw.clamp(Self::MIN.0 as i64, Self::MAX.0 as i64) as u8)
    }

    pub const fn get(self) -> u8 {
        self.0
    }

    /// Resolves a raw declarative value.
    ///
    /// The input is read with integer-prefix semantics: leading whitespace
    /// and an optional sign are accepted, then as many digits as are
    /// present, so `"42.9"` reads as 42 and `"7px"` as 7. A parsed number
    /// outside the range is clamped and traced at debug level. Absent input,
    /// or input with no leading digits, is an error; callers substitute
    /// [`Value::MIN`].
    pub fn parse(raw: Option<&str>) -> Result<Self, DialError> {
        let raw = raw.unwrap_or_default();
        parse_int_prefix(raw)
            .map(|parsed| {
                let value = Self::new(parsed);
                if i64::from(value.0) != parsed {
                    debug!(raw, parsed, clamped = value.0, "value clamped into range");
                }
                value
            })
            .ok_or_else(|| DialError::InvalidValue {
                raw: raw.to_string(),
            })
    }
}

impl From<Value> for f64 {
    fn from(value: Value) -> Self {
        f64::from(value.0)
    }
}

impl std::fmt::Display for Value {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Reads the leading integer of `raw`, saturating on overflow.
///
/// A `0x`/`0X` prefix after the sign switches to hexadecimal.
fn parse_int_prefix(raw: &str) -> Option<i64> {
    let s = raw.trim_start();
    let (negative, s) = match s.as_bytes().first() {
        Some(b'-') => (true, &s[1..]),
        Some(b'+') => (false, &s[1..]),
        _ => (false, s),
    };
    let (radix, digits) = match s.get(..2) {
        Some("0x") | Some("0X") => (16, &s[2..]),
        _ => (10, s),
    };

    let mut seen = false;
    let mut acc: i64 = 0;
    for c in digits.chars() {
        let Some(d) = c.to_digit(radix) else {
            break;
        };
        seen = true;
        acc = acc.saturating_mul(radix as i64).saturating_add(d as i64);
    }

    seen.then(|| if negative { -acc } else { acc })
}
