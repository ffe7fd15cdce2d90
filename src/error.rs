use thiserror::Error;

/// Problems found while resolving widget inputs.
///
/// None of these abort a draw. The widget logs them, keeps a safe value and
/// carries on; they are collected so callers can inspect what went wrong.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DialError {
    /// The declarative value could not be read as an integer.
    #[error("dial-meter: invalid value of attribute 'value': {raw:?}")]
    InvalidValue { raw: String },

    /// A numeric style hint was not a finite positive number.
    #[error("dial-meter: invalid value of style '{name}': {raw:?}")]
    InvalidStyleHint { name: &'static str, raw: String },

    /// A color string the rasteriser has no mapping for.
    #[error("dial-meter: unrecognised color {raw:?}")]
    InvalidColor { raw: String },
}
