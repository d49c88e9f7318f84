//! Error type for typed value coercion.

use thiserror::Error;

/// A raw value could not be interpreted as the requested type.
///
/// Quote and escape handling never produces these; only the typed
/// coercions in [`coerce`](crate::coerce) do.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValueError {
    /// Not one of the recognized boolean spellings.
    #[error("invalid boolean value {0:?}")]
    InvalidBoolean(String),

    /// Not a signed 64-bit decimal integer.
    #[error("invalid integer value {0:?}")]
    InvalidInteger(String),

    /// Not an unsigned byte count with an optional k/M/G unit.
    #[error("invalid byte size {0:?}: expected a whole number with optional K, M or G suffix")]
    InvalidBytes(String),

    /// Not one of the allowed enum values.
    #[error("invalid value {value:?}; allowed values: {}", allowed.join(", "))]
    InvalidEnumValue {
        /// The unwrapped input.
        value: String,
        /// The allowed spellings, as given by the caller.
        allowed: Vec<String>,
    },

    /// The pattern failed to compile.
    #[error("invalid regular expression {pattern:?}: {message}")]
    InvalidRegex {
        /// The unwrapped pattern.
        pattern: String,
        /// Compiler diagnostic.
        message: String,
    },
}

/// Convenience alias for results with [`ValueError`].
pub type Result<T> = std::result::Result<T, ValueError>;
