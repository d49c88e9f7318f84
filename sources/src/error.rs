//! Error types for building sources from text.
//!
//! Covers option-file syntax problems and flat-document parsing failures.

use thiserror::Error;

/// Errors that can occur while turning text into a source.
#[derive(Debug, Error)]
pub enum SourceError {
    /// A line of an option file could not be understood.
    #[error("{source_name} line {line}: {message}")]
    Syntax {
        /// Name given to the option file.
        source_name: String,
        /// 1-based line number.
        line: usize,
        /// What was wrong with the line.
        message: String,
    },

    /// A document key mapped to a nested mapping or sequence.
    #[error("{source_name}: value for {key} must be a scalar")]
    NotFlat {
        /// Name given to the document.
        source_name: String,
        /// Offending key.
        key: String,
    },

    /// The document root is not a mapping.
    #[error("{0}: top level must be a mapping of option names to values")]
    NotMapping(String),

    /// JSON parsing failure.
    #[error("JSON error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// YAML parsing failure.
    #[error("YAML error: {0}")]
    YamlError(#[from] serde_yaml::Error),
}

/// Convenience alias for results with [`SourceError`].
pub type Result<T> = std::result::Result<T, SourceError>;
