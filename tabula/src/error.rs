//! Error types.
//!
//! Interaction handlers never fail; they ignore events that do not apply.
//! These errors only surface where a host hands us text to decode.

use thiserror::Error;

/// A length string without a usable numeric magnitude.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum LengthError {
    /// The string was empty or whitespace.
    #[error("Length is empty")]
    Empty,

    /// The string does not start with a number.
    #[error("Length '{0}' has no numeric magnitude")]
    NotNumeric(String),
}

/// Errors decoding host-supplied configuration.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The JSON document could not be decoded.
    #[error("Invalid table configuration: {0}")]
    Json(#[from] serde_json::Error),

    /// A column list contained the same explicit id twice.
    #[error("Duplicate column id '{0}'")]
    DuplicateId(String),
}
