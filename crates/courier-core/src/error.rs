//! Codec error types.

use thiserror::Error;

/// Result type for encode/decode operations.
pub type CodecResult<T> = Result<T, CodecError>;

/// Errors raised while encoding or decoding JSON.
///
/// Messages are kept as strings so that a decode outcome can be memoized
/// and handed out more than once.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CodecError {
    /// The value could not be serialized.
    #[error("Failed to encode JSON: {0}")]
    Encode(String),

    /// The input was not well-formed JSON, or did not match the target type.
    #[error("Failed to decode JSON: {0}")]
    Decode(String),

    /// A required top-level field was missing from the document.
    #[error("Missing field in JSON document: {0}")]
    MissingField(String),
}

impl CodecError {
    /// Creates an encode error.
    pub fn encode(err: impl std::fmt::Display) -> Self {
        Self::Encode(err.to_string())
    }

    /// Creates a decode error.
    pub fn decode(err: impl std::fmt::Display) -> Self {
        Self::Decode(err.to_string())
    }

    /// Creates a missing field error.
    pub fn missing_field(field: impl Into<String>) -> Self {
        Self::MissingField(field.into())
    }
}
