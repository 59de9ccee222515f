//! Error types for service calls.

use courier_core::CodecError;
use thiserror::Error;

/// Result type for service calls.
pub type HttpResult<T> = Result<T, HttpError>;

/// Failures below the HTTP status line.
///
/// A non-2xx status is never an `HttpError`; it comes back as a regular
/// [`ServiceResponse`](crate::ServiceResponse).
#[derive(Debug, Error)]
pub enum HttpError {
    /// Connection, DNS or protocol failure.
    #[error("Transport error: {message}")]
    Transport {
        /// Error message.
        message: String,
    },

    /// The transport gave up waiting.
    #[error("Transport timeout: {message}")]
    Timeout {
        /// Error message.
        message: String,
    },

    /// The request could not be built.
    #[error("Invalid request: {message}")]
    InvalidRequest {
        /// Error message.
        message: String,
    },

    /// Configuration error.
    #[error("Configuration error: {message}")]
    Config {
        /// Error message.
        message: String,
    },

    /// The body could not be encoded.
    #[error(transparent)]
    Encode(#[from] CodecError),
}

impl HttpError {
    /// Create a transport error.
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Create a timeout error.
    pub fn timeout(message: impl Into<String>) -> Self {
        Self::Timeout {
            message: message.into(),
        }
    }

    /// Create an invalid request error.
    pub fn invalid_request(message: impl Into<String>) -> Self {
        Self::InvalidRequest {
            message: message.into(),
        }
    }

    /// Create a configuration error.
    pub fn config(message: impl Into<String>) -> Self {
        Self::Config {
            message: message.into(),
        }
    }

    /// Get the error category for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Transport { .. } => "transport",
            Self::Timeout { .. } => "timeout",
            Self::InvalidRequest { .. } => "invalid_request",
            Self::Config { .. } => "config",
            Self::Encode(_) => "encode",
        }
    }
}

impl From<reqwest::Error> for HttpError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            Self::timeout(err.to_string())
        } else if err.is_builder() {
            Self::invalid_request(err.to_string())
        } else {
            Self::transport(err.to_string())
        }
    }
}
