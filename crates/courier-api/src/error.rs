//! Error types for resource clients.

use courier_core::CodecError;
use courier_http::HttpError;
use thiserror::Error;

/// Result type for resource client operations.
pub type ApiResult<T> = Result<T, ApiError>;

/// Failures that abort a resource operation.
///
/// A non-2xx reply from a service is not an `ApiError`: operations log it
/// and return `Ok(None)` (or `Ok(false)`).
#[derive(Debug, Error)]
pub enum ApiError {
    /// The exchange itself failed.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// A successful reply could not be decoded.
    #[error(transparent)]
    Decode(#[from] CodecError),
}

impl ApiError {
    /// Get the error category for logs.
    pub fn category(&self) -> &'static str {
        match self {
            Self::Http(err) => err.category(),
            Self::Decode(_) => "decode",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_categories() {
        let err: ApiError = HttpError::timeout("5s elapsed").into();
        assert_eq!(err.category(), "timeout");

        let err: ApiError = CodecError::missing_field("data").into();
        assert_eq!(err.category(), "decode");
        assert!(err.to_string().contains("data"));
    }
}
