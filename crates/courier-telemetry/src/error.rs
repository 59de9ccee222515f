//! Telemetry error types.

use thiserror::Error;

/// Result type for telemetry operations.
pub type TelemetryResult<T> = Result<T, TelemetryError>;

/// Errors that can occur during telemetry operations.
#[derive(Debug, Error)]
pub enum TelemetryError {
    /// Failed to initialize logging.
    #[error("Failed to initialize logging: {0}")]
    LoggingInit(String),

    /// Unrecognized log level.
    #[error("Invalid log level: {0}")]
    InvalidLevel(String),

    /// A request id was set outside of any request scope.
    #[error("No request scope is active on this task")]
    NoRequestScope,
}
