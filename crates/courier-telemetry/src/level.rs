//! Log severity levels.

use std::fmt;
use std::str::FromStr;

use crate::error::TelemetryError;

/// Severity of a log record.
///
/// Ordinals follow the conventional 10-step scale so numeric thresholds
/// such as `LOG_LEVEL=30` keep working.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
#[repr(u8)]
pub enum Level {
    /// Diagnostic detail.
    Debug = 10,
    /// Normal operation.
    #[default]
    Info = 20,
    /// Something unexpected that was handled.
    Warning = 30,
    /// An operation failed.
    Error = 40,
    /// The process cannot continue normally.
    Critical = 50,
}

impl Level {
    /// All levels in ascending severity.
    pub const ALL: [Self; 5] = [
        Self::Debug,
        Self::Info,
        Self::Warning,
        Self::Error,
        Self::Critical,
    ];

    /// Returns the numeric ordinal.
    #[must_use]
    pub const fn ordinal(self) -> u8 {
        self as u8
    }

    /// Returns the lowercase name used in rendered records.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
            Self::Critical => "critical",
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Level {
    type Err = TelemetryError;

    /// Parses a level name (any case, `warn` and `fatal` accepted) or an
    /// exact ordinal.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let raw = s.trim();
        if let Ok(ordinal) = raw.parse::<u8>() {
            return Self::ALL
                .into_iter()
                .find(|level| level.ordinal() == ordinal)
                .ok_or_else(|| TelemetryError::InvalidLevel(s.to_string()));
        }

        match raw.to_ascii_lowercase().as_str() {
            "debug" => Ok(Self::Debug),
            "info" => Ok(Self::Info),
            "warning" | "warn" => Ok(Self::Warning),
            "error" => Ok(Self::Error),
            "critical" | "fatal" => Ok(Self::Critical),
            _ => Err(TelemetryError::InvalidLevel(s.to_string())),
        }
    }
}

impl From<tracing::Level> for Level {
    fn from(level: tracing::Level) -> Self {
        match level {
            tracing::Level::ERROR => Self::Error,
            tracing::Level::WARN => Self::Warning,
            tracing::Level::INFO => Self::Info,
            // TRACE has no counterpart and folds into debug.
            _ => Self::Debug,
        }
    }
}
