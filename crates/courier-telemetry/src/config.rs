//! Logging configuration.

use crate::error::TelemetryResult;
use crate::level::Level;
use crate::render::{RenderMode, LOCAL_ENVIRONMENT};

/// Environment variable holding the deployment environment label.
pub const APP_ENV: &str = "APP_ENV";

/// Environment variable holding the minimum level.
pub const LOG_LEVEL: &str = "LOG_LEVEL";

/// Environment variable holding a `tracing` filter directive.
pub const LOG_FILTER: &str = "LOG_FILTER";

/// Logging configuration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogConfig {
    /// Deployment environment label (e.g., "local", "staging", "production").
    pub environment: String,

    /// Records below this level are dropped.
    pub level: Level,

    /// Optional `tracing` filter directive for events from other crates
    /// (e.g., "hyper=warn,reqwest=info"). Applied by
    /// [`Logging::install`](crate::Logging::install).
    pub filter: Option<String>,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self::production()
    }
}

impl LogConfig {
    /// Creates a local development configuration with console output.
    #[must_use]
    pub fn local() -> Self {
        Self {
            environment: LOCAL_ENVIRONMENT.to_string(),
            level: Level::Debug,
            filter: None,
        }
    }

    /// Creates a production configuration with JSON output.
    #[must_use]
    pub fn production() -> Self {
        Self {
            environment: "production".to_string(),
            level: Level::Info,
            filter: None,
        }
    }

    /// Reads `APP_ENV`, `LOG_LEVEL` and `LOG_FILTER` from the process
    /// environment.
    pub fn from_env() -> TelemetryResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from a variable lookup, starting from
    /// [`LogConfig::production`].
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> TelemetryResult<Self> {
        let mut config = Self::production();

        if let Some(environment) = lookup(APP_ENV) {
            config.environment = environment;
        }
        if let Some(level) = lookup(LOG_LEVEL) {
            config.level = level.parse()?;
        }
        config.filter = lookup(LOG_FILTER).filter(|directive| !directive.trim().is_empty());

        Ok(config)
    }

    /// Sets the minimum level.
    #[must_use]
    pub fn with_level(mut self, level: Level) -> Self {
        self.level = level;
        self
    }

    /// Sets the `tracing` filter directive.
    #[must_use]
    pub fn with_filter(mut self, filter: impl Into<String>) -> Self {
        self.filter = Some(filter.into());
        self
    }

    /// Returns the output format for this environment.
    pub fn render_mode(&self) -> RenderMode {
        RenderMode::for_environment(&self.environment)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::TelemetryError;
    use std::collections::HashMap;

    #[test]
    fn test_default_config() {
        let config = LogConfig::default();
        assert_eq!(config.level, Level::Info);
        assert_eq!(config.render_mode(), RenderMode::Json);
    }

    #[test]
    fn test_local_config() {
        let config = LogConfig::local();
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.render_mode(), RenderMode::Console);
    }

    #[test]
    fn test_from_lookup() {
        let vars: HashMap<&str, &str> = HashMap::from([
            (APP_ENV, "local"),
            (LOG_LEVEL, "WARNING"),
            (LOG_FILTER, "reqwest=info"),
        ]);
        let config = LogConfig::from_lookup(|key| vars.get(key).map(|v| (*v).to_string())).unwrap();

        assert_eq!(config.environment, "local");
        assert_eq!(config.level, Level::Warning);
        assert_eq!(config.filter.as_deref(), Some("reqwest=info"));
    }

    #[test]
    fn test_from_lookup_numeric_level() {
        let config = LogConfig::from_lookup(|key| (key == LOG_LEVEL).then(|| "10".to_string())).unwrap();
        assert_eq!(config.level, Level::Debug);
        assert_eq!(config.environment, "production");
    }

    #[test]
    fn test_from_lookup_rejects_bad_level() {
        let result = LogConfig::from_lookup(|key| (key == LOG_LEVEL).then(|| "chatty".to_string()));
        assert!(matches!(result, Err(TelemetryError::InvalidLevel(_))));
    }

    #[test]
    fn test_blank_filter_is_ignored() {
        let config = LogConfig::from_lookup(|key| (key == LOG_FILTER).then(|| "  ".to_string())).unwrap();
        assert_eq!(config.filter, None);
    }
}
