//! HTTP client configuration.

use std::time::Duration;

use crate::error::{HttpError, HttpResult};

/// Environment variable holding the transport timeout in milliseconds.
pub const TIMEOUT_ENV: &str = "COURIER_HTTP_TIMEOUT_MS";

/// Environment variable overriding the user agent.
pub const USER_AGENT_ENV: &str = "COURIER_HTTP_USER_AGENT";

/// Configuration for [`ReqwestTransport`](crate::ReqwestTransport).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpConfig {
    /// Overall transport timeout per exchange. `None` waits indefinitely.
    pub timeout: Option<Duration>,

    /// User agent sent with every request.
    pub user_agent: String,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            timeout: None,
            user_agent: format!("courier/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl HttpConfig {
    /// Reads overrides from the process environment.
    pub fn from_env() -> HttpResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds a configuration from a variable lookup.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> HttpResult<Self> {
        let mut config = Self::default();

        if let Some(raw) = lookup(TIMEOUT_ENV) {
            let millis: u64 = raw.trim().parse().map_err(|e| {
                HttpError::config(format!("{TIMEOUT_ENV} must be milliseconds: {e}"))
            })?;
            config.timeout = Some(Duration::from_millis(millis));
        }
        if let Some(user_agent) = lookup(USER_AGENT_ENV) {
            config.user_agent = user_agent;
        }

        Ok(config)
    }

    /// Sets the transport timeout.
    #[must_use]
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Sets the user agent.
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }
}
