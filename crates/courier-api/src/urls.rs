//! Base URLs of the backend services.

/// Default base URL of the beatmaps service.
pub const BEATMAPS_SERVICE_URL: &str = "http://beatmaps-service";

/// Default base URL of the chat service.
pub const CHAT_SERVICE_URL: &str = "http://chat-service";

/// Default base URL of the scores service.
pub const SCORES_SERVICE_URL: &str = "http://scores-service";

/// Default base URL of the users service.
pub const USERS_SERVICE_URL: &str = "http://users-service";

/// Where each service is reached.
///
/// Defaults to the in-cluster host aliases. Each entry can be overridden by
/// the environment variable of the same name as its default constant.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceUrls {
    /// Beatmaps service.
    pub beatmaps: String,
    /// Chat service.
    pub chat: String,
    /// Scores service.
    pub scores: String,
    /// Users service.
    pub users: String,
}

impl Default for ServiceUrls {
    fn default() -> Self {
        Self {
            beatmaps: BEATMAPS_SERVICE_URL.to_string(),
            chat: CHAT_SERVICE_URL.to_string(),
            scores: SCORES_SERVICE_URL.to_string(),
            users: USERS_SERVICE_URL.to_string(),
        }
    }
}

impl ServiceUrls {
    /// Reads overrides from the process environment.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the set from a variable lookup, keeping defaults for unset
    /// or blank entries.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let resolve = |key: &str, default: &str| {
            lookup(key)
                .map(|url| normalize_base(&url))
                .filter(|url| !url.is_empty())
                .unwrap_or_else(|| default.to_string())
        };

        Self {
            beatmaps: resolve("BEATMAPS_SERVICE_URL", BEATMAPS_SERVICE_URL),
            chat: resolve("CHAT_SERVICE_URL", CHAT_SERVICE_URL),
            scores: resolve("SCORES_SERVICE_URL", SCORES_SERVICE_URL),
            users: resolve("USERS_SERVICE_URL", USERS_SERVICE_URL),
        }
    }

    /// Points every service at one base URL, as when testing against a
    /// single gateway.
    pub fn all(base: &str) -> Self {
        let base = normalize_base(base);
        Self {
            beatmaps: base.clone(),
            chat: base.clone(),
            scores: base.clone(),
            users: base,
        }
    }
}

/// Trims whitespace and trailing slashes so paths can be appended.
pub(crate) fn normalize_base(url: &str) -> String {
    url.trim().trim_end_matches('/').to_string()
}
