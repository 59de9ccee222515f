//! # Courier API
//!
//! Typed clients for the sibling services:
//!
//! | Client | Service | Resources |
//! |--------|---------|-----------|
//! | [`BeatmapsClient`] | `beatmaps-service` | beatmaps, beatmapsets |
//! | [`ChatsClient`] | `chat-service` | chats, members |
//! | [`ScoresClient`] | `scores-service` | scores |
//! | [`UsersClient`] | `users-service` | accounts, stats, sessions, presences, queued packets, spectators |
//!
//! Every operation follows the same contract:
//!
//! - 2xx: the `data` field of the body is decoded and returned as `Some`
//! - any other status: one `error` record carrying `status` and `response`
//!   is logged and `None` (or `false`) is returned
//! - transport or decode failure: `Err(ApiError)`
//!
//! # Example
//!
//! ```rust,no_run
//! use courier_api::Clients;
//! use courier_telemetry::{LogConfig, Logging};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let logging = Logging::configure(&LogConfig::from_env()?);
//! let clients = Clients::from_env(&logging)?;
//!
//! if let Some(beatmap) = clients.beatmaps.get_beatmap(5).await? {
//!     println!("{} [{}]", beatmap.version, beatmap.mode.as_str());
//! }
//! # Ok(())
//! # }
//! ```

#![doc(html_root_url = "https://docs.rs/courier-api/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod beatmaps;
mod chats;
mod error;
mod resource;
mod scores;
pub mod urls;
mod users;

use courier_http::{HttpConfig, ServiceHttpClient};
use courier_telemetry::Logging;

pub use beatmaps::{BeatmapFilter, BeatmapsClient, BeatmapsetFilter};
pub use chats::{ChatFilter, ChatsClient, NewChat};
pub use error::{ApiError, ApiResult};
pub use scores::{NewScore, ScoreFilter, ScoresClient};
pub use urls::ServiceUrls;
pub use users::{NewPresence, NewStats, PresenceFilter, SessionFilter, UsersClient};

/// First page of a listing.
pub const DEFAULT_PAGE: i64 = 1;

/// Records per page of a listing.
pub const DEFAULT_PAGE_SIZE: i64 = 20;

/// One client per service, sharing a dispatcher and logging state.
#[derive(Debug, Clone)]
pub struct Clients {
    /// Beatmaps service.
    pub beatmaps: BeatmapsClient,
    /// Chat service.
    pub chats: ChatsClient,
    /// Scores service.
    pub scores: ScoresClient,
    /// Users service.
    pub users: UsersClient,
}

impl Clients {
    /// Creates every client over `http`.
    pub fn new(http: &ServiceHttpClient, logging: &Logging, urls: &ServiceUrls) -> Self {
        Self {
            beatmaps: BeatmapsClient::with_base_url(http.clone(), logging, &urls.beatmaps),
            chats: ChatsClient::with_base_url(http.clone(), logging, &urls.chat),
            scores: ScoresClient::with_base_url(http.clone(), logging, &urls.scores),
            users: UsersClient::with_base_url(http.clone(), logging, &urls.users),
        }
    }

    /// Creates every client from [`HttpConfig::from_env`] and
    /// [`ServiceUrls::from_env`].
    pub fn from_env(logging: &Logging) -> ApiResult<Self> {
        let http = ServiceHttpClient::new(&HttpConfig::from_env()?)?;
        Ok(Self::new(&http, logging, &ServiceUrls::from_env()))
    }
}
