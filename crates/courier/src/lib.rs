//! # Courier
//!
//! **Shared client library for the beatmaps, chat, scores and users services**
//!
//! Courier gives every service in the platform the same way to talk to its
//! siblings and the same way to log about it:
//!
//! - **Service calls** – one dispatcher that normalizes query params and JSON
//!   bodies and hands back a lazily decoded response envelope
//! - **Request correlation** – a task-local request id that every log record
//!   picks up automatically
//! - **Structured logging** – one enrichment pipeline rendered as colored
//!   console text locally and JSON lines everywhere else
//! - **Typed clients** – one client per sibling service
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use courier::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let logging = Logging::configure(&LogConfig::from_env()?);
//!     let clients = Clients::from_env(&logging)?;
//!     let log = logging.logger("main");
//!
//!     let beatmap = context::scope(Some(RequestId::new().to_string()), async {
//!         clients.beatmaps.get_beatmap(5).await
//!     })
//!     .await?;
//!
//!     if let Some(beatmap) = beatmap {
//!         log.info("Fetched beatmap", &[("version", beatmap.version.into())]);
//!     }
//!     Ok(())
//! }
//! ```
//!
//! ## Architecture
//!
//! ```text
//! BeatmapsClient / ChatsClient / ScoresClient / UsersClient
//!        │                                   │
//!        ▼                                   ▼ non-2xx
//! ServiceHttpClient ──► Transport       Logger ──► Pipeline ──► Renderer ──► LogSink
//!        │                                          ▲
//!        ▼                                          │
//! ServiceResponse (decoded once)          context::request_id()
//! ```

#![doc(html_root_url = "https://docs.rs/courier/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

// Re-export value normalization, codec and models
pub use courier_core as core;

// Re-export the dispatcher and transport
pub use courier_http as http;

// Re-export request context and logging
pub use courier_telemetry as telemetry;

// Re-export resource clients
pub use courier_api as api;

/// Prelude module for convenient imports.
///
/// # Example
///
/// ```rust
/// use courier::prelude::*;
/// ```
pub mod prelude {
    pub use courier_core::models::{
        Account, Action, Beatmap, Beatmapset, Chat, ChatUpdate, GameMode, Grade, Member,
        Presence, PresenceUpdate, QueuedPacket, RankedStatus, Score, Session, Spectator, Stats,
        Status,
    };
    pub use courier_core::{mapping, normalize, CodecError, Convertible, QueryParams};

    // Re-export dispatcher types
    pub use courier_http::{
        HttpConfig, HttpError, Method, ServiceCall, ServiceHttpClient, ServiceResponse,
    };

    // Re-export logging types
    pub use courier_telemetry::context;
    pub use courier_telemetry::{
        Level, LogConfig, Logger, Logging, RequestId, TelemetryError,
    };

    // Re-export resource clients
    pub use courier_api::{
        ApiError, ApiResult, BeatmapFilter, BeatmapsClient, BeatmapsetFilter, ChatFilter,
        ChatsClient, Clients, NewChat, NewPresence, NewScore, NewStats, PresenceFilter,
        ScoreFilter, ScoresClient, ServiceUrls, SessionFilter, UsersClient,
    };
}
