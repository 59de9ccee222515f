//! Request-id propagation and structured log enrichment for Courier.
//!
//! - **Context**: the current request id, bound per task with
//!   [`context::scope`] and read back by the enrichment pipeline
//! - **Pipeline**: ordered processors that stamp every record with
//!   timestamp, level, logger, process id and request id
//! - **Rendering**: colored console text when running locally, JSON lines
//!   everywhere else
//! - **Front door**: [`Logger`] with five severities, plus a `tracing`
//!   layer so events from other crates share the same format
//!
//! # Architecture
//!
//! ```text
//!  Logger::info(..)        tracing::info!(..)
//!        │                        │
//!        │                 EnrichmentLayer
//!        │                        │
//!        └──────────┬─────────────┘
//!                   ▼
//!          min level check
//!                   ▼
//!   Pipeline: timestamp → level → logger → process_id → request_id
//!                   ▼
//!        Renderer (Console | Json)
//!                   ▼
//!               LogSink
//! ```
//!
//! # Example
//!
//! ```rust
//! use courier_telemetry::{context, LogConfig, Logging};
//!
//! # tokio_test::block_on(async {
//! let logging = Logging::configure(&LogConfig::production());
//! let logger = logging.logger("users");
//!
//! context::scope(Some("req-1".to_string()), async {
//!     logger.info("account created", &[("account_id", 1000.into())]);
//! })
//! .await;
//! # });
//! ```

#![doc(html_root_url = "https://docs.rs/courier-telemetry/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod config;
pub mod context;
mod error;
mod layer;
mod level;
mod logging;
pub mod pipeline;
mod render;
mod sink;

pub use config::{LogConfig, APP_ENV, LOG_FILTER, LOG_LEVEL};
pub use context::{propagate, request_id, set_request_id, RequestId};
pub use error::{TelemetryError, TelemetryResult};
pub use layer::EnrichmentLayer;
pub use level::Level;
pub use logging::{Logger, Logging, LoggingBuilder, ROOT_LOGGER};
pub use pipeline::{LogRecord, Pipeline, Processor};
pub use render::{log_as_text, RenderMode, Renderer, LOCAL_ENVIRONMENT};
pub use sink::{LogSink, StderrSink};
