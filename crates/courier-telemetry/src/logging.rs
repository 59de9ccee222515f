//! The logging configurator and front door.
//!
//! [`Logging::configure`] is called once at startup. The returned handle
//! owns the enrichment pipeline, the renderer, the sink and the minimum
//! level; every [`Logger`] it hands out shares that state, so loggers
//! created at any point format identically.
//!
//! # Example
//!
//! ```rust,no_run
//! use courier_telemetry::{LogConfig, Logging};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let logging = Logging::configure(&LogConfig::from_env()?);
//! logging.install()?;
//!
//! let logger = logging.logger("scores");
//! logger.info("score submitted", &[("score_id", 1.into())]);
//! # Ok(())
//! # }
//! ```

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::util::SubscriberInitExt;
use tracing_subscriber::{EnvFilter, Layer};

use crate::config::LogConfig;
use crate::error::{TelemetryError, TelemetryResult};
use crate::layer::EnrichmentLayer;
use crate::level::Level;
use crate::pipeline::{LogRecord, Pipeline};
use crate::render::{RenderMode, Renderer};
use crate::sink::{LogSink, StderrSink};

/// Name of the default logger.
pub const ROOT_LOGGER: &str = "root";

struct Shared {
    pipeline: Pipeline,
    renderer: Renderer,
    sink: Arc<dyn LogSink>,
    min_level: Level,
    filter: Option<String>,
}

/// Configured logging state.
///
/// Cheap to clone; clones share the same state.
#[derive(Clone)]
pub struct Logging {
    shared: Arc<Shared>,
}

impl Logging {
    /// Configures logging to standard error.
    pub fn configure(config: &LogConfig) -> Self {
        Self::builder(config).build()
    }

    /// Configures logging to a custom sink.
    pub fn configure_with_sink(config: &LogConfig, sink: impl LogSink) -> Self {
        Self::builder(config).sink(sink).build()
    }

    /// Starts a builder for finer control.
    pub fn builder(config: &LogConfig) -> LoggingBuilder {
        LoggingBuilder::new(config)
    }

    /// Returns a named logger.
    pub fn logger(&self, name: impl Into<String>) -> Logger {
        Logger {
            name: Arc::from(name.into()),
            logging: self.clone(),
        }
    }

    /// Returns the logger named `root`.
    pub fn root(&self) -> Logger {
        self.logger(ROOT_LOGGER)
    }

    /// Returns the minimum level.
    pub fn min_level(&self) -> Level {
        self.shared.min_level
    }

    /// Returns the output format.
    pub fn render_mode(&self) -> RenderMode {
        self.shared.renderer.mode()
    }

    /// Returns true if records at `level` are emitted.
    pub fn enabled(&self, level: Level) -> bool {
        level >= self.shared.min_level
    }

    /// Returns a `tracing` layer feeding events into this pipeline.
    pub fn layer(&self) -> EnrichmentLayer {
        EnrichmentLayer::new(self.clone())
    }

    /// Installs [`layer`](Self::layer) as the global `tracing` subscriber.
    ///
    /// # Errors
    ///
    /// Returns `TelemetryError::LoggingInit` if the filter directive is
    /// invalid or a global subscriber is already set.
    pub fn install(&self) -> TelemetryResult<()> {
        let layer = self.layer();

        match &self.shared.filter {
            Some(directive) => {
                let filter = EnvFilter::try_new(directive)
                    .map_err(|e| TelemetryError::LoggingInit(format!("Invalid log filter: {e}")))?;

                tracing_subscriber::registry()
                    .with(layer.with_filter(filter))
                    .try_init()
                    .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
            }
            None => {
                tracing_subscriber::registry()
                    .with(layer)
                    .try_init()
                    .map_err(|e| TelemetryError::LoggingInit(e.to_string()))?;
            }
        }

        Ok(())
    }

    /// Enriches, renders and writes a record.
    pub fn emit(&self, mut record: LogRecord) {
        if !self.enabled(record.level()) {
            return;
        }
        self.shared.pipeline.run(&mut record);
        let line = self.shared.renderer.render(&record);
        self.shared.sink.write_line(&line);
    }
}

impl fmt::Debug for Logging {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logging")
            .field("min_level", &self.shared.min_level)
            .field("renderer", &self.shared.renderer)
            .field("pipeline", &self.shared.pipeline)
            .finish_non_exhaustive()
    }
}

/// Builder for [`Logging`].
pub struct LoggingBuilder {
    config: LogConfig,
    sink: Arc<dyn LogSink>,
    pipeline: Pipeline,
    colors: bool,
}

impl LoggingBuilder {
    fn new(config: &LogConfig) -> Self {
        Self {
            config: config.clone(),
            sink: Arc::new(StderrSink),
            pipeline: Pipeline::standard(),
            colors: true,
        }
    }

    /// Sets the output sink.
    #[must_use]
    pub fn sink(mut self, sink: impl LogSink) -> Self {
        self.sink = Arc::new(sink);
        self
    }

    /// Replaces the enrichment pipeline.
    #[must_use]
    pub fn pipeline(mut self, pipeline: Pipeline) -> Self {
        self.pipeline = pipeline;
        self
    }

    /// Enables or disables console colors.
    #[must_use]
    pub fn colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Builds the logging state.
    pub fn build(self) -> Logging {
        let renderer = Renderer::new(self.config.render_mode()).with_colors(self.colors);
        Logging {
            shared: Arc::new(Shared {
                pipeline: self.pipeline,
                renderer,
                sink: self.sink,
                min_level: self.config.level,
                filter: self.config.filter,
            }),
        }
    }
}

impl fmt::Debug for LoggingBuilder {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("LoggingBuilder")
            .field("config", &self.config)
            .field("colors", &self.colors)
            .finish_non_exhaustive()
    }
}

/// A named handle for emitting records.
#[derive(Clone)]
pub struct Logger {
    name: Arc<str>,
    logging: Logging,
}

impl Logger {
    /// Returns the logger name.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Returns true if records at `level` are emitted.
    pub fn enabled(&self, level: Level) -> bool {
        self.logging.enabled(level)
    }

    /// Emits a record at `level` with extra fields.
    pub fn log(&self, level: Level, event: impl Into<String>, fields: &[(&str, Value)]) {
        if !self.enabled(level) {
            return;
        }
        let mut record = LogRecord::new(level, &*self.name, event);
        for (key, value) in fields {
            record.insert(*key, value.clone());
        }
        self.logging.emit(record);
    }

    /// Emits at debug level.
    pub fn debug(&self, event: impl Into<String>, fields: &[(&str, Value)]) {
        self.log(Level::Debug, event, fields);
    }

    /// Emits at info level.
    pub fn info(&self, event: impl Into<String>, fields: &[(&str, Value)]) {
        self.log(Level::Info, event, fields);
    }

    /// Emits at warning level.
    pub fn warning(&self, event: impl Into<String>, fields: &[(&str, Value)]) {
        self.log(Level::Warning, event, fields);
    }

    /// Emits at error level.
    pub fn error(&self, event: impl Into<String>, fields: &[(&str, Value)]) {
        self.log(Level::Error, event, fields);
    }

    /// Emits at critical level.
    pub fn critical(&self, event: impl Into<String>, fields: &[(&str, Value)]) {
        self.log(Level::Critical, event, fields);
    }
}

impl fmt::Debug for Logger {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Logger").field("name", &self.name).finish_non_exhaustive()
    }
}
