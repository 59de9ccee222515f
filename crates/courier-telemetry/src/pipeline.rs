//! The enrichment pipeline.
//!
//! Every record, whether it comes from a [`Logger`](crate::Logger) or from a
//! `tracing` event, passes through the same ordered list of processors
//! before it is rendered. The standard pipeline adds, in order:
//!
//! | Key | Value |
//! |-----|-------|
//! | `timestamp` | ISO-8601 UTC instant |
//! | `level` | lowercase level name |
//! | `logger` | logger name |
//! | `process_id` | OS process id |
//! | `request_id` | current request id, only when one is bound |

use chrono::{SecondsFormat, Utc};
use serde_json::{Map, Value};

use crate::context;
use crate::level::Level;

/// Standard record field names.
pub mod fields {
    /// The log message.
    pub const EVENT: &str = "event";

    /// Creation instant.
    pub const TIMESTAMP: &str = "timestamp";

    /// Level name.
    pub const LEVEL: &str = "level";

    /// Logger name.
    pub const LOGGER: &str = "logger";

    /// OS process id.
    pub const PROCESS_ID: &str = "process_id";

    /// Correlation id.
    pub const REQUEST_ID: &str = "request_id";
}

/// A log record on its way through the pipeline.
#[derive(Debug, Clone, PartialEq)]
pub struct LogRecord {
    level: Level,
    logger: String,
    fields: Map<String, Value>,
}

impl LogRecord {
    /// Creates a record holding only its event message.
    pub fn new(level: Level, logger: impl Into<String>, event: impl Into<String>) -> Self {
        let mut fields = Map::new();
        fields.insert(fields::EVENT.to_string(), Value::String(event.into()));
        Self {
            level,
            logger: logger.into(),
            fields,
        }
    }

    /// Returns the record with an extra field.
    #[must_use]
    pub fn with_field(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Sets a field, replacing any earlier value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.fields.insert(key.into(), value.into());
    }

    /// Returns the severity.
    pub fn level(&self) -> Level {
        self.level
    }

    /// Returns the name of the logger that produced the record.
    pub fn logger(&self) -> &str {
        &self.logger
    }

    /// Returns the event message.
    pub fn event(&self) -> Option<&str> {
        self.fields.get(fields::EVENT).and_then(Value::as_str)
    }

    /// Returns a field.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Returns all fields in insertion order.
    pub fn fields(&self) -> &Map<String, Value> {
        &self.fields
    }
}

/// One enrichment step.
pub trait Processor: Send + Sync {
    /// Adds or rewrites fields on the record.
    fn process(&self, record: &mut LogRecord);
}

impl<F> Processor for F
where
    F: Fn(&mut LogRecord) + Send + Sync,
{
    fn process(&self, record: &mut LogRecord) {
        self(record);
    }
}

/// Stamps the current UTC time.
#[derive(Debug, Clone, Copy, Default)]
pub struct TimeStamper;

impl Processor for TimeStamper {
    fn process(&self, record: &mut LogRecord) {
        let now = Utc::now().to_rfc3339_opts(SecondsFormat::Micros, true);
        record.insert(fields::TIMESTAMP, now);
    }
}

/// Adds the level name.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddLogLevel;

impl Processor for AddLogLevel {
    fn process(&self, record: &mut LogRecord) {
        let level = record.level().as_str();
        record.insert(fields::LEVEL, level);
    }
}

/// Adds the logger name.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddLoggerName;

impl Processor for AddLoggerName {
    fn process(&self, record: &mut LogRecord) {
        let logger = record.logger().to_string();
        record.insert(fields::LOGGER, logger);
    }
}

/// Adds the OS process id.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddProcessId;

impl Processor for AddProcessId {
    fn process(&self, record: &mut LogRecord) {
        record.insert(fields::PROCESS_ID, std::process::id());
    }
}

/// Adds the request id bound to the current task.
///
/// Leaves the record untouched when no id is bound.
#[derive(Debug, Clone, Copy, Default)]
pub struct AddRequestId;

impl Processor for AddRequestId {
    fn process(&self, record: &mut LogRecord) {
        if let Some(request_id) = context::request_id() {
            record.insert(fields::REQUEST_ID, request_id);
        }
    }
}

/// An ordered list of processors.
#[derive(Default)]
pub struct Pipeline {
    processors: Vec<Box<dyn Processor>>,
}

impl Pipeline {
    /// Creates an empty pipeline.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates the standard enrichment pipeline.
    #[must_use]
    pub fn standard() -> Self {
        Self::new()
            .with(TimeStamper)
            .with(AddLogLevel)
            .with(AddLoggerName)
            .with(AddProcessId)
            .with(AddRequestId)
    }

    /// Appends a processor.
    #[must_use]
    pub fn with(mut self, processor: impl Processor + 'static) -> Self {
        self.processors.push(Box::new(processor));
        self
    }

    /// Runs every processor over the record in order.
    pub fn run(&self, record: &mut LogRecord) {
        for processor in &self.processors {
            processor.process(record);
        }
    }

    /// Returns the number of processors.
    pub fn len(&self) -> usize {
        self.processors.len()
    }

    /// Returns true if the pipeline has no processors.
    pub fn is_empty(&self) -> bool {
        self.processors.is_empty()
    }
}

impl std::fmt::Debug for Pipeline {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Pipeline")
            .field("processors", &self.processors.len())
            .finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn enriched(record: LogRecord) -> LogRecord {
        let mut record = record;
        Pipeline::standard().run(&mut record);
        record
    }

    #[test]
    fn test_standard_pipeline_adds_fields() {
        let record = enriched(LogRecord::new(Level::Warning, "scores", "slow response"));

        assert_eq!(record.event(), Some("slow response"));
        assert_eq!(record.get("level").unwrap(), "warning");
        assert_eq!(record.get("logger").unwrap(), "scores");
        assert_eq!(record.get("process_id").unwrap(), &Value::from(std::process::id()));

        let timestamp = record.get("timestamp").and_then(Value::as_str).unwrap();
        assert!(chrono::DateTime::parse_from_rfc3339(timestamp).is_ok());
        assert!(timestamp.ends_with('Z'));
    }

    #[test]
    fn test_request_id_omitted_when_unbound() {
        let record = enriched(LogRecord::new(Level::Info, "root", "hello"));
        assert!(record.get("request_id").is_none());
    }

    #[test]
    fn test_request_id_added_when_bound() {
        let record = context::scope_sync(Some("req-7".to_string()), || {
            enriched(LogRecord::new(Level::Info, "root", "hello"))
        });
        assert_eq!(record.get("request_id").unwrap(), "req-7");
    }

    #[test]
    fn test_fields_keep_insertion_order() {
        let record = enriched(
            LogRecord::new(Level::Error, "users", "failed").with_field("status", 404),
        );

        let keys: Vec<&str> = record.fields().keys().map(String::as_str).collect();
        assert_eq!(
            keys,
            ["event", "status", "timestamp", "level", "logger", "process_id"]
        );
    }

    #[test]
    fn test_closure_processor() {
        let pipeline = Pipeline::new().with(|record: &mut LogRecord| record.insert("service", "bancho"));
        let mut record = LogRecord::new(Level::Debug, "root", "tick");
        pipeline.run(&mut record);

        assert_eq!(pipeline.len(), 1);
        assert_eq!(record.get("service").unwrap(), "bancho");
    }
}
