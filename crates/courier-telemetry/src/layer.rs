//! Bridge from `tracing` events into the enrichment pipeline.

use std::fmt;

use serde_json::{Map, Number, Value};
use tracing::field::{Field, Visit};
use tracing::{Event, Metadata, Subscriber};
use tracing_subscriber::layer::Context;
use tracing_subscriber::Layer;

use crate::level::Level;
use crate::logging::Logging;
use crate::pipeline::LogRecord;

/// A `tracing_subscriber` layer that renders events the same way as
/// [`Logger`](crate::Logger) records.
///
/// The event target becomes the logger name and the `message` field
/// becomes the event. Other fields are carried over as-is.
#[derive(Debug, Clone)]
pub struct EnrichmentLayer {
    logging: Logging,
}

impl EnrichmentLayer {
    /// Creates a layer writing through `logging`.
    pub fn new(logging: Logging) -> Self {
        Self { logging }
    }
}

impl<S> Layer<S> for EnrichmentLayer
where
    S: Subscriber,
{
    fn enabled(&self, metadata: &Metadata<'_>, _ctx: Context<'_, S>) -> bool {
        self.logging.enabled(Level::from(*metadata.level()))
    }

    fn on_event(&self, event: &Event<'_>, _ctx: Context<'_, S>) {
        let metadata = event.metadata();
        let level = Level::from(*metadata.level());
        if !self.logging.enabled(level) {
            return;
        }

        let mut visitor = FieldVisitor::default();
        event.record(&mut visitor);

        let mut record = LogRecord::new(level, metadata.target(), visitor.message.unwrap_or_default());
        for (key, value) in visitor.fields {
            record.insert(key, value);
        }
        self.logging.emit(record);
    }
}

#[derive(Default)]
struct FieldVisitor {
    message: Option<String>,
    fields: Map<String, Value>,
}

impl FieldVisitor {
    fn insert(&mut self, field: &Field, value: Value) {
        if field.name() == "message" {
            self.message = Some(match value {
                Value::String(text) => text,
                other => other.to_string(),
            });
        } else {
            self.fields.insert(field.name().to_string(), value);
        }
    }
}

impl Visit for FieldVisitor {
    fn record_f64(&mut self, field: &Field, value: f64) {
        let value = Number::from_f64(value).map_or(Value::Null, Value::Number);
        self.insert(field, value);
    }

    fn record_i64(&mut self, field: &Field, value: i64) {
        self.insert(field, Value::from(value));
    }

    fn record_u64(&mut self, field: &Field, value: u64) {
        self.insert(field, Value::from(value));
    }

    fn record_bool(&mut self, field: &Field, value: bool) {
        self.insert(field, Value::Bool(value));
    }

    fn record_str(&mut self, field: &Field, value: &str) {
        self.insert(field, Value::String(value.to_string()));
    }

    fn record_debug(&mut self, field: &Field, value: &dyn fmt::Debug) {
        self.insert(field, Value::String(format!("{value:?}")));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::LogConfig;
    use crate::context;
    use crate::logging::tests::MemorySink;
    use tracing_subscriber::layer::SubscriberExt;

    fn with_layer(config: &LogConfig, f: impl FnOnce()) -> MemorySink {
        let sink = MemorySink::default();
        let logging = Logging::configure_with_sink(config, sink.clone());
        let subscriber = tracing_subscriber::registry().with(logging.layer());
        tracing::subscriber::with_default(subscriber, f);
        sink
    }

    #[test]
    fn test_tracing_event_is_enriched() {
        let sink = with_layer(&LogConfig::production(), || {
            tracing::warn!(target: "reqwest", status = 503, retry = false, "upstream busy");
        });

        let records = sink.records();
        assert_eq!(records.len(), 1);
        let record = &records[0];
        assert_eq!(record["event"], "upstream busy");
        assert_eq!(record["logger"], "reqwest");
        assert_eq!(record["level"], "warning");
        assert_eq!(record["status"], 503);
        assert_eq!(record["retry"], false);
        assert!(record.get("timestamp").is_some());
    }

    #[test]
    fn test_tracing_event_respects_min_level() {
        let sink = with_layer(&LogConfig::production(), || {
            tracing::trace!("dropped");
            tracing::debug!("dropped");
            tracing::info!("kept");
        });

        let records = sink.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0]["event"], "kept");
    }

    #[test]
    fn test_tracing_event_carries_request_id() {
        let sink = with_layer(&LogConfig::production(), || {
            context::scope_sync(Some("req-3".to_string()), || {
                tracing::error!(error = %"boom", "call failed");
            });
        });

        let record = &sink.records()[0];
        assert_eq!(record["request_id"], "req-3");
        assert_eq!(record["error"], "boom");
    }
}
