//! In-memory log capture.

use std::sync::Arc;

use courier_telemetry::{Level, LogConfig, LogSink, Logging};
use parking_lot::Mutex;
use serde_json::Value;

/// A [`LogSink`] that keeps every rendered line.
///
/// Clones share the same buffer.
#[derive(Debug, Clone, Default)]
pub struct CapturingSink {
    lines: Arc<Mutex<Vec<String>>>,
}

impl CapturingSink {
    /// Creates an empty sink.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Configures JSON logging at debug level into this sink.
    pub fn logging(&self) -> Logging {
        let config = LogConfig::production().with_level(Level::Debug);
        Logging::configure_with_sink(&config, self.clone())
    }

    /// Returns the captured lines.
    pub fn lines(&self) -> Vec<String> {
        self.lines.lock().clone()
    }

    /// Returns the captured lines parsed as JSON; other lines are skipped.
    pub fn records(&self) -> Vec<Value> {
        self.lines
            .lock()
            .iter()
            .filter_map(|line| serde_json::from_str(line).ok())
            .collect()
    }

    /// Returns the JSON records emitted at `level`.
    pub fn records_at(&self, level: Level) -> Vec<Value> {
        self.records()
            .into_iter()
            .filter(|record| record.get("level").and_then(Value::as_str) == Some(level.as_str()))
            .collect()
    }

    /// Returns the number of captured lines.
    pub fn len(&self) -> usize {
        self.lines.lock().len()
    }

    /// Returns true if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.lines.lock().is_empty()
    }

    /// Discards everything captured so far.
    pub fn clear(&self) {
        self.lines.lock().clear();
    }
}

impl LogSink for CapturingSink {
    fn write_line(&self, line: &str) {
        self.lines.lock().push(line.to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_captures_records_by_level() {
        let sink = CapturingSink::new();
        let logger = sink.logging().logger("users");

        logger.debug("lookup", &[]);
        logger.error("lookup failed", &[("status", json!(404))]);

        assert_eq!(sink.len(), 2);
        let errors = sink.records_at(Level::Error);
        assert_eq!(errors.len(), 1);
        assert_eq!(errors[0]["status"], 404);
        assert_eq!(errors[0]["logger"], "users");
    }

    #[test]
    fn test_clear() {
        let sink = CapturingSink::new();
        sink.logging().root().info("hello", &[]);
        assert!(!sink.is_empty());

        sink.clear();
        assert!(sink.is_empty());
        assert!(sink.records().is_empty());
    }

    #[test]
    fn test_non_json_lines_are_skipped_by_records() {
        let sink = CapturingSink::new();
        sink.write_line("plain text");
        sink.write_line(r#"{"event": "json"}"#);

        assert_eq!(sink.lines().len(), 2);
        assert_eq!(sink.records(), vec![json!({"event": "json"})]);
    }
}
