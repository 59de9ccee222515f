//! Record rendering.
//!
//! [`RenderMode::for_environment`] is the single place where the output
//! format is chosen: developers running locally get colored console text,
//! every other environment gets one JSON object per line.

use std::fmt::Write as _;

use serde_json::Value;

use crate::level::Level;
use crate::pipeline::{fields, LogRecord};

/// Environment label that selects console output.
pub const LOCAL_ENVIRONMENT: &str = "local";

/// Returns true if records should be rendered as text for `app_env`.
pub fn log_as_text(app_env: &str) -> bool {
    app_env == LOCAL_ENVIRONMENT
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RenderMode {
    /// Human-readable, colorized text.
    Console,
    /// One JSON object per line.
    Json,
}

impl RenderMode {
    /// Picks the format for an environment label.
    pub fn for_environment(app_env: &str) -> Self {
        if log_as_text(app_env) {
            Self::Console
        } else {
            Self::Json
        }
    }
}

mod ansi {
    pub const RESET: &str = "\x1b[0m";
    pub const BOLD: &str = "\x1b[1m";
    pub const DIM: &str = "\x1b[2m";
    pub const RED: &str = "\x1b[31m";
    pub const GREEN: &str = "\x1b[32m";
    pub const YELLOW: &str = "\x1b[33m";
    pub const BLUE: &str = "\x1b[34m";
    pub const MAGENTA: &str = "\x1b[35m";
    pub const CYAN: &str = "\x1b[36m";
    pub const BRIGHT_RED: &str = "\x1b[91m";
}

const LEVEL_WIDTH: usize = 8;
const EVENT_WIDTH: usize = 30;

/// Turns an enriched record into one output line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Renderer {
    mode: RenderMode,
    colors: bool,
}

impl Renderer {
    /// Creates a renderer; console output is colorized.
    pub fn new(mode: RenderMode) -> Self {
        Self { mode, colors: true }
    }

    /// Enables or disables ANSI colors for console output.
    #[must_use]
    pub fn with_colors(mut self, colors: bool) -> Self {
        self.colors = colors;
        self
    }

    /// Returns the output format.
    pub fn mode(&self) -> RenderMode {
        self.mode
    }

    /// Renders a record without a trailing newline.
    pub fn render(&self, record: &LogRecord) -> String {
        match self.mode {
            RenderMode::Json => render_json(record),
            RenderMode::Console => self.render_console(record),
        }
    }

    /// Console layout: `timestamp [level] event [logger] key=value ...`
    /// with the remaining keys sorted.
    fn render_console(&self, record: &LogRecord) -> String {
        let mut line = String::new();
        let fields = record.fields();

        if let Some(timestamp) = fields.get(fields::TIMESTAMP) {
            let _ = write!(line, "{} ", self.paint(ansi::DIM, &plain(timestamp)));
        }

        let level = format!("{:<LEVEL_WIDTH$}", record.level().as_str());
        let _ = write!(line, "[{}] ", self.paint(level_color(record.level()), &level));

        let event = format!("{:<EVENT_WIDTH$}", record.event().unwrap_or_default());
        line.push_str(&self.paint(ansi::BOLD, &event));

        if let Some(logger) = fields.get(fields::LOGGER) {
            let _ = write!(line, " [{}]", self.paint(ansi::BLUE, &plain(logger)));
        }

        let mut rest: Vec<(&String, &Value)> = fields
            .iter()
            .filter(|(key, _)| {
                !matches!(
                    key.as_str(),
                    fields::TIMESTAMP | fields::LEVEL | fields::EVENT | fields::LOGGER
                )
            })
            .collect();
        rest.sort_by(|(a, _), (b, _)| a.cmp(b));

        for (key, value) in rest {
            let _ = write!(
                line,
                " {}={}",
                self.paint(ansi::CYAN, key),
                self.paint(ansi::MAGENTA, &plain(value))
            );
        }

        line.trim_end().to_string()
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.colors {
            format!("{color}{text}{}", ansi::RESET)
        } else {
            text.to_string()
        }
    }
}

fn render_json(record: &LogRecord) -> String {
    serde_json::to_string(record.fields())
        .unwrap_or_else(|e| format!(r#"{{"event":"unrenderable log record: {e}"}}"#))
}

fn level_color(level: Level) -> &'static str {
    match level {
        Level::Debug | Level::Info => ansi::GREEN,
        Level::Warning => ansi::YELLOW,
        Level::Error => ansi::RED,
        Level::Critical => ansi::BRIGHT_RED,
    }
}

/// Strings render bare; everything else as compact JSON.
fn plain(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record() -> LogRecord {
        LogRecord::new(Level::Error, "users", "account lookup failed")
            .with_field("status", 404)
            .with_field("response", serde_json::json!({"error": "not found"}))
            .with_field("timestamp", "2024-05-01T12:00:00.000000Z")
            .with_field("level", "error")
            .with_field("logger", "users")
            .with_field("process_id", 4242)
    }

    #[test]
    fn test_mode_is_pure_function_of_label() {
        assert_eq!(RenderMode::for_environment("local"), RenderMode::Console);
        assert_eq!(RenderMode::for_environment("local"), RenderMode::Console);
        assert_eq!(RenderMode::for_environment("production"), RenderMode::Json);
        assert_eq!(RenderMode::for_environment("staging"), RenderMode::Json);
        assert_eq!(RenderMode::for_environment("Local"), RenderMode::Json);
        assert_eq!(RenderMode::for_environment(""), RenderMode::Json);
    }

    #[test]
    fn test_json_rendering() {
        let line = Renderer::new(RenderMode::Json).render(&record());
        let parsed: Value = serde_json::from_str(&line).unwrap();

        assert_eq!(parsed["event"], "account lookup failed");
        assert_eq!(parsed["status"], 404);
        assert_eq!(parsed["response"]["error"], "not found");
        assert!(!line.contains('\n'));
        assert!(line.starts_with(r#"{"event":"#));
    }

    #[test]
    fn test_console_rendering_without_colors() {
        let line = Renderer::new(RenderMode::Console)
            .with_colors(false)
            .render(&record());

        assert!(line.starts_with("2024-05-01T12:00:00.000000Z [error   ] account lookup failed"));
        assert!(line.contains(" [users]"));
        let kv = line.split(" [users] ").nth(1).unwrap();
        assert_eq!(kv, r#"process_id=4242 response={"error":"not found"} status=404"#);
    }

    #[test]
    fn test_console_rendering_with_colors() {
        let line = Renderer::new(RenderMode::Console).render(&record());
        assert!(line.contains(ansi::RED));
        assert!(line.contains(ansi::RESET));
    }
}
