//! Output destinations for rendered records.

use std::io::Write;

/// Receives rendered log lines.
pub trait LogSink: Send + Sync + 'static {
    /// Writes one line. The line carries no trailing newline.
    fn write_line(&self, line: &str);
}

/// Writes to standard error.
#[derive(Debug, Clone, Copy, Default)]
pub struct StderrSink;

impl LogSink for StderrSink {
    fn write_line(&self, line: &str) {
        let mut stderr = std::io::stderr().lock();
        // Nowhere left to report a failed write to stderr.
        let _ = writeln!(stderr, "{line}");
    }
}
