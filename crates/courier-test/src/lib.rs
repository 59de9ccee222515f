//! # Courier Test
//!
//! Test utilities for Courier clients, with no network and no global
//! logging state.
//!
//! - [`MockTransport`]: scripted replies for the dispatcher, with a log of
//!   every request it received
//! - [`CapturingSink`]: keeps rendered log lines for assertions
//!
//! ## Example
//!
//! ```rust
//! use courier_telemetry::Level;
//! use courier_test::{CapturingSink, MockTransport};
//! use serde_json::json;
//!
//! let mock = MockTransport::new();
//! mock.respond(404, json!({"error": "not found"}));
//!
//! let sink = CapturingSink::new();
//! let logging = sink.logging();
//! logging.root().error("lookup failed", &[("status", json!(404))]);
//!
//! assert_eq!(sink.records_at(Level::Error).len(), 1);
//! ```

#![doc(html_root_url = "https://docs.rs/courier-test/0.1.0")]
#![warn(missing_docs)]
#![forbid(unsafe_code)]

mod sink;
mod transport;

pub use sink::CapturingSink;
pub use transport::MockTransport;
