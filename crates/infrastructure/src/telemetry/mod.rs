//! Logging infrastructure
//!
//! Structured `tracing` output to stdout in text or JSON form.

mod logging;

pub use logging::{LogFormat, LoggingConfig, TelemetryError, init_logging};
