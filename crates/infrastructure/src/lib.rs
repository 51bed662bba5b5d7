//! Infrastructure layer - Adapters for external systems
//!
//! Implements ports defined in the application layer: the station backend
//! over HTTP, a headless map surface and buffered display regions. Also
//! loads configuration, sets up logging and wires a ready-to-use
//! [`StationFinder`].

pub mod adapters;
pub mod config;
pub mod station_finder;
pub mod telemetry;

pub use adapters::*;
pub use config::AppConfig;
pub use station_finder::StationFinder;
pub use telemetry::{LogFormat, LoggingConfig, TelemetryError, init_logging};
