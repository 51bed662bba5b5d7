//! Logging initialization
//!
//! Installs a `tracing-subscriber` registry with an `EnvFilter` and a text or
//! JSON formatter. `RUST_LOG` takes precedence over the configured filter.

use serde::{Deserialize, Serialize};
use tracing::info;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

/// Log line format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines
    #[default]
    Text,
    /// One JSON object per line
    Json,
}

/// Configuration for log output
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Filter directives (e.g., "info", "application=debug,integration_transit=trace")
    #[serde(default = "default_filter")]
    pub filter: String,

    /// Output format
    #[serde(default)]
    pub format: LogFormat,

    /// Include the event target (module path) in each line
    #[serde(default = "default_with_target")]
    pub with_target: bool,
}

fn default_filter() -> String {
    "info".to_string()
}

const fn default_with_target() -> bool {
    true
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            filter: default_filter(),
            format: LogFormat::default(),
            with_target: default_with_target(),
        }
    }
}

impl LoggingConfig {
    /// Validate the filter directives
    ///
    /// # Errors
    ///
    /// Returns an error if the filter cannot be parsed.
    pub fn validate(&self) -> Result<(), String> {
        EnvFilter::try_new(&self.filter)
            .map(|_| ())
            .map_err(|e| format!("invalid filter '{}': {e}", self.filter))
    }
}

/// Install the global tracing subscriber
///
/// # Errors
///
/// Returns an error if a global subscriber is already installed.
pub fn init_logging(config: &LoggingConfig) -> Result<(), TelemetryError> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.filter));

    let installed = match config.format {
        LogFormat::Text => tracing_subscriber::registry()
            .with(env_filter)
            .with(tracing_subscriber::fmt::layer().with_target(config.with_target))
            .try_init(),
        LogFormat::Json => tracing_subscriber::registry()
            .with(env_filter)
            .with(
                tracing_subscriber::fmt::layer()
                    .json()
                    .with_target(config.with_target),
            )
            .try_init(),
    };
    installed.map_err(|e| TelemetryError::Init(e.to_string()))?;

    info!(format = ?config.format, filter = %config.filter, "Logging initialized");
    Ok(())
}

/// Error type for logging initialization
#[derive(Debug, thiserror::Error)]
pub enum TelemetryError {
    /// Failed to initialize tracing subscriber
    #[error("Failed to initialize tracing: {0}")]
    Init(String),
}
