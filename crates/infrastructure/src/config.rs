//! Application configuration
//!
//! Sources, lowest to highest precedence: built-in defaults, an optional
//! TOML file (`stationfinder.toml` in the working directory, or an explicit
//! path), then environment variables such as
//! `STATIONFINDER_TRANSIT__BASE_URL` or `STATIONFINDER_CLIENT__RESULT_ZOOM`.

use std::path::Path;

use application::{ApplicationError, ClientSettings};
use integration_transit::TransitConfig;
use serde::{Deserialize, Serialize};

use crate::telemetry::LoggingConfig;

/// Default configuration file name, without extension
const CONFIG_FILE: &str = "stationfinder";

/// Environment variable prefix
const ENV_PREFIX: &str = "STATIONFINDER";

/// Main application configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    /// Map, polling and resolver settings
    #[serde(default)]
    pub client: ClientSettings,

    /// Station backend connection
    #[serde(default)]
    pub transit: TransitConfig,

    /// Log output
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl AppConfig {
    /// Load configuration from `stationfinder.toml` (if present) and the environment
    pub fn load() -> Result<Self, config::ConfigError> {
        Self::build(config::File::with_name(CONFIG_FILE).required(false))
    }

    /// Load configuration from an explicit file and the environment
    ///
    /// The file must exist; its format is inferred from the extension.
    pub fn load_from(path: &Path) -> Result<Self, config::ConfigError> {
        Self::build(config::File::from(path).required(true))
    }

    fn build<S>(file: S) -> Result<Self, config::ConfigError>
    where
        S: config::Source + Send + Sync + 'static,
    {
        config::Config::builder()
            .add_source(file)
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }

    /// Validate every section
    ///
    /// # Errors
    ///
    /// Returns `Configuration` naming the first invalid section.
    pub fn validate(&self) -> Result<(), ApplicationError> {
        self.client
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("client: {e}")))?;
        self.transit
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("transit: {e}")))?;
        self.logging
            .validate()
            .map_err(|e| ApplicationError::Configuration(format!("logging: {e}")))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::telemetry::LogFormat;
    use domain::GeoLocation;
    use std::io::Write;

    fn write_config(contents: &str) -> tempfile::NamedTempFile {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        file.write_all(contents.as_bytes()).unwrap();
        file
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.client.result_zoom, 15);
        assert_eq!(config.transit.location_path, "/find_nearest_mtr");
        assert_eq!(config.logging.format, LogFormat::Text);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_file() {
        let file = write_config(
            r#"
            [client]
            result_zoom = 16
            poll_interval_ms = 60000
            allow_text_fallback = true

            [client.default_center]
            latitude = 22.2855
            longitude = 114.1577

            [transit]
            base_url = "https://stations.example.com"
            timeout_secs = 3

            [logging]
            format = "json"
            "#,
        );

        let config = AppConfig::load_from(file.path()).unwrap();

        assert_eq!(config.client.result_zoom, 16);
        assert_eq!(config.client.default_zoom, 11);
        assert_eq!(config.client.poll_interval_ms, 60_000);
        assert!(config.client.allow_text_fallback);
        assert_eq!(
            config.client.default_center,
            GeoLocation::new(22.2855, 114.1577).unwrap()
        );
        assert_eq!(config.transit.base_url, "https://stations.example.com");
        assert_eq!(config.transit.timeout_secs, 3);
        assert_eq!(config.transit.status_path, "/mtr_status");
        assert_eq!(config.logging.format, LogFormat::Json);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_load_from_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        let result = AppConfig::load_from(&dir.path().join("absent.toml"));
        assert!(result.is_err());
    }

    #[test]
    fn test_validate_reports_section() {
        let file = write_config(
            r#"
            [client]
            poll_interval_ms = 5
            "#,
        );
        let config = AppConfig::load_from(file.path()).unwrap();

        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("client"));
    }

    #[test]
    fn test_validate_transit() {
        let config = AppConfig {
            transit: TransitConfig {
                timeout_secs: 0,
                ..TransitConfig::default()
            },
            ..AppConfig::default()
        };
        let err = config.validate().unwrap_err();
        assert!(err.to_string().contains("transit"));
    }
}
