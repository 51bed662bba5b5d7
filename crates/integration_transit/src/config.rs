//! Backend connection configuration

use serde::{Deserialize, Serialize};
use url::Url;

use crate::error::TransitError;

/// Configuration for the station backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TransitConfig {
    /// Base URL of the backend, e.g. "http://localhost:5000"
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Path of the nearest-station endpoint, resolved against `base_url`
    #[serde(default = "default_location_path")]
    pub location_path: String,

    /// Path of the service status endpoint, resolved against `base_url`
    #[serde(default = "default_status_path")]
    pub status_path: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// User agent sent with every request
    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_base_url() -> String {
    "http://localhost:5000".to_string()
}

fn default_location_path() -> String {
    "/find_nearest_mtr".to_string()
}

fn default_status_path() -> String {
    "/mtr_status".to_string()
}

const fn default_timeout_secs() -> u64 {
    10
}

fn default_user_agent() -> String {
    format!("StationFinder/{}", env!("CARGO_PKG_VERSION"))
}

impl Default for TransitConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            location_path: default_location_path(),
            status_path: default_status_path(),
            timeout_secs: default_timeout_secs(),
            user_agent: default_user_agent(),
        }
    }
}

impl TransitConfig {
    /// Create a configuration suitable for testing against a local mock server
    #[must_use]
    pub fn for_testing(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout_secs: 2,
            ..Default::default()
        }
    }

    /// Absolute URL of the nearest-station endpoint
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the base URL or path is invalid.
    pub fn location_url(&self) -> Result<Url, TransitError> {
        self.endpoint(&self.location_path)
    }

    /// Absolute URL of the status endpoint
    ///
    /// # Errors
    ///
    /// Returns `ConfigurationError` if the base URL or path is invalid.
    pub fn status_url(&self) -> Result<Url, TransitError> {
        self.endpoint(&self.status_path)
    }

    fn endpoint(&self, path: &str) -> Result<Url, TransitError> {
        let base = Url::parse(&self.base_url).map_err(|e| {
            TransitError::ConfigurationError(format!("invalid base_url '{}': {e}", self.base_url))
        })?;
        base.join(path)
            .map_err(|e| TransitError::ConfigurationError(format!("invalid path '{path}': {e}")))
    }

    /// Validate the configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the configuration is invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("base_url must not be empty".to_string());
        }

        if self.timeout_secs == 0 {
            return Err("timeout_secs must be greater than 0".to_string());
        }

        let url = self.location_url().map_err(|e| e.to_string())?;
        if !matches!(url.scheme(), "http" | "https") {
            return Err(format!("unsupported scheme '{}'", url.scheme()));
        }
        self.status_url().map_err(|e| e.to_string())?;

        Ok(())
    }
}
