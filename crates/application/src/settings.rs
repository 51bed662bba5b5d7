//! Client settings
//!
//! The static configuration object injected into the pipeline: map defaults,
//! status poll cadence and resolver behavior.

use std::time::Duration;

use domain::GeoLocation;
use serde::{Deserialize, Serialize};

/// Highest zoom level supported by common web map providers
const MAX_ZOOM: u8 = 22;

/// Lower bound for the status poll interval
const MIN_POLL_INTERVAL_MS: u64 = 1_000;

/// Map, polling and resolver settings for the client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ClientSettings {
    /// Map center before any result is shown
    #[serde(default = "default_center")]
    pub default_center: GeoLocation,

    /// Zoom level before any result is shown (city scale)
    #[serde(default = "default_zoom")]
    pub default_zoom: u8,

    /// Zoom level used when showing a result (pedestrian scale)
    #[serde(default = "default_result_zoom")]
    pub result_zoom: u8,

    /// Status poll interval in milliseconds
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,

    /// Request a turn-by-turn walking route from the directions provider
    #[serde(default = "default_true")]
    pub walking_routes: bool,

    /// Degrade geometry-less place selections to a free-text query
    #[serde(default)]
    pub allow_text_fallback: bool,
}

const fn default_center() -> GeoLocation {
    GeoLocation::hong_kong()
}

const fn default_zoom() -> u8 {
    11
}

const fn default_result_zoom() -> u8 {
    15
}

const fn default_poll_interval_ms() -> u64 {
    300_000 // 5 minutes
}

const fn default_true() -> bool {
    true
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            default_center: default_center(),
            default_zoom: default_zoom(),
            result_zoom: default_result_zoom(),
            poll_interval_ms: default_poll_interval_ms(),
            walking_routes: true,
            allow_text_fallback: false,
        }
    }
}

impl ClientSettings {
    /// Status poll interval
    #[must_use]
    pub const fn poll_interval(&self) -> Duration {
        Duration::from_millis(self.poll_interval_ms)
    }

    /// Validate the settings
    ///
    /// # Errors
    ///
    /// Returns an error if the settings are invalid.
    pub fn validate(&self) -> Result<(), String> {
        if self.default_center.validated().is_err() {
            return Err(format!(
                "default_center {} is outside the valid coordinate range",
                self.default_center
            ));
        }

        if self.default_zoom > MAX_ZOOM || self.result_zoom > MAX_ZOOM {
            return Err(format!("zoom levels must be {MAX_ZOOM} or less"));
        }

        if self.poll_interval_ms < MIN_POLL_INTERVAL_MS {
            return Err(format!(
                "poll_interval_ms must be at least {MIN_POLL_INTERVAL_MS}"
            ));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let settings = ClientSettings::default();
        assert_eq!(settings.default_center, GeoLocation::hong_kong());
        assert_eq!(settings.default_zoom, 11);
        assert_eq!(settings.result_zoom, 15);
        assert_eq!(settings.poll_interval(), Duration::from_secs(300));
        assert!(settings.walking_routes);
        assert!(!settings.allow_text_fallback);
        assert!(settings.validate().is_ok());
    }

    #[test]
    fn rejects_out_of_range_center() {
        let settings = ClientSettings {
            default_center: GeoLocation::new_unchecked(95.0, 0.0),
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_excessive_zoom() {
        let settings = ClientSettings {
            result_zoom: 30,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }

    #[test]
    fn rejects_tiny_poll_interval() {
        let settings = ClientSettings {
            poll_interval_ms: 10,
            ..Default::default()
        };
        assert!(settings.validate().is_err());
    }
}
