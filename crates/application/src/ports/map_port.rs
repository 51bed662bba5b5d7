//! Mapping provider ports
//!
//! The interactive map, its overlay primitives and the optional
//! turn-by-turn directions service are owned by an external provider.
//! The pipeline only sees them through these capability interfaces.

use async_trait::async_trait;
use domain::{GeoLocation, OverlayHandle};
#[cfg(test)]
use mockall::automock;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Visual style of a marker
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MarkerStyle {
    /// The user's location (provider default pin)
    Origin,
    /// The station (blue dot)
    Station,
}

/// What to draw for a marker
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MarkerSpec {
    /// Hover title
    pub title: String,
    /// Visual style
    pub style: MarkerStyle,
}

impl MarkerSpec {
    /// Marker for the user's location
    #[must_use]
    pub fn origin() -> Self {
        Self {
            title: "Your Location".to_string(),
            style: MarkerStyle::Origin,
        }
    }

    /// Marker for a station
    #[must_use]
    pub fn station(name: impl Into<String>) -> Self {
        Self {
            title: name.into(),
            style: MarkerStyle::Station,
        }
    }
}

/// Stroke style for a connecting line
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineStyle {
    /// CSS color, e.g. "#FF0000"
    pub color: String,
    /// Stroke opacity (0.0 - 1.0)
    pub opacity: f32,
    /// Stroke weight in pixels
    pub weight: u8,
    /// Follow the great circle instead of a straight screen line
    pub geodesic: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            color: "#FF0000".to_string(),
            opacity: 1.0,
            weight: 2,
            geodesic: true,
        }
    }
}

/// Travel mode for a directions request
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TravelMode {
    /// Pedestrian routing
    Walking,
}

/// A route computed by the directions provider
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WalkingRoute {
    /// Route geometry from origin to destination
    pub path: Vec<GeoLocation>,
    /// Total length in meters, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub distance_meters: Option<u32>,
    /// Expected walking time in seconds, if reported
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration_secs: Option<u32>,
}

/// Directions provider failures
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum RouteError {
    /// Provider found no route between the points
    #[error("No route found")]
    NotFound,

    /// Provider failed or could not be reached
    #[error("Directions service failed: {0}")]
    Failed(String),
}

/// Interactive map surface
///
/// Overlay-creating calls return an [`OverlayHandle`] that the caller owns;
/// passing it back to [`MapSurface::remove_overlay`] detaches the overlay.
pub trait MapSurface: Send + Sync {
    /// Center the map and set its zoom level
    fn render_map(&self, center: GeoLocation, zoom: u8);

    /// Attach a marker
    fn place_marker(&self, position: GeoLocation, spec: &MarkerSpec) -> OverlayHandle;

    /// Attach a polyline through the given points
    fn draw_polyline(&self, path: &[GeoLocation], style: &LineStyle) -> OverlayHandle;

    /// Attach a rendered directions route
    fn render_route(&self, route: &WalkingRoute) -> OverlayHandle;

    /// Detach an overlay
    fn remove_overlay(&self, handle: OverlayHandle);

    /// Adjust the viewport so every point is visible
    fn fit_bounds(&self, points: &[GeoLocation]);
}

/// Turn-by-turn directions provider
#[cfg_attr(test, automock)]
#[async_trait]
pub trait DirectionsPort: Send + Sync {
    /// Compute a route between two points
    async fn route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
        mode: TravelMode,
    ) -> Result<WalkingRoute, RouteError>;
}
