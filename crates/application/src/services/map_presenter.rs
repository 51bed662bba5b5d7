//! Map presentation
//!
//! Owns the "current result" overlays on the map surface. Each new result
//! replaces the previous overlay set as a whole: the old handles are released
//! before new ones are attached, so the map never accumulates stale markers.

use std::sync::Arc;

use domain::{GeoLocation, OverlayHandle, TransitResult};
use tracing::{debug, instrument, warn};

use crate::ports::{
    DirectionsPort, LineStyle, MapSurface, MarkerSpec, TravelMode, WalkingRoute,
};
use crate::settings::ClientSettings;

/// Overlays belonging to the currently displayed result
#[derive(Debug)]
struct OverlaySet {
    origin: OverlayHandle,
    station: OverlayHandle,
    connection: OverlayHandle,
}

/// Presents transit results on the map surface
pub struct MapPresenter {
    surface: Arc<dyn MapSurface>,
    directions: Option<Arc<dyn DirectionsPort>>,
    default_center: GeoLocation,
    default_zoom: u8,
    result_zoom: u8,
    walking_routes: bool,
    line_style: LineStyle,
    current: Option<OverlaySet>,
}

impl std::fmt::Debug for MapPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("MapPresenter")
            .field("has_directions", &self.directions.is_some())
            .field("default_center", &self.default_center)
            .field("result_zoom", &self.result_zoom)
            .field("walking_routes", &self.walking_routes)
            .field("current", &self.current)
            .finish_non_exhaustive()
    }
}

impl MapPresenter {
    /// Create a presenter for a map surface
    #[must_use]
    pub fn new(surface: Arc<dyn MapSurface>, settings: &ClientSettings) -> Self {
        Self {
            surface,
            directions: None,
            default_center: settings.default_center,
            default_zoom: settings.default_zoom,
            result_zoom: settings.result_zoom,
            walking_routes: settings.walking_routes,
            line_style: LineStyle::default(),
            current: None,
        }
    }

    /// Attach a turn-by-turn directions provider
    #[must_use]
    pub fn with_directions(mut self, directions: Arc<dyn DirectionsPort>) -> Self {
        self.directions = Some(directions);
        self
    }

    /// Show the initial map at the configured default center and zoom
    pub fn initialize(&self) {
        self.surface.render_map(self.default_center, self.default_zoom);
    }

    /// Number of overlays currently owned by the presenter
    #[must_use]
    pub const fn active_overlays(&self) -> usize {
        if self.current.is_some() { 3 } else { 0 }
    }

    /// Replace whatever is on the map with this result
    ///
    /// The directions lookup (the only suspension point) happens before the
    /// map is touched, so every mutation below runs without interruption.
    #[instrument(skip(self, result), fields(station = %result.station_name))]
    pub async fn present(&mut self, result: &TransitResult) {
        let origin = result.input_location;
        let station = result.station_location;
        let route = self.lookup_route(origin, station).await;

        self.clear();

        self.surface.render_map(origin, self.result_zoom);
        let origin_marker = self.surface.place_marker(origin, &MarkerSpec::origin());
        let station_marker = self
            .surface
            .place_marker(station, &MarkerSpec::station(&result.station_name));

        let connection = if let Some(route) = route {
            debug!(points = route.path.len(), "Rendering walking route");
            self.surface.render_route(&route)
        } else {
            let ends = [origin, station];
            let line = self.surface.draw_polyline(&ends, &self.line_style);
            self.surface.fit_bounds(&ends);
            line
        };

        debug!(
            straight_line_m = result.straight_line_meters().round(),
            "Result presented on map"
        );

        self.current = Some(OverlaySet {
            origin: origin_marker,
            station: station_marker,
            connection,
        });
    }

    /// Detach every overlay owned by the presenter
    pub fn clear(&mut self) {
        if let Some(set) = self.current.take() {
            self.surface.remove_overlay(set.origin);
            self.surface.remove_overlay(set.station);
            self.surface.remove_overlay(set.connection);
        }
    }

    async fn lookup_route(
        &self,
        origin: GeoLocation,
        destination: GeoLocation,
    ) -> Option<WalkingRoute> {
        if !self.walking_routes {
            return None;
        }
        let directions = self.directions.as_ref()?;

        match directions.route(origin, destination, TravelMode::Walking).await {
            Ok(route) if route.path.len() >= 2 => Some(route),
            Ok(_) => {
                warn!("Directions returned a degenerate route, using straight line");
                None
            },
            Err(e) => {
                warn!(error = %e, "Directions lookup failed, using straight line");
                None
            },
        }
    }
}
