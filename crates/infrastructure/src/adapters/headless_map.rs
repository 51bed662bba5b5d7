//! Headless map surface
//!
//! In-memory [`MapSurface`] for running the pipeline without a browser map:
//! keeps the viewport and attached overlays so hosts can inspect or serialize
//! the current map state.

use std::collections::BTreeMap;

use application::ports::{LineStyle, MapSurface, MarkerSpec, WalkingRoute};
use domain::{GeoBounds, GeoLocation, OverlayHandle};
use parking_lot::RwLock;
use serde::Serialize;
use tracing::{debug, trace};

/// An overlay attached to the headless map
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum MapOverlay {
    /// A marker pin
    Marker {
        /// Pin position
        position: GeoLocation,
        /// Title and style
        spec: MarkerSpec,
    },
    /// A polyline
    Polyline {
        /// Points of the line
        path: Vec<GeoLocation>,
        /// Stroke style
        style: LineStyle,
    },
    /// A rendered directions route
    Route {
        /// The route as returned by the directions provider
        route: WalkingRoute,
    },
}

/// Current viewport and overlays
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct MapSnapshot {
    /// Map center, once the map has been rendered
    pub center: Option<GeoLocation>,
    /// Zoom level, once the map has been rendered
    pub zoom: Option<u8>,
    /// Last bounds the viewport was fitted to
    pub fitted_bounds: Option<GeoBounds>,
    /// Attached overlays in creation order
    pub overlays: Vec<MapOverlay>,
}

impl MapSnapshot {
    /// Number of marker overlays
    #[must_use]
    pub fn marker_count(&self) -> usize {
        self.overlays
            .iter()
            .filter(|o| matches!(o, MapOverlay::Marker { .. }))
            .count()
    }

    /// Marker titles in creation order
    #[must_use]
    pub fn marker_titles(&self) -> Vec<&str> {
        self.overlays
            .iter()
            .filter_map(|o| match o {
                MapOverlay::Marker { spec, .. } => Some(spec.title.as_str()),
                _ => None,
            })
            .collect()
    }
}

#[derive(Debug, Default)]
struct MapState {
    next_id: u64,
    center: Option<GeoLocation>,
    zoom: Option<u8>,
    fitted_bounds: Option<GeoBounds>,
    overlays: BTreeMap<u64, MapOverlay>,
}

/// Map surface that keeps its state in memory
#[derive(Debug, Default)]
pub struct HeadlessMapSurface {
    state: RwLock<MapState>,
}

impl HeadlessMapSurface {
    /// Create an empty map
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the current map state
    #[must_use]
    pub fn snapshot(&self) -> MapSnapshot {
        let state = self.state.read();
        MapSnapshot {
            center: state.center,
            zoom: state.zoom,
            fitted_bounds: state.fitted_bounds,
            overlays: state.overlays.values().cloned().collect(),
        }
    }

    fn attach(&self, overlay: MapOverlay) -> OverlayHandle {
        let mut state = self.state.write();
        state.next_id += 1;
        let id = state.next_id;
        state.overlays.insert(id, overlay);
        trace!(id, "Overlay attached");
        OverlayHandle::new(id)
    }
}

impl MapSurface for HeadlessMapSurface {
    fn render_map(&self, center: GeoLocation, zoom: u8) {
        let mut state = self.state.write();
        state.center = Some(center);
        state.zoom = Some(zoom);
        debug!(%center, zoom, "Map rendered");
    }

    fn place_marker(&self, position: GeoLocation, spec: &MarkerSpec) -> OverlayHandle {
        self.attach(MapOverlay::Marker {
            position,
            spec: spec.clone(),
        })
    }

    fn draw_polyline(&self, path: &[GeoLocation], style: &LineStyle) -> OverlayHandle {
        self.attach(MapOverlay::Polyline {
            path: path.to_vec(),
            style: style.clone(),
        })
    }

    fn render_route(&self, route: &WalkingRoute) -> OverlayHandle {
        self.attach(MapOverlay::Route {
            route: route.clone(),
        })
    }

    fn remove_overlay(&self, handle: OverlayHandle) {
        if self.state.write().overlays.remove(&handle.id()).is_none() {
            debug!(%handle, "Removing unknown overlay");
        }
    }

    fn fit_bounds(&self, points: &[GeoLocation]) {
        let Some(bounds) = GeoBounds::enclosing(points) else {
            return;
        };
        let mut state = self.state.write();
        state.center = Some(bounds.center());
        state.fitted_bounds = Some(bounds);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn central() -> GeoLocation {
        GeoLocation::new_unchecked(22.280, 114.160)
    }

    fn station() -> GeoLocation {
        GeoLocation::new_unchecked(22.282, 114.158)
    }

    #[test]
    fn test_render_map() {
        let map = HeadlessMapSurface::new();
        map.render_map(GeoLocation::hong_kong(), 11);

        let snapshot = map.snapshot();
        assert_eq!(snapshot.center, Some(GeoLocation::hong_kong()));
        assert_eq!(snapshot.zoom, Some(11));
        assert!(snapshot.overlays.is_empty());
    }

    #[test]
    fn test_markers_and_removal() {
        let map = HeadlessMapSurface::new();
        let origin = map.place_marker(central(), &MarkerSpec::origin());
        let _station = map.place_marker(station(), &MarkerSpec::station("Central"));

        assert_eq!(map.snapshot().marker_titles(), vec!["Your Location", "Central"]);

        map.remove_overlay(origin);
        let snapshot = map.snapshot();
        assert_eq!(snapshot.marker_count(), 1);
        assert_eq!(snapshot.marker_titles(), vec!["Central"]);
    }

    #[test]
    fn test_handles_are_unique() {
        let map = HeadlessMapSurface::new();
        let a = map.place_marker(central(), &MarkerSpec::origin());
        let b = map.draw_polyline(&[central(), station()], &LineStyle::default());
        assert_ne!(a.id(), b.id());
    }

    #[test]
    fn test_fit_bounds() {
        let map = HeadlessMapSurface::new();
        map.fit_bounds(&[central(), station()]);

        let bounds = map.snapshot().fitted_bounds.unwrap();
        assert!(bounds.contains(&central()));
        assert!(bounds.contains(&station()));
    }

    #[test]
    fn test_fit_bounds_ignores_empty() {
        let map = HeadlessMapSurface::new();
        map.fit_bounds(&[]);
        assert!(map.snapshot().fitted_bounds.is_none());
    }

    #[test]
    fn test_snapshot_serializes() {
        let map = HeadlessMapSurface::new();
        map.render_route(&WalkingRoute {
            path: vec![central(), station()],
            distance_meters: Some(300),
            duration_secs: None,
        });

        let json = serde_json::to_value(map.snapshot()).unwrap();
        assert_eq!(json["overlays"][0]["kind"], "route");
        assert_eq!(json["overlays"][0]["route"]["distance_meters"], 300);
    }
}
