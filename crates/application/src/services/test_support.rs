//! In-memory fakes for the synchronous host ports used in service tests

use std::collections::BTreeMap;

use domain::{GeoLocation, OverlayHandle};
use parking_lot::Mutex;

use crate::ports::{DisplayRegion, LineStyle, MapSurface, MarkerSpec, WalkingRoute};

#[derive(Debug, Clone, PartialEq)]
pub enum Overlay {
    Marker(GeoLocation, MarkerSpec),
    Line(Vec<GeoLocation>),
    Route(usize),
}

#[derive(Debug, Default)]
struct SurfaceState {
    next_id: u64,
    center: Option<(GeoLocation, u8)>,
    active: BTreeMap<u64, Overlay>,
    fitted: Vec<Vec<GeoLocation>>,
    mutations: usize,
}

#[derive(Debug, Default)]
pub struct RecordingSurface {
    state: Mutex<SurfaceState>,
}

impl RecordingSurface {
    pub fn center(&self) -> Option<(GeoLocation, u8)> {
        self.state.lock().center
    }

    pub fn active(&self) -> Vec<Overlay> {
        self.state.lock().active.values().cloned().collect()
    }

    pub fn marker_count(&self) -> usize {
        self.active()
            .iter()
            .filter(|o| matches!(o, Overlay::Marker(..)))
            .count()
    }

    pub fn line_or_route_count(&self) -> usize {
        self.active()
            .iter()
            .filter(|o| matches!(o, Overlay::Line(_) | Overlay::Route(_)))
            .count()
    }

    pub fn fitted(&self) -> Vec<Vec<GeoLocation>> {
        self.state.lock().fitted.clone()
    }

    /// Total number of calls that changed the map
    pub fn mutations(&self) -> usize {
        self.state.lock().mutations
    }

    fn attach(&self, overlay: Overlay) -> OverlayHandle {
        let mut state = self.state.lock();
        state.next_id += 1;
        state.mutations += 1;
        let id = state.next_id;
        state.active.insert(id, overlay);
        OverlayHandle::new(id)
    }
}

impl MapSurface for RecordingSurface {
    fn render_map(&self, center: GeoLocation, zoom: u8) {
        let mut state = self.state.lock();
        state.center = Some((center, zoom));
        state.mutations += 1;
    }

    fn place_marker(&self, position: GeoLocation, spec: &MarkerSpec) -> OverlayHandle {
        self.attach(Overlay::Marker(position, spec.clone()))
    }

    fn draw_polyline(&self, path: &[GeoLocation], _style: &LineStyle) -> OverlayHandle {
        self.attach(Overlay::Line(path.to_vec()))
    }

    fn render_route(&self, route: &WalkingRoute) -> OverlayHandle {
        self.attach(Overlay::Route(route.path.len()))
    }

    fn remove_overlay(&self, handle: OverlayHandle) {
        let mut state = self.state.lock();
        state.active.remove(&handle.id());
        state.mutations += 1;
    }

    fn fit_bounds(&self, points: &[GeoLocation]) {
        let mut state = self.state.lock();
        state.fitted.push(points.to_vec());
        state.mutations += 1;
    }
}

#[derive(Debug, Default)]
pub struct RecordingRegion {
    writes: Mutex<Vec<String>>,
}

impl RecordingRegion {
    pub fn last(&self) -> Option<String> {
        self.writes.lock().last().cloned()
    }

    pub fn write_count(&self) -> usize {
        self.writes.lock().len()
    }
}

impl DisplayRegion for RecordingRegion {
    fn replace(&self, html: &str) {
        self.writes.lock().push(html.to_string());
    }
}
