//! Port definitions for application layer
//!
//! Ports are interfaces that define how the application interacts with
//! external systems: the station backend, the mapping provider and the
//! display surface. Adapters in the infrastructure layer (or the host page)
//! implement these ports.

mod display_port;
mod map_port;
mod status_port;
mod transit_port;

pub use display_port::DisplayRegion;
#[cfg(test)]
pub use map_port::MockDirectionsPort;
pub use map_port::{
    DirectionsPort, LineStyle, MapSurface, MarkerSpec, MarkerStyle, RouteError, TravelMode,
    WalkingRoute,
};
#[cfg(test)]
pub use status_port::MockStatusPort;
pub use status_port::StatusPort;
#[cfg(test)]
pub use transit_port::MockTransitQueryPort;
pub use transit_port::TransitQueryPort;
