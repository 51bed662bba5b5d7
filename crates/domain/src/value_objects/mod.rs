//! Value objects - Immutable types defined by their attributes

mod geo_location;
mod location_query;
mod overlay_handle;

pub use geo_location::{GeoBounds, GeoLocation};
pub use location_query::LocationQuery;
pub use overlay_handle::OverlayHandle;
