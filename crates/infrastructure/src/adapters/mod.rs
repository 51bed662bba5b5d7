//! Infrastructure adapters
//!
//! Adapters connect application ports to concrete implementations.

mod buffered_region;
mod headless_map;
mod transit_adapter;

pub use buffered_region::BufferedRegion;
pub use headless_map::{HeadlessMapSurface, MapOverlay, MapSnapshot};
pub use transit_adapter::TransitAdapter;
