//! StationFinder backend integration
//!
//! HTTP client for the two endpoints the client talks to: the nearest-station
//! lookup (`POST /find_nearest_mtr`) and the service status feed
//! (`GET /mtr_status`).
//!
//! # Architecture
//!
//! [`StationClient`] defines the interface, implemented by
//! [`HttpStationClient`] on top of `reqwest`. Every response body is decoded
//! exactly once into an [`ApiOutcome`]: either the success payload or the
//! backend's `error` message. Callers never inspect raw JSON.
//!
//! # Example
//!
//! ```rust,ignore
//! use domain::LocationQuery;
//! use integration_transit::{HttpStationClient, StationClient, TransitConfig};
//!
//! let client = HttpStationClient::new(&TransitConfig::default())?;
//! let query = LocationQuery::from_address("Central, Hong Kong")?;
//! let result = client.find_nearest(&query).await?;
//! println!("{}", result.station_name);
//! ```

mod client;
mod config;
mod error;
mod models;

pub use client::{HttpStationClient, StationClient};
pub use config::TransitConfig;
pub use error::TransitError;
pub use models::{ApiOutcome, LocationRequest, StationResponse, StatusResponse, StepPayload};
