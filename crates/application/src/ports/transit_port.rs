//! Nearest-station query port
//!
//! Defines the interface to the backend's location-query endpoint.

use async_trait::async_trait;
use domain::{LocationQuery, TransitResult};
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for looking up the nearest station to a location
///
/// Implementations issue exactly one request per call: no retries and no
/// caching, since the user expects live data on every submission.
#[cfg_attr(test, automock)]
#[async_trait]
pub trait TransitQueryPort: Send + Sync {
    /// Find the nearest station, walking directions and accessibility info
    ///
    /// Fails with `Transport` for network problems or non-success statuses,
    /// `Backend` when the response carries an `error` field, and `Render`
    /// when a success payload is missing required fields.
    async fn query(&self, query: &LocationQuery) -> Result<TransitResult, ApplicationError>;
}
