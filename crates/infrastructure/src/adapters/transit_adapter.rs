//! Transit adapter - Implements the backend ports using integration_transit

use std::sync::Arc;

use application::error::ApplicationError;
use application::ports::{StatusPort, TransitQueryPort};
use async_trait::async_trait;
use domain::{LocationQuery, ServiceStatus, TransitResult};
use integration_transit::{HttpStationClient, StationClient, TransitConfig, TransitError};
use tracing::{debug, instrument, warn};

/// Adapter for the station backend
pub struct TransitAdapter {
    client: Arc<dyn StationClient>,
}

impl std::fmt::Debug for TransitAdapter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TransitAdapter").finish_non_exhaustive()
    }
}

impl TransitAdapter {
    /// Create an adapter around an existing client
    #[must_use]
    pub fn new(client: Arc<dyn StationClient>) -> Self {
        Self { client }
    }

    /// Create an adapter backed by an HTTP client
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the HTTP client cannot be built.
    pub fn from_config(config: &TransitConfig) -> Result<Self, ApplicationError> {
        let client = HttpStationClient::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::new(Arc::new(client)))
    }
}

/// Map an integration error onto the application taxonomy
fn map_transit_error(error: TransitError) -> ApplicationError {
    if error.is_transport() {
        return ApplicationError::Transport(error.to_string());
    }
    match error {
        TransitError::Backend(message) => ApplicationError::Backend(message),
        TransitError::MalformedPayload(detail) => ApplicationError::Render(detail),
        other => ApplicationError::Transport(other.to_string()),
    }
}

#[async_trait]
impl TransitQueryPort for TransitAdapter {
    #[instrument(skip(self), fields(query = %query))]
    async fn query(&self, query: &LocationQuery) -> Result<TransitResult, ApplicationError> {
        match self.client.find_nearest(query).await {
            Ok(result) => {
                debug!(station = %result.station_name, "Backend returned station");
                Ok(result)
            },
            Err(e) => {
                warn!(error = %e, "Nearest station lookup failed");
                Err(map_transit_error(e))
            },
        }
    }
}

#[async_trait]
impl StatusPort for TransitAdapter {
    #[instrument(skip(self))]
    async fn fetch_status(&self) -> Result<ServiceStatus, ApplicationError> {
        self.client.service_status().await.map_err(|e| {
            warn!(error = %e, "Service status fetch failed");
            map_transit_error(e)
        })
    }
}
