//! HTTP client for the station backend

use std::time::Duration;

use async_trait::async_trait;
use domain::{LocationQuery, ServiceStatus, TransitResult};
use reqwest::{Client, RequestBuilder};
use serde::de::DeserializeOwned;
use tracing::{debug, instrument, warn};
use url::Url;

use crate::config::TransitConfig;
use crate::error::TransitError;
use crate::models::{ApiOutcome, LocationRequest, StationResponse, StatusResponse, error_message};

/// Trait for station backend clients
#[async_trait]
pub trait StationClient: Send + Sync {
    /// Find the station nearest to a location
    async fn find_nearest(&self, query: &LocationQuery) -> Result<TransitResult, TransitError>;

    /// Fetch the current service status
    async fn service_status(&self) -> Result<ServiceStatus, TransitError>;
}

/// `reqwest`-based station backend client
#[derive(Debug)]
pub struct HttpStationClient {
    client: Client,
    location_url: Url,
    status_url: Url,
    timeout_secs: u64,
}

impl HttpStationClient {
    /// Create a new client
    ///
    /// # Errors
    ///
    /// Returns an error if the endpoint URLs are invalid or the HTTP client
    /// cannot be initialized.
    pub fn new(config: &TransitConfig) -> Result<Self, TransitError> {
        let client = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|e| TransitError::ConfigurationError(e.to_string()))?;

        Ok(Self {
            client,
            location_url: config.location_url()?,
            status_url: config.status_url()?,
            timeout_secs: config.timeout_secs,
        })
    }

    /// Send a request and decode its body into an outcome
    async fn execute<T: DeserializeOwned>(
        &self,
        request: RequestBuilder,
    ) -> Result<ApiOutcome<T>, TransitError> {
        let response = request.send().await.map_err(|e| self.transport_error(&e))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| self.transport_error(&e))?;

        if !status.is_success() {
            let message = error_message(&body);
            warn!(status = status.as_u16(), ?message, "Backend returned error status");
            return Err(TransitError::HttpStatus {
                status: status.as_u16(),
                message,
            });
        }

        ApiOutcome::decode(&body)
    }

    fn transport_error(&self, error: &reqwest::Error) -> TransitError {
        if error.is_timeout() {
            TransitError::Timeout {
                timeout_secs: self.timeout_secs,
            }
        } else {
            TransitError::ConnectionFailed(error.to_string())
        }
    }
}

#[async_trait]
impl StationClient for HttpStationClient {
    #[instrument(skip(self), fields(query = %query))]
    async fn find_nearest(&self, query: &LocationQuery) -> Result<TransitResult, TransitError> {
        let body = LocationRequest::from(query);
        debug!(url = %self.location_url, "Requesting nearest station");

        let request = self.client.post(self.location_url.clone()).json(&body);
        match self.execute::<StationResponse>(request).await? {
            ApiOutcome::Success(response) => {
                let result = response.into_transit_result()?;
                debug!(
                    station = %result.station_name,
                    steps = result.walking_directions.len(),
                    "Nearest station found"
                );
                Ok(result)
            },
            ApiOutcome::Failure(message) => Err(TransitError::Backend(message)),
        }
    }

    #[instrument(skip(self))]
    async fn service_status(&self) -> Result<ServiceStatus, TransitError> {
        debug!(url = %self.status_url, "Fetching service status");

        let request = self.client.get(self.status_url.clone());
        match self.execute::<StatusResponse>(request).await? {
            ApiOutcome::Success(response) => Ok(response.into()),
            ApiOutcome::Failure(message) => Err(TransitError::Backend(message)),
        }
    }
}
