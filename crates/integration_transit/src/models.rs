//! Wire models
//!
//! Request and response bodies of the backend endpoints, and the one-shot
//! decoding of a response body into an [`ApiOutcome`].

use std::collections::BTreeMap;

use domain::{Accessibility, GeoLocation, LocationQuery, ServiceStatus, TransitResult, WalkingStep};
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::TransitError;

/// Body of a nearest-station request; absent fields are omitted
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationRequest {
    /// Free-text address
    #[serde(skip_serializing_if = "Option::is_none")]
    pub address: Option<String>,
    /// Latitude, when the query carries coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lat: Option<f64>,
    /// Longitude, when the query carries coordinates
    #[serde(skip_serializing_if = "Option::is_none")]
    pub lng: Option<f64>,
}

impl From<&LocationQuery> for LocationRequest {
    fn from(query: &LocationQuery) -> Self {
        let coordinates = query.coordinates();
        Self {
            address: query.address().map(String::from),
            lat: coordinates.map(|c| c.latitude()),
            lng: coordinates.map(|c| c.longitude()),
        }
    }
}

/// A walking step as sent by the backend
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StepPayload {
    /// Instruction text
    pub instruction: String,
    /// Distance, either preformatted text or a bare number
    #[serde(default, deserialize_with = "text_or_number")]
    pub distance: String,
}

/// Success body of the nearest-station endpoint
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct StationResponse {
    /// Station display name
    pub station_name: String,
    /// Station latitude
    pub station_lat: f64,
    /// Station longitude
    pub station_lng: f64,
    /// Latitude the backend resolved the input to
    pub input_lat: f64,
    /// Longitude the backend resolved the input to
    pub input_lng: f64,
    /// Ordered walking steps
    #[serde(default)]
    pub walking_directions: Option<Vec<StepPayload>>,
    /// Exit id to accessibility features
    #[serde(default)]
    pub accessibility: Option<BTreeMap<String, Vec<String>>>,
}

impl StationResponse {
    /// Convert into a domain result
    ///
    /// # Errors
    ///
    /// Returns `MalformedPayload` if either coordinate pair is out of range.
    pub fn into_transit_result(self) -> Result<TransitResult, TransitError> {
        let input_location = GeoLocation::new(self.input_lat, self.input_lng)
            .map_err(|e| TransitError::MalformedPayload(format!("input location: {e}")))?;
        let station_location = GeoLocation::new(self.station_lat, self.station_lng)
            .map_err(|e| TransitError::MalformedPayload(format!("station location: {e}")))?;

        let walking_directions = self
            .walking_directions
            .unwrap_or_default()
            .into_iter()
            .map(|step| WalkingStep::new(step.instruction, step.distance))
            .collect();

        Ok(TransitResult {
            station_name: self.station_name,
            input_location,
            station_location,
            walking_directions,
            accessibility: Accessibility::from_exits(self.accessibility.unwrap_or_default()),
        })
    }
}

/// Success body of the status endpoint
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct StatusResponse {
    /// Human-readable status summary
    pub status: String,
    /// Backend-supplied timestamp, shown verbatim
    #[serde(deserialize_with = "text_or_number")]
    pub timestamp: String,
}

impl From<StatusResponse> for ServiceStatus {
    fn from(response: StatusResponse) -> Self {
        Self::new(response.status, response.timestamp)
    }
}

/// A decoded response body
#[derive(Debug, Clone, PartialEq)]
pub enum ApiOutcome<T> {
    /// The expected payload
    Success(T),
    /// The body carried an `error` field
    Failure(String),
}

impl<T: DeserializeOwned> ApiOutcome<T> {
    /// Decode a response body
    ///
    /// An object with a string `error` field is a failure regardless of any
    /// other fields it carries.
    ///
    /// # Errors
    ///
    /// Returns `MalformedPayload` if the body is not JSON or does not match `T`.
    pub fn decode(body: &str) -> Result<Self, TransitError> {
        let value: Value = serde_json::from_str(body)
            .map_err(|e| TransitError::MalformedPayload(format!("invalid JSON: {e}")))?;

        if let Some(message) = error_field(&value) {
            return Ok(Self::Failure(message));
        }

        serde_json::from_value(value)
            .map(Self::Success)
            .map_err(|e| TransitError::MalformedPayload(e.to_string()))
    }
}

/// Extract the `error` string of a body, if it has one
pub(crate) fn error_message(body: &str) -> Option<String> {
    serde_json::from_str::<Value>(body)
        .ok()
        .as_ref()
        .and_then(error_field)
}

fn error_field(value: &Value) -> Option<String> {
    value.get("error")?.as_str().map(|s| s.trim().to_string())
}

fn text_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Number(n) => Ok(n.to_string()),
        Value::Null => Ok(String::new()),
        other => Err(serde::de::Error::custom(format!(
            "expected string or number, got {other}"
        ))),
    }
}
