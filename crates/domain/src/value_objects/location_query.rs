//! Location query value object

use serde::Serialize;
use std::fmt;

use super::GeoLocation;
use crate::errors::DomainError;

/// What the user asked for: a free-text address, exact coordinates, or both.
///
/// At least one of the two is always present. When both are present the
/// coordinates are the authoritative location.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct LocationQuery {
    #[serde(skip_serializing_if = "Option::is_none")]
    address: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    coordinates: Option<GeoLocation>,
}

impl LocationQuery {
    /// Build a query from optional parts
    ///
    /// Blank addresses are treated as absent and surrounding whitespace is
    /// trimmed.
    ///
    /// # Errors
    ///
    /// Returns `DomainError::EmptyQuery` when neither part is usable.
    pub fn new(
        address: Option<String>,
        coordinates: Option<GeoLocation>,
    ) -> Result<Self, DomainError> {
        let address = address
            .map(|a| a.trim().to_string())
            .filter(|a| !a.is_empty());

        if address.is_none() && coordinates.is_none() {
            return Err(DomainError::EmptyQuery);
        }

        Ok(Self {
            address,
            coordinates,
        })
    }

    /// Build a free-text query
    ///
    /// # Errors
    ///
    /// Returns `DomainError::ValidationError` if the text is empty after trimming.
    pub fn from_address(address: impl Into<String>) -> Result<Self, DomainError> {
        Self::new(Some(address.into()), None)
            .map_err(|_| DomainError::validation("Please enter an address or place name"))
    }

    /// Build a query from exact coordinates
    #[must_use]
    pub const fn from_coordinates(coordinates: GeoLocation) -> Self {
        Self {
            address: None,
            coordinates: Some(coordinates),
        }
    }

    /// Free-text address, if any
    #[must_use]
    pub fn address(&self) -> Option<&str> {
        self.address.as_deref()
    }

    /// Exact coordinates, if any
    #[must_use]
    pub const fn coordinates(&self) -> Option<GeoLocation> {
        self.coordinates
    }

    /// Whether the query carries exact coordinates
    #[must_use]
    pub const fn is_precise(&self) -> bool {
        self.coordinates.is_some()
    }
}

impl fmt::Display for LocationQuery {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match (&self.coordinates, &self.address) {
            (Some(coords), Some(address)) => write!(f, "({coords}) \"{address}\""),
            (Some(coords), None) => write!(f, "({coords})"),
            (None, Some(address)) => write!(f, "\"{address}\""),
            (None, None) => write!(f, "<empty>"),
        }
    }
}
