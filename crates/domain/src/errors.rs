//! Domain-level errors

use thiserror::Error;

/// Errors that can occur in the domain layer
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    /// User input failed validation
    #[error("Validation failed: {0}")]
    ValidationError(String),

    /// Coordinates outside the valid latitude/longitude range
    #[error("Invalid coordinates: latitude {latitude}, longitude {longitude}")]
    InvalidCoordinates {
        /// Rejected latitude
        latitude: f64,
        /// Rejected longitude
        longitude: f64,
    },

    /// A location query was built without an address or coordinates
    #[error("A location query needs an address or coordinates")]
    EmptyQuery,
}

impl DomainError {
    /// Create a validation error
    pub fn validation(message: impl Into<String>) -> Self {
        Self::ValidationError(message.into())
    }
}
