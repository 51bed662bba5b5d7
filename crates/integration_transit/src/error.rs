//! Transit error types

use thiserror::Error;

/// Errors that can occur while talking to the station backend
#[derive(Debug, Clone, Error)]
pub enum TransitError {
    /// Connection to the backend failed
    #[error("Connection failed: {0}")]
    ConnectionFailed(String),

    /// Request timeout
    #[error("Request timed out after {timeout_secs} seconds")]
    Timeout {
        /// The timeout duration in seconds
        timeout_secs: u64,
    },

    /// Backend answered with a non-success HTTP status
    #[error("HTTP {status}{}", detail(.message.as_deref()))]
    HttpStatus {
        /// Status code
        status: u16,
        /// `error` field of the response body, if there was one
        message: Option<String>,
    },

    /// Well-formed response carrying an `error` field
    #[error("Backend error: {0}")]
    Backend(String),

    /// Success response that does not match the expected shape
    #[error("Malformed payload: {0}")]
    MalformedPayload(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    ConfigurationError(String),
}

fn detail(message: Option<&str>) -> String {
    message.map(|m| format!(": {m}")).unwrap_or_default()
}

impl TransitError {
    /// Returns true if the request never produced a usable response
    #[must_use]
    pub const fn is_transport(&self) -> bool {
        matches!(
            self,
            Self::ConnectionFailed(_) | Self::Timeout { .. } | Self::HttpStatus { .. }
        )
    }
}
