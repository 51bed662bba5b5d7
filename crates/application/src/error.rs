//! Application-level errors

use domain::DomainError;
use thiserror::Error;

/// Coarse classification of a pipeline failure
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Empty or invalid user input
    Validation,
    /// Selected place has no usable geometry
    Resolution,
    /// Network or transport failure
    Transport,
    /// Backend answered with an application-level error
    Backend,
    /// Success payload could not be turned into a displayable result
    Render,
    /// Client misconfiguration
    Configuration,
}

/// Errors that can occur in the application layer
#[derive(Debug, Error)]
pub enum ApplicationError {
    /// Invalid user input, never reaches the network
    #[error("Validation error: {0}")]
    Validation(String),

    /// Place selection could not be turned into a location
    #[error("Resolution error: {0}")]
    Resolution(String),

    /// Connection refused, timeout, or non-success HTTP status
    #[error("Transport error: {0}")]
    Transport(String),

    /// Well-formed response carrying an `error` field
    #[error("Backend error: {0}")]
    Backend(String),

    /// Unexpected shape of a success payload, or template failure
    #[error("Render error: {0}")]
    Render(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Configuration(String),
}

const TRANSPORT_MESSAGE: &str = "An error occurred. Please try again.";
const RESOLUTION_MESSAGE: &str = "We couldn't find a usable location for that place. \
     Please choose a suggestion from the list or type a full address.";
const RENDER_MESSAGE: &str = "Something went wrong while showing the result. Please try again.";
const CONFIGURATION_MESSAGE: &str = "The station finder is not configured correctly.";

impl ApplicationError {
    /// Classification of this error
    #[must_use]
    pub const fn kind(&self) -> ErrorKind {
        match self {
            Self::Validation(_) => ErrorKind::Validation,
            Self::Resolution(_) => ErrorKind::Resolution,
            Self::Transport(_) => ErrorKind::Transport,
            Self::Backend(_) => ErrorKind::Backend,
            Self::Render(_) => ErrorKind::Render,
            Self::Configuration(_) => ErrorKind::Configuration,
        }
    }

    /// Message suitable for showing to the user
    ///
    /// Validation and backend messages are passed through, everything else
    /// gets a fixed wording so internal details stay in the logs. A blank
    /// pass-through message falls back to the generic wording.
    #[must_use]
    pub fn user_message(&self) -> String {
        match self {
            Self::Validation(msg) | Self::Backend(msg) if msg.trim().is_empty() => {
                TRANSPORT_MESSAGE.to_string()
            },
            Self::Validation(msg) | Self::Backend(msg) => msg.clone(),
            Self::Resolution(_) => RESOLUTION_MESSAGE.to_string(),
            Self::Transport(_) => TRANSPORT_MESSAGE.to_string(),
            Self::Render(_) => RENDER_MESSAGE.to_string(),
            Self::Configuration(_) => CONFIGURATION_MESSAGE.to_string(),
        }
    }

    /// Whether the error was detected before any network I/O
    #[must_use]
    pub const fn is_local(&self) -> bool {
        matches!(self, Self::Validation(_) | Self::Resolution(_))
    }
}

impl From<DomainError> for ApplicationError {
    fn from(err: DomainError) -> Self {
        match err {
            DomainError::ValidationError(msg) => Self::Validation(msg),
            other => Self::Validation(other.to_string()),
        }
    }
}
