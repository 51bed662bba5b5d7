//! Rail service status snapshot

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Latest service status as reported by the backend
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ServiceStatus {
    /// Free-text status, e.g. "All lines operating normally"
    pub status_text: String,
    /// Backend-supplied timestamp, displayed verbatim
    pub timestamp: String,
    /// When the client received this snapshot
    pub received_at: DateTime<Utc>,
}

impl ServiceStatus {
    /// Create a status snapshot received now
    #[must_use]
    pub fn new(status_text: impl Into<String>, timestamp: impl Into<String>) -> Self {
        Self {
            status_text: status_text.into(),
            timestamp: timestamp.into(),
            received_at: Utc::now(),
        }
    }
}
