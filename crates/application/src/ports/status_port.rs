//! Service status port

use async_trait::async_trait;
use domain::ServiceStatus;
#[cfg(test)]
use mockall::automock;

use crate::error::ApplicationError;

/// Port for the backend's service-status endpoint
#[cfg_attr(test, automock)]
#[async_trait]
pub trait StatusPort: Send + Sync {
    /// Fetch the current service status
    async fn fetch_status(&self) -> Result<ServiceStatus, ApplicationError>;
}
