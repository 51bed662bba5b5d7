//! Domain entities

mod service_status;
mod transit_result;

pub use service_status::ServiceStatus;
pub use transit_result::{Accessibility, TransitResult, WalkingStep};
