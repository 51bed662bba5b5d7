//! Application layer - Use cases and orchestration
//!
//! Contains the station lookup pipeline (place resolution, backend query,
//! result rendering, map presentation), the status polling loop, and the
//! port definitions that hosts and infrastructure adapters implement.

pub mod error;
pub mod ports;
pub mod services;
pub mod settings;

pub use error::{ApplicationError, ErrorKind};
pub use ports::*;
pub use services::*;
pub use settings::ClientSettings;
