//! Domain layer for StationFinder
//!
//! Contains the value objects and entities shared by the station lookup
//! pipeline: validated coordinates, location queries, transit results,
//! service status and map overlay handles.
//! This layer performs no I/O and defines the ubiquitous language.

pub mod entities;
pub mod errors;
pub mod value_objects;

pub use entities::*;
pub use errors::DomainError;
pub use value_objects::*;
