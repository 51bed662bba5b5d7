//! Application services - Use case implementations

pub mod map_presenter;
pub mod orchestrator;
pub mod place_resolver;
pub mod result_renderer;
pub mod status_poller;

#[cfg(test)]
pub(crate) mod test_support;

pub use map_presenter::MapPresenter;
pub use orchestrator::{Orchestrator, SubmissionOutcome, SubmitEvent};
pub use place_resolver::{PlaceGeometry, PlaceInput, PlaceResolver, PlaceSelection, ResolvedPlace};
pub use result_renderer::ResultRenderer;
pub use status_poller::StatusPoller;
