//! Submission orchestration
//!
//! Drives one lookup from a submit event to a visible result:
//! resolve the place, query the backend, render the fragment, update the map.
//!
//! Submissions may overlap. Each one takes a sequence number when it starts;
//! a completion is applied only if no later submission has already been
//! applied, so the display always reflects the most recent answer.

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use domain::TransitResult;
use tokio::sync::Mutex;
use tracing::{debug, info, instrument, warn};

use crate::error::{ApplicationError, ErrorKind};
use crate::ports::{DisplayRegion, TransitQueryPort};
use crate::services::map_presenter::MapPresenter;
use crate::services::place_resolver::{PlaceInput, PlaceResolver};
use crate::services::result_renderer::{FALLBACK_ERROR_HTML, ResultRenderer};

/// A form submission
#[derive(Debug, Clone)]
pub struct SubmitEvent {
    input: PlaceInput,
    default_prevented: bool,
}

impl SubmitEvent {
    /// Wrap user input in a fresh, not yet handled event
    #[must_use]
    pub const fn new(input: PlaceInput) -> Self {
        Self {
            input,
            default_prevented: false,
        }
    }

    /// Suppress the host's default submit action (page reload)
    pub fn prevent_default(&mut self) {
        self.default_prevented = true;
    }

    /// Whether the default action was suppressed
    #[must_use]
    pub const fn default_prevented(&self) -> bool {
        self.default_prevented
    }

    /// The submitted input
    #[must_use]
    pub const fn input(&self) -> &PlaceInput {
        &self.input
    }
}

/// What happened to a submission
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmissionOutcome {
    /// Result rendered and shown on the map
    Displayed {
        /// Station that was shown
        station_name: String,
        /// The place was sent as text because its geometry was missing
        degraded: bool,
    },
    /// An error message was rendered in the result region
    Failed(ErrorKind),
    /// A newer submission had already been applied; nothing was changed
    Superseded,
}

#[derive(Debug)]
struct PresentationState {
    presenter: MapPresenter,
    last_applied: u64,
}

/// Coordinates the lookup pipeline for form submissions
pub struct Orchestrator {
    resolver: PlaceResolver,
    transit: Arc<dyn TransitQueryPort>,
    renderer: Arc<ResultRenderer>,
    result_region: Arc<dyn DisplayRegion>,
    state: Mutex<PresentationState>,
    next_sequence: AtomicU64,
}

impl std::fmt::Debug for Orchestrator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Orchestrator")
            .field("resolver", &self.resolver)
            .field("next_sequence", &self.next_sequence)
            .finish_non_exhaustive()
    }
}

impl Orchestrator {
    /// Create an orchestrator
    #[must_use]
    pub fn new(
        resolver: PlaceResolver,
        transit: Arc<dyn TransitQueryPort>,
        renderer: Arc<ResultRenderer>,
        result_region: Arc<dyn DisplayRegion>,
        presenter: MapPresenter,
    ) -> Self {
        Self {
            resolver,
            transit,
            renderer,
            result_region,
            state: Mutex::new(PresentationState {
                presenter,
                last_applied: 0,
            }),
            next_sequence: AtomicU64::new(1),
        }
    }

    /// Show the initial map
    pub async fn initialize_map(&self) {
        self.state.lock().await.presenter.initialize();
    }

    /// Handle a form submission end to end
    ///
    /// Always suppresses the default submit action. Every failure ends up as a
    /// message in the result region; nothing propagates to the caller.
    #[instrument(skip(self, event))]
    pub async fn handle_submit(&self, event: &mut SubmitEvent) -> SubmissionOutcome {
        event.prevent_default();
        let sequence = self.next_sequence.fetch_add(1, Ordering::SeqCst);

        let resolved = match self.resolver.resolve(event.input()) {
            Ok(resolved) => resolved,
            Err(e) => return self.apply_failure(sequence, &e).await,
        };

        debug!(sequence, query = %resolved.query, "Querying nearest station");
        match self.transit.query(&resolved.query).await {
            Ok(result) => self.apply_success(sequence, &result, resolved.degraded).await,
            Err(e) => self.apply_failure(sequence, &e).await,
        }
    }

    async fn apply_success(
        &self,
        sequence: u64,
        result: &TransitResult,
        degraded: bool,
    ) -> SubmissionOutcome {
        let html = match self.renderer.render(result) {
            Ok(html) => html,
            Err(e) => return self.apply_failure(sequence, &e).await,
        };

        let mut state = self.state.lock().await;
        if sequence <= state.last_applied {
            debug!(sequence, last = state.last_applied, "Dropping stale result");
            return SubmissionOutcome::Superseded;
        }
        state.last_applied = sequence;

        self.result_region.replace(&html);
        state.presenter.present(result).await;

        info!(station = %result.station_name, degraded, "Nearest station displayed");
        SubmissionOutcome::Displayed {
            station_name: result.station_name.clone(),
            degraded,
        }
    }

    async fn apply_failure(&self, sequence: u64, error: &ApplicationError) -> SubmissionOutcome {
        let mut state = self.state.lock().await;
        if sequence <= state.last_applied {
            debug!(sequence, last = state.last_applied, "Dropping stale failure");
            return SubmissionOutcome::Superseded;
        }
        state.last_applied = sequence;

        if error.is_local() {
            debug!(error = %error, "Submission rejected before query");
        } else {
            warn!(error = %error, "Station lookup failed");
        }

        let html = self
            .renderer
            .render_error(&error.user_message())
            .unwrap_or_else(|_| FALLBACK_ERROR_HTML.to_string());
        self.result_region.replace(&html);

        SubmissionOutcome::Failed(error.kind())
    }
}
