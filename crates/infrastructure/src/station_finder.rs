//! StationFinder bootstrap
//!
//! Wires configuration, the backend adapter, the headless map and the two
//! display regions into a running client.

use std::sync::Arc;

use application::ports::DirectionsPort;
use application::{
    ApplicationError, MapPresenter, Orchestrator, PlaceInput, PlaceResolver, ResultRenderer,
    StatusPoller, SubmissionOutcome, SubmitEvent,
};
use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::info;

use crate::adapters::{BufferedRegion, HeadlessMapSurface, MapSnapshot, TransitAdapter};
use crate::config::AppConfig;

/// A fully wired station finder client
pub struct StationFinder {
    config: AppConfig,
    orchestrator: Orchestrator,
    poller: Option<StatusPoller>,
    poll_task: Option<JoinHandle<()>>,
    map: Arc<HeadlessMapSurface>,
    result_region: Arc<BufferedRegion>,
    status_region: Arc<BufferedRegion>,
}

impl std::fmt::Debug for StationFinder {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StationFinder")
            .field("polling", &self.poll_task.is_some())
            .field("orchestrator", &self.orchestrator)
            .finish_non_exhaustive()
    }
}

impl StationFinder {
    /// Build a client from configuration, without a directions provider
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn from_config(config: AppConfig) -> Result<Self, ApplicationError> {
        Self::new(config, None)
    }

    /// Build a client, optionally routing walks through a directions provider
    ///
    /// # Errors
    ///
    /// Returns `Configuration` if the configuration is invalid or the HTTP
    /// client cannot be built.
    pub fn new(
        config: AppConfig,
        directions: Option<Arc<dyn DirectionsPort>>,
    ) -> Result<Self, ApplicationError> {
        config.validate()?;

        let adapter = Arc::new(TransitAdapter::from_config(&config.transit)?);
        let renderer = Arc::new(ResultRenderer::new()?);
        let map = Arc::new(HeadlessMapSurface::new());
        let result_region = Arc::new(BufferedRegion::new("result"));
        let status_region = Arc::new(BufferedRegion::new("status"));

        let mut presenter = MapPresenter::new(map.clone(), &config.client);
        if let Some(directions) = directions {
            presenter = presenter.with_directions(directions);
        }

        let orchestrator = Orchestrator::new(
            PlaceResolver::from_settings(&config.client),
            adapter.clone(),
            renderer.clone(),
            result_region.clone(),
            presenter,
        );
        let poller = StatusPoller::new(adapter, status_region.clone(), renderer);

        Ok(Self {
            config,
            orchestrator,
            poller: Some(poller),
            poll_task: None,
            map,
            result_region,
            status_region,
        })
    }

    /// Show the initial map and start status polling
    ///
    /// Calling this more than once has no further effect.
    pub async fn start(&mut self) {
        let Some(poller) = self.poller.take() else {
            return;
        };

        self.orchestrator.initialize_map().await;
        self.poll_task = Some(poller.start(self.config.client.poll_interval()));
        info!(
            backend = %self.config.transit.base_url,
            "Station finder started"
        );
    }

    /// Submit a place and wait for the outcome
    pub async fn submit(&self, input: PlaceInput) -> SubmissionOutcome {
        let mut event = SubmitEvent::new(input);
        self.orchestrator.handle_submit(&mut event).await
    }

    /// Current map state
    #[must_use]
    pub fn map(&self) -> MapSnapshot {
        self.map.snapshot()
    }

    /// Current content of the result region
    #[must_use]
    pub fn result_html(&self) -> String {
        self.result_region.content()
    }

    /// Current content of the status region
    #[must_use]
    pub fn status_html(&self) -> String {
        self.status_region.content()
    }

    /// Subscribe to result region updates
    #[must_use]
    pub fn watch_result(&self) -> watch::Receiver<String> {
        self.result_region.subscribe()
    }

    /// Subscribe to status region updates
    #[must_use]
    pub fn watch_status(&self) -> watch::Receiver<String> {
        self.status_region.subscribe()
    }

    /// Stop status polling
    pub fn shutdown(&mut self) {
        if let Some(task) = self.poll_task.take() {
            task.abort();
            info!("Station finder stopped");
        }
    }
}

impl Drop for StationFinder {
    fn drop(&mut self) {
        self.shutdown();
    }
}
