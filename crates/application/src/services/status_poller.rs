//! Service status polling
//!
//! Fetches the status endpoint on a fixed cadence and writes the rendered
//! panel into its display region. Failures are shown in the panel and the
//! loop keeps going; it never stops on its own.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::{MissedTickBehavior, interval};
use tracing::{debug, info, instrument, warn};

use crate::ports::{DisplayRegion, StatusPort};
use crate::services::result_renderer::{FALLBACK_ERROR_HTML, ResultRenderer};

/// Shortest interval the poller will accept
const MIN_INTERVAL: Duration = Duration::from_secs(1);

/// Periodically refreshes the service status panel
pub struct StatusPoller {
    status: Arc<dyn StatusPort>,
    region: Arc<dyn DisplayRegion>,
    renderer: Arc<ResultRenderer>,
}

impl std::fmt::Debug for StatusPoller {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StatusPoller").finish_non_exhaustive()
    }
}

impl StatusPoller {
    /// Create a poller
    #[must_use]
    pub fn new(
        status: Arc<dyn StatusPort>,
        region: Arc<dyn DisplayRegion>,
        renderer: Arc<ResultRenderer>,
    ) -> Self {
        Self {
            status,
            region,
            renderer,
        }
    }

    /// Fetch once and update the panel
    ///
    /// Returns `true` when fresh status was displayed.
    #[instrument(skip(self))]
    pub async fn poll_once(&self) -> bool {
        match self.status.fetch_status().await {
            Ok(status) => {
                debug!(
                    timestamp = %status.timestamp,
                    received_at = %status.received_at,
                    "Service status received"
                );
                match self.renderer.render_status(&status) {
                    Ok(html) => {
                        self.region.replace(&html);
                        true
                    },
                    Err(e) => {
                        warn!(error = %e, "Could not render service status");
                        self.region.replace(FALLBACK_ERROR_HTML);
                        false
                    },
                }
            },
            Err(e) => {
                warn!(error = %e, "Service status fetch failed");
                let html = self
                    .renderer
                    .render_status_error(&e.user_message())
                    .unwrap_or_else(|_| FALLBACK_ERROR_HTML.to_string());
                self.region.replace(&html);
                false
            },
        }
    }

    /// Spawn the polling loop
    ///
    /// The first fetch happens immediately, then once per `every`. Intervals
    /// below one second are raised to one second. Abort the returned handle
    /// to stop polling.
    pub fn start(self, every: Duration) -> JoinHandle<()> {
        let every = every.max(MIN_INTERVAL);
        info!(interval_ms = every.as_millis(), "Starting service status polling");

        tokio::spawn(async move {
            let mut ticker = interval(every);
            ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);
            loop {
                ticker.tick().await;
                self.poll_once().await;
            }
        })
    }
}
