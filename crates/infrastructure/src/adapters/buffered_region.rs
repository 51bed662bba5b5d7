//! Buffered display region
//!
//! [`DisplayRegion`] that keeps the latest HTML fragment and publishes every
//! replacement on a `tokio::sync::watch` channel, so a host can render it
//! wherever it likes (terminal, web view, file).

use application::ports::DisplayRegion;
use tokio::sync::watch;
use tracing::trace;

/// Display region backed by a watch channel
#[derive(Debug)]
pub struct BufferedRegion {
    name: &'static str,
    sender: watch::Sender<String>,
}

impl BufferedRegion {
    /// Create an empty region
    #[must_use]
    pub fn new(name: &'static str) -> Self {
        let (sender, _) = watch::channel(String::new());
        Self { name, sender }
    }

    /// Region name used in logs
    #[must_use]
    pub const fn name(&self) -> &'static str {
        self.name
    }

    /// Current content
    #[must_use]
    pub fn content(&self) -> String {
        self.sender.borrow().clone()
    }

    /// Subscribe to content replacements
    #[must_use]
    pub fn subscribe(&self) -> watch::Receiver<String> {
        self.sender.subscribe()
    }
}

impl DisplayRegion for BufferedRegion {
    fn replace(&self, html: &str) {
        trace!(region = self.name, bytes = html.len(), "Region content replaced");
        self.sender.send_replace(html.to_string());
    }
}
