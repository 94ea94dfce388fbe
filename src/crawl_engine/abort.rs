//! Cooperative crawl abort
//!
//! Aborting stops the orchestrator from starting further fetches and cuts a
//! pending inter-request delay short. A request already in flight is left to
//! complete or time out.

use std::sync::Arc;
use tokio::sync::watch;

/// Cloneable handle used to abort a running crawl
#[derive(Debug, Clone)]
pub struct CrawlAbortHandle {
    tx: Arc<watch::Sender<bool>>,
}

impl Default for CrawlAbortHandle {
    fn default() -> Self {
        Self::new()
    }
}

impl CrawlAbortHandle {
    #[must_use]
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(false);
        Self { tx: Arc::new(tx) }
    }

    /// Request that the crawl stop issuing fetches
    pub fn abort(&self) {
        self.tx.send_replace(true);
    }

    /// Clear a previous abort so the crawler can be reused
    pub fn reset(&self) {
        self.tx.send_replace(false);
    }

    #[must_use]
    pub fn is_aborted(&self) -> bool {
        *self.tx.borrow()
    }

    /// Resolve once an abort has been requested
    pub async fn aborted(&self) {
        let mut rx = self.tx.subscribe();
        // The sender lives as long as `self`, so this only returns on abort
        let _ = rx.wait_for(|aborted| *aborted).await;
    }
}
