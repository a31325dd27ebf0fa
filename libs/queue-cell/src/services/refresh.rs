//! Periodic re-read of persisted queue state.

use std::sync::Arc;
use std::time::Duration;

use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;
use tracing::{info, warn};

use super::queue::QueueService;

/// Background task that reloads the queue service from the store on a
/// fixed interval (the desk's auto-refresh). Aborted on drop so it cannot
/// outlive its owner.
pub struct RefreshTask {
    handle: JoinHandle<()>,
}

impl RefreshTask {
    pub fn spawn(service: Arc<QueueService>, interval_secs: u64) -> Self {
        let interval_secs = interval_secs.max(1);
        let handle = tokio::spawn(async move {
            let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
            ticker.set_missed_tick_behavior(MissedTickBehavior::Skip);
            // The first tick fires immediately; skip it so spawn is cheap.
            ticker.tick().await;

            loop {
                ticker.tick().await;
                if let Err(e) = service.reload().await {
                    warn!("Periodic queue refresh failed: {}", e);
                }
            }
        });
        info!("Queue refresh task started (every {}s)", interval_secs);
        Self { handle }
    }

    pub fn shutdown(self) {
        self.handle.abort();
    }
}

impl Drop for RefreshTask {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
