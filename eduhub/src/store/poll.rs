//! Periodic notification refresh.

use std::sync::Arc;
use std::time::Duration;

use log::debug;
use tokio::task::JoinHandle;
use tokio::time::MissedTickBehavior;

use super::NotificationStore;

/// Default polling period.
pub const POLL_INTERVAL: Duration = Duration::from_secs(30);

/// Background poller driving [`NotificationStore::refresh`] on a
/// fixed interval.
///
/// No jitter or failure backoff: a failed refresh simply waits for
/// the next tick (the store already degrades to cached data). The
/// polling task is aborted when the poller is stopped or dropped, so
/// a torn-down consumer does not leave a refresh loop running.
pub struct NotificationPoller {
    handle: JoinHandle<()>,
}

impl NotificationPoller {
    /// Spawn a poller with the default 30s period.
    pub fn spawn(store: Arc<NotificationStore>) -> Self {
        Self::with_interval(store, POLL_INTERVAL)
    }

    /// Spawn a poller with a custom period.
    pub fn with_interval(store: Arc<NotificationStore>, period: Duration) -> Self {
        let handle = tokio::spawn(async move {
            let mut tick = tokio::time::interval(period);
            tick.set_missed_tick_behavior(MissedTickBehavior::Delay);
            // The first tick fires immediately; skip it so spawning
            // does not double up with the caller's initial fetch.
            tick.tick().await;

            loop {
                tick.tick().await;
                debug!("notification poll tick");
                store.refresh().await;
            }
        });

        Self { handle }
    }

    /// Whether the polling task has stopped.
    pub fn is_stopped(&self) -> bool {
        self.handle.is_finished()
    }

    /// Stop the poller, aborting the background task.
    pub fn stop(self) {
        self.handle.abort();
    }
}

impl Drop for NotificationPoller {
    fn drop(&mut self) {
        self.handle.abort();
    }
}
