//! Eviction Task
//!
//! Background task that periodically removes expired entries from the store.

use std::time::Duration;

use tokio::sync::watch;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::store::current_timestamp_ms;
use crate::store::memory::{evict_expired, SharedEntries};

/// Spawns a background task that sweeps expired entries every `interval`.
///
/// Each sweep takes the map's write lock and removes every entry whose expiry
/// is at or before the tick time. The task ends when `true` is sent on
/// `shutdown_rx` or when its sender is dropped.
///
/// # Example
/// ```ignore
/// let (tx, rx) = watch::channel(false);
/// let handle = spawn_eviction_task(entries.clone(), Duration::from_secs(1), rx);
/// // Later, during shutdown:
/// tx.send(true).ok();
/// handle.await.ok();
/// ```
pub fn spawn_eviction_task(
    entries: SharedEntries,
    interval: Duration,
    mut shutdown_rx: watch::Receiver<bool>,
) -> JoinHandle<()> {
    // tokio intervals reject a zero period
    let period = interval.max(Duration::from_millis(1));

    tokio::spawn(async move {
        info!("Starting eviction task with interval of {:?}", period);

        let mut ticker = tokio::time::interval(period);
        // First tick completes immediately
        ticker.tick().await;

        loop {
            tokio::select! {
                _ = ticker.tick() => {
                    let removed = {
                        let mut guard = entries.write().await;
                        evict_expired(&mut guard, current_timestamp_ms())
                    };

                    if removed > 0 {
                        info!("Eviction sweep: removed {} expired entries", removed);
                    } else {
                        debug!("Eviction sweep: no expired entries found");
                    }
                }
                changed = shutdown_rx.changed() => {
                    if changed.is_err() || *shutdown_rx.borrow() {
                        debug!("Eviction task received shutdown signal");
                        break;
                    }
                }
            }
        }
    })
}
