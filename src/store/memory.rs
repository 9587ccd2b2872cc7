//! Entry Store Module
//!
//! In-memory entry storage behind a single read/write lock, with a background
//! task that evicts expired entries.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::{watch, Mutex, RwLock};
use tokio::task::JoinHandle;
use tracing::{debug, error, info};

use crate::error::{Result, StoreError};
use crate::store::{current_timestamp_ms, Entry, EntryRepository};
use crate::tasks::spawn_eviction_task;

/// Map shared between the store and its eviction task.
pub(crate) type SharedEntries = Arc<RwLock<HashMap<String, Entry>>>;

// == Entry Store ==
/// Thread-safe key to entry map with time-based eviction.
///
/// Reads take the lock shared; `set`, `remove` and eviction take it
/// exclusively. Locking is table-wide, not per key.
#[derive(Debug)]
pub struct EntryStore {
    /// Key-entry storage
    entries: SharedEntries,
    /// Signals the eviction task to stop
    shutdown_tx: watch::Sender<bool>,
    /// Eviction task, taken on shutdown
    eviction_handle: Mutex<Option<JoinHandle<()>>>,
}

impl EntryStore {
    // == Constructor ==
    /// Creates an empty store and starts its eviction task.
    ///
    /// # Panics
    /// Panics if called outside of a Tokio runtime, since the eviction task
    /// is spawned here.
    pub fn new(eviction_interval: Duration) -> Self {
        let entries: SharedEntries = Arc::new(RwLock::new(HashMap::new()));
        let (shutdown_tx, shutdown_rx) = watch::channel(false);

        let handle = spawn_eviction_task(entries.clone(), eviction_interval, shutdown_rx);

        Self {
            entries,
            shutdown_tx,
            eviction_handle: Mutex::new(Some(handle)),
        }
    }

    // == Evict Expired ==
    /// Runs one eviction sweep now. Returns the number of entries removed.
    pub async fn evict_expired(&self) -> usize {
        let mut entries = self.entries.write().await;
        evict_expired(&mut entries, current_timestamp_ms())
    }

    // == Shutdown ==
    /// Stops the eviction task and waits for it to finish.
    ///
    /// Later calls find no task left and return immediately.
    pub async fn shutdown(&self) {
        let Some(handle) = self.eviction_handle.lock().await.take() else {
            debug!("Eviction task already stopped");
            return;
        };

        // Receiver may already be gone if the task ended on its own
        let _ = self.shutdown_tx.send(true);

        if let Err(err) = handle.await {
            if !err.is_cancelled() {
                error!("Eviction task failed: {}", err);
            }
        }
        info!("Eviction task stopped");
    }

    // == Length ==
    /// Returns the number of physically stored entries, expired or not.
    pub async fn len(&self) -> usize {
        self.entries.read().await.len()
    }

    // == Is Empty ==
    pub async fn is_empty(&self) -> bool {
        self.entries.read().await.is_empty()
    }
}

#[async_trait]
impl EntryRepository for EntryStore {
    async fn get(&self, key: &str) -> Result<Entry> {
        let entry = {
            let entries = self.entries.read().await;
            entries.get(key).cloned().ok_or(StoreError::NotFound)?
        };

        // Expired entries stay in place until the next sweep
        if entry.is_expired() {
            return Err(StoreError::ExpiredEntry);
        }
        Ok(entry)
    }

    async fn set(&self, key: &str, entry: Entry) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }

        self.entries.write().await.insert(key.to_string(), entry);
        Ok(())
    }

    async fn remove(&self, key: &str) -> Result<()> {
        if key.is_empty() {
            return Err(StoreError::EmptyKey);
        }

        self.entries.write().await.remove(key);
        Ok(())
    }
}

/// Removes every entry whose expiry is set and at or before `now_ms`.
pub(crate) fn evict_expired(entries: &mut HashMap<String, Entry>, now_ms: u64) -> usize {
    let before = entries.len();
    entries.retain(|_, entry| !entry.is_expired_at(now_ms));
    before - entries.len()
}
