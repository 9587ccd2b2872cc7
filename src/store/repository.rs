//! Entry repository trait

use async_trait::async_trait;

use crate::error::Result;
use crate::store::Entry;

/// Keyed storage of entries.
///
/// Implementations own expiry checks on read but know nothing about entry
/// kinds or default TTLs.
#[async_trait]
pub trait EntryRepository: Send + Sync {
    /// Fetch a snapshot of the entry at `key`.
    ///
    /// Fails with `NotFound` if absent and `ExpiredEntry` if past expiry.
    async fn get(&self, key: &str) -> Result<Entry>;

    /// Insert or overwrite the entry at `key`.
    async fn set(&self, key: &str, entry: Entry) -> Result<()>;

    /// Remove the entry at `key`. Absent keys are not an error.
    async fn remove(&self, key: &str) -> Result<()>;
}
