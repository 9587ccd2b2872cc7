//! Store Module
//!
//! Provides the entry model, the repository trait and the in-memory entry
//! store with background eviction of expired entries.

mod entry;
pub(crate) mod memory;
mod repository;


// Re-export public types
pub use entry::{current_timestamp_ms, Entry, EntryKind, EntryValue};
pub use memory::EntryStore;
pub use repository::EntryRepository;
