//! Background Tasks Module
//!
//! Contains background tasks that run periodically while the store is alive.
//!
//! # Tasks
//! - Eviction: Removes expired entries at the configured interval

mod eviction;

pub use eviction::spawn_eviction_task;
