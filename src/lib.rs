//! TTL Store - An in-memory string and list store with expiring entries
//!
//! Provides typed string and list operations over a TTL-bounded entry store
//! with background eviction, plus an HTTP front end.

pub mod api;
pub mod config;
pub mod error;
pub mod models;
pub mod service;
pub mod store;
mod tasks;

pub use api::AppState;
pub use config::Config;
pub use error::{Operation, ServiceError, StoreError};
pub use service::{StoreApi, StoreService};
pub use store::{Entry, EntryKind, EntryRepository, EntryStore, EntryValue};
