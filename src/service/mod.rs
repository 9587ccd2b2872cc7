//! Service Module
//!
//! Typed string and list operations on top of an entry repository.

mod store_service;

pub use store_service::{StoreApi, StoreService};
