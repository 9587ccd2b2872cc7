//! Request DTOs for the store API
//!
//! Defines the structure of incoming HTTP request bodies.

use std::time::Duration;

use serde::Deserialize;

/// Request body for POST /v1/string/:key
///
/// # Fields
/// - `value`: The string to store
/// - `ttl_seconds`: Optional TTL in seconds (0 or missing uses the default)
#[derive(Debug, Clone, Deserialize)]
pub struct StringRequest {
    /// The value to store
    pub value: String,
    /// Optional TTL in seconds
    #[serde(default)]
    pub ttl_seconds: u64,
}

impl StringRequest {
    /// TTL as a duration; zero asks the service for its default.
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_seconds)
    }
}

/// Request body for POST /v1/list/:key/push
#[derive(Debug, Clone, Deserialize)]
pub struct ListRequest {
    /// Items to prepend, in order
    #[serde(default)]
    pub items: Vec<String>,
}
