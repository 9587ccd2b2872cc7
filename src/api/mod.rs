//! API Module
//!
//! HTTP handlers and routing for the store REST API.
//!
//! # Endpoints
//! - `POST /v1/string/:key` - Store a string
//! - `GET /v1/string/:key` - Retrieve a string
//! - `DELETE /v1/string/:key` - Delete a key
//! - `POST /v1/list/:key/push` - Prepend items to a list
//! - `POST /v1/list/:key/pop` - Pop the last list item
//! - `GET /health` - Health check endpoint

pub mod auth;
pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::create_router;
