//! API Handlers
//!
//! HTTP request handlers for each store endpoint.

use std::sync::Arc;
use std::time::Duration;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};

use crate::config::Config;
use crate::error::ServiceResult;
use crate::models::{HealthResponse, ListRequest, StringRequest, ValueResponse};
use crate::service::StoreApi;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    /// Typed store operations
    pub service: Arc<dyn StoreApi>,
    /// Expected bearer token; None disables auth
    pub api_token: Option<Arc<str>>,
    /// Deadline for a single request
    pub request_timeout: Duration,
}

impl AppState {
    /// Creates a new AppState with auth disabled and the default timeout.
    pub fn new(service: Arc<dyn StoreApi>) -> Self {
        Self {
            service,
            api_token: None,
            request_timeout: Config::default().request_timeout,
        }
    }

    /// Creates a new AppState from configuration.
    pub fn from_config(config: &Config, service: Arc<dyn StoreApi>) -> Self {
        Self {
            service,
            api_token: config.api_token.as_deref().map(Arc::from),
            request_timeout: config.request_timeout,
        }
    }

    pub fn with_api_token(mut self, token: impl AsRef<str>) -> Self {
        self.api_token = Some(Arc::from(token.as_ref()));
        self
    }

    pub fn with_request_timeout(mut self, timeout: Duration) -> Self {
        self.request_timeout = timeout;
        self
    }
}

/// Handler for POST /v1/string/:key
pub async fn set_string_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<StringRequest>,
) -> ServiceResult<StatusCode> {
    state.service.set_string(&key, &req.value, req.ttl()).await?;
    Ok(StatusCode::OK)
}

/// Handler for GET /v1/string/:key
pub async fn get_string_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServiceResult<Json<ValueResponse>> {
    let value = state.service.get_string(&key).await?;
    Ok(Json(ValueResponse::new(value)))
}

/// Handler for DELETE /v1/string/:key
pub async fn delete_string_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServiceResult<StatusCode> {
    state.service.delete_string(&key).await?;
    Ok(StatusCode::OK)
}

/// Handler for POST /v1/list/:key/push
pub async fn push_list_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
    Json(req): Json<ListRequest>,
) -> ServiceResult<StatusCode> {
    state.service.lpush(&key, req.items).await?;
    Ok(StatusCode::OK)
}

/// Handler for POST /v1/list/:key/pop
pub async fn pop_list_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ServiceResult<Json<ValueResponse>> {
    let value = state.service.rpop(&key).await?;
    Ok(Json(ValueResponse::new(value)))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
