//! API Routes
//!
//! Configures the Axum router with all store endpoints.

use std::any::Any as PanicPayload;

use axum::{
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::error;

use super::auth::require_bearer_token;
use super::handlers::{
    delete_string_handler, get_string_handler, health_handler, pop_list_handler,
    push_list_handler, set_string_handler, AppState,
};
use crate::models::ErrorResponse;

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `POST /v1/string/:key` - Store a string
/// - `GET /v1/string/:key` - Retrieve a string
/// - `DELETE /v1/string/:key` - Delete a key
/// - `POST /v1/list/:key/push` - Prepend items to a list
/// - `POST /v1/list/:key/pop` - Pop the last list item
/// - `GET /health` - Health check endpoint (no auth)
///
/// # Middleware
/// - Bearer token auth on `/v1` routes
/// - Timeout: Cancels requests running past the configured deadline (408)
/// - Catch panic: A panicking handler becomes a 500 instead of a dropped
///   connection
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        .route(
            "/v1/string/:key",
            post(set_string_handler)
                .get(get_string_handler)
                .delete(delete_string_handler),
        )
        .route("/v1/list/:key/push", post(push_list_handler))
        .route("/v1/list/:key/pop", post(pop_list_handler))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_bearer_token,
        ));

    Router::new()
        .merge(api)
        .route("/health", get(health_handler))
        .layer(TimeoutLayer::new(state.request_timeout))
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

fn handle_panic(payload: Box<dyn PanicPayload + Send + 'static>) -> Response {
    let detail = payload
        .downcast_ref::<String>()
        .map(String::as_str)
        .or_else(|| payload.downcast_ref::<&str>().copied())
        .unwrap_or("unknown panic");
    error!("Handler panicked: {}", detail);

    let status = StatusCode::INTERNAL_SERVER_ERROR;
    (
        status,
        Json(ErrorResponse::new(status.as_u16(), "internal error")),
    )
        .into_response()
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use tower::util::ServiceExt;

    use crate::error::ServiceResult;
    use crate::service::{StoreApi, StoreService};
    use crate::store::EntryStore;

    /// Reads take `delay` to answer and pops panic.
    struct StubService {
        delay: Duration,
    }

    #[async_trait]
    impl StoreApi for StubService {
        async fn set_string(&self, _key: &str, _value: &str, _ttl: Duration) -> ServiceResult<()> {
            Ok(())
        }

        async fn get_string(&self, _key: &str) -> ServiceResult<String> {
            tokio::time::sleep(self.delay).await;
            Ok("late".to_string())
        }

        async fn delete_string(&self, _key: &str) -> ServiceResult<()> {
            Ok(())
        }

        async fn lpush(&self, _key: &str, _items: Vec<String>) -> ServiceResult<()> {
            Ok(())
        }

        async fn rpop(&self, _key: &str) -> ServiceResult<String> {
            panic!("pop blew up");
        }
    }

    fn create_stub_app(delay: Duration, timeout: Duration) -> Router {
        let state = AppState::new(Arc::new(StubService { delay })).with_request_timeout(timeout);
        create_router(state)
    }

    fn create_test_app(token: Option<&str>) -> Router {
        let store = Arc::new(EntryStore::new(Duration::from_secs(3600)));
        let service = Arc::new(StoreService::new(store, Duration::from_secs(300)));
        let state = AppState::new(service);
        let state = match token {
            Some(token) => state.with_api_token(token),
            None => state,
        };
        create_router(state)
    }

    #[tokio::test]
    async fn test_health_endpoint() {
        let app = create_test_app(Some("secret"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_set_endpoint() {
        let app = create_test_app(None);

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/string/test")
                    .header("content-type", "application/json")
                    .body(Body::from(r#"{"value":"hello"}"#))
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_get_not_found() {
        let app = create_test_app(None);

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/string/nonexistent")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_missing_token_is_rejected() {
        let app = create_test_app(Some("secret"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/string/anything")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_valid_token_is_accepted() {
        let app = create_test_app(Some("secret"));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/string/anything")
                    .header("authorization", "Bearer secret")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        // Authorized, but the key does not exist
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_slow_request_times_out() {
        let app = create_stub_app(Duration::from_secs(5), Duration::from_millis(20));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/string/slow")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);
    }

    #[tokio::test]
    async fn test_fast_request_beats_timeout() {
        let app = create_stub_app(Duration::ZERO, Duration::from_secs(5));

        let response = app
            .oneshot(
                Request::builder()
                    .uri("/v1/string/fast")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_panicking_handler_returns_500() {
        let app = create_stub_app(Duration::ZERO, Duration::from_secs(5));

        let response = app
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/v1/list/boom/pop")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let error: ErrorResponse = serde_json::from_slice(&body).unwrap();
        assert_eq!(error, ErrorResponse::new(500, "internal error"));
    }
}
