//! Bearer token authentication
//!
//! Requests must carry `Authorization: Bearer <token>` matching the configured
//! token. If no token is configured, authentication is disabled.

use axum::{
    extract::{Request, State},
    http::{header, HeaderValue, StatusCode},
    middleware::Next,
    response::{IntoResponse, Response},
    Json,
};
use subtle::ConstantTimeEq;
use tracing::warn;

use super::handlers::AppState;
use crate::models::ErrorResponse;

const BEARER_PREFIX: &str = "Bearer ";

/// Compares two tokens without short-circuiting on the first differing byte.
fn constant_time_compare(a: &str, b: &str) -> bool {
    // Token length is not secret
    if a.len() != b.len() {
        return false;
    }
    a.as_bytes().ct_eq(b.as_bytes()).into()
}

/// Middleware rejecting requests without the expected bearer token.
pub async fn require_bearer_token(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Response {
    let Some(expected) = state.api_token.as_deref() else {
        return next.run(request).await;
    };

    let authorized = request
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.strip_prefix(BEARER_PREFIX))
        .is_some_and(|token| constant_time_compare(token, expected));

    if authorized {
        return next.run(request).await;
    }

    warn!(path = %request.uri().path(), "Bearer token authentication failed");
    unauthorized()
}

fn unauthorized() -> Response {
    let body = Json(ErrorResponse::new(
        StatusCode::UNAUTHORIZED.as_u16(),
        "unauthorized",
    ));
    let mut response = (StatusCode::UNAUTHORIZED, body).into_response();
    response.headers_mut().insert(
        header::WWW_AUTHENTICATE,
        HeaderValue::from_static(r#"Bearer realm="restricted""#),
    );
    response
}
