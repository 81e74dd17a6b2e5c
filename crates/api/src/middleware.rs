use std::sync::Arc;

use axum::{
    extract::State,
    http::{HeaderMap, StatusCode},
    middleware::Next,
    response::Response,
};
use chrono::Utc;

use tierpass_auth::{TokenCodec, authenticate};

use crate::app::errors::json_error;
use crate::context::SubscriberContext;

#[derive(Clone)]
pub struct AuthState {
    pub codec: Arc<TokenCodec>,
}

/// Require a valid bearer token and attach a [`SubscriberContext`].
pub async fn auth_middleware(
    State(state): State<AuthState>,
    mut req: axum::http::Request<axum::body::Body>,
    next: Next,
) -> Result<Response, Response> {
    let token = extract_bearer(req.headers()).ok_or_else(|| {
        json_error(
            StatusCode::UNAUTHORIZED,
            "unauthorized",
            "missing bearer token",
        )
    })?;

    let grant = authenticate(&*state.codec, token, Utc::now())
        .map_err(|e| json_error(StatusCode::UNAUTHORIZED, "invalid_token", e.to_string()))?;

    req.extensions_mut().insert(SubscriberContext::new(grant));

    Ok(next.run(req).await)
}

/// Log every response that ends in a server error.
pub async fn log_server_errors(req: axum::http::Request<axum::body::Body>, next: Next) -> Response {
    let method = req.method().clone();
    let path = req.uri().path().to_string();

    let res = next.run(req).await;
    if res.status().is_server_error() {
        tracing::error!(%method, %path, status = res.status().as_u16(), "request failed");
    }
    res
}

fn extract_bearer(headers: &HeaderMap) -> Option<&str> {
    let header = headers.get(axum::http::header::AUTHORIZATION)?;
    let header = header.to_str().ok()?;
    let token = header.strip_prefix("Bearer ")?.trim();

    if token.is_empty() {
        return None;
    }

    Some(token)
}
