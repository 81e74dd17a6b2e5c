//! HTTP API application wiring (Axum router + service wiring).
//!
//! - `services.rs`: codec and user store wiring
//! - `routes/`: HTTP routes + handlers (one file per area)
//! - `dto.rs`: request/response DTOs
//! - `errors.rs`: consistent error responses

use std::sync::Arc;

use axum::{Extension, Router, routing::get};
use tower::ServiceBuilder;

use crate::middleware;

pub mod dto;
pub mod errors;
pub mod routes;
pub mod services;

/// Build the full HTTP router (public entrypoint used by `main.rs`).
pub fn build_app(services: services::AppServices) -> Router {
    let auth_state = middleware::AuthState {
        codec: services.codec.clone(),
    };
    let services = Arc::new(services);

    // Bearer-token routes: require a verified token.
    let protected = routes::features::router().route_layer(axum::middleware::from_fn_with_state(
        auth_state,
        middleware::auth_middleware,
    ));

    let api = Router::new()
        .route("/health", get(routes::system::health))
        .merge(routes::router())
        .nest("/features", protected)
        .layer(Extension(services));

    Router::new()
        .nest("/api", api)
        .fallback(errors::not_found)
        .layer(ServiceBuilder::new().layer(axum::middleware::from_fn(middleware::log_server_errors)))
}
