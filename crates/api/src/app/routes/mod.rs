use axum::{
    Router,
    routing::{get, post},
};

pub mod auth;
pub mod features;
pub mod key_exchange;
pub mod subscription;
pub mod system;

/// Router for the public (token-in-body or unauthenticated) endpoints.
pub fn router() -> Router {
    Router::new()
        .route("/register", post(auth::register))
        .route("/login", post(auth::login))
        .route("/verify", post(auth::verify))
        .route("/payment", post(subscription::payment))
        .route("/tiers", get(features::tiers))
        .nest("/dh", key_exchange::router())
}
