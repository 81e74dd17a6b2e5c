use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};

use tierpass_auth::key_exchange;

use crate::app::dto::{KeyPairResponse, SharedSecretRequest, SharedSecretResponse};
use crate::app::errors::missing_fields;

pub fn router() -> Router {
    Router::new()
        .route("/generate", post(generate))
        .route("/shared-secret", post(shared_secret))
}

pub async fn generate() -> axum::response::Response {
    let pair = key_exchange::generate_key_pair();

    (
        StatusCode::OK,
        Json(KeyPairResponse {
            private_key: pair.private_key,
            public_key: pair.public_key,
            parameters: key_exchange::public_parameters(),
        }),
    )
        .into_response()
}

pub async fn shared_secret(body: Option<Json<SharedSecretRequest>>) -> axum::response::Response {
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let (Some(private_key), Some(other_public_key)) = (req.private_key, req.other_public_key) else {
        return missing_fields(&["privateKey", "otherPublicKey"]);
    };

    let shared_secret = key_exchange::compute_shared_secret(private_key, other_public_key);
    (StatusCode::OK, Json(SharedSecretResponse { shared_secret })).into_response()
}
