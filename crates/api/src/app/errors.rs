use axum::http::StatusCode;
use axum::response::IntoResponse;
use serde_json::json;

use tierpass_infra::StoreError;

pub fn store_error_to_response(err: StoreError) -> axum::response::Response {
    match err {
        StoreError::Conflict(_) => json_error(StatusCode::BAD_REQUEST, "user_exists", "user already exists"),
        other => {
            tracing::error!(error = %other, "user store failure");
            json_error(
                StatusCode::INTERNAL_SERVER_ERROR,
                "store_error",
                "internal server error",
            )
        }
    }
}

pub fn json_error(
    status: StatusCode,
    code: &'static str,
    message: impl Into<String>,
) -> axum::response::Response {
    (
        status,
        axum::Json(json!({
            "error": code,
            "message": message.into(),
        })),
    )
        .into_response()
}

/// 400 listing the fields that were missing or empty.
pub fn missing_fields(fields: &[&str]) -> axum::response::Response {
    json_error(
        StatusCode::BAD_REQUEST,
        "validation_error",
        format!("missing required fields: {}", fields.join(", ")),
    )
}

pub async fn not_found() -> axum::response::Response {
    json_error(StatusCode::NOT_FOUND, "not_found", "Endpoint not found")
}
