use axum::{
    Json, Router,
    extract::{Extension, Path},
    http::StatusCode,
    response::IntoResponse,
    routing::get,
};

use tierpass_auth::{AccessError, TierFeatures, all_features_with_access, tier_comparison};

use crate::app::dto::{FeatureListResponse, FeatureResponse, UpgradeRequiredResponse};
use crate::app::errors::json_error;
use crate::context::SubscriberContext;

/// Routes mounted behind the auth middleware.
pub fn router() -> Router {
    Router::new()
        .route("/", get(list))
        .route("/:id", get(get_feature))
}

pub async fn list(Extension(subscriber): Extension<SubscriberContext>) -> impl IntoResponse {
    let tier = subscriber.tier();
    Json(FeatureListResponse {
        tier,
        features: all_features_with_access(tier),
    })
}

pub async fn get_feature(
    Extension(subscriber): Extension<SubscriberContext>,
    Path(id): Path<String>,
) -> axum::response::Response {
    match subscriber.require(&id) {
        Ok(feature) => (
            StatusCode::OK,
            Json(FeatureResponse {
                feature,
                available: true,
            }),
        )
            .into_response(),
        Err(AccessError::UnknownFeature(_)) => {
            json_error(StatusCode::NOT_FOUND, "not_found", format!("unknown feature '{id}'"))
        }
        Err(e @ AccessError::UpgradeRequired { required, .. }) => (
            StatusCode::FORBIDDEN,
            Json(UpgradeRequiredResponse {
                error: "upgrade_required",
                message: e.to_string(),
                required_tier: required,
            }),
        )
            .into_response(),
    }
}

/// Public tier comparison table.
pub async fn tiers() -> Json<Vec<TierFeatures>> {
    Json(tier_comparison())
}
