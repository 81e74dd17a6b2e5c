use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use tierpass_core::Tier;
use tierpass_infra::UserUpdate;

use crate::app::dto::{PaymentRequest, PaymentResponse, present};
use crate::app::errors::{json_error, missing_fields};
use crate::app::routes::auth::issue_token;
use crate::app::services::AppServices;

/// Simulated checkout: any accepted payment upgrades the caller immediately.
pub async fn payment(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<PaymentRequest>>,
) -> axum::response::Response {
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let (Some(token), Some(tier)) = (present(req.token), present(req.tier)) else {
        return missing_fields(&["token", "tier"]);
    };

    let claims = match services.codec.verify(&token) {
        Ok(claims) => claims,
        Err(e) => return json_error(StatusCode::UNAUTHORIZED, "invalid_token", e.to_string()),
    };
    let Some(email) = claims.email() else {
        return json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_token",
            "token has no email claim",
        );
    };

    let tier: Tier = match tier.parse() {
        Ok(tier) => tier,
        Err(e) => return json_error(StatusCode::BAD_REQUEST, "invalid_tier", format!("{e}")),
    };

    let message = match req.payment_method.as_deref() {
        Some("stripe") if services.stripe_configured => "Payment processed via Stripe",
        Some("stripe") => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "stripe_not_configured",
                "Stripe not configured. Please use demo payment.",
            );
        }
        Some("demo") => "Demo payment successful",
        _ => {
            return json_error(
                StatusCode::BAD_REQUEST,
                "invalid_payment_method",
                "payment method must be one of: stripe, demo",
            );
        }
    };

    let email = email.to_string();
    let updated = services
        .with_users(move |users| users.update_user(&email, UserUpdate::subscription(tier)))
        .await;
    let user = match updated {
        Ok(Some(user)) => user,
        Ok(None) => {
            return json_error(StatusCode::NOT_FOUND, "user_not_found", "user not found");
        }
        Err(res) => return res,
    };

    tracing::info!(user_id = %user.id, tier = %tier, "subscription updated");

    let body = PaymentResponse {
        success: true,
        message,
        subscription: user.subscription,
        token: issue_token(&services.codec, &user),
    };
    (StatusCode::OK, Json(body)).into_response()
}
