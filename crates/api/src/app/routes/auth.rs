use std::sync::Arc;

use axum::{Json, extract::Extension, http::StatusCode, response::IntoResponse};

use tierpass_auth::{TokenCodec, TokenPayload, VerificationOutcome};
use tierpass_core::Tier;
use tierpass_infra::password::{hash_password, verify_password};
use tierpass_infra::{NewUser, StoreError, UserRecord};

use crate::app::dto::{
    LoginRequest, RegisterRequest, SessionResponse, UserResponse, VerifyRequest, present,
};
use crate::app::errors::{json_error, missing_fields};
use crate::app::services::AppServices;

/// Claims carried by every session token.
pub(crate) fn issue_token(codec: &TokenCodec, user: &UserRecord) -> String {
    let payload = TokenPayload::new()
        .with("userId", user.id.to_string())
        .with("email", user.email.clone())
        .with("name", user.name.clone())
        .with("subscription", user.subscription.as_str());
    codec.create(payload)
}

fn session(codec: &TokenCodec, user: &UserRecord) -> axum::response::Response {
    let body = SessionResponse {
        user: UserResponse::from(user),
        token: issue_token(codec, user),
    };
    (StatusCode::OK, Json(body)).into_response()
}

pub async fn register(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<RegisterRequest>>,
) -> axum::response::Response {
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let (Some(email), Some(password), Some(name)) =
        (present(req.email), present(req.password), present(req.name))
    else {
        return missing_fields(&["email", "password", "name"]);
    };

    let created = services
        .with_users(move |users| {
            if users.find_user(&email)?.is_some() {
                return Err(StoreError::Conflict(email));
            }
            users.create_user(NewUser {
                email,
                password_hash: hash_password(&password),
                name,
                subscription: Tier::Free,
            })
        })
        .await;

    match created {
        Ok(user) => {
            tracing::info!(user_id = %user.id, "user registered");
            session(&services.codec, &user)
        }
        Err(res) => res,
    }
}

pub async fn login(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<LoginRequest>>,
) -> axum::response::Response {
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let (Some(email), Some(password)) = (present(req.email), present(req.password)) else {
        return missing_fields(&["email", "password"]);
    };

    let user = services
        .with_users(move |users| {
            Ok(users
                .find_user(&email)?
                .filter(|user| verify_password(&password, &user.password_hash)))
        })
        .await;

    match user {
        Ok(Some(user)) => session(&services.codec, &user),
        Ok(None) => json_error(
            StatusCode::UNAUTHORIZED,
            "invalid_credentials",
            "invalid credentials",
        ),
        Err(res) => res,
    }
}

pub async fn verify(
    Extension(services): Extension<Arc<AppServices>>,
    body: Option<Json<VerifyRequest>>,
) -> axum::response::Response {
    let req = body.map(|Json(r)| r).unwrap_or_default();

    let Some(token) = present(req.token) else {
        return missing_fields(&["token"]);
    };

    let outcome = VerificationOutcome::from(services.codec.verify(&token));
    (StatusCode::OK, Json(outcome)).into_response()
}
