use serde::{Deserialize, Serialize};

use tierpass_auth::key_exchange::PublicParameters;
use tierpass_auth::{FeatureAccess, FeatureDetails};
use tierpass_core::{Tier, UserId};
use tierpass_infra::UserRecord;

// -------------------------
// Request DTOs
// -------------------------
//
// Every field is optional so a missing field is reported as a 400 by the
// handler instead of a body rejection.

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct RegisterRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub name: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct LoginRequest {
    pub email: Option<String>,
    pub password: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct VerifyRequest {
    pub token: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct PaymentRequest {
    pub token: Option<String>,
    pub tier: Option<String>,
    pub payment_method: Option<String>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SharedSecretRequest {
    pub private_key: Option<u64>,
    pub other_public_key: Option<u64>,
}

/// Treat empty strings as missing.
pub fn present(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}

// -------------------------
// Response DTOs
// -------------------------

/// Public view of a user (never carries the password hash).
#[derive(Debug, Serialize)]
pub struct UserResponse {
    pub id: UserId,
    pub email: String,
    pub name: String,
    pub subscription: Tier,
}

impl From<&UserRecord> for UserResponse {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            name: user.name.clone(),
            subscription: user.subscription,
        }
    }
}

#[derive(Debug, Serialize)]
pub struct SessionResponse {
    pub user: UserResponse,
    pub token: String,
}

#[derive(Debug, Serialize)]
pub struct PaymentResponse {
    pub success: bool,
    pub message: &'static str,
    pub subscription: Tier,
    pub token: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyPairResponse {
    pub private_key: u64,
    pub public_key: u64,
    pub parameters: PublicParameters,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SharedSecretResponse {
    pub shared_secret: u64,
}

#[derive(Debug, Serialize)]
pub struct FeatureListResponse {
    pub tier: Tier,
    pub features: Vec<FeatureAccess>,
}

#[derive(Debug, Serialize)]
pub struct FeatureResponse {
    pub feature: &'static FeatureDetails,
    pub available: bool,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpgradeRequiredResponse {
    pub error: &'static str,
    pub message: String,
    pub required_tier: Tier,
}
