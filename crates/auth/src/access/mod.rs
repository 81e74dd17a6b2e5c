//! Tier-based feature gating.
//!
//! Tiers come from the `subscription` claim of a verified token. Decisions
//! are pure lookups against the static registry (no IO, no panics).

mod registry;

use chrono::{DateTime, Utc};
use serde::Serialize;

use tierpass_core::Tier;

use crate::error::{AccessError, TokenError};
use crate::token::{IntegrityCheck, TokenCodec, TokenPayload};

pub use registry::{FeatureDetails, feature_details, tier_features};

/// Whether `tier` unlocks `feature_id`.
///
/// Tier names from untrusted input should go through
/// [`Tier::from_name_or_free`] first, which makes unknown names `free`.
pub fn has_feature_access(tier: Tier, feature_id: &str) -> bool {
    tier_features(tier).iter().any(|&id| id == feature_id)
}

/// Lowest tier that unlocks `feature_id`; `premium` for unknown features.
pub fn required_tier(feature_id: &str) -> Tier {
    Tier::ALL
        .into_iter()
        .find(|&tier| has_feature_access(tier, feature_id))
        .unwrap_or(Tier::Premium)
}

/// `Some(required tier)` when `tier` lacks `feature_id`.
pub fn needs_upgrade(tier: Tier, feature_id: &str) -> Option<Tier> {
    if has_feature_access(tier, feature_id) {
        None
    } else {
        Some(required_tier(feature_id))
    }
}

/// A feature annotated for one viewer's tier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FeatureAccess {
    #[serde(flatten)]
    pub details: FeatureDetails,
    pub available: bool,
    pub required_tier: Tier,
}

/// Every known feature with availability for `tier`.
pub fn all_features_with_access(tier: Tier) -> Vec<FeatureAccess> {
    registry::FEATURES
        .iter()
        .map(|details| FeatureAccess {
            details: *details,
            available: has_feature_access(tier, details.id),
            required_tier: required_tier(details.id),
        })
        .collect()
}

/// Details of the features `tier` unlocks, in tier-list order.
pub fn available_features(tier: Tier) -> Vec<&'static FeatureDetails> {
    tier_features(tier)
        .iter()
        .filter_map(|id| feature_details(id))
        .collect()
}

/// One row of the tier comparison table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TierFeatures {
    pub tier: Tier,
    pub features: &'static [&'static str],
}

pub fn tier_comparison() -> Vec<TierFeatures> {
    Tier::ALL
        .into_iter()
        .map(|tier| TierFeatures {
            tier,
            features: tier_features(tier),
        })
        .collect()
}

/// A verified token resolved to its tier.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct AccessGrant {
    pub header: serde_json::Value,
    pub payload: TokenPayload,
    pub tier: Tier,
}

impl AccessGrant {
    pub fn can_use(&self, feature_id: &str) -> bool {
        has_feature_access(self.tier, feature_id)
    }

    /// Gate a feature: its details if unlocked, otherwise why not.
    pub fn require(&self, feature_id: &str) -> Result<&'static FeatureDetails, AccessError> {
        let details =
            feature_details(feature_id).ok_or_else(|| AccessError::UnknownFeature(feature_id.to_string()))?;

        match needs_upgrade(self.tier, feature_id) {
            None => Ok(details),
            Some(required) => Err(AccessError::UpgradeRequired {
                feature: feature_id.to_string(),
                required,
            }),
        }
    }
}

/// Verify `token` as of `now` and resolve the subscriber's tier.
///
/// The tier is the `subscription` claim, or `free` when absent or unknown.
pub fn authenticate<I: IntegrityCheck>(
    codec: &TokenCodec<I>,
    token: &str,
    now: DateTime<Utc>,
) -> Result<AccessGrant, TokenError> {
    let payload = codec.verify_at(token, now)?;
    let header = codec.decode(token)?.header;
    let tier = payload.tier();

    Ok(AccessGrant {
        header,
        payload,
        tier,
    })
}
