use tierpass_auth::{AccessError, AccessGrant, FeatureDetails, TokenPayload};
use tierpass_core::Tier;

/// Subscriber context for a request (verified token + resolved tier).
///
/// Inserted by the auth middleware; immutable for the rest of the request.
#[derive(Debug, Clone, PartialEq)]
pub struct SubscriberContext {
    grant: AccessGrant,
}

impl SubscriberContext {
    pub fn new(grant: AccessGrant) -> Self {
        Self { grant }
    }

    pub fn tier(&self) -> Tier {
        self.grant.tier
    }

    pub fn email(&self) -> Option<&str> {
        self.grant.payload.email()
    }

    pub fn payload(&self) -> &TokenPayload {
        &self.grant.payload
    }

    pub fn require(&self, feature_id: &str) -> Result<&'static FeatureDetails, AccessError> {
        self.grant.require(feature_id)
    }
}
