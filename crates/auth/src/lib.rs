//! `tierpass-auth`: token codec and feature gating.
//!
//! Tokens are three dotted segments (header, payload, signature), each
//! protected by a classical cipher. Nothing here is cryptographically secure:
//! the tables are public and every cipher is reversible without the key in
//! practice. The crate is decoupled from HTTP and storage.

pub mod access;
pub mod cipher;
pub mod error;
pub mod key_exchange;
pub mod token;

pub use access::{
    AccessGrant, FeatureAccess, FeatureDetails, TierFeatures, all_features_with_access,
    authenticate, available_features, feature_details, has_feature_access, needs_upgrade,
    required_tier, tier_comparison, tier_features,
};
pub use cipher::{ColumnKey, VigenereKey};
pub use error::{AccessError, KeyError, TokenError};
pub use token::{
    DecodedToken, IntegrityCheck, TokenCodec, TokenHeader, TokenPayload, TranspositionIntegrity,
    VerificationOutcome,
};
