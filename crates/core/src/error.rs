//! Domain error model.

use thiserror::Error;

/// Domain-level error.
///
/// Deterministic parse failures only. Storage and transport failures belong
/// to the crates that own them.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    /// An identifier was invalid (e.g. parse failure).
    #[error("invalid identifier: {0}")]
    InvalidId(String),

    /// A subscription tier name did not match any known tier.
    #[error("unknown tier: {0}")]
    UnknownTier(String),
}

impl DomainError {
    pub fn invalid_id(msg: impl Into<String>) -> Self {
        Self::InvalidId(msg.into())
    }

    pub fn unknown_tier(name: impl Into<String>) -> Self {
        Self::UnknownTier(name.into())
    }
}
