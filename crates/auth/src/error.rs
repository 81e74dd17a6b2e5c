use thiserror::Error;

use tierpass_core::Tier;

/// Why a token could not be verified or decoded.
///
/// The codec is the only layer that produces these; the ciphers never fail.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TokenError {
    /// The token did not split into exactly three segments.
    #[error("invalid token format")]
    MalformedToken,

    /// The decrypted signature did not match the header and payload segments.
    #[error("invalid signature")]
    InvalidSignature,

    /// A segment did not decrypt to valid JSON (wrong key or corrupted data).
    #[error("token decryption failed: {0}")]
    DecryptionFailure(String),

    /// The `exp` claim lies in the past.
    #[error("token expired")]
    TokenExpired,
}

impl TokenError {
    pub fn decryption(reason: impl Into<String>) -> Self {
        Self::DecryptionFailure(reason.into())
    }
}

/// Rejected cipher key material.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum KeyError {
    #[error("vigenere key must not be empty")]
    EmptyVigenereKey,

    #[error("vigenere key character '{0}' is not in the cipher alphabet")]
    UnsupportedVigenereChar(char),

    #[error("column key must not be empty")]
    EmptyColumnKey,

    #[error("column key character '{0}' is not a digit")]
    NonDigitColumnKey(char),
}

/// Feature gate refusal.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum AccessError {
    #[error("unknown feature '{0}'")]
    UnknownFeature(String),

    #[error("feature '{feature}' requires the {required} tier")]
    UpgradeRequired { feature: String, required: Tier },
}
