//! The `H.P.S` token format.

mod claims;
mod codec;
mod framing;
mod integrity;

use serde::Serialize;

pub use claims::{TOKEN_TTL_SECS, TokenHeader, TokenPayload};
pub use codec::{DecodedToken, TokenCodec};
pub use integrity::{IntegrityCheck, TranspositionIntegrity};

use crate::error::TokenError;

/// Wire shape of a verification result:
/// `{"valid":true,"payload":{…}}` or `{"valid":false,"error":"…"}`.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct VerificationOutcome {
    pub valid: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub payload: Option<TokenPayload>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl From<Result<TokenPayload, TokenError>> for VerificationOutcome {
    fn from(result: Result<TokenPayload, TokenError>) -> Self {
        match result {
            Ok(payload) => Self {
                valid: true,
                payload: Some(payload),
                error: None,
            },
            Err(e) => Self {
                valid: false,
                payload: None,
                error: Some(e.to_string()),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn outcome_serializes_without_empty_fields() {
        let ok = VerificationOutcome::from(Ok(TokenPayload::new().with("email", "a@b.c")));
        assert_eq!(
            serde_json::to_value(&ok).unwrap(),
            serde_json::json!({ "valid": true, "payload": { "email": "a@b.c" } })
        );

        let err = VerificationOutcome::from(Err(TokenError::TokenExpired));
        assert_eq!(
            serde_json::to_value(&err).unwrap(),
            serde_json::json!({ "valid": false, "error": "token expired" })
        );
    }
}
