use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::Value;

use crate::cipher::{ColumnKey, VigenereKey, group_substitution, vigenere};
use crate::error::TokenError;

use super::claims::{TokenHeader, TokenPayload};
use super::framing::{decode_segment, encode_segment};
use super::integrity::{IntegrityCheck, TranspositionIntegrity};

/// The three raw (still base64) segments of a token.
struct Segments<'a> {
    header: &'a str,
    payload: &'a str,
    signature: &'a str,
}

impl<'a> Segments<'a> {
    fn split(token: &'a str) -> Result<Self, TokenError> {
        let mut parts = token.split('.');
        match (parts.next(), parts.next(), parts.next(), parts.next()) {
            (Some(header), Some(payload), Some(signature), None)
                if !header.is_empty() && !payload.is_empty() && !signature.is_empty() =>
            {
                Ok(Self {
                    header,
                    payload,
                    signature,
                })
            }
            _ => Err(TokenError::MalformedToken),
        }
    }

    fn signing_input(&self) -> String {
        signing_input(self.header, self.payload)
    }
}

fn signing_input(header: &str, payload: &str) -> String {
    format!("{header}.{payload}")
}

/// Result of [`TokenCodec::decode`]: contents read without any checks.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct DecodedToken {
    /// Any JSON the header segment holds; issued tokens carry [`TokenHeader`].
    pub header: Value,
    pub payload: TokenPayload,
    /// The signature segment exactly as it appeared in the token.
    pub signature: String,
}

/// Creates, verifies and decodes `H.P.S` tokens.
///
/// - `H`: header JSON, group substitution
/// - `P`: payload JSON, Vigenère with the codec's key
/// - `S`: `H.P`, signed by the [`IntegrityCheck`]
///
/// The codec holds only immutable keys and can be shared across threads.
#[derive(Debug, Clone)]
pub struct TokenCodec<I = TranspositionIntegrity> {
    vigenere_key: VigenereKey,
    integrity: I,
}

impl TokenCodec {
    pub fn new(vigenere_key: VigenereKey, column_key: ColumnKey) -> Self {
        Self::with_integrity(vigenere_key, TranspositionIntegrity::new(column_key))
    }
}

impl Default for TokenCodec {
    /// Keys `SECRETKEY` / `34152`.
    fn default() -> Self {
        Self::new(VigenereKey::default(), ColumnKey::default())
    }
}

impl<I: IntegrityCheck> TokenCodec<I> {
    pub fn with_integrity(vigenere_key: VigenereKey, integrity: I) -> Self {
        Self {
            vigenere_key,
            integrity,
        }
    }

    /// Issue a token valid for one hour from now.
    pub fn create(&self, payload: TokenPayload) -> String {
        self.create_at(payload, Utc::now())
    }

    /// Issue a token as of `now`. Caller claims are kept; `iat` and `exp`
    /// are overwritten.
    pub fn create_at(&self, mut payload: TokenPayload, now: DateTime<Utc>) -> String {
        payload.stamp(now.timestamp());

        let header = encode_segment(&group_substitution::encrypt(&TokenHeader::default().to_json()));
        let body = encode_segment(&vigenere::encrypt(&payload.to_json(), &self.vigenere_key));
        let signature = encode_segment(&self.integrity.sign(&signing_input(&header, &body)));

        format!("{header}.{body}.{signature}")
    }

    pub fn verify(&self, token: &str) -> Result<TokenPayload, TokenError> {
        self.verify_at(token, Utc::now())
    }

    /// Check signature, decrypt the payload and check `exp` against `now`.
    ///
    /// A token whose `exp` equals `now` is still valid.
    pub fn verify_at(&self, token: &str, now: DateTime<Utc>) -> Result<TokenPayload, TokenError> {
        let result = self.check(token, now);
        if let Err(e) = &result {
            tracing::debug!(error = %e, "token verification failed");
        }
        result
    }

    fn check(&self, token: &str, now: DateTime<Utc>) -> Result<TokenPayload, TokenError> {
        let segments = Segments::split(token)?;

        let signature = decode_segment(segments.signature).map_err(|_| TokenError::InvalidSignature)?;
        if !self.integrity.verify(&segments.signing_input(), &signature) {
            return Err(TokenError::InvalidSignature);
        }

        let payload = self.decrypt_payload(segments.payload)?;

        let now = now.timestamp() as f64;
        // `exp: 0` means no expiry.
        if payload.expires_at().is_some_and(|exp| exp != 0.0 && exp < now) {
            return Err(TokenError::TokenExpired);
        }

        Ok(payload)
    }

    /// Read header and payload without checking the signature or expiry.
    pub fn decode(&self, token: &str) -> Result<DecodedToken, TokenError> {
        let segments = Segments::split(token)?;

        let header_json = group_substitution::decrypt(&decode_segment(segments.header).map_err(|e| {
            TokenError::decryption(format!("header segment: {e}"))
        })?);
        let header: Value = serde_json::from_str(&header_json)
            .map_err(|e| TokenError::decryption(format!("header: {e}")))?;

        let payload = self.decrypt_payload(segments.payload)?;

        Ok(DecodedToken {
            header,
            payload,
            signature: segments.signature.to_string(),
        })
    }

    fn decrypt_payload(&self, segment: &str) -> Result<TokenPayload, TokenError> {
        let ciphertext = decode_segment(segment)
            .map_err(|e| TokenError::decryption(format!("payload segment: {e}")))?;
        TokenPayload::from_json(&vigenere::decrypt(&ciphertext, &self.vigenere_key))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;
    use proptest::prelude::*;

    const ISSUED: i64 = 1_700_000_000;

    /// Known-good token for
    /// `{"userId":"123","subscription":"premium"}` issued at `ISSUED`.
    const KNOWN_TOKEN: &str = "WytbW3wnKycnJ3x6K3p6fG8rb298dCt0dHwnKycnJ3wjKyMjfCcrJycnfFgrWFh8RitGRnxIK0hIfEcrR0d8TCtMTHxOK05OfCcrJycnfCorKip8JysnJyd8ZytnZ3xiK2JifGsra2t8JysnJyd8IysjI3wnKycnJ3xRK1FRfEQrRER8RytHR3wnKycnJ3xdK11d.eyIsd2c4TXciRiI1SEMiPyJ1LmYubXY2N3hrNXIiTyJ6djI0bXczIj8iMWt4IlRBLjItNEEgNEZfPyJnOnQiTy4uRl80MkIgQSB9.dG5KMzg4ZHl3akpGaEdLRWRNS0Njckp5dGlmMnM4SXl4UlJ5d25LZTJjMVBtWXJUamNpSWpFZk95OGdYV3l4NmJDd25LQ2NyUm5oclRINXJmaXM4WjJzOEp5d25LRVJISzMxSTRSRUp1TlhKMElXUnROeVF1TVNYVzNjNmYydG5KeWNuV2l4SVJDeE9KQ3BuWjNKckp5c25KMVE4Unl4ZHNUaU0xYjNJNmJqdEJORUppUmtCeXduS0c5MEszTXJmRnRJZjB0T2Z5bzhKeXhpYXlkakszRnJSM2NkLmRYSWlMWGhpZFg4NExFWm5UbEk5YkszcHJkSGNqZnlnOFIwYzhUMGNuS3lkbktHdG5JM2NSZkV0bkoxeWNpU3lZMk55SXpNbElnUG40MFFY";

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.timestamp_opt(secs, 0).unwrap()
    }

    fn premium_payload() -> TokenPayload {
        TokenPayload::new()
            .with("userId", "123")
            .with("subscription", "premium")
    }

    #[test]
    fn create_matches_known_encoding() {
        let token = TokenCodec::default().create_at(premium_payload(), at(ISSUED));
        assert_eq!(token, KNOWN_TOKEN);
    }

    #[test]
    fn create_then_verify_round_trips() {
        let codec = TokenCodec::default();
        let token = codec.create_at(premium_payload(), at(ISSUED));

        let payload = codec.verify_at(&token, at(ISSUED + 10)).unwrap();
        assert_eq!(payload.get_str("subscription"), Some("premium"));
        assert_eq!(payload.get_str("userId"), Some("123"));
        assert_eq!(payload.issued_at(), Some(ISSUED));
        assert_eq!(payload.expires_at(), Some((ISSUED + 3600) as f64));
    }

    #[test]
    fn verify_with_wall_clock() {
        let codec = TokenCodec::default();
        let token = codec.create(premium_payload());
        assert_eq!(codec.verify(&token).unwrap().tier(), tierpass_core::Tier::Premium);
    }

    #[test]
    fn segment_count_is_checked() {
        let codec = TokenCodec::default();
        for token in ["", "a.b", "a.b.c.d", "a..c", "abc"] {
            assert_eq!(codec.verify_at(token, at(ISSUED)), Err(TokenError::MalformedToken));
            assert_eq!(codec.decode(token), Err(TokenError::MalformedToken));
        }
    }

    #[test]
    fn expiry_boundary() {
        let codec = TokenCodec::default();
        let token = codec.create_at(premium_payload(), at(ISSUED));

        assert!(codec.verify_at(&token, at(ISSUED + 3600)).is_ok());
        assert_eq!(
            codec.verify_at(&token, at(ISSUED + 3601)),
            Err(TokenError::TokenExpired)
        );
    }

    #[test]
    fn wrong_vigenere_key_fails_decryption() {
        let issuer = TokenCodec::new(VigenereKey::new("KEY1").unwrap(), ColumnKey::default());
        let verifier = TokenCodec::new(VigenereKey::new("KEY2").unwrap(), ColumnKey::default());
        let token = issuer.create_at(premium_payload(), at(ISSUED));

        assert!(matches!(
            verifier.verify_at(&token, at(ISSUED)),
            Err(TokenError::DecryptionFailure(_))
        ));
    }

    #[test]
    fn wrong_column_key_fails_signature() {
        let issuer = TokenCodec::default();
        let verifier = TokenCodec::new(VigenereKey::default(), ColumnKey::new("21").unwrap());
        let token = issuer.create_at(premium_payload(), at(ISSUED));

        assert_eq!(verifier.verify_at(&token, at(ISSUED)), Err(TokenError::InvalidSignature));
    }

    #[test]
    fn undecodable_signature_is_invalid() {
        let codec = TokenCodec::default();
        let token = codec.create_at(premium_payload(), at(ISSUED));
        let (signed, _) = token.rsplit_once('.').unwrap();

        assert_eq!(
            codec.verify_at(&format!("{signed}.@@@"), at(ISSUED)),
            Err(TokenError::InvalidSignature)
        );
    }

    #[test]
    fn decode_skips_signature_and_expiry() {
        let codec = TokenCodec::default();
        let token = codec.create_at(premium_payload(), at(ISSUED));
        let (signed, _) = token.rsplit_once('.').unwrap();
        let forged = format!("{signed}.Zm9yZ2Vk");

        let decoded = codec.decode(&forged).unwrap();
        assert_eq!(decoded.header, serde_json::json!({ "alg": "CUSTOM", "typ": "JWT" }));
        assert_eq!(decoded.payload.get_str("userId"), Some("123"));
        assert_eq!(decoded.signature, "Zm9yZ2Vk");
    }

    #[test]
    fn decode_accepts_any_json_header() {
        let codec = TokenCodec::default();
        let token = codec.create_at(premium_payload(), at(ISSUED));
        let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();
        parts[0] = encode_segment(&group_substitution::encrypt(r#"{"alg":"CUSTOM"}"#));

        let decoded = codec.decode(&parts.join(".")).unwrap();
        assert_eq!(decoded.header, serde_json::json!({ "alg": "CUSTOM" }));
        assert_eq!(decoded.payload.get_str("userId"), Some("123"));

        parts[0] = encode_segment(&group_substitution::encrypt("not json"));
        assert!(matches!(
            codec.decode(&parts.join(".")),
            Err(TokenError::DecryptionFailure(_))
        ));
    }

    #[test]
    fn zero_exp_never_expires() {
        let codec = TokenCodec::default();
        let token = codec.create_at(premium_payload(), at(-3600));

        let payload = codec.verify_at(&token, at(1)).unwrap();
        assert_eq!(payload.expires_at(), Some(0.0));
        assert!(codec.verify_at(&token, at(ISSUED)).is_ok());
    }

    #[test]
    fn float_claims_encode_like_integers() {
        let codec = TokenCodec::default();
        let as_float = codec.create_at(premium_payload().with("n", 1.0), at(ISSUED));
        let as_int = codec.create_at(premium_payload().with("n", 1), at(ISSUED));
        assert_eq!(as_float, as_int);
    }

    #[test]
    fn caller_claims_survive_but_times_are_replaced() {
        let codec = TokenCodec::default();
        let payload = premium_payload().with("iat", 1).with("exp", 2);
        let token = codec.create_at(payload, at(ISSUED));

        let verified = codec.verify_at(&token, at(ISSUED)).unwrap();
        assert_eq!(verified.issued_at(), Some(ISSUED));
        assert_eq!(verified.expires_at(), Some((ISSUED + 3600) as f64));
    }

    proptest! {
        #[test]
        fn any_payload_round_trips(
            claims in proptest::collection::btree_map("[a-zA-Z]{1,8}", ".{0,24}", 0..6),
            issued in 0i64..4_000_000_000,
        ) {
            let codec = TokenCodec::default();
            let mut payload = TokenPayload::new();
            for (k, v) in &claims {
                payload.insert(k.clone(), v.clone());
            }

            let token = codec.create_at(payload, at(issued));
            let verified = codec.verify_at(&token, at(issued)).unwrap();
            for (k, v) in &claims {
                if k != "iat" && k != "exp" {
                    prop_assert_eq!(verified.get_str(k), Some(v.as_str()));
                }
            }
            prop_assert_eq!(verified.issued_at(), Some(issued));
        }

        #[test]
        fn tampered_payload_never_verifies(index in 0usize..64, replacement in "[A-Za-z0-9]") {
            let codec = TokenCodec::default();
            let token = codec.create_at(premium_payload(), at(ISSUED));
            let mut parts: Vec<String> = token.split('.').map(str::to_string).collect();

            let body: Vec<char> = parts[1].chars().collect();
            let index = index % body.len();
            let replacement = replacement.chars().next().unwrap();
            prop_assume!(body[index] != replacement);

            parts[1] = body
                .iter()
                .enumerate()
                .map(|(i, &c)| if i == index { replacement } else { c })
                .collect();

            prop_assert!(codec.verify_at(&parts.join("."), at(ISSUED)).is_err());
        }
    }
}
