use crate::cipher::{ColumnKey, transposition};

/// Signature scheme over the signing input `H.P`.
///
/// The codec owns the base64 framing; implementations only see and produce
/// plain text.
pub trait IntegrityCheck: Send + Sync {
    fn sign(&self, signing_input: &str) -> String;

    /// `signature` is the decoded signature segment.
    fn verify(&self, signing_input: &str, signature: &str) -> bool;
}

/// Shipped scheme: the signature is the signing input run through the
/// transposition cipher, and verification decrypts it and compares.
///
/// This is not a MAC. Anyone who knows the column key can forge it, and the
/// column key is a short digit string.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TranspositionIntegrity {
    key: ColumnKey,
}

impl TranspositionIntegrity {
    pub fn new(key: ColumnKey) -> Self {
        Self { key }
    }
}

impl IntegrityCheck for TranspositionIntegrity {
    fn sign(&self, signing_input: &str) -> String {
        transposition::encrypt(signing_input, &self.key)
    }

    fn verify(&self, signing_input: &str, signature: &str) -> bool {
        transposition::decrypt(signature, &self.key) == signing_input
    }
}
