use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use tierpass_core::Tier;

use crate::error::TokenError;

/// Lifetime of an issued token, in seconds.
pub const TOKEN_TTL_SECS: i64 = 3600;

/// Floats at or above this magnitude are written as-is.
const MAX_SAFE_INTEGER: f64 = 9_007_199_254_740_992.0;

/// Token header. Constant in practice: `{"alg":"CUSTOM","typ":"JWT"}`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TokenHeader {
    pub alg: String,
    pub typ: String,
}

impl TokenHeader {
    /// Compact JSON with `alg` before `typ`.
    pub fn to_json(&self) -> String {
        serde_json::json!({ "alg": self.alg, "typ": self.typ }).to_string()
    }
}

impl Default for TokenHeader {
    fn default() -> Self {
        Self {
            alg: "CUSTOM".to_string(),
            typ: "JWT".to_string(),
        }
    }
}

/// Token payload: an open JSON object of claims.
///
/// Key order is insertion order and survives serialization, so a payload
/// encodes to the same bytes every time it is built the same way.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TokenPayload(Map<String, Value>);

impl TokenPayload {
    pub fn new() -> Self {
        Self(Map::new())
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.insert(key, value);
        self
    }

    /// Insert or overwrite a claim. Overwriting keeps the claim's position.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// `iat`, epoch seconds.
    pub fn issued_at(&self) -> Option<i64> {
        self.0.get("iat").and_then(Value::as_i64)
    }

    /// `exp`, epoch seconds.
    pub fn expires_at(&self) -> Option<f64> {
        self.0.get("exp").and_then(Value::as_f64)
    }

    pub fn email(&self) -> Option<&str> {
        self.get_str("email")
    }

    /// The `subscription` claim as a tier; missing or unknown means free.
    pub fn tier(&self) -> Tier {
        Tier::from_name_or_free(self.get_str("subscription"))
    }

    /// Stamp `iat = now` and `exp = now + TOKEN_TTL_SECS`.
    pub(crate) fn stamp(&mut self, now: i64) {
        self.insert("iat", now);
        self.insert("exp", now + TOKEN_TTL_SECS);
    }

    /// Compact JSON. Integer-valued floats lose their fraction (`1.0` is
    /// written `1`) so equal claims always encode to the same bytes.
    pub(crate) fn to_json(&self) -> String {
        let mut value = Value::Object(self.0.clone());
        normalize_numbers(&mut value);
        value.to_string()
    }

    pub(crate) fn from_json(json: &str) -> Result<Self, TokenError> {
        match serde_json::from_str::<Value>(json) {
            Ok(Value::Object(map)) => Ok(Self(map)),
            Ok(_) => Err(TokenError::decryption("payload is not a JSON object")),
            Err(e) => Err(TokenError::decryption(e.to_string())),
        }
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    pub fn into_map(self) -> Map<String, Value> {
        self.0
    }
}

fn normalize_numbers(value: &mut Value) {
    match value {
        Value::Number(n) if n.is_f64() => {
            if let Some(f) = n.as_f64().filter(|f| f.fract() == 0.0 && f.abs() < MAX_SAFE_INTEGER) {
                *n = Number::from(f as i64);
            }
        }
        Value::Array(items) => items.iter_mut().for_each(normalize_numbers),
        Value::Object(map) => map.values_mut().for_each(normalize_numbers),
        _ => {}
    }
}

impl From<Map<String, Value>> for TokenPayload {
    fn from(value: Map<String, Value>) -> Self {
        Self(value)
    }
}
