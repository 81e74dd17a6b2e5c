//! Process configuration, read once from the environment at startup.

use std::net::SocketAddr;
use std::path::PathBuf;

use thiserror::Error;

use tierpass_auth::{ColumnKey, KeyError, VigenereKey};

const DEFAULT_BIND: &str = "0.0.0.0:8080";

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("TIERPASS_BIND '{value}' is not a socket address: {source}")]
    InvalidBind {
        value: String,
        source: std::net::AddrParseError,
    },

    #[error("{var} is invalid: {source}")]
    InvalidKey {
        var: &'static str,
        source: KeyError,
    },
}

#[derive(Debug, Clone)]
pub struct ApiConfig {
    pub bind: SocketAddr,
    /// JSON user file; `None` keeps users in memory.
    pub users_path: Option<PathBuf>,
    pub vigenere_key: VigenereKey,
    pub column_key: ColumnKey,
    /// Enables the `stripe` payment method when set.
    pub stripe_secret_key: Option<String>,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            bind: SocketAddr::from(([0, 0, 0, 0], 8080)),
            users_path: None,
            vigenere_key: VigenereKey::default(),
            column_key: ColumnKey::default(),
            stripe_secret_key: None,
        }
    }
}

impl ApiConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Build from an arbitrary variable source. Empty values count as unset.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let var = |name: &str| lookup(name).map(|v| v.trim().to_string()).filter(|v| !v.is_empty());

        let bind_raw = var("TIERPASS_BIND").unwrap_or_else(|| DEFAULT_BIND.to_string());
        let bind = bind_raw
            .parse()
            .map_err(|source| ConfigError::InvalidBind {
                value: bind_raw.clone(),
                source,
            })?;

        let users_path = var("TIERPASS_USERS_PATH").map(PathBuf::from);
        if users_path.is_none() {
            tracing::warn!("TIERPASS_USERS_PATH not set; users are kept in memory");
        }

        let vigenere_key = match var("TIERPASS_VIGENERE_KEY") {
            Some(raw) => raw.parse().map_err(|source| ConfigError::InvalidKey {
                var: "TIERPASS_VIGENERE_KEY",
                source,
            })?,
            None => {
                tracing::warn!("TIERPASS_VIGENERE_KEY not set; using the built-in default key");
                VigenereKey::default()
            }
        };

        let column_key = match var("TIERPASS_COLUMN_KEY") {
            Some(raw) => raw.parse().map_err(|source| ConfigError::InvalidKey {
                var: "TIERPASS_COLUMN_KEY",
                source,
            })?,
            None => ColumnKey::default(),
        };

        Ok(Self {
            bind,
            users_path,
            vigenere_key,
            column_key,
            stripe_secret_key: var("STRIPE_SECRET_KEY"),
        })
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::*;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| vars.get(name).cloned()
    }

    #[test]
    fn defaults_when_unset() {
        let config = ApiConfig::from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.bind, "0.0.0.0:8080".parse().unwrap());
        assert_eq!(config.users_path, None);
        assert_eq!(config.vigenere_key, VigenereKey::default());
        assert_eq!(config.column_key, ColumnKey::default());
        assert_eq!(config.stripe_secret_key, None);
    }

    #[test]
    fn reads_every_variable() {
        let config = ApiConfig::from_lookup(lookup(&[
            ("TIERPASS_BIND", "127.0.0.1:9000"),
            ("TIERPASS_USERS_PATH", "/var/lib/tierpass/users.json"),
            ("TIERPASS_VIGENERE_KEY", "KEY2"),
            ("TIERPASS_COLUMN_KEY", "312"),
            ("STRIPE_SECRET_KEY", "sk_test_123"),
        ]))
        .unwrap();

        assert_eq!(config.bind, "127.0.0.1:9000".parse().unwrap());
        assert_eq!(
            config.users_path,
            Some(PathBuf::from("/var/lib/tierpass/users.json"))
        );
        assert_eq!(config.vigenere_key, VigenereKey::new("KEY2").unwrap());
        assert_eq!(config.column_key, ColumnKey::new("312").unwrap());
        assert_eq!(config.stripe_secret_key.as_deref(), Some("sk_test_123"));
    }

    #[test]
    fn empty_values_count_as_unset() {
        let config = ApiConfig::from_lookup(lookup(&[("STRIPE_SECRET_KEY", "  ")])).unwrap();
        assert_eq!(config.stripe_secret_key, None);
    }

    #[test]
    fn invalid_values_are_rejected() {
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("TIERPASS_BIND", "localhost")])),
            Err(ConfigError::InvalidBind { .. })
        ));
        assert!(matches!(
            ApiConfig::from_lookup(lookup(&[("TIERPASS_COLUMN_KEY", "3a1")])),
            Err(ConfigError::InvalidKey { var: "TIERPASS_COLUMN_KEY", .. })
        ));
    }
}
