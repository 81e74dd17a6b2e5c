use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use tierpass_core::{Tier, UserId};

/// A registered user, keyed by email.
///
/// Serialized field names match the on-disk user file
/// (`password` holds the hash, never the plain password).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    #[serde(rename = "password")]
    pub password_hash: String,
    pub name: String,
    pub subscription: Tier,
    pub created_at: DateTime<Utc>,
}

/// Fields supplied at registration.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewUser {
    pub email: String,
    pub password_hash: String,
    pub name: String,
    pub subscription: Tier,
}

impl NewUser {
    pub fn into_record(self, created_at: DateTime<Utc>) -> UserRecord {
        UserRecord {
            id: UserId::new(),
            email: self.email,
            password_hash: self.password_hash,
            name: self.name,
            subscription: self.subscription,
            created_at,
        }
    }
}

/// Partial update; `None` fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UserUpdate {
    pub name: Option<String>,
    pub password_hash: Option<String>,
    pub subscription: Option<Tier>,
}

impl UserUpdate {
    pub fn subscription(tier: Tier) -> Self {
        Self {
            subscription: Some(tier),
            ..Self::default()
        }
    }

    pub fn apply(self, user: &mut UserRecord) {
        if let Some(name) = self.name {
            user.name = name;
        }
        if let Some(hash) = self.password_hash {
            user.password_hash = hash;
        }
        if let Some(tier) = self.subscription {
            user.subscription = tier;
        }
    }
}

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("user already exists: {0}")]
    Conflict(String),

    #[error("user store io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("user store serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// User persistence consumed by the HTTP layer.
///
/// Implementations serialize read-modify-write cycles so concurrent updates
/// to the same user are never lost.
pub trait UserStore: Send + Sync {
    fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    /// Rejects an email that is already registered with [`StoreError::Conflict`].
    fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError>;

    /// `Ok(None)` when no user has this email.
    fn update_user(&self, email: &str, update: UserUpdate) -> Result<Option<UserRecord>, StoreError>;
}

impl<S> UserStore for Arc<S>
where
    S: UserStore + ?Sized,
{
    fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        (**self).find_user(email)
    }

    fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        (**self).create_user(user)
    }

    fn update_user(&self, email: &str, update: UserUpdate) -> Result<Option<UserRecord>, StoreError> {
        (**self).update_user(email, update)
    }
}
