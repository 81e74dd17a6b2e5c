use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use chrono::Utc;

use super::r#trait::{NewUser, StoreError, UserRecord, UserStore, UserUpdate};

/// In-memory user store for tests/dev. Contents are lost on exit.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    users: RwLock<HashMap<String, UserRecord>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }
}

impl UserStore for InMemoryUserStore {
    fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let users = self.users.read().unwrap_or_else(PoisonError::into_inner);
        Ok(users.get(email).cloned())
    }

    fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        if users.contains_key(&user.email) {
            return Err(StoreError::Conflict(user.email));
        }

        let record = user.into_record(Utc::now());
        users.insert(record.email.clone(), record.clone());
        Ok(record)
    }

    fn update_user(&self, email: &str, update: UserUpdate) -> Result<Option<UserRecord>, StoreError> {
        let mut users = self.users.write().unwrap_or_else(PoisonError::into_inner);
        Ok(users.get_mut(email).map(|user| {
            update.apply(user);
            user.clone()
        }))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierpass_core::Tier;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "hash".to_string(),
            name: "Ada".to_string(),
            subscription: Tier::Free,
        }
    }

    #[test]
    fn create_find_update() {
        let store = InMemoryUserStore::new();
        let created = store.create_user(new_user("ada@example.com")).unwrap();

        assert_eq!(store.find_user("ada@example.com").unwrap(), Some(created.clone()));
        assert_eq!(store.find_user("bob@example.com").unwrap(), None);

        let updated = store
            .update_user("ada@example.com", UserUpdate::subscription(Tier::Premium))
            .unwrap()
            .unwrap();
        assert_eq!(updated.subscription, Tier::Premium);
        assert_eq!(updated.id, created.id);
        assert_eq!(updated.name, "Ada");
    }

    #[test]
    fn duplicate_email_conflicts() {
        let store = InMemoryUserStore::new();
        store.create_user(new_user("ada@example.com")).unwrap();
        assert!(matches!(
            store.create_user(new_user("ada@example.com")),
            Err(StoreError::Conflict(email)) if email == "ada@example.com"
        ));
    }

    #[test]
    fn update_of_unknown_user_is_none() {
        let store = InMemoryUserStore::new();
        assert_eq!(
            store.update_user("ghost@example.com", UserUpdate::subscription(Tier::Basic)).unwrap(),
            None
        );
    }

    #[test]
    fn concurrent_updates_are_not_lost() {
        let store = std::sync::Arc::new(InMemoryUserStore::new());
        store.create_user(new_user("ada@example.com")).unwrap();

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    let update = UserUpdate {
                        name: Some(format!("Ada {i}")),
                        ..UserUpdate::default()
                    };
                    store.update_user("ada@example.com", update).unwrap();
                    store
                        .update_user("ada@example.com", UserUpdate::subscription(Tier::Basic))
                        .unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        let user = store.find_user("ada@example.com").unwrap().unwrap();
        assert_eq!(user.subscription, Tier::Basic);
        assert!(user.name.starts_with("Ada "));
    }
}
