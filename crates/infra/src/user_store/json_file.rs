use std::fs;
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use std::sync::{Mutex, PoisonError};

use chrono::Utc;
use serde::{Deserialize, Serialize};

use super::r#trait::{NewUser, StoreError, UserRecord, UserStore, UserUpdate};

#[derive(Debug, Default, Serialize, Deserialize)]
struct UserFile {
    #[serde(default)]
    users: Vec<UserRecord>,
}

/// User store persisted as a single pretty-printed JSON document
/// (`{"users": [...]}`).
///
/// A missing file reads as an empty store. Every mutation rewrites the whole
/// document through a sibling temp file and a rename, with one lock held
/// across the read-modify-write.
#[derive(Debug)]
pub struct JsonFileUserStore {
    path: PathBuf,
    lock: Mutex<()>,
}

impl JsonFileUserStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            lock: Mutex::new(()),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn load(&self) -> Result<UserFile, StoreError> {
        let raw = match fs::read_to_string(&self.path) {
            Ok(raw) => raw,
            Err(e) if e.kind() == ErrorKind::NotFound => return Ok(UserFile::default()),
            Err(e) => return Err(e.into()),
        };
        if raw.trim().is_empty() {
            return Ok(UserFile::default());
        }
        Ok(serde_json::from_str(&raw)?)
    }

    fn save(&self, file: &UserFile) -> Result<(), StoreError> {
        if let Some(parent) = self.path.parent().filter(|p| !p.as_os_str().is_empty()) {
            fs::create_dir_all(parent)?;
        }

        let body = serde_json::to_vec_pretty(file)?;
        let mut tmp_name = self.path.as_os_str().to_owned();
        tmp_name.push(".tmp");
        let tmp = PathBuf::from(tmp_name);

        let mut out = fs::File::create(&tmp)?;
        out.write_all(&body)?;
        out.sync_all()?;
        drop(out);
        fs::rename(&tmp, &self.path)?;

        tracing::debug!(path = %self.path.display(), users = file.users.len(), "user store persisted");
        Ok(())
    }
}

impl UserStore for JsonFileUserStore {
    fn find_user(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let file = self.load()?;
        Ok(file.users.into_iter().find(|u| u.email == email))
    }

    fn create_user(&self, user: NewUser) -> Result<UserRecord, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.load()?;
        if file.users.iter().any(|u| u.email == user.email) {
            return Err(StoreError::Conflict(user.email));
        }

        let record = user.into_record(Utc::now());
        file.users.push(record.clone());
        self.save(&file)?;
        Ok(record)
    }

    fn update_user(&self, email: &str, update: UserUpdate) -> Result<Option<UserRecord>, StoreError> {
        let _guard = self.lock.lock().unwrap_or_else(PoisonError::into_inner);
        let mut file = self.load()?;
        let Some(user) = file.users.iter_mut().find(|u| u.email == email) else {
            return Ok(None);
        };

        update.apply(user);
        let updated = user.clone();
        self.save(&file)?;
        Ok(Some(updated))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tierpass_core::Tier;

    fn new_user(email: &str) -> NewUser {
        NewUser {
            email: email.to_string(),
            password_hash: "sha256$00$11".to_string(),
            name: "Ada".to_string(),
            subscription: Tier::Free,
        }
    }

    #[test]
    fn missing_file_reads_as_empty() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileUserStore::new(dir.path().join("users.json"));
        assert_eq!(store.find_user("ada@example.com").unwrap(), None);
        assert!(!store.path().exists());
    }

    #[test]
    fn persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("users.json");

        let created = JsonFileUserStore::new(&path)
            .create_user(new_user("ada@example.com"))
            .unwrap();

        let reopened = JsonFileUserStore::new(&path);
        assert_eq!(reopened.find_user("ada@example.com").unwrap(), Some(created));

        reopened
            .update_user("ada@example.com", UserUpdate::subscription(Tier::Basic))
            .unwrap();
        let again = JsonFileUserStore::new(&path);
        assert_eq!(
            again.find_user("ada@example.com").unwrap().unwrap().subscription,
            Tier::Basic
        );
    }

    #[test]
    fn on_disk_layout_uses_users_array() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        JsonFileUserStore::new(&path)
            .create_user(new_user("ada@example.com"))
            .unwrap();

        let doc: serde_json::Value =
            serde_json::from_str(&fs::read_to_string(&path).unwrap()).unwrap();
        let user = &doc["users"][0];
        assert_eq!(user["email"], "ada@example.com");
        assert_eq!(user["password"], "sha256$00$11");
        assert_eq!(user["subscription"], "free");
        assert!(user["createdAt"].is_string());
    }

    #[test]
    fn duplicate_email_conflicts() {
        let dir = tempfile::tempdir().unwrap();
        let store = JsonFileUserStore::new(dir.path().join("users.json"));
        store.create_user(new_user("ada@example.com")).unwrap();
        assert!(matches!(
            store.create_user(new_user("ada@example.com")),
            Err(StoreError::Conflict(_))
        ));
    }

    #[test]
    fn corrupt_file_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("users.json");
        fs::write(&path, "{not json").unwrap();

        let store = JsonFileUserStore::new(&path);
        assert!(matches!(
            store.find_user("ada@example.com"),
            Err(StoreError::Serialization(_))
        ));
        assert!(matches!(
            store.create_user(new_user("ada@example.com")),
            Err(StoreError::Serialization(_))
        ));
        assert_eq!(fs::read_to_string(&path).unwrap(), "{not json");
    }

    #[test]
    fn concurrent_creates_keep_every_user() {
        let dir = tempfile::tempdir().unwrap();
        let store = std::sync::Arc::new(JsonFileUserStore::new(dir.path().join("users.json")));

        let handles: Vec<_> = (0..6)
            .map(|i| {
                let store = store.clone();
                std::thread::spawn(move || {
                    store.create_user(new_user(&format!("user{i}@example.com"))).unwrap();
                })
            })
            .collect();
        for h in handles {
            h.join().unwrap();
        }

        for i in 0..6 {
            assert!(store.find_user(&format!("user{i}@example.com")).unwrap().is_some());
        }
    }
}
