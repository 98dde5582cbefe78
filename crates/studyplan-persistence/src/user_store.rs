//! User account persistence.

use std::path::PathBuf;
use std::sync::Mutex;

use studyplan_models::{User, UserId};

use crate::atomic::{atomic_write_json, checked_id, read_json_dir, read_json_optional};
use crate::error::{PersistenceError, Result};

/// Stores user accounts, one JSON file per user:
/// ```text
/// base_path/
/// └── users/
///     └── user-abc123.json
/// ```
pub struct UserStore {
    base_path: PathBuf,
    /// Held across the username check and the write in `create`.
    create_lock: Mutex<()>,
}

impl UserStore {
    /// Creates a new UserStore with the given base path.
    pub fn new(base_path: impl Into<PathBuf>) -> Self {
        Self {
            base_path: base_path.into(),
            create_lock: Mutex::new(()),
        }
    }

    fn users_dir(&self) -> PathBuf {
        self.base_path.join("users")
    }

    fn user_path(&self, id: &UserId) -> Result<PathBuf> {
        let id = checked_id("user", id.as_str())?;
        Ok(self.users_dir().join(format!("{}.json", id)))
    }

    /// Saves a new user. Fails with `Conflict` if the username is taken.
    pub fn create(&self, user: &User) -> Result<()> {
        let _guard = self
            .create_lock
            .lock()
            .unwrap_or_else(|poisoned| poisoned.into_inner());
        if self.find_by_username(&user.username)?.is_some() {
            return Err(PersistenceError::Conflict {
                kind: "username".to_string(),
                value: user.username.clone(),
            });
        }
        atomic_write_json(&self.user_path(&user.id)?, user)
    }

    /// Looks a user up by login name.
    pub fn find_by_username(&self, username: &str) -> Result<Option<User>> {
        let users: Vec<User> = read_json_dir(&self.users_dir())?;
        Ok(users.into_iter().find(|u| u.username == username))
    }

    /// Loads a user by ID.
    pub fn load(&self, id: &UserId) -> Result<User> {
        read_json_optional(&self.user_path(id)?)?
            .ok_or_else(|| PersistenceError::not_found("user", id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::sync::{Arc, Barrier};
    use std::thread;
    use tempfile::tempdir;

    fn user(name: &str) -> User {
        User {
            id: UserId::new(),
            username: name.to_string(),
            password_hash: "hash".to_string(),
            created_at: Utc::now(),
        }
    }

    #[test]
    fn test_create_and_find() {
        let dir = tempdir().unwrap();
        let store = UserStore::new(dir.path());

        let ada = user("ada");
        store.create(&ada).unwrap();

        assert_eq!(store.find_by_username("ada").unwrap(), Some(ada.clone()));
        assert_eq!(store.load(&ada.id).unwrap(), ada);
        assert!(store.find_by_username("grace").unwrap().is_none());
    }

    #[test]
    fn test_duplicate_username_conflicts() {
        let dir = tempdir().unwrap();
        let store = UserStore::new(dir.path());

        store.create(&user("ada")).unwrap();
        let err = store.create(&user("ada")).unwrap_err();
        assert!(matches!(err, PersistenceError::Conflict { .. }));
    }

    #[test]
    fn test_concurrent_create_keeps_one_account() {
        for _ in 0..20 {
            let dir = tempdir().unwrap();
            let store = Arc::new(UserStore::new(dir.path()));
            let barrier = Arc::new(Barrier::new(4));

            let handles: Vec<_> = (0..4)
                .map(|_| {
                    let store = Arc::clone(&store);
                    let barrier = Arc::clone(&barrier);
                    thread::spawn(move || {
                        barrier.wait();
                        store.create(&user("ada")).is_ok()
                    })
                })
                .collect();
            let created = handles
                .into_iter()
                .map(|h| h.join().unwrap())
                .filter(|ok| *ok)
                .count();

            assert_eq!(created, 1);
            let accounts: Vec<User> = read_json_dir(&store.users_dir()).unwrap();
            assert_eq!(accounts.len(), 1);
        }
    }

    #[test]
    fn test_load_missing_user() {
        let dir = tempdir().unwrap();
        let store = UserStore::new(dir.path());
        assert!(matches!(
            store.load(&UserId::new()),
            Err(PersistenceError::NotFound { .. })
        ));
    }
}
