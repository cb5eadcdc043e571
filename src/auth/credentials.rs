use crate::storage::{KvStore, StorageError};

/// Storage key for the remembered username.
pub const KEY_EMAIL: &str = "email";

/// Storage key for the remembered password.
pub const KEY_PASSWORD: &str = "password";

/// Storage key for the remember-me opt-in flag; `"true"` when set.
pub const KEY_REMEMBER_ME: &str = "rememberMe";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

/// Plaintext credential persistence behind the user's remember-me
/// opt-in. The pair is stored verbatim and erased whenever the user
/// logs in without the opt-in.
pub struct RememberedCredentials;

impl RememberedCredentials {
    pub fn store(
        store: &mut KvStore,
        username: &str,
        password: &str,
    ) -> Result<(), StorageError> {
        store.set(KEY_EMAIL, username)?;
        store.set(KEY_PASSWORD, password)?;
        store.set(KEY_REMEMBER_ME, "true")
    }

    /// Returns the stored pair only when the opt-in flag is set and
    /// both halves are present. Missing keys are a normal state.
    pub fn load(store: &KvStore) -> Option<Credentials> {
        if store.get(KEY_REMEMBER_ME) != Some("true") {
            return None;
        }
        let username = store.get(KEY_EMAIL)?.to_string();
        let password = store.get(KEY_PASSWORD)?.to_string();
        Some(Credentials { username, password })
    }

    pub fn clear(store: &mut KvStore) -> Result<(), StorageError> {
        store.remove(KEY_EMAIL)?;
        store.remove(KEY_PASSWORD)?;
        store.remove(KEY_REMEMBER_ME)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn temp_store() -> (tempfile::TempDir, KvStore) {
        let dir = tempfile::tempdir().expect("tempdir");
        let store = KvStore::open(dir.path().join("storage.json")).expect("open");
        (dir, store)
    }

    #[test]
    fn store_then_load_returns_exact_pair() {
        let (_dir, mut store) = temp_store();
        RememberedCredentials::store(&mut store, "demo@x.com", "Test@123").unwrap();

        let creds = RememberedCredentials::load(&store).expect("credentials present");
        assert_eq!(creds.username, "demo@x.com");
        assert_eq!(creds.password, "Test@123");
    }

    #[test]
    fn load_without_flag_is_none() {
        let (_dir, mut store) = temp_store();
        // Keys present but no opt-in flag: nothing is returned.
        store.set(KEY_EMAIL, "demo@x.com").unwrap();
        store.set(KEY_PASSWORD, "Test@123").unwrap();
        assert!(RememberedCredentials::load(&store).is_none());
    }

    #[test]
    fn clear_after_store_erases_everything() {
        let (_dir, mut store) = temp_store();
        RememberedCredentials::store(&mut store, "demo@x.com", "Test@123").unwrap();
        RememberedCredentials::clear(&mut store).unwrap();

        assert!(RememberedCredentials::load(&store).is_none());
        assert_eq!(store.get(KEY_EMAIL), None);
        assert_eq!(store.get(KEY_PASSWORD), None);
        assert_eq!(store.get(KEY_REMEMBER_ME), None);
    }
}
