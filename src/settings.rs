//! Profile-settings persistence.
//!
//! The settings screen edits a handful of contact fields that live as
//! plain strings in the key-value store. Loading tolerates any subset
//! of missing keys; saving writes all of them.

use crate::storage::{KvStore, StorageError};

const KEY_COUNTRY_CODE: &str = "countryCode";
const KEY_COUNTRY: &str = "country";
const KEY_STATE: &str = "state";
const KEY_CITY: &str = "city";
const KEY_PHONE: &str = "phone";
const KEY_ALT_PHONE: &str = "altPhone";

/// Dialing code preselected when none is stored.
const DEFAULT_COUNTRY_CODE: &str = "+91";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProfileSettings {
    pub country_code: String,
    pub country: String,
    pub state: String,
    pub city: String,
    pub phone: String,
    pub alt_phone: String,
}

impl Default for ProfileSettings {
    fn default() -> Self {
        Self {
            country_code: DEFAULT_COUNTRY_CODE.to_string(),
            country: String::new(),
            state: String::new(),
            city: String::new(),
            phone: String::new(),
            alt_phone: String::new(),
        }
    }
}

impl ProfileSettings {
    pub fn load(store: &KvStore) -> Self {
        let field = |key: &str| store.get(key).unwrap_or("").to_string();
        Self {
            country_code: store
                .get(KEY_COUNTRY_CODE)
                .unwrap_or(DEFAULT_COUNTRY_CODE)
                .to_string(),
            country: field(KEY_COUNTRY),
            state: field(KEY_STATE),
            city: field(KEY_CITY),
            phone: field(KEY_PHONE),
            alt_phone: field(KEY_ALT_PHONE),
        }
    }

    pub fn save(&self, store: &mut KvStore) -> Result<(), StorageError> {
        store.set(KEY_COUNTRY_CODE, &self.country_code)?;
        store.set(KEY_COUNTRY, &self.country)?;
        store.set(KEY_STATE, &self.state)?;
        store.set(KEY_CITY, &self.city)?;
        store.set(KEY_PHONE, &self.phone)?;
        store.set(KEY_ALT_PHONE, &self.alt_phone)
    }
}
