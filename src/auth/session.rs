use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::models::UserProfile;
use crate::storage::{KvStore, StorageError};

/// Storage key for the bearer token.
pub const KEY_AUTH_TOKEN: &str = "authToken";

/// Storage key for the patient user id sent with favorite records.
pub const KEY_PATIENT_USER_ID: &str = "patientUserId";

/// Storage key for the JSON-encoded user profile.
pub const KEY_USER_PROFILE: &str = "userProfile";

/// The authenticated state: token, patient id, and derived profile.
/// Created on successful login, destroyed on logout or 401.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SessionData {
    pub token: String,
    pub patient_user_id: String,
    pub profile: UserProfile,
}

impl SessionData {
    /// Rehydrate a session from storage. Returns `None` unless both the
    /// token and patient id are present and non-empty; a profile that
    /// fails to decode degrades to the default rather than killing the
    /// session.
    pub fn restore(store: &KvStore) -> Option<Self> {
        let token = store.get(KEY_AUTH_TOKEN)?.to_string();
        let patient_user_id = store.get(KEY_PATIENT_USER_ID)?.to_string();
        if token.is_empty() || patient_user_id.is_empty() {
            return None;
        }

        let profile = match store.get(KEY_USER_PROFILE) {
            Some(raw) => serde_json::from_str(raw).unwrap_or_else(|e| {
                warn!(error = %e, "Stored profile is unreadable, using default");
                UserProfile::default()
            }),
            None => UserProfile::default(),
        };

        Some(Self {
            token,
            patient_user_id,
            profile,
        })
    }

    /// Write the session keys. The profile is JSON-encoded.
    pub fn persist(&self, store: &mut KvStore) -> Result<(), StorageError> {
        store.set(KEY_AUTH_TOKEN, &self.token)?;
        store.set(KEY_PATIENT_USER_ID, &self.patient_user_id)?;
        let profile = serde_json::to_string(&self.profile)
            .map_err(|e| StorageError::WriteFailure(e.to_string()))?;
        store.set(KEY_USER_PROFILE, &profile)
    }

    /// Remove all session keys. Safe to call when none are present.
    pub fn clear(store: &mut KvStore) -> Result<(), StorageError> {
        store.remove(KEY_AUTH_TOKEN)?;
        store.remove(KEY_PATIENT_USER_ID)?;
        store.remove(KEY_USER_PROFILE)
    }
}
