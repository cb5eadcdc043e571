//! Session lifecycle orchestration.
//!
//! `SessionManager` owns the API client and the key-value store. It is
//! the only component that writes the token/profile keys, and the only
//! place a 401 turns into session invalidation.

use tracing::{debug, info, warn};

use crate::api::{ApiClient, ApiError, AuthError, FavoritesError};
use crate::demo;
use crate::models::Doctor;
use crate::storage::KvStore;

use super::credentials::{Credentials, RememberedCredentials};
use super::session::SessionData;

pub struct SessionManager {
    api: ApiClient,
    store: KvStore,
    session: Option<SessionData>,
    demo_mode: bool,
}

impl SessionManager {
    /// Build the manager and rehydrate any persisted session so an
    /// authenticated launch skips the login form.
    pub fn new(mut api: ApiClient, store: KvStore, demo_mode: bool) -> Self {
        let session = SessionData::restore(&store);
        if let Some(ref data) = session {
            api.set_token(data.token.clone());
            debug!("Session restored from storage");
        }

        Self {
            api,
            store,
            session,
            demo_mode,
        }
    }

    pub fn session(&self) -> Option<&SessionData> {
        self.session.as_ref()
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_some()
    }

    pub fn store(&self) -> &KvStore {
        &self.store
    }

    pub fn store_mut(&mut self) -> &mut KvStore {
        &mut self.store
    }

    /// Authenticate and establish the session.
    ///
    /// On success the token, patient id, and derived profile are
    /// persisted; storage failures there are logged but do not fail the
    /// login. Remembered credentials are stored or erased per
    /// `remember_me`.
    pub async fn login(
        &mut self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<SessionData, AuthError> {
        let data = if self.demo_mode {
            demo::authenticate(username, password).await?
        } else {
            self.api.login(username, password).await?
        };

        if let Err(e) = data.persist(&mut self.store) {
            warn!(error = %e, "Failed to persist session");
        }

        if remember_me {
            if let Err(e) = RememberedCredentials::store(&mut self.store, username, password) {
                warn!(error = %e, "Failed to store remembered credentials");
            }
        } else if let Err(e) = RememberedCredentials::clear(&mut self.store) {
            warn!(error = %e, "Failed to clear remembered credentials");
        }

        self.api.set_token(data.token.clone());
        self.session = Some(data.clone());
        info!("Login successful");
        Ok(data)
    }

    /// Credentials previously stored behind the remember-me opt-in.
    pub fn load_remembered_credentials(&self) -> Option<Credentials> {
        RememberedCredentials::load(&self.store)
    }

    /// Tear down the session. Idempotent: logging out with no session
    /// is a no-op, not an error. Remembered credentials are untouched.
    pub fn logout(&mut self) {
        if self.session.is_none() {
            debug!("Logout with no active session");
        }
        self.session = None;
        self.api.clear_token();
        if let Err(e) = SessionData::clear(&mut self.store) {
            warn!(error = %e, "Failed to clear stored session");
        }
        info!("Logged out");
    }

    /// Fetch the doctor directory with the current token. A 401
    /// invalidates the session before the error is returned.
    pub async fn fetch_doctors(&mut self) -> Result<Vec<Doctor>, ApiError> {
        if self.demo_mode {
            return Ok(demo::doctors().await);
        }

        match self.api.fetch_doctors().await {
            Err(ApiError::Unauthorized) => {
                self.invalidate();
                Err(ApiError::Unauthorized)
            }
            other => other,
        }
    }

    /// Post a favorite add/remove for the signed-in patient.
    ///
    /// Requires both the token and patient id; otherwise fails with
    /// `MissingSession` before any network traffic.
    pub async fn set_favorite(
        &mut self,
        doctor_user_id: &str,
        deleted: bool,
    ) -> Result<(), FavoritesError> {
        let patient_user_id = match self.session {
            Some(ref s) if !s.token.is_empty() && !s.patient_user_id.is_empty() => {
                s.patient_user_id.clone()
            }
            _ => return Err(FavoritesError::MissingSession),
        };

        if self.demo_mode {
            demo::record_favorite().await;
            return Ok(());
        }

        match self
            .api
            .set_favorite(doctor_user_id, &patient_user_id, deleted)
            .await
        {
            Err(ApiError::Unauthorized) => {
                self.invalidate();
                Err(FavoritesError::MissingSession)
            }
            Err(e) => Err(e.into()),
            Ok(()) => Ok(()),
        }
    }

    /// Drop the in-memory and stored token after a 401 so subsequent
    /// authorized calls fail fast instead of looping on a dead session.
    fn invalidate(&mut self) {
        warn!("Received 401, invalidating stored session");
        self.session = None;
        self.api.clear_token();
        if let Err(e) = SessionData::clear(&mut self.store) {
            warn!(error = %e, "Failed to clear stored session");
        }
    }
}
