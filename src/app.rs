//! Application state management for Carelink.
//!
//! `App` wires the session manager, the favorites synchronizer, and the
//! loaded directory together, and converts component errors into
//! user-facing notices. No error escapes to the driver unhandled; the
//! worst case is a failed operation, a notice, and unchanged state.

use std::collections::HashMap;

use anyhow::Result;
use tracing::{debug, warn};

use crate::api::{ApiClient, ApiError, AuthError};
use crate::auth::SessionManager;
use crate::config::Config;
use crate::demo;
use crate::favorites::{FavoriteState, Favorites};
use crate::models::{AvailabilitySlot, Doctor, UserProfile};
use crate::settings::ProfileSettings;
use crate::storage::KvStore;

/// Severity of a transient toast-style message.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum NoticeKind {
    Success,
    Info,
    Error,
}

/// A transient user-facing message produced by an operation.
#[derive(Debug, Clone)]
pub struct Notice {
    pub kind: NoticeKind,
    pub text: String,
}

impl Notice {
    fn success(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            text: text.into(),
        }
    }

    fn info(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Info,
            text: text.into(),
        }
    }

    fn error(text: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            text: text.into(),
        }
    }
}

/// Main application state container
pub struct App {
    pub config: Config,
    pub sessions: SessionManager,
    pub favorites: Favorites,
    pub doctors: Vec<Doctor>,
    availability: HashMap<String, Vec<AvailabilitySlot>>,

    /// Inline error shown next to the login form.
    pub login_error: Option<String>,
    notice: Option<Notice>,
}

impl App {
    /// Create the application with the platform storage location.
    pub fn new(config: Config) -> Result<Self> {
        let path = Config::storage_path()?;
        let store = match KvStore::open(path.clone()) {
            Ok(store) => store,
            Err(e) => {
                warn!(error = %e, "Failed to open storage, starting empty");
                KvStore::empty(path)
            }
        };
        Self::from_parts(config, store)
    }

    /// Assemble from explicit parts. Tests inject their own store.
    pub fn from_parts(config: Config, store: KvStore) -> Result<Self> {
        let api = ApiClient::new(config.api_base_url())?;
        let sessions = SessionManager::new(api, store, config.demo_mode);

        Ok(Self {
            config,
            sessions,
            favorites: Favorites::new(),
            doctors: Vec::new(),
            availability: HashMap::new(),
            login_error: None,
            notice: None,
        })
    }

    // =========================================================================
    // Authentication
    // =========================================================================

    /// Attempt login and record the inline form error on failure.
    pub async fn attempt_login(
        &mut self,
        username: &str,
        password: &str,
        remember_me: bool,
    ) -> Result<(), AuthError> {
        self.login_error = None;

        match self.sessions.login(username, password, remember_me).await {
            Ok(data) => {
                self.config.last_username = Some(username.to_string());
                debug!(user = %data.profile.display_name, "Signed in");
                Ok(())
            }
            Err(e) => {
                let message = match &e {
                    AuthError::InvalidCredentials(msg) => msg.clone(),
                    AuthError::MissingToken => "Failed to retrieve access token.".to_string(),
                    AuthError::Network(_) => "An error occurred. Please try again.".to_string(),
                };
                self.login_error = Some(message);
                Err(e)
            }
        }
    }

    /// Tear down the session and all session-scoped view state.
    /// Idempotent.
    pub fn logout(&mut self) {
        self.sessions.logout();
        self.favorites.clear();
        self.doctors.clear();
        self.availability.clear();
    }

    pub fn profile(&self) -> Option<&UserProfile> {
        self.sessions.session().map(|s| &s.profile)
    }

    // =========================================================================
    // Directory
    // =========================================================================

    /// Load the doctor directory, and in demo mode the availability
    /// dataset alongside it.
    pub async fn load_doctors(&mut self) {
        let (doctors, availability) = if self.config.demo_mode {
            let (d, a) = tokio::join!(self.sessions.fetch_doctors(), demo::availability());
            (d, a)
        } else {
            (self.sessions.fetch_doctors().await, Vec::new())
        };

        match doctors {
            Ok(list) => {
                debug!(count = list.len(), "Doctor list loaded");
                self.doctors = list;
                self.availability = availability
                    .into_iter()
                    .map(|a| (a.doctor_id, a.available_slots))
                    .collect();
            }
            Err(ApiError::Unauthorized) => {
                self.notice = Some(Notice::error("Session expired. Please log in again."));
            }
            Err(e) => {
                self.notice = Some(Notice::error(format!("Failed to load doctors: {}", e)));
            }
        }
    }

    /// Availability slots for a doctor; `None` means no data at all.
    pub fn slots_for(&self, doctor_id: &str) -> Option<&[AvailabilitySlot]> {
        self.availability.get(doctor_id).map(Vec::as_slice)
    }

    // =========================================================================
    // Favorites
    // =========================================================================

    pub async fn toggle_favorite(&mut self, doctor_id: &str) {
        match self.favorites.toggle(&mut self.sessions, doctor_id).await {
            Ok(FavoriteState::Added) => {
                self.notice = Some(Notice::success(FavoriteState::Added.notice()));
            }
            Ok(FavoriteState::Removed) => {
                self.notice = Some(Notice::info(FavoriteState::Removed.notice()));
            }
            Err(e) => {
                self.notice = Some(Notice::error(e.to_string()));
            }
        }
    }

    // =========================================================================
    // Profile settings
    // =========================================================================

    pub fn load_settings(&self) -> ProfileSettings {
        ProfileSettings::load(self.sessions.store())
    }

    pub fn save_settings(&mut self, settings: &ProfileSettings) {
        match settings.save(self.sessions.store_mut()) {
            Ok(()) => {
                self.notice = Some(Notice::success("You have successfully updated your profile."));
            }
            Err(e) => {
                warn!(error = %e, "Failed to save profile settings");
                self.notice = Some(Notice::error("Failed to update your profile."));
            }
        }
    }

    /// Take the pending notice, leaving none.
    pub fn take_notice(&mut self) -> Option<Notice> {
        self.notice.take()
    }
}
