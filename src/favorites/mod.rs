//! Favorites synchronizer.
//!
//! Holds the session-scoped set of favorite doctor ids and toggles
//! membership against the remote API. The local set changes only after
//! the server confirms the mutation, so client and server state cannot
//! silently diverge; a failed toggle leaves the set untouched. Each
//! toggle is a single best-effort attempt with no retry or queue.

use std::collections::HashSet;

use tracing::debug;

use crate::api::FavoritesError;
use crate::auth::SessionManager;

/// Outcome of a confirmed toggle, driving the user notice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FavoriteState {
    Added,
    Removed,
}

impl FavoriteState {
    pub fn notice(&self) -> &'static str {
        match self {
            FavoriteState::Added => "Added to favorites",
            FavoriteState::Removed => "Removed from favorites",
        }
    }
}

#[derive(Debug, Default)]
pub struct Favorites {
    set: HashSet<String>,
}

impl Favorites {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn contains(&self, doctor_id: &str) -> bool {
        self.set.contains(doctor_id)
    }

    pub fn len(&self) -> usize {
        self.set.len()
    }

    pub fn is_empty(&self) -> bool {
        self.set.is_empty()
    }

    /// Toggle `doctor_id` against the server. Membership decides add vs
    /// remove; removal is posted as a soft-delete. The set mutates only
    /// on a confirmed success.
    pub async fn toggle(
        &mut self,
        sessions: &mut SessionManager,
        doctor_id: &str,
    ) -> Result<FavoriteState, FavoritesError> {
        if doctor_id.is_empty() {
            return Err(FavoritesError::Rejected("missing doctor id".to_string()));
        }

        let removing = self.set.contains(doctor_id);
        sessions.set_favorite(doctor_id, removing).await?;

        if removing {
            self.set.remove(doctor_id);
            debug!(doctor_id, "Favorite removed");
            Ok(FavoriteState::Removed)
        } else {
            self.set.insert(doctor_id.to_string());
            debug!(doctor_id, "Favorite added");
            Ok(FavoriteState::Added)
        }
    }

    /// Forget all favorites; called on logout.
    pub fn clear(&mut self) {
        self.set.clear();
    }
}
