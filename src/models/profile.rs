use serde::{Deserialize, Serialize};

/// The logged-in patient's profile, derived from the login response and
/// stored JSON-encoded under the `userProfile` key.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UserProfile {
    pub display_name: String,
    #[serde(default)]
    pub profile_picture: String,
    #[serde(default)]
    pub id: String,
}

impl UserProfile {
    /// Display name is "first last"; an all-empty name falls back to
    /// "User".
    pub fn display_name_for(first: &str, last: &str) -> String {
        let name = format!("{} {}", first.trim(), last.trim())
            .trim()
            .to_string();
        if name.is_empty() {
            "User".to_string()
        } else {
            name
        }
    }
}
