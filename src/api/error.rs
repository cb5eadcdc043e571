use thiserror::Error;

/// Maximum length for error response bodies included in error messages
const MAX_ERROR_BODY_LENGTH: usize = 500;

/// Transport- and protocol-level failures shared by the authenticated
/// endpoints.
#[derive(Error, Debug)]
pub enum ApiError {
    #[error("Unauthorized - token may be expired")]
    Unauthorized,

    #[error("Request rejected: {0}")]
    Rejected(String),

    #[error("Server error: {0}")]
    ServerError(String),

    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl ApiError {
    /// Truncate a response body to avoid dragging huge payloads into
    /// error messages and logs.
    pub(crate) fn truncate_body(body: &str) -> String {
        if body.len() <= MAX_ERROR_BODY_LENGTH {
            body.to_string()
        } else {
            format!(
                "{}... (truncated, {} total bytes)",
                &body[..MAX_ERROR_BODY_LENGTH],
                body.len()
            )
        }
    }

    pub fn from_status(status: reqwest::StatusCode, body: &str) -> Self {
        let truncated = Self::truncate_body(body);
        match status.as_u16() {
            401 => ApiError::Unauthorized,
            500..=599 => ApiError::ServerError(truncated),
            _ => ApiError::InvalidResponse(format!("Status {}: {}", status, truncated)),
        }
    }
}

/// Login failures as the form surfaces them.
#[derive(Error, Debug)]
pub enum AuthError {
    /// The server reported failure; the message is the server-provided
    /// text shown inline on the form.
    #[error("{0}")]
    InvalidCredentials(String),

    /// The server reported success but the payload carried no access
    /// token.
    #[error("Failed to retrieve access token.")]
    MissingToken,

    /// Transport failure or a malformed response.
    #[error("Network error: {0}")]
    Network(String),
}

impl From<reqwest::Error> for AuthError {
    fn from(err: reqwest::Error) -> Self {
        AuthError::Network(err.to_string())
    }
}

/// Failures of the favorite add/remove flow.
#[derive(Error, Debug)]
pub enum FavoritesError {
    /// No auth token or patient id; nothing was sent to the server.
    #[error("Not signed in")]
    MissingSession,

    /// The server explicitly reported failure.
    #[error("{0}")]
    Rejected(String),

    #[error("Network error: {0}")]
    Network(String),
}

impl From<ApiError> for FavoritesError {
    fn from(err: ApiError) -> Self {
        match err {
            ApiError::Unauthorized => FavoritesError::MissingSession,
            ApiError::Rejected(msg) => FavoritesError::Rejected(msg),
            other => FavoritesError::Network(other.to_string()),
        }
    }
}
