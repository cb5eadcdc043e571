//! HTTP client for the Carelink telehealth API.
//!
//! One `ApiClient` value owns the reqwest client, the base URL, and the
//! current bearer token; there is no global interceptor state. The
//! fixed `APPID` header rides on every request via default headers.

use std::time::Duration;

use reqwest::{header, Client};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::debug;
use uuid::Uuid;

use crate::auth::SessionData;
use crate::models::{Doctor, UserProfile};

use super::{ApiError, AuthError};

// ============================================================================
// Constants
// ============================================================================

/// Base URL for the production telehealth API.
pub const DEFAULT_BASE_URL: &str = "https://uae-saas-api.instapract.ae/web/api/default";

/// Fixed application identifier the API requires on every call.
const APP_ID: &str = "Gem3s12345";

/// Fixed OS identifier sent in the login payload.
const OS_ID: &str = "b93a9204-ee21-4cf9-8a94-cf5eeabf7301";

/// Fixed patient role identifier sent in the login payload.
const ROLE_ID: &str = "143f37f2-ca38-0ab1-2489-1e47113655fc";

/// Fixed language identifier sent in the login payload.
const LANGUAGE_ID: &str = "da315627-3ece-2016-c628-b61dc5ee9be0";

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

// ============================================================================
// Wire types
// ============================================================================

#[derive(Debug, Serialize)]
struct LoginPayload<'a> {
    username: &'a str,
    password: &'a str,
    device_id: String,
    os_id: &'static str,
    role_id: &'static str,
    language: &'static str,
}

#[derive(Debug, Deserialize)]
struct LoginResponse {
    success: bool,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Option<LoginData>,
}

#[derive(Debug, Deserialize)]
struct LoginData {
    #[serde(default)]
    access_token: Option<String>,
    #[serde(rename = "PatientProfile", default)]
    patient_profile: Option<PatientProfileWire>,
    #[serde(rename = "User", default)]
    user: Option<UserWire>,
}

#[derive(Debug, Default, Deserialize)]
struct PatientProfileWire {
    #[serde(default)]
    id: Option<String>,
    #[serde(default)]
    first_name: Option<String>,
    #[serde(default)]
    last_name: Option<String>,
    #[serde(default)]
    profile_picture: Option<String>,
}

#[derive(Debug, Deserialize)]
struct UserWire {
    #[serde(default)]
    id: Option<String>,
}

#[derive(Debug, Deserialize)]
struct ListResponse {
    success: bool,
    #[serde(default)]
    msg: Option<String>,
    #[serde(default)]
    data: Vec<Doctor>,
}

#[derive(Debug, Deserialize)]
struct MutationResponse {
    success: bool,
    #[serde(default)]
    msg: Option<String>,
}

/// The API models favorite removal as a soft-delete flag on the
/// association record rather than a distinct verb.
#[derive(Debug, Serialize)]
struct FavoritePayload<'a> {
    #[serde(rename = "PatientMyProviders")]
    patient_my_providers: ProviderRecord<'a>,
}

#[derive(Debug, Serialize)]
struct ProviderRecord<'a> {
    doctor_user_id: &'a str,
    is_deleted: &'a str,
    patient_user_id: &'a str,
}

// ============================================================================
// Client
// ============================================================================

/// API client for the Carelink service.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiClient {
    client: Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new API client against `base_url`.
    pub fn new(base_url: impl Into<String>) -> Result<Self, ApiError> {
        let mut headers = header::HeaderMap::new();
        headers.insert("APPID", header::HeaderValue::from_static(APP_ID));
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .default_headers(headers)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into(),
            token: None,
        })
    }

    /// Set the bearer token for authenticated requests.
    pub fn set_token(&mut self, token: String) {
        self.token = Some(token);
    }

    /// Drop the bearer token so subsequent authorized calls fail fast.
    pub fn clear_token(&mut self) {
        self.token = None;
    }

    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    /// Authenticate against `/login` and derive the session.
    ///
    /// `success=false` surfaces the server message as
    /// [`AuthError::InvalidCredentials`]; `success=true` without a
    /// usable access token is [`AuthError::MissingToken`].
    pub async fn login(&self, username: &str, password: &str) -> Result<SessionData, AuthError> {
        let url = format!("{}/login", self.base_url);
        let payload = LoginPayload {
            username,
            password,
            device_id: Uuid::new_v4().to_string(),
            os_id: OS_ID,
            role_id: ROLE_ID,
            language: LANGUAGE_ID,
        };

        let response = self.client.post(&url).json(&payload).send().await?;
        let status = response.status();
        let text = response.text().await?;

        if !status.is_success() {
            return Err(AuthError::Network(format!(
                "login request failed with status {}",
                status
            )));
        }

        let parsed: LoginResponse = serde_json::from_str(&text)
            .map_err(|e| AuthError::Network(format!("invalid login response: {}", e)))?;

        if !parsed.success {
            return Err(AuthError::InvalidCredentials(
                parsed
                    .msg
                    .unwrap_or_else(|| "Invalid username or password".to_string()),
            ));
        }

        let data = parsed.data.ok_or(AuthError::MissingToken)?;
        let token = match data.access_token {
            Some(t) if !t.is_empty() => t,
            _ => return Err(AuthError::MissingToken),
        };

        let patient_user_id = data
            .user
            .and_then(|u| u.id)
            .filter(|id| !id.is_empty())
            .ok_or_else(|| AuthError::Network("login response missing user id".to_string()))?;

        let wire = data.patient_profile.unwrap_or_default();
        let profile = UserProfile {
            display_name: UserProfile::display_name_for(
                wire.first_name.as_deref().unwrap_or(""),
                wire.last_name.as_deref().unwrap_or(""),
            ),
            profile_picture: wire.profile_picture.unwrap_or_default(),
            id: wire.id.unwrap_or_default(),
        };

        debug!(display_name = %profile.display_name, "Login accepted");

        Ok(SessionData {
            token,
            patient_user_id,
            profile,
        })
    }

    /// Fetch the doctor directory.
    pub async fn fetch_doctors(&self) -> Result<Vec<Doctor>, ApiError> {
        let response: ListResponse = self
            .post_authorized("/doc-list", &serde_json::json!({}))
            .await?;

        if !response.success {
            return Err(ApiError::Rejected(
                response
                    .msg
                    .unwrap_or_else(|| "doctor list request failed".to_string()),
            ));
        }

        debug!(count = response.data.len(), "Doctors fetched");
        Ok(response.data)
    }

    /// Create or soft-delete the patient-to-doctor favorite record.
    pub async fn set_favorite(
        &self,
        doctor_user_id: &str,
        patient_user_id: &str,
        deleted: bool,
    ) -> Result<(), ApiError> {
        let payload = FavoritePayload {
            patient_my_providers: ProviderRecord {
                doctor_user_id,
                is_deleted: if deleted { "yes" } else { "no" },
                patient_user_id,
            },
        };

        let response: MutationResponse =
            self.post_authorized("/add-my-providers", &payload).await?;

        if !response.success {
            return Err(ApiError::Rejected(
                response
                    .msg
                    .unwrap_or_else(|| "favorite update failed".to_string()),
            ));
        }

        Ok(())
    }

    /// POST to an authenticated endpoint, attaching the bearer token
    /// when one is present, and parse the JSON body.
    async fn post_authorized<T: DeserializeOwned, B: Serialize>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let url = format!("{}{}", self.base_url, path);

        let mut request = self.client.post(&url).json(body);
        if let Some(ref token) = self.token {
            request = request.bearer_auth(token);
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(ApiError::from_status(status, &body));
        }

        let text = response.text().await?;
        serde_json::from_str(&text).map_err(|e| {
            ApiError::InvalidResponse(format!("{}: {}", e, ApiError::truncate_body(&text)))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_login_response_with_token() {
        let json = r#"{
            "success": true,
            "data": {
                "access_token": "tok-1",
                "PatientProfile": {
                    "id": "p-1",
                    "first_name": "Michael",
                    "last_name": "Allwyn",
                    "profile_picture": null
                },
                "User": {"id": "u-1"}
            }
        }"#;

        let parsed: LoginResponse = serde_json::from_str(json).expect("parse login response");
        assert!(parsed.success);
        let data = parsed.data.expect("data present");
        assert_eq!(data.access_token.as_deref(), Some("tok-1"));
        assert_eq!(data.user.and_then(|u| u.id).as_deref(), Some("u-1"));
    }

    #[test]
    fn parses_failed_login_response() {
        let json = r#"{"success": false, "msg": "Invalid username or password"}"#;
        let parsed: LoginResponse = serde_json::from_str(json).expect("parse login response");
        assert!(!parsed.success);
        assert_eq!(parsed.msg.as_deref(), Some("Invalid username or password"));
        assert!(parsed.data.is_none());
    }

    #[test]
    fn favorite_payload_uses_soft_delete_flag() {
        let payload = FavoritePayload {
            patient_my_providers: ProviderRecord {
                doctor_user_id: "D1",
                is_deleted: "yes",
                patient_user_id: "P1",
            },
        };

        let encoded = serde_json::to_value(&payload).unwrap();
        assert_eq!(encoded["PatientMyProviders"]["is_deleted"], "yes");
        assert_eq!(encoded["PatientMyProviders"]["doctor_user_id"], "D1");
        assert_eq!(encoded["PatientMyProviders"]["patient_user_id"], "P1");
    }

    #[test]
    fn parses_doctor_list_response() {
        let json = r#"{
            "success": true,
            "data": [
                {"id": "D1", "name": "Dr. A", "specialty": [{"name": "Cardiology"}]},
                {"id": "D2", "name": "Dr. B"}
            ]
        }"#;

        let parsed: ListResponse = serde_json::from_str(json).expect("parse list response");
        assert!(parsed.success);
        assert_eq!(parsed.data.len(), 2);
        assert_eq!(parsed.data[0].primary_specialty(), "Cardiology");
        assert_eq!(parsed.data[1].primary_specialty(), "N/A");
    }
}
