//! Seeded demo dataset and offline authentication.
//!
//! Demo mode replaces the remote endpoints with a fixed patient
//! account and a small provider directory, behind the same types and
//! the same latency shape (every call still suspends). Useful for
//! driving the app without reachable infrastructure.

use std::time::Duration;

use crate::api::AuthError;
use crate::auth::SessionData;
use crate::models::{AvailabilitySlot, Doctor, DoctorAvailability, Specialty, UserProfile};

/// Simulated round trip for the login call.
const LOGIN_DELAY_MS: u64 = 400;

/// Simulated round trip for list and mutation calls.
const FETCH_DELAY_MS: u64 = 150;

/// The one seeded patient account.
pub const DEMO_USERNAME: &str = "demo@x.com";
pub const DEMO_PASSWORD: &str = "Test@123";

/// Token handed out by the demo login.
pub const DEMO_TOKEN: &str = "demo-access-token-0001";

/// Authenticate against the seeded account after a simulated delay.
/// Any other pair fails exactly like the live endpoint does.
pub async fn authenticate(username: &str, password: &str) -> Result<SessionData, AuthError> {
    tokio::time::sleep(Duration::from_millis(LOGIN_DELAY_MS)).await;

    if username == DEMO_USERNAME && password == DEMO_PASSWORD {
        Ok(SessionData {
            token: DEMO_TOKEN.to_string(),
            patient_user_id: "1f6a2c9e-4b3d-45f0-9a77-5f2f08c4a9d2".to_string(),
            profile: UserProfile {
                display_name: "Michael Allwyn".to_string(),
                profile_picture: String::new(),
                id: "b6d368b0-852d-4ea1-8b8b-2f5168fc7e10".to_string(),
            },
        })
    } else {
        Err(AuthError::InvalidCredentials(
            "Invalid username or password".to_string(),
        ))
    }
}

/// The seeded provider directory.
pub async fn doctors() -> Vec<Doctor> {
    tokio::time::sleep(Duration::from_millis(FETCH_DELAY_MS)).await;

    let entry = |id: &str, name: &str, specialties: &[&str]| Doctor {
        id: id.to_string(),
        name: name.to_string(),
        profile_picture: String::new(),
        specialty: specialties
            .iter()
            .map(|s| Specialty {
                name: s.to_string(),
            })
            .collect(),
    };

    vec![
        entry("D1", "Dr. Sarah Mathew", &["Cardiology", "Internal Medicine"]),
        entry("D2", "Dr. Arjun Nair", &["Dermatology"]),
        entry("D3", "Dr. Leila Haddad", &["Pediatrics"]),
        entry("D4", "Dr. Tom Becker", &[]),
    ]
}

/// Consult slots for the seeded directory. D4 intentionally has no
/// entry and D3 an empty slot list, matching the shapes the directory
/// screen has to render.
pub async fn availability() -> Vec<DoctorAvailability> {
    tokio::time::sleep(Duration::from_millis(FETCH_DELAY_MS)).await;

    let slot = |day: &str, start: &str, end: &str| AvailabilitySlot {
        day: day.to_string(),
        start_time: start.to_string(),
        end_time: end.to_string(),
    };

    vec![
        DoctorAvailability {
            doctor_id: "D1".to_string(),
            available_slots: vec![
                slot("Monday", "09:00", "12:00"),
                slot("Wednesday", "14:00", "17:00"),
            ],
        },
        DoctorAvailability {
            doctor_id: "D2".to_string(),
            available_slots: vec![slot("Tuesday", "10:00", "13:00")],
        },
        DoctorAvailability {
            doctor_id: "D3".to_string(),
            available_slots: vec![],
        },
    ]
}

/// Accept a favorite mutation after the usual simulated delay.
pub async fn record_favorite() {
    tokio::time::sleep(Duration::from_millis(FETCH_DELAY_MS)).await;
}
