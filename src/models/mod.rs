//! Data models for Carelink entities.
//!
//! - `Doctor`, `Specialty`: the provider directory entries
//! - `AvailabilitySlot`, `DoctorAvailability`: consult slots per doctor
//! - `UserProfile`: the logged-in patient's derived profile

pub mod doctor;
pub mod profile;

pub use doctor::{AvailabilitySlot, Doctor, DoctorAvailability, Specialty};
pub use profile::UserProfile;
