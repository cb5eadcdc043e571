use serde::{Deserialize, Serialize};

/// A provider entry from the doctor list endpoint. Read-only on the
/// client; identity is the `id` field.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Doctor {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub profile_picture: String,
    #[serde(default)]
    pub specialty: Vec<Specialty>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Specialty {
    pub name: String,
}

impl Doctor {
    /// First listed specialty, the one the directory shows.
    pub fn primary_specialty(&self) -> &str {
        self.specialty
            .first()
            .map(|s| s.name.as_str())
            .unwrap_or("N/A")
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AvailabilitySlot {
    pub day: String,
    pub start_time: String,
    pub end_time: String,
}

/// Consult slots for one doctor, joined to [`Doctor`] by id lookup.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DoctorAvailability {
    pub doctor_id: String,
    #[serde(default)]
    pub available_slots: Vec<AvailabilitySlot>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_doctor_entry() {
        let json = r#"{
            "id": "3f2a7b1c-9d4e-4a61-8c35-0b6f2d8e9a17",
            "name": "Dr. Sarah Mathew",
            "profile_picture": "https://cdn.example.com/doctors/sarah.png",
            "specialty": [{"name": "Cardiology"}, {"name": "Internal Medicine"}]
        }"#;

        let doctor: Doctor = serde_json::from_str(json).expect("parse doctor");
        assert_eq!(doctor.name, "Dr. Sarah Mathew");
        assert_eq!(doctor.primary_specialty(), "Cardiology");
    }

    #[test]
    fn missing_specialty_displays_placeholder() {
        let json = r#"{"id": "D9", "name": "Dr. Blank"}"#;
        let doctor: Doctor = serde_json::from_str(json).expect("parse doctor");
        assert!(doctor.specialty.is_empty());
        assert_eq!(doctor.primary_specialty(), "N/A");
        assert_eq!(doctor.profile_picture, "");
    }

    #[test]
    fn parses_availability_with_empty_slots() {
        let json = r#"{"doctor_id": "D2", "available_slots": []}"#;
        let availability: DoctorAvailability =
            serde_json::from_str(json).expect("parse availability");
        assert_eq!(availability.doctor_id, "D2");
        assert!(availability.available_slots.is_empty());
    }
}
