//! Trainer/client appointment records.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::error::ValidationError;
use crate::time::parse_timestamp;

/// Lifecycle status of an appointment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum AppointmentStatus {
    #[default]
    Scheduled,
    Completed,
    Cancelled,
}

impl AppointmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AppointmentStatus {
    type Err = ValidationError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "scheduled" => Ok(AppointmentStatus::Scheduled),
            "completed" => Ok(AppointmentStatus::Completed),
            "cancelled" | "canceled" => Ok(AppointmentStatus::Cancelled),
            other => Err(ValidationError::InvalidValue {
                field: "status".into(),
                message: format!("expected scheduled, completed or cancelled, got '{other}'"),
            }),
        }
    }
}

/// A booked session between a trainer and a client.
///
/// Start and end are kept as the ISO-8601 strings the caller supplied.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: String,
    pub trainer_id: String,
    pub client_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub status: AppointmentStatus,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl Appointment {
    pub fn involves(&self, user_id: &str) -> bool {
        self.trainer_id == user_id || self.client_id == user_id
    }

    pub fn is_cancelled(&self) -> bool {
        self.status == AppointmentStatus::Cancelled
    }
}

/// Booking request. Status is not part of it: new appointments are always
/// scheduled.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAppointment {
    pub trainer_id: String,
    pub client_id: String,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub start_time: String,
    pub end_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub notes: Option<String>,
}

impl NewAppointment {
    pub fn new(
        trainer_id: impl Into<String>,
        client_id: impl Into<String>,
        title: impl Into<String>,
        start_time: impl Into<String>,
        end_time: impl Into<String>,
    ) -> Self {
        Self {
            trainer_id: trainer_id.into(),
            client_id: client_id.into(),
            title: title.into(),
            start_time: start_time.into(),
            end_time: end_time.into(),
            ..Default::default()
        }
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    pub fn with_location(mut self, location: impl Into<String>) -> Self {
        self.location = Some(location.into());
        self
    }

    pub fn with_notes(mut self, notes: impl Into<String>) -> Self {
        self.notes = Some(notes.into());
        self
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        parse_timestamp("startTime", &self.start_time)?;
        parse_timestamp("endTime", &self.end_time)?;
        Ok(())
    }

    pub(crate) fn into_appointment(self, id: String) -> Appointment {
        Appointment {
            id,
            trainer_id: self.trainer_id,
            client_id: self.client_id,
            title: self.title,
            description: self.description,
            start_time: self.start_time,
            end_time: self.end_time,
            status: AppointmentStatus::Scheduled,
            location: self.location,
            notes: self.notes,
        }
    }
}

/// Field-level partial update. `None` leaves the field unchanged; there is no
/// way to clear an optional field back to null.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppointmentPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub end_time: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<AppointmentStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl AppointmentPatch {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub(crate) fn validate(&self) -> Result<(), ValidationError> {
        if let Some(start) = &self.start_time {
            parse_timestamp("startTime", start)?;
        }
        if let Some(end) = &self.end_time {
            parse_timestamp("endTime", end)?;
        }
        Ok(())
    }

    /// Produce the patched copy. The original is left untouched.
    pub fn apply(&self, original: &Appointment) -> Appointment {
        let mut updated = original.clone();
        if let Some(title) = &self.title {
            updated.title = title.clone();
        }
        if let Some(description) = &self.description {
            updated.description = Some(description.clone());
        }
        if let Some(start) = &self.start_time {
            updated.start_time = start.clone();
        }
        if let Some(end) = &self.end_time {
            updated.end_time = end.clone();
        }
        if let Some(status) = self.status {
            updated.status = status;
        }
        if let Some(location) = &self.location {
            updated.location = Some(location.clone());
        }
        if let Some(notes) = &self.notes {
            updated.notes = Some(notes.clone());
        }
        updated
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample() -> Appointment {
        NewAppointment::new("t1", "c1", "Leg day", "2024-06-20T10:00:00", "2024-06-20T11:00:00")
            .with_location("Gym A")
            .with_notes("bring bands")
            .into_appointment("apt-1".into())
    }

    #[test]
    fn test_status_parse_and_display() {
        assert_eq!("Completed".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Completed);
        assert_eq!("canceled".parse::<AppointmentStatus>().unwrap(), AppointmentStatus::Cancelled);
        assert!("done".parse::<AppointmentStatus>().is_err());
        assert_eq!(AppointmentStatus::Scheduled.to_string(), "scheduled");
    }

    #[test]
    fn test_wire_shape_is_camel_case() {
        let json = serde_json::to_value(sample()).unwrap();
        assert_eq!(json["trainerId"], "t1");
        assert_eq!(json["startTime"], "2024-06-20T10:00:00");
        assert_eq!(json["status"], "scheduled");
    }

    #[test]
    fn test_patch_only_touches_present_fields() {
        let original = sample();
        let patch = AppointmentPatch {
            status: Some(AppointmentStatus::Completed),
            ..Default::default()
        };
        let updated = patch.apply(&original);

        assert_eq!(updated.status, AppointmentStatus::Completed);
        assert_eq!(updated.title, original.title);
        assert_eq!(updated.location, original.location);
        assert_eq!(updated.notes, original.notes);
        assert_eq!(updated.start_time, original.start_time);
        assert_eq!(original.status, AppointmentStatus::Scheduled);
    }

    #[test]
    fn test_patch_from_partial_json() {
        let patch: AppointmentPatch = serde_json::from_str(r#"{"title":"Upper body"}"#).unwrap();
        assert_eq!(patch.title.as_deref(), Some("Upper body"));
        assert!(patch.location.is_none());
        assert!(!patch.is_empty());
        assert!(AppointmentPatch::default().is_empty());
    }

    #[test]
    fn test_patch_validation_rejects_bad_timestamp() {
        let patch = AppointmentPatch {
            end_time: Some("later".into()),
            ..Default::default()
        };
        assert!(patch.validate().is_err());
    }
}
