//! Participant entity.
//!
//! Participants are never physically removed by a normal delete; the
//! service soft-deletes them by clearing `is_active`. A separate hard
//! delete bypasses that rule.

use serde::{Deserialize, Serialize};

use crate::domain::foundation::{ParticipantId, Timestamp};

/// Emergency contact details for a participant.
///
/// Replaced wholesale on update; there is no partial merge of the
/// nested fields.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EmergencyContact {
    pub name: String,
    pub phone: String,
    pub relationship: String,
}

/// A person registered to attend lessons.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: ParticipantId,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub age: Option<u8>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub emergency_contact: Option<EmergencyContact>,
    pub registration_date: Timestamp,
    pub is_active: bool,
}

/// Input for registering a new participant.
///
/// The HTTP boundary is responsible for trimming, email format, and the
/// 16-100 age range before this reaches the service.
#[derive(Debug, Clone, Default)]
pub struct NewParticipant {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub phone: Option<String>,
    pub age: Option<u8>,
    pub allergies: Vec<String>,
    pub dietary_restrictions: Vec<String>,
    pub emergency_contact: Option<EmergencyContact>,
    pub registration_date: Option<Timestamp>,
    pub is_active: Option<bool>,
}

/// Partial update of a participant. Only supplied fields are replaced.
#[derive(Debug, Clone, Default)]
pub struct ParticipantPatch {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub age: Option<u8>,
    pub allergies: Option<Vec<String>>,
    pub dietary_restrictions: Option<Vec<String>>,
    pub emergency_contact: Option<EmergencyContact>,
    pub is_active: Option<bool>,
}

impl ParticipantPatch {
    /// Patch that deactivates a participant (soft delete).
    pub fn deactivate() -> Self {
        Self {
            is_active: Some(false),
            ..Self::default()
        }
    }
}

impl Participant {
    /// Builds a participant from registration input, assigning a fresh id
    /// and defaulting `registration_date` and `is_active`.
    pub fn register(input: NewParticipant) -> Self {
        Self {
            id: ParticipantId::new(),
            first_name: input.first_name,
            last_name: input.last_name,
            email: input.email,
            phone: input.phone,
            age: input.age,
            allergies: input.allergies,
            dietary_restrictions: input.dietary_restrictions,
            emergency_contact: input.emergency_contact,
            registration_date: input.registration_date.unwrap_or_else(Timestamp::now),
            is_active: input.is_active.unwrap_or(true),
        }
    }

    /// Shallow-merges a patch over this record.
    pub fn merge(&mut self, patch: ParticipantPatch) {
        if let Some(first_name) = patch.first_name {
            self.first_name = first_name;
        }
        if let Some(last_name) = patch.last_name {
            self.last_name = last_name;
        }
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(age) = patch.age {
            self.age = Some(age);
        }
        if let Some(allergies) = patch.allergies {
            self.allergies = allergies;
        }
        if let Some(dietary_restrictions) = patch.dietary_restrictions {
            self.dietary_restrictions = dietary_restrictions;
        }
        if let Some(emergency_contact) = patch.emergency_contact {
            self.emergency_contact = Some(emergency_contact);
        }
        if let Some(is_active) = patch.is_active {
            self.is_active = is_active;
        }
    }

    /// Display name, "First Last".
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}
