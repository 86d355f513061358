//! HTTP DTOs for participant endpoints.

use serde::Deserialize;

use crate::adapters::http::validate;
use crate::domain::foundation::DomainError;
use crate::domain::participant::{EmergencyContact, NewParticipant, ParticipantPatch};

/// Request to register a participant.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateParticipantRequest {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub age: Option<u8>,
    #[serde(default)]
    pub allergies: Vec<String>,
    #[serde(default)]
    pub dietary_restrictions: Vec<String>,
    #[serde(default)]
    pub emergency_contact: Option<EmergencyContact>,
}

impl CreateParticipantRequest {
    /// Validates and normalizes the request into service input.
    pub fn into_input(self) -> Result<NewParticipant, DomainError> {
        Ok(NewParticipant {
            first_name: validate::required_trimmed("firstName", &self.first_name)?,
            last_name: validate::required_trimmed("lastName", &self.last_name)?,
            email: validate::email(&self.email)?,
            phone: validate::optional_trimmed(self.phone),
            age: self.age.map(validate::age).transpose()?,
            allergies: self.allergies,
            dietary_restrictions: self.dietary_restrictions,
            emergency_contact: self.emergency_contact,
            registration_date: None,
            is_active: None,
        })
    }
}

/// Request to partially update a participant.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateParticipantRequest {
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

impl UpdateParticipantRequest {
    /// Validates the supplied fields and builds a patch.
    pub fn into_patch(self) -> Result<ParticipantPatch, DomainError> {
        Ok(ParticipantPatch {
            first_name: self
                .first_name
                .map(|v| validate::required_trimmed("firstName", &v))
                .transpose()?,
            last_name: self
                .last_name
                .map(|v| validate::required_trimmed("lastName", &v))
                .transpose()?,
            email: self.email.map(|v| validate::email(&v)).transpose()?,
            phone: validate::optional_trimmed(self.phone),
            age: self.age.map(validate::age).transpose()?,
            allergies: self.allergies,
            dietary_restrictions: self.dietary_restrictions,
            emergency_contact: self.emergency_contact,
            is_active: self.is_active,
        })
    }
}

/// Query flag selecting hard delete over the default soft delete.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DeleteParticipantQuery {
    #[serde(default)]
    pub hard: bool,
}
