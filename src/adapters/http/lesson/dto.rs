//! HTTP DTOs for lesson and enrollment endpoints.

use serde::Deserialize;

use crate::adapters::http::validate;
use crate::domain::enrollment::{EnrollmentStatus, PaymentStatus};
use crate::domain::foundation::{DomainError, ParticipantId};
use crate::domain::lesson::{Lesson, LessonPatch, LessonStatus, NewLesson, SkillLevel};

/// Request to schedule a lesson. `dateTime` arrives as an ISO-8601
/// string and is validated against the past-date rule.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLessonRequest {
    pub title: String,
    pub description: String,
    pub skill_level: SkillLevel,
    pub duration: u32,
    pub max_participants: u32,
    pub price: f64,
    pub date_time: String,
    #[serde(default)]
    pub location: Option<String>,
    #[serde(default)]
    pub instructor: Option<String>,
    #[serde(default)]
    pub ingredients: Vec<String>,
    #[serde(default)]
    pub equipment: Vec<String>,
    #[serde(default)]
    pub techniques: Vec<String>,
    #[serde(default)]
    pub status: Option<LessonStatus>,
}

impl CreateLessonRequest {
    /// Validates and normalizes the request into service input.
    pub fn into_input(self) -> Result<NewLesson, DomainError> {
        Ok(NewLesson {
            title: validate::required_trimmed("title", &self.title)?,
            description: validate::required_trimmed("description", &self.description)?,
            skill_level: self.skill_level,
            duration: validate::positive("duration", self.duration)?,
            max_participants: validate::positive("maxParticipants", self.max_participants)?,
            price: validate::price(self.price)?,
            date_time: validate::lesson_date(&self.date_time, self.status, None)?,
            location: validate::optional_trimmed(self.location),
            instructor: validate::optional_trimmed(self.instructor),
            ingredients: self.ingredients,
            equipment: self.equipment,
            techniques: self.techniques,
            status: self.status,
        })
    }
}

/// Request to partially update a lesson.
#[derive(Debug, Clone, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLessonRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub skill_level: Option<SkillLevel>,
    pub duration: Option<u32>,
    pub max_participants: Option<u32>,
    pub price: Option<f64>,
    pub date_time: Option<String>,
    pub location: Option<String>,
    pub instructor: Option<String>,
    pub ingredients: Option<Vec<String>>,
    pub equipment: Option<Vec<String>>,
    pub techniques: Option<Vec<String>>,
    pub status: Option<LessonStatus>,
}

impl UpdateLessonRequest {
    /// Validates the supplied fields against the existing record.
    ///
    /// The existing lesson is needed for the date rule: a past date is
    /// accepted when the lesson is, or is becoming, completed.
    pub fn into_patch(self, existing: &Lesson) -> Result<LessonPatch, DomainError> {
        Ok(LessonPatch {
            title: self
                .title
                .map(|v| validate::required_trimmed("title", &v))
                .transpose()?,
            description: self
                .description
                .map(|v| validate::required_trimmed("description", &v))
                .transpose()?,
            skill_level: self.skill_level,
            duration: self
                .duration
                .map(|v| validate::positive("duration", v))
                .transpose()?,
            max_participants: self
                .max_participants
                .map(|v| validate::positive("maxParticipants", v))
                .transpose()?,
            price: self.price.map(validate::price).transpose()?,
            date_time: self
                .date_time
                .map(|v| validate::lesson_date(&v, self.status, Some(existing.status)))
                .transpose()?,
            location: validate::optional_trimmed(self.location),
            instructor: validate::optional_trimmed(self.instructor),
            ingredients: self.ingredients,
            equipment: self.equipment,
            techniques: self.techniques,
            status: self.status,
        })
    }
}

/// Optional status filter for the lesson list endpoint.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ListLessonsQuery {
    #[serde(default)]
    pub status: Option<LessonStatus>,
}

/// Query flag overriding the active-enrollment delete guard.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct DeleteLessonQuery {
    #[serde(default)]
    pub force: bool,
}

/// Request to enroll a participant in a lesson.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnrollRequest {
    pub participant_id: ParticipantId,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Request to change an enrollment's status.
#[derive(Debug, Clone, Deserialize)]
pub struct EnrollmentStatusRequest {
    pub status: EnrollmentStatus,
}

/// Request to change an enrollment's payment status.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentStatusRequest {
    pub payment_status: PaymentStatus,
}
