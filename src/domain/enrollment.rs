//! Enrollment entity, embedded in its owning lesson.
//!
//! Enrollments are never persisted on their own; every mutation is a
//! read-modify-write of the parent lesson document.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::foundation::{EnrollmentId, LessonId, ParticipantId, Timestamp};

/// Lifecycle status of an enrollment.
///
/// Transitions are intentionally permissive: any status may be set from
/// any other.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum EnrollmentStatus {
    #[default]
    Enrolled,
    Completed,
    Cancelled,
}

impl EnrollmentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            EnrollmentStatus::Enrolled => "enrolled",
            EnrollmentStatus::Completed => "completed",
            EnrollmentStatus::Cancelled => "cancelled",
        }
    }
}

impl fmt::Display for EnrollmentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Payment state of an enrollment.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum PaymentStatus {
    Paid,
    #[default]
    Pending,
    Refunded,
}

impl PaymentStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            PaymentStatus::Paid => "paid",
            PaymentStatus::Pending => "pending",
            PaymentStatus::Refunded => "refunded",
        }
    }
}

impl fmt::Display for PaymentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Relationship record linking one participant to one lesson.
///
/// At most one enrollment per (lesson, participant) pair may exist at a
/// time.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Enrollment {
    pub id: EnrollmentId,
    pub participant_id: ParticipantId,
    pub lesson_id: LessonId,
    pub enrollment_date: Timestamp,
    pub status: EnrollmentStatus,
    #[serde(default)]
    pub payment_status: PaymentStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl Enrollment {
    /// Creates a fresh enrollment in the `enrolled`/`pending` state.
    pub fn new(lesson_id: LessonId, participant_id: ParticipantId, notes: Option<String>) -> Self {
        Self {
            id: EnrollmentId::new(),
            participant_id,
            lesson_id,
            enrollment_date: Timestamp::now(),
            status: EnrollmentStatus::Enrolled,
            payment_status: PaymentStatus::Pending,
            notes,
        }
    }

    /// Returns true when this enrollment still occupies a seat.
    pub fn is_active(&self) -> bool {
        self.status == EnrollmentStatus::Enrolled
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_enrollment_is_enrolled_and_pending() {
        let enrollment = Enrollment::new(LessonId::new(), ParticipantId::new(), None);
        assert_eq!(enrollment.status, EnrollmentStatus::Enrolled);
        assert_eq!(enrollment.payment_status, PaymentStatus::Pending);
        assert!(enrollment.is_active());
    }

    #[test]
    fn cancelled_enrollment_is_not_active() {
        let mut enrollment = Enrollment::new(LessonId::new(), ParticipantId::new(), None);
        enrollment.status = EnrollmentStatus::Cancelled;
        assert!(!enrollment.is_active());
    }

    #[test]
    fn statuses_serialize_to_lowercase() {
        assert_eq!(
            serde_json::to_string(&EnrollmentStatus::Enrolled).unwrap(),
            "\"enrolled\""
        );
        assert_eq!(
            serde_json::to_string(&PaymentStatus::Refunded).unwrap(),
            "\"refunded\""
        );
    }

    #[test]
    fn statuses_deserialize_from_lowercase() {
        let status: EnrollmentStatus = serde_json::from_str("\"completed\"").unwrap();
        assert_eq!(status, EnrollmentStatus::Completed);

        let payment: PaymentStatus = serde_json::from_str("\"paid\"").unwrap();
        assert_eq!(payment, PaymentStatus::Paid);
    }

    #[test]
    fn unknown_status_is_rejected() {
        assert!(serde_json::from_str::<EnrollmentStatus>("\"waitlisted\"").is_err());
    }

    #[test]
    fn enrollment_serializes_with_camel_case_field_names() {
        let enrollment = Enrollment::new(LessonId::new(), ParticipantId::new(), None);
        let json = serde_json::to_value(&enrollment).unwrap();

        assert!(json.get("participantId").is_some());
        assert!(json.get("enrollmentDate").is_some());
        assert!(json.get("paymentStatus").is_some());
    }
}
