//! Error types for the domain layer.

use std::collections::HashMap;
use std::error::Error;
use std::fmt;

/// Error codes organized by category.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Validation errors
    ValidationFailed,
    EmptyField,
    OutOfRange,
    InvalidFormat,

    // Not found errors
    ParticipantNotFound,
    LessonNotFound,
    EnrollmentNotFound,

    // Conflict errors
    AlreadyEnrolled,
    CapacityExceeded,
    ActiveEnrollments,
    DuplicateDocument,
    RevisionConflict,

    // Infrastructure errors
    StoreError,
    InternalError,
}

impl ErrorCode {
    /// Returns true when the error only indicates a stale read and the
    /// whole read-modify-write cycle can be retried.
    pub fn is_retryable(&self) -> bool {
        matches!(self, ErrorCode::RevisionConflict)
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            ErrorCode::ValidationFailed => "VALIDATION_FAILED",
            ErrorCode::EmptyField => "EMPTY_FIELD",
            ErrorCode::OutOfRange => "OUT_OF_RANGE",
            ErrorCode::InvalidFormat => "INVALID_FORMAT",
            ErrorCode::ParticipantNotFound => "PARTICIPANT_NOT_FOUND",
            ErrorCode::LessonNotFound => "LESSON_NOT_FOUND",
            ErrorCode::EnrollmentNotFound => "ENROLLMENT_NOT_FOUND",
            ErrorCode::AlreadyEnrolled => "ALREADY_ENROLLED",
            ErrorCode::CapacityExceeded => "CAPACITY_EXCEEDED",
            ErrorCode::ActiveEnrollments => "ACTIVE_ENROLLMENTS",
            ErrorCode::DuplicateDocument => "DUPLICATE_DOCUMENT",
            ErrorCode::RevisionConflict => "REVISION_CONFLICT",
            ErrorCode::StoreError => "STORE_ERROR",
            ErrorCode::InternalError => "INTERNAL_ERROR",
        };
        write!(f, "{}", s)
    }
}

/// Standard domain error with code, message, and optional details.
#[derive(Debug, Clone)]
pub struct DomainError {
    pub code: ErrorCode,
    pub message: String,
    pub details: HashMap<String, String>,
}

impl DomainError {
    /// Creates a new domain error.
    pub fn new(code: ErrorCode, message: impl Into<String>) -> Self {
        Self {
            code,
            message: message.into(),
            details: HashMap::new(),
        }
    }

    /// Creates a validation error for a specific field.
    pub fn validation(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            code: ErrorCode::ValidationFailed,
            message: message.into(),
            details: HashMap::new(),
        }
        .with_detail("field", field.into())
    }

    /// Creates a store error wrapping an infrastructure failure.
    pub fn store(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::StoreError, message)
    }

    /// Adds a detail to the error.
    pub fn with_detail(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.details.insert(key.into(), value.into());
        self
    }

    /// Returns true when the whole operation can be retried against a
    /// fresh read.
    pub fn is_retryable(&self) -> bool {
        self.code.is_retryable()
    }
}

impl fmt::Display for DomainError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.code, self.message)
    }
}

impl Error for DomainError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_displays_code_and_message() {
        let err = DomainError::new(ErrorCode::LessonNotFound, "Lesson not found");
        assert_eq!(format!("{}", err), "[LESSON_NOT_FOUND] Lesson not found");
    }

    #[test]
    fn domain_error_with_detail_adds_detail() {
        let err = DomainError::validation("email", "Invalid email address")
            .with_detail("reason", "missing @ symbol");

        assert_eq!(err.details.get("field"), Some(&"email".to_string()));
        assert_eq!(err.details.get("reason"), Some(&"missing @ symbol".to_string()));
    }

    #[test]
    fn only_revision_conflict_is_retryable() {
        assert!(DomainError::new(ErrorCode::RevisionConflict, "stale read").is_retryable());
        assert!(!DomainError::new(ErrorCode::CapacityExceeded, "full").is_retryable());
        assert!(!DomainError::store("connection reset").is_retryable());
    }

    #[test]
    fn error_code_display_formats_correctly() {
        assert_eq!(format!("{}", ErrorCode::AlreadyEnrolled), "ALREADY_ENROLLED");
        assert_eq!(format!("{}", ErrorCode::CapacityExceeded), "CAPACITY_EXCEEDED");
    }
}
