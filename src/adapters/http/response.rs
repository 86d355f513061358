//! Response envelope and domain error mapping.
//!
//! Every endpoint answers with the same JSON envelope:
//! `{ success, data?, count?, message?, error?, details? }`.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;

use crate::domain::foundation::{DomainError, ErrorCode};

/// Standard response envelope.
#[derive(Debug, Clone, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<String>,
}

impl<T: Serialize> ApiResponse<T> {
    fn success(data: Option<T>, count: Option<usize>, message: impl Into<String>) -> Self {
        Self {
            success: true,
            data,
            count,
            message: Some(message.into()),
            error: None,
            details: None,
        }
    }
}

/// 200 with data.
pub fn ok<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::success(Some(data), None, message)),
    )
        .into_response()
}

/// 200 with data and a count field (list endpoints).
pub fn ok_list<T: Serialize>(data: Vec<T>, message: impl Into<String>) -> Response {
    let count = data.len();
    (
        StatusCode::OK,
        Json(ApiResponse::success(Some(data), Some(count), message)),
    )
        .into_response()
}

/// 200 with a message only.
pub fn ok_message(message: impl Into<String>) -> Response {
    (
        StatusCode::OK,
        Json(ApiResponse::<()>::success(None, None, message)),
    )
        .into_response()
}

/// 201 with data.
pub fn created<T: Serialize>(data: T, message: impl Into<String>) -> Response {
    (
        StatusCode::CREATED,
        Json(ApiResponse::success(Some(data), None, message)),
    )
        .into_response()
}

/// Failure envelope with an explicit status.
pub fn failure(
    status: StatusCode,
    error: impl Into<String>,
    details: impl Into<String>,
) -> Response {
    (
        status,
        Json(ApiResponse::<()> {
            success: false,
            data: None,
            count: None,
            message: None,
            error: Some(error.into()),
            details: Some(details.into()),
        }),
    )
        .into_response()
}

/// 400 with a validation message.
pub fn bad_request(error: impl Into<String>, details: impl Into<String>) -> Response {
    failure(StatusCode::BAD_REQUEST, error, details)
}

/// 404 for a missing entity.
pub fn not_found(resource: &str, id: &str) -> Response {
    failure(
        StatusCode::NOT_FOUND,
        format!("{} not found", resource),
        format!("No {} found with ID: {}", resource.to_lowercase(), id),
    )
}

/// Maps a domain error onto the envelope and status code.
pub fn domain_error(error: DomainError) -> Response {
    let (status, label) = match error.code {
        ErrorCode::ParticipantNotFound => (StatusCode::NOT_FOUND, "Participant not found"),
        ErrorCode::LessonNotFound => (StatusCode::NOT_FOUND, "Lesson not found"),
        ErrorCode::EnrollmentNotFound => (StatusCode::NOT_FOUND, "Enrollment not found"),
        ErrorCode::AlreadyEnrolled => (StatusCode::CONFLICT, "Already enrolled"),
        ErrorCode::CapacityExceeded => (StatusCode::CONFLICT, "Lesson is full"),
        ErrorCode::ActiveEnrollments => (
            StatusCode::CONFLICT,
            "Cannot delete lesson with active enrollments",
        ),
        ErrorCode::DuplicateDocument => (StatusCode::CONFLICT, "Duplicate entry"),
        ErrorCode::RevisionConflict => (StatusCode::CONFLICT, "Concurrent modification"),
        ErrorCode::ValidationFailed
        | ErrorCode::EmptyField
        | ErrorCode::OutOfRange
        | ErrorCode::InvalidFormat => (StatusCode::BAD_REQUEST, "Validation failed"),
        ErrorCode::StoreError | ErrorCode::InternalError => {
            (StatusCode::INTERNAL_SERVER_ERROR, "Internal error")
        }
    };

    failure(status, label, error.message)
}
