//! HTTP handlers for lesson and enrollment endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use tracing::info;

use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::response;
use crate::domain::foundation::{LessonId, ParticipantId};
use crate::domain::service::CourseService;

use super::dto::{
    CreateLessonRequest, DeleteLessonQuery, EnrollRequest, EnrollmentStatusRequest,
    ListLessonsQuery, PaymentStatusRequest, UpdateLessonRequest,
};

/// GET /api/lessons - all lessons, optionally filtered by status.
pub async fn list_lessons(
    State(service): State<Arc<CourseService>>,
    Query(query): Query<ListLessonsQuery>,
) -> Response {
    let result = match query.status {
        Some(status) => service.get_lessons_by_status(status).await,
        None => service.get_all_lessons().await,
    };

    match result {
        Ok(lessons) => response::ok_list(lessons, "Lessons retrieved successfully"),
        Err(error) => response::domain_error(error),
    }
}

/// POST /api/lessons - schedule a lesson.
pub async fn create_lesson(
    State(service): State<Arc<CourseService>>,
    ApiJson(request): ApiJson<CreateLessonRequest>,
) -> Response {
    let input = match request.into_input() {
        Ok(input) => input,
        Err(error) => return response::domain_error(error),
    };

    match service.create_lesson(input).await {
        Ok(lesson) => {
            info!(lesson_id = %lesson.id, title = %lesson.title, "lesson scheduled");
            response::created(lesson, "Lesson created successfully")
        }
        Err(error) => response::domain_error(error),
    }
}

/// GET /api/lessons/{id} - point read.
pub async fn get_lesson(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<LessonId>,
) -> Response {
    match service.get_lesson(&id).await {
        Ok(Some(lesson)) => response::ok(lesson, "Lesson retrieved successfully"),
        Ok(None) => response::not_found("Lesson", &id.to_string()),
        Err(error) => response::domain_error(error),
    }
}

/// PUT /api/lessons/{id} - partial update.
///
/// The existing record is loaded first so the past-date rule can take
/// the current status into account.
pub async fn update_lesson(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<LessonId>,
    ApiJson(request): ApiJson<UpdateLessonRequest>,
) -> Response {
    let existing = match service.get_lesson(&id).await {
        Ok(Some(lesson)) => lesson,
        Ok(None) => return response::not_found("Lesson", &id.to_string()),
        Err(error) => return response::domain_error(error),
    };

    let patch = match request.into_patch(&existing) {
        Ok(patch) => patch,
        Err(error) => return response::domain_error(error),
    };

    match service.update_lesson(&id, patch).await {
        Ok(lesson) => response::ok(lesson, "Lesson updated successfully"),
        Err(error) => response::domain_error(error),
    }
}

/// DELETE /api/lessons/{id} - delete, guarded against active
/// enrollments unless `?force=true`.
pub async fn delete_lesson(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<LessonId>,
    Query(query): Query<DeleteLessonQuery>,
) -> Response {
    match service.delete_lesson(&id, query.force).await {
        Ok(()) => {
            info!(lesson_id = %id, force = query.force, "lesson deleted");
            response::ok_message("Lesson deleted successfully")
        }
        Err(error) => response::domain_error(error),
    }
}

/// GET /api/lessons/{id}/roster - lesson with its enrolled participants.
pub async fn get_lesson_roster(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<LessonId>,
) -> Response {
    match service.lesson_roster(&id).await {
        Ok(Some(roster)) => response::ok(roster, "Roster retrieved successfully"),
        Ok(None) => response::not_found("Lesson", &id.to_string()),
        Err(error) => response::domain_error(error),
    }
}

/// GET /api/lessons/{id}/enrollments - the lesson's enrollments.
pub async fn get_lesson_enrollments(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<LessonId>,
) -> Response {
    match service.get_enrollments_for_lesson(&id).await {
        Ok(enrollments) => {
            response::ok_list(enrollments, "Enrollments retrieved successfully")
        }
        Err(error) => response::domain_error(error),
    }
}

/// POST /api/lessons/{id}/enrollments - enroll a participant.
pub async fn enroll_participant(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<LessonId>,
    ApiJson(request): ApiJson<EnrollRequest>,
) -> Response {
    match service
        .enroll_participant(&id, &request.participant_id, request.notes)
        .await
    {
        Ok(enrollment) => {
            info!(
                lesson_id = %id,
                participant_id = %request.participant_id,
                "participant enrolled"
            );
            response::created(enrollment, "Participant enrolled successfully")
        }
        Err(error) => response::domain_error(error),
    }
}

/// DELETE /api/lessons/{id}/enrollments/{participant_id} - unenroll.
///
/// Idempotent: unenrolling a participant who is not enrolled succeeds.
pub async fn unenroll_participant(
    State(service): State<Arc<CourseService>>,
    Path((id, participant_id)): Path<(LessonId, ParticipantId)>,
) -> Response {
    match service.unenroll_participant(&id, &participant_id).await {
        Ok(()) => {
            info!(lesson_id = %id, participant_id = %participant_id, "participant unenrolled");
            response::ok_message("Participant unenrolled successfully")
        }
        Err(error) => response::domain_error(error),
    }
}

/// PATCH /api/lessons/{id}/enrollments/{participant_id}/status
pub async fn update_enrollment_status(
    State(service): State<Arc<CourseService>>,
    Path((id, participant_id)): Path<(LessonId, ParticipantId)>,
    ApiJson(request): ApiJson<EnrollmentStatusRequest>,
) -> Response {
    match service
        .update_enrollment_status(&id, &participant_id, request.status)
        .await
    {
        Ok(enrollment) => response::ok(enrollment, "Enrollment status updated successfully"),
        Err(error) => response::domain_error(error),
    }
}

/// PATCH /api/lessons/{id}/enrollments/{participant_id}/payment
pub async fn update_payment_status(
    State(service): State<Arc<CourseService>>,
    Path((id, participant_id)): Path<(LessonId, ParticipantId)>,
    ApiJson(request): ApiJson<PaymentStatusRequest>,
) -> Response {
    match service
        .update_enrollment_payment_status(&id, &participant_id, request.payment_status)
        .await
    {
        Ok(enrollment) => response::ok(enrollment, "Payment status updated successfully"),
        Err(error) => response::domain_error(error),
    }
}
