//! Route configuration for lesson and enrollment endpoints.

use std::sync::Arc;

use axum::routing::{delete, get, patch};
use axum::Router;

use crate::domain::service::CourseService;

use super::handlers::{
    create_lesson, delete_lesson, enroll_participant, get_lesson, get_lesson_enrollments,
    get_lesson_roster, list_lessons, unenroll_participant, update_enrollment_status,
    update_lesson, update_payment_status,
};

/// Creates the lesson router.
///
/// Routes:
/// - `GET /api/lessons` - list lessons (`?status=` to filter)
/// - `POST /api/lessons` - schedule a lesson
/// - `GET /api/lessons/:id` - fetch one lesson
/// - `PUT /api/lessons/:id` - update a lesson
/// - `DELETE /api/lessons/:id` - delete (`?force=true` to bypass the guard)
/// - `GET /api/lessons/:id/roster` - lesson with enrolled participants
/// - `GET /api/lessons/:id/enrollments` - list enrollments
/// - `POST /api/lessons/:id/enrollments` - enroll a participant
/// - `DELETE /api/lessons/:id/enrollments/:participant_id` - unenroll
/// - `PATCH /api/lessons/:id/enrollments/:participant_id/status`
/// - `PATCH /api/lessons/:id/enrollments/:participant_id/payment`
pub fn lesson_router() -> Router<Arc<CourseService>> {
    Router::new()
        .route("/api/lessons", get(list_lessons).post(create_lesson))
        .route(
            "/api/lessons/:id",
            get(get_lesson).put(update_lesson).delete(delete_lesson),
        )
        .route("/api/lessons/:id/roster", get(get_lesson_roster))
        .route(
            "/api/lessons/:id/enrollments",
            get(get_lesson_enrollments).post(enroll_participant),
        )
        .route(
            "/api/lessons/:id/enrollments/:participant_id",
            delete(unenroll_participant),
        )
        .route(
            "/api/lessons/:id/enrollments/:participant_id/status",
            patch(update_enrollment_status),
        )
        .route(
            "/api/lessons/:id/enrollments/:participant_id/payment",
            patch(update_payment_status),
        )
}
