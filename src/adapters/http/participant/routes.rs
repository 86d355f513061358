//! Route configuration for participant endpoints.

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::domain::service::CourseService;

use super::handlers::{
    create_participant, delete_participant, get_participant, get_participant_enrollments,
    list_participants, update_participant,
};

/// Creates the participant router.
///
/// Routes:
/// - `GET /api/participants` - list active participants
/// - `POST /api/participants` - register a participant
/// - `GET /api/participants/:id` - fetch one participant
/// - `PUT /api/participants/:id` - update a participant
/// - `DELETE /api/participants/:id` - soft delete (`?hard=true` for permanent)
/// - `GET /api/participants/:id/enrollments` - enrollments across lessons
pub fn participant_router() -> Router<Arc<CourseService>> {
    Router::new()
        .route(
            "/api/participants",
            get(list_participants).post(create_participant),
        )
        .route(
            "/api/participants/:id",
            get(get_participant)
                .put(update_participant)
                .delete(delete_participant),
        )
        .route(
            "/api/participants/:id/enrollments",
            get(get_participant_enrollments),
        )
}
