//! HTTP handlers for participant endpoints.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::response::Response;
use tracing::info;

use crate::adapters::http::extract::ApiJson;
use crate::adapters::http::response;
use crate::domain::foundation::ParticipantId;
use crate::domain::service::CourseService;

use super::dto::{CreateParticipantRequest, DeleteParticipantQuery, UpdateParticipantRequest};

/// GET /api/participants - all active participants, newest first.
pub async fn list_participants(State(service): State<Arc<CourseService>>) -> Response {
    match service.get_all_participants().await {
        Ok(participants) => {
            response::ok_list(participants, "Participants retrieved successfully")
        }
        Err(error) => response::domain_error(error),
    }
}

/// POST /api/participants - register a participant.
pub async fn create_participant(
    State(service): State<Arc<CourseService>>,
    ApiJson(request): ApiJson<CreateParticipantRequest>,
) -> Response {
    let input = match request.into_input() {
        Ok(input) => input,
        Err(error) => return response::domain_error(error),
    };

    match service.create_participant(input).await {
        Ok(participant) => {
            info!(participant_id = %participant.id, "participant registered");
            response::created(participant, "Participant created successfully")
        }
        Err(error) => response::domain_error(error),
    }
}

/// GET /api/participants/{id} - point read.
pub async fn get_participant(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<ParticipantId>,
) -> Response {
    match service.get_participant(&id).await {
        Ok(Some(participant)) => {
            response::ok(participant, "Participant retrieved successfully")
        }
        Ok(None) => response::not_found("Participant", &id.to_string()),
        Err(error) => response::domain_error(error),
    }
}

/// PUT /api/participants/{id} - partial update.
pub async fn update_participant(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<ParticipantId>,
    ApiJson(request): ApiJson<UpdateParticipantRequest>,
) -> Response {
    let patch = match request.into_patch() {
        Ok(patch) => patch,
        Err(error) => return response::domain_error(error),
    };

    match service.update_participant(&id, patch).await {
        Ok(participant) => response::ok(participant, "Participant updated successfully"),
        Err(error) => response::domain_error(error),
    }
}

/// DELETE /api/participants/{id} - soft delete, or hard with `?hard=true`.
pub async fn delete_participant(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<ParticipantId>,
    Query(query): Query<DeleteParticipantQuery>,
) -> Response {
    let result = if query.hard {
        service.hard_delete_participant(&id).await
    } else {
        service.delete_participant(&id).await
    };

    match result {
        Ok(()) => {
            info!(participant_id = %id, hard = query.hard, "participant deleted");
            let message = if query.hard {
                "Participant permanently deleted"
            } else {
                "Participant deactivated successfully"
            };
            response::ok_message(message)
        }
        Err(error) => response::domain_error(error),
    }
}

/// GET /api/participants/{id}/enrollments - enrollments across all lessons.
pub async fn get_participant_enrollments(
    State(service): State<Arc<CourseService>>,
    Path(id): Path<ParticipantId>,
) -> Response {
    match service.get_enrollments_for_participant(&id).await {
        Ok(enrollments) => {
            response::ok_list(enrollments, "Enrollments retrieved successfully")
        }
        Err(error) => response::domain_error(error),
    }
}
