//! HTTP adapters - REST API over the course service.
//!
//! Each domain module has its own router; `api_router` merges them and
//! adds the health endpoint.

pub mod extract;
pub mod lesson;
pub mod participant;
pub mod response;
pub mod validate;

pub use lesson::lesson_router;
pub use participant::participant_router;

use std::sync::Arc;

use axum::extract::State;
use axum::response::Response;
use axum::routing::get;
use axum::Router;

use crate::domain::service::CourseService;

/// Builds the full API router with the service as shared state.
pub fn api_router(service: Arc<CourseService>) -> Router {
    Router::new()
        .merge(participant_router())
        .merge(lesson_router())
        .route("/api/health", get(health))
        .with_state(service)
}

/// GET /api/health - probes both store containers.
async fn health(State(service): State<Arc<CourseService>>) -> Response {
    match service.check_store().await {
        Ok(()) => response::ok_message("Service is healthy"),
        Err(error) => response::domain_error(error),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adapters::memory::{InMemoryLessonStore, InMemoryParticipantStore};
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use tower::ServiceExt;

    #[tokio::test]
    async fn health_endpoint_reports_ok_with_memory_stores() {
        let service = Arc::new(CourseService::new(
            Arc::new(InMemoryParticipantStore::new()),
            Arc::new(InMemoryLessonStore::new()),
        ));

        let response = api_router(service)
            .oneshot(
                Request::builder()
                    .uri("/api/health")
                    .body(Body::empty())
                    .unwrap(),
            )
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn merged_router_serves_both_domains() {
        let service = Arc::new(CourseService::new(
            Arc::new(InMemoryParticipantStore::new()),
            Arc::new(InMemoryLessonStore::new()),
        ));
        let app = api_router(service);

        for uri in ["/api/participants", "/api/lessons"] {
            let response = app
                .clone()
                .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
                .await
                .unwrap();
            assert_eq!(response.status(), StatusCode::OK, "{}", uri);
        }
    }
}
