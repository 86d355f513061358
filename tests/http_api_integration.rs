//! Integration tests for the HTTP API.
//!
//! These tests drive the merged router end to end over the in-memory
//! stores and assert on the response envelope:
//! `{ success, data?, count?, message?, error?, details? }`.

use std::sync::Arc;

use axum::body::{to_bytes, Body};
use axum::http::{Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use tower::ServiceExt;

use bakehouse::adapters::http::api_router;
use bakehouse::adapters::memory::{InMemoryLessonStore, InMemoryParticipantStore};
use bakehouse::domain::foundation::Timestamp;
use bakehouse::domain::service::CourseService;

// =============================================================================
// Test Infrastructure
// =============================================================================

fn app() -> Router {
    let service = Arc::new(CourseService::new(
        Arc::new(InMemoryParticipantStore::new()),
        Arc::new(InMemoryLessonStore::new()),
    ));
    api_router(service)
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Value) {
    let request = match body {
        Some(body) => Request::builder()
            .method(method)
            .uri(uri)
            .header("content-type", "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => Request::builder()
            .method(method)
            .uri(uri)
            .body(Body::empty())
            .unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

fn participant_body(email: &str) -> Value {
    json!({
        "firstName": "Freja",
        "lastName": "Lund",
        "email": email,
        "age": 31,
        "allergies": ["gluten"]
    })
}

fn lesson_body(date_time: String) -> Value {
    json!({
        "title": "Kanelbullar Basics",
        "description": "Swedish cinnamon buns from scratch",
        "skillLevel": "beginner",
        "duration": 120,
        "maxParticipants": 2,
        "price": 40.0,
        "dateTime": date_time,
        "ingredients": ["flour", "cardamom"]
    })
}

// =============================================================================
// Envelope Shape
// =============================================================================

#[tokio::test]
async fn success_envelope_carries_data_count_and_message() {
    let app = app();
    send(
        &app,
        "POST",
        "/api/participants",
        Some(participant_body("freja@lund.se")),
    )
    .await;

    let (status, json) = send(&app, "GET", "/api/participants", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
    assert_eq!(json["count"], 1);
    assert!(json["message"].is_string());
    assert!(json.get("error").is_none());
}

#[tokio::test]
async fn failure_envelope_carries_error_and_details() {
    let app = app();
    let (status, json) = send(
        &app,
        "GET",
        "/api/participants/00000000-0000-0000-0000-000000000000",
        None,
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(json["success"], false);
    assert!(json["error"].is_string());
    assert!(json["details"].is_string());
    assert!(json.get("data").is_none());
}

// =============================================================================
// Participant Endpoints
// =============================================================================

#[tokio::test]
async fn participant_crud_over_http() {
    let app = app();

    let (status, created) = send(
        &app,
        "POST",
        "/api/participants",
        Some(participant_body("Freja@Lund.SE")),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["email"], "freja@lund.se");
    let id = created["data"]["id"].as_str().unwrap().to_string();

    let (status, updated) = send(
        &app,
        "PUT",
        &format!("/api/participants/{}", id),
        Some(json!({ "phone": "+46 70 000 00 00" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["data"]["phone"], "+46 70 000 00 00");

    // Soft delete leaves the record readable but off the roster.
    let (status, _) = send(&app, "DELETE", &format!("/api/participants/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);

    let (status, fetched) = send(&app, "GET", &format!("/api/participants/{}", id), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched["data"]["isActive"], false);

    let (_, list) = send(&app, "GET", "/api/participants", None).await;
    assert_eq!(list["count"], 0);

    // Hard delete removes it entirely.
    let (status, _) = send(
        &app,
        "DELETE",
        &format!("/api/participants/{}?hard=true", id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = send(&app, "GET", &format!("/api/participants/{}", id), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn registration_rejects_invalid_input_with_400() {
    let app = app();

    for body in [
        json!({ "firstName": " ", "lastName": "Lund", "email": "a@b.se" }),
        json!({ "firstName": "Freja", "lastName": "Lund", "email": "nope" }),
        json!({ "firstName": "Freja", "lastName": "Lund", "email": "a@b.se", "age": 12 }),
    ] {
        let (status, json) = send(&app, "POST", "/api/participants", Some(body)).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(json["success"], false);
    }
}

// =============================================================================
// Lesson Endpoints
// =============================================================================

#[tokio::test]
async fn lesson_scheduling_rules_over_http() {
    let app = app();
    let future = Timestamp::now().add_days(14).to_rfc3339();
    let past = Timestamp::now().minus_days(14).to_rfc3339();

    let (status, created) = send(&app, "POST", "/api/lessons", Some(lesson_body(future))).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(created["data"]["status"], "scheduled");

    // Past date is rejected for a scheduled lesson...
    let (status, _) = send(&app, "POST", "/api/lessons", Some(lesson_body(past.clone()))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    // ...but accepted when recording an already-completed lesson.
    let mut completed = lesson_body(past);
    completed["status"] = json!("completed");
    let (status, _) = send(&app, "POST", "/api/lessons", Some(completed)).await;
    assert_eq!(status, StatusCode::CREATED);

    let (_, all) = send(&app, "GET", "/api/lessons", None).await;
    assert_eq!(all["count"], 2);

    let (_, filtered) = send(&app, "GET", "/api/lessons?status=completed", None).await;
    assert_eq!(filtered["count"], 1);
}

#[tokio::test]
async fn enrollment_flow_over_http() {
    let app = app();
    let future = Timestamp::now().add_days(7).to_rfc3339();

    let (_, lesson) = send(&app, "POST", "/api/lessons", Some(lesson_body(future))).await;
    let lesson_id = lesson["data"]["id"].as_str().unwrap().to_string();

    let mut ids = Vec::new();
    for email in ["one@test.se", "two@test.se", "three@test.se"] {
        let (_, participant) = send(
            &app,
            "POST",
            "/api/participants",
            Some(participant_body(email)),
        )
        .await;
        ids.push(participant["data"]["id"].as_str().unwrap().to_string());
    }

    let enrollments_uri = format!("/api/lessons/{}/enrollments", lesson_id);

    // Two seats fill, the third gets a conflict.
    for id in &ids[..2] {
        let (status, json) = send(
            &app,
            "POST",
            &enrollments_uri,
            Some(json!({ "participantId": id })),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert_eq!(json["data"]["status"], "enrolled");
        assert_eq!(json["data"]["paymentStatus"], "pending");
    }

    let (status, _) = send(
        &app,
        "POST",
        &enrollments_uri,
        Some(json!({ "participantId": ids[2] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Enrolling the same participant twice is a conflict too.
    let (status, _) = send(
        &app,
        "POST",
        &enrollments_uri,
        Some(json!({ "participantId": ids[0] })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);

    // Payment and status updates on an embedded enrollment.
    let (status, paid) = send(
        &app,
        "PATCH",
        &format!("{}/{}/payment", enrollments_uri, ids[0]),
        Some(json!({ "paymentStatus": "paid" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(paid["data"]["paymentStatus"], "paid");

    let (status, cancelled) = send(
        &app,
        "PATCH",
        &format!("{}/{}/status", enrollments_uri, ids[1]),
        Some(json!({ "status": "cancelled" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(cancelled["data"]["status"], "cancelled");

    // The freed seat admits the third participant.
    let (status, _) = send(
        &app,
        "POST",
        &enrollments_uri,
        Some(json!({ "participantId": ids[2] })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);

    // Roster lists the participants holding seats (and the cancelled one's
    // record is still embedded in the lesson document).
    let (status, roster) = send(
        &app,
        "GET",
        &format!("/api/lessons/{}/roster", lesson_id),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(roster["data"]["participants"].as_array().unwrap().len(), 3);

    // Unenroll is idempotent over HTTP as well.
    for _ in 0..2 {
        let (status, _) = send(
            &app,
            "DELETE",
            &format!("{}/{}", enrollments_uri, ids[1]),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
    }

    // Participant-side view pairs each enrollment with its lesson.
    let (status, mine) = send(
        &app,
        "GET",
        &format!("/api/participants/{}/enrollments", ids[0]),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine["count"], 1);
    assert_eq!(mine["data"][0]["lesson"]["id"], lesson_id.as_str());
}

#[tokio::test]
async fn enrolling_unknown_participant_returns_404() {
    let app = app();
    let future = Timestamp::now().add_days(7).to_rfc3339();

    let (_, lesson) = send(&app, "POST", "/api/lessons", Some(lesson_body(future))).await;
    let lesson_id = lesson["data"]["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "POST",
        &format!("/api/lessons/{}/enrollments", lesson_id),
        Some(json!({ "participantId": "00000000-0000-0000-0000-000000000000" })),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn health_endpoint_answers_ok() {
    let (status, json) = send(&app(), "GET", "/api/health", None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(json["success"], true);
}
