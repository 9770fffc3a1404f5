use std::sync::Arc;

use axum::{
    body::Body,
    http::{header, Method, Request, StatusCode},
    Router,
};
use chrono::{Duration, Utc};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use rollcall::api::{self, AppState};
use rollcall::auth::StaticTokenProvider;
use rollcall::config::Config;
use rollcall::service::RollcallService;
use rollcall::storage::Database;

const CHAIR: &str = "chair-token";
const MEMBER: &str = "member-token";
const STRANGER: &str = "stranger-token";

async fn create_test_app() -> Router {
    let mut config = Config::default();
    config.auth.admin_emails = vec!["chair@club.org".to_string()];

    let database = Database::in_memory().await.unwrap();
    database.seed_roles(config.rules.default_allowed_absences).await.unwrap();

    let identity = StaticTokenProvider::default()
        .with_token(CHAIR, "sub-chair")
        .with_token(MEMBER, "sub-member")
        .with_token(STRANGER, "sub-stranger");

    let service = RollcallService::new(database, &config);
    api::router(AppState::new(service, Arc::new(identity)))
}

async fn send(app: &Router, method: Method, uri: &str, token: Option<&str>, body: Option<Value>) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {}", token));
    }
    let request = match body {
        Some(body) => builder
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let value = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, value)
}

/// Register the chair (admin) and one member, returning their user ids
async fn register_both(app: &Router) -> (String, String) {
    let (status, chair) = send(
        app,
        Method::POST,
        "/api/auth/sync",
        Some(CHAIR),
        Some(json!({ "email": "chair@club.org", "full_name": "Chair" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (status, member) = send(
        app,
        Method::POST,
        "/api/auth/sync",
        Some(MEMBER),
        Some(json!({ "email": "member@club.org", "full_name": "Member" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    (
        chair["uuid"].as_str().unwrap().to_string(),
        member["uuid"].as_str().unwrap().to_string(),
    )
}

#[tokio::test]
async fn test_health_needs_no_token() {
    let app = create_test_app().await;
    let (status, body) = send(&app, Method::GET, "/api/health", None, None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
}

#[tokio::test]
async fn test_authentication_errors() {
    let app = create_test_app().await;

    let (status, body) = send(&app, Method::GET, "/api/me", None, None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert!(body["error"].as_str().unwrap().contains("bearer token"));

    let (status, _) = send(&app, Method::GET, "/api/me", Some("bogus"), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    // A valid token without a synced account is still unauthorized
    let (status, _) = send(&app, Method::GET, "/api/me", Some(STRANGER), None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn test_sync_and_profile() {
    let app = create_test_app().await;
    let (chair_id, member_id) = register_both(&app).await;

    let (status, me) = send(&app, Method::GET, "/api/me", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(me["uuid"], member_id.as_str());
    assert_eq!(me["role"]["name"], "member");

    let (_, chair) = send(&app, Method::GET, "/api/me", Some(CHAIR), None).await;
    assert_eq!(chair["role"]["is_admin"], true);

    // Members can read themselves but not others
    let (status, _) = send(&app, Method::GET, &format!("/api/users/{}", member_id), Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::OK);
    let (status, _) = send(&app, Method::GET, &format!("/api/users/{}", chair_id), Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::GET, "/api/users", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, users) = send(&app, Method::GET, "/api/users", Some(CHAIR), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(users.as_array().unwrap().len(), 2);

    let (status, _) = send(
        &app,
        Method::GET,
        "/api/users/00000000-0000-0000-0000-000000000000",
        Some(CHAIR),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_meeting_attendance_flow() {
    let app = create_test_app().await;
    let (_, member_id) = register_both(&app).await;

    let meeting_body = json!({
        "title": "General body",
        "starts_at": (Utc::now() + Duration::days(7)).to_rfc3339(),
    });

    let (status, _) = send(&app, Method::POST, "/api/meetings", Some(MEMBER), Some(meeting_body.clone())).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, meeting) = send(&app, Method::POST, "/api/meetings", Some(CHAIR), Some(meeting_body)).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(meeting["is_mandatory"], true);
    let meeting_id = meeting["uuid"].as_str().unwrap().to_string();

    let (status, upcoming) = send(&app, Method::GET, "/api/meetings/upcoming", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(upcoming.as_array().unwrap().len(), 1);

    let (status, record) = send(
        &app,
        Method::PUT,
        &format!("/api/meetings/{}/attendance", meeting_id),
        Some(CHAIR),
        Some(json!({ "user_id": member_id, "status": "absent" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(record["status"], "absent");

    let (status, summary) = send(&app, Method::GET, "/api/me/absences", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(summary["used"], 1);
    assert_eq!(summary["remaining"], 2);

    let (status, report) = send(&app, Method::GET, "/api/attendance/report", Some(CHAIR), None).await;
    assert_eq!(status, StatusCode::OK);
    let member_row = report
        .as_array()
        .unwrap()
        .iter()
        .find(|row| row["user_id"] == member_id.as_str())
        .unwrap();
    assert_eq!(member_row["attendance"], "0.0%");

    let (status, _) = send(
        &app,
        Method::PUT,
        &format!("/api/meetings/{}/attendance", meeting_id),
        Some(CHAIR),
        Some(json!({ "user_id": member_id, "status": "asleep" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let record_id = record["uuid"].as_str().unwrap();
    let (status, _) = send(&app, Method::DELETE, &format!("/api/attendance/{}", record_id), Some(CHAIR), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/meetings/{}", meeting_id), Some(CHAIR), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    let (status, _) = send(&app, Method::GET, &format!("/api/meetings/{}", meeting_id), Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_excuse_request_flow() {
    let app = create_test_app().await;
    register_both(&app).await;

    let (_, meeting) = send(
        &app,
        Method::POST,
        "/api/meetings",
        Some(CHAIR),
        Some(json!({
            "title": "Tomorrow's meeting",
            "starts_at": (Utc::now() + Duration::hours(5)).to_rfc3339(),
        })),
    )
    .await;
    let meeting_id = meeting["uuid"].as_str().unwrap().to_string();

    let (status, request) = send(
        &app,
        Method::POST,
        "/api/requests",
        Some(MEMBER),
        Some(json!({ "meeting_id": meeting_id, "reason": "Midterm exam" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(request["is_late"], true);
    assert_eq!(request["status"], "pending");
    let request_id = request["uuid"].as_str().unwrap().to_string();

    let (status, pending) = send(&app, Method::GET, "/api/requests?status=pending", Some(CHAIR), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(pending.as_array().unwrap().len(), 1);

    let (status, _) = send(&app, Method::GET, "/api/requests", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, mine) = send(&app, Method::GET, "/api/me/requests", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(mine.as_array().unwrap().len(), 1);

    let review_uri = format!("/api/requests/{}/review", request_id);
    let (status, _) = send(&app, Method::POST, &review_uri, Some(MEMBER), Some(json!({ "decision": "approve" }))).await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, reviewed) = send(
        &app,
        Method::POST,
        &review_uri,
        Some(CHAIR),
        Some(json!({ "decision": "approve", "note": "Good luck" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(reviewed["status"], "approved");

    let (status, _) = send(&app, Method::POST, &review_uri, Some(CHAIR), Some(json!({ "decision": "reject" }))).await;
    assert_eq!(status, StatusCode::CONFLICT);

    let (_, summary) = send(&app, Method::GET, "/api/me/absences", Some(MEMBER), None).await;
    assert_eq!(summary["excused"], 1);
    assert_eq!(summary["used"], 0);
}

#[tokio::test]
async fn test_voting_flow() {
    let app = create_test_app().await;
    register_both(&app).await;

    let (status, active) = send(&app, Method::GET, "/api/voting/active", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::OK);
    assert!(active["event"].is_null());
    assert_eq!(active["poll_interval_seconds"], 10);

    let (status, event) = send(
        &app,
        Method::POST,
        "/api/voting/events",
        Some(CHAIR),
        Some(json!({ "title": "Approve budget" })),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    let event_id = event["uuid"].as_str().unwrap().to_string();

    let (status, _) = send(
        &app,
        Method::POST,
        &format!("/api/voting/events/{}/votes", event_id),
        Some(MEMBER),
        Some(json!({ "choice": "yes" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, active) = send(&app, Method::GET, "/api/voting/active", Some(MEMBER), None).await;
    assert_eq!(active["event"]["uuid"], event_id.as_str());
    assert_eq!(active["my_vote"], "yes");

    let (status, results) = send(
        &app,
        Method::GET,
        &format!("/api/voting/events/{}/results", event_id),
        Some(CHAIR),
        None,
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(results["tally"]["yes"], 1);
    assert_eq!(results["passed"], true);

    let (status, _) = send(&app, Method::DELETE, &format!("/api/voting/events/{}", event_id), Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    let (status, _) = send(&app, Method::DELETE, &format!("/api/voting/events/{}", event_id), Some(CHAIR), None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (_, active) = send(&app, Method::GET, "/api/voting/active", Some(MEMBER), None).await;
    assert!(active["event"].is_null());
    assert!(active["my_vote"].is_null());
}

#[tokio::test]
async fn test_malformed_input_is_json_validation_error() {
    let app = create_test_app().await;
    register_both(&app).await;

    let (_, event) = send(
        &app,
        Method::POST,
        "/api/voting/events",
        Some(CHAIR),
        Some(json!({ "title": "Approve budget" })),
    )
    .await;
    let event_id = event["uuid"].as_str().unwrap().to_string();

    // Unknown enum value in the body
    let (status, body) = send(
        &app,
        Method::POST,
        &format!("/api/voting/events/{}/votes", event_id),
        Some(MEMBER),
        Some(json!({ "choice": "maybe" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().starts_with("Invalid input"));

    // Missing required field
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/meetings",
        Some(CHAIR),
        Some(json!({ "title": "No start time" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].as_str().unwrap().contains("starts_at"));

    // Path segment that isn't a UUID
    let (status, body) = send(&app, Method::GET, "/api/meetings/not-a-uuid", Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Unknown status filter
    let (status, body) = send(&app, Method::GET, "/api/requests?status=bogus", Some(CHAIR), None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());

    // Empty value caught by the service
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/voting/events",
        Some(CHAIR),
        Some(json!({ "title": "   " })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"], "Invalid input: title cannot be empty");
}

#[tokio::test]
async fn test_conflict_and_not_found_bodies() {
    let app = create_test_app().await;
    register_both(&app).await;

    // The member tries to take over the chair's email
    let (status, body) = send(
        &app,
        Method::POST,
        "/api/auth/sync",
        Some(MEMBER),
        Some(json!({ "email": "chair@club.org", "full_name": "Member" })),
    )
    .await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert!(body["error"].as_str().unwrap().contains("already registered"));

    let missing = uuid::Uuid::new_v4();
    let (status, body) = send(&app, Method::GET, &format!("/api/meetings/{}", missing), Some(MEMBER), None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"], format!("Meeting {} not found", missing));
}

#[tokio::test]
async fn test_admin_can_clear_user_role() {
    let app = create_test_app().await;
    let (_, member_id) = register_both(&app).await;
    let uri = format!("/api/users/{}", member_id);

    // Omitting role_id leaves the role untouched
    let (status, user) = send(&app, Method::PATCH, &uri, Some(CHAIR), Some(json!({ "full_name": "Renamed" }))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(user["role"]["name"], "member");

    let (status, user) = send(&app, Method::PATCH, &uri, Some(CHAIR), Some(json!({ "role_id": null }))).await;
    assert_eq!(status, StatusCode::OK);
    assert!(user["role"].is_null());
    assert!(user["role_uuid"].is_null());
}
