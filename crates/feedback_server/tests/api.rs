use axum::{
    body::{to_bytes, Body},
    http::{Request, StatusCode},
    Router,
};
use feedback_core::db::open_db_in_memory;
use feedback_server::{config::DbLocation, router, state::AppState};
use serde_json::{json, Value};
use std::panic::{catch_unwind, AssertUnwindSafe};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::open(&DbLocation::Memory).unwrap())
}

fn post_feedback(body: impl Into<String>) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/api/submit-feedback")
        .header("content-type", "application/json")
        .body(Body::from(body.into()))
        .unwrap()
}

fn get_feedbacks() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/api/feedbacks")
        .body(Body::empty())
        .unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn empty_name_returns_400_missing_fields() {
    let app = app();

    let (status, body) = send(
        &app,
        post_feedback(json!({"name": "", "email": "a@b.com", "message": "hi"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({"error": "Missing fields"}));
}

#[tokio::test]
async fn valid_submission_returns_200_success() {
    let app = app();

    let (status, body) = send(
        &app,
        post_feedback(json!({"name": "A", "email": "a@b.com", "message": "hi"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
}

#[tokio::test]
async fn store_failure_returns_500_with_store_message() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE feedbacks;").unwrap();
    let app = router(AppState::new(conn));

    let (status, body) = send(
        &app,
        post_feedback(json!({"name": "A", "email": "a@b.com", "message": "hi"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let message = body["error"].as_str().unwrap();
    assert!(message.contains("no such table"), "{message}");
}

#[tokio::test]
async fn malformed_json_returns_generic_500() {
    let app = app();

    let (status, body) = send(&app, post_feedback("{\"name\": ")).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body, json!({"error": "Server error"}));
}

#[tokio::test]
async fn body_is_parsed_regardless_of_content_type() {
    let app = app();
    let request = Request::builder()
        .method("POST")
        .uri("/api/submit-feedback")
        .header("content-type", "text/plain")
        .body(Body::from(
            json!({"name": "A", "email": "a@b.com", "message": "hi"}).to_string(),
        ))
        .unwrap();

    let (status, _) = send(&app, request).await;

    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn submitted_feedback_is_listed_back() {
    let app = app();
    send(
        &app,
        post_feedback(
            json!({"name": "Ada", "email": "ada@example.com", "message": "Great form"})
                .to_string(),
        ),
    )
    .await;

    let (status, body) = send(&app, get_feedbacks()).await;

    assert_eq!(status, StatusCode::OK);
    let records = body.as_array().unwrap();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0]["name"], "Ada");
    assert_eq!(records[0]["email"], "ada@example.com");
    assert_eq!(records[0]["message"], "Great form");
    assert!(records[0]["id"].is_string());
    assert!(records[0]["created_at"].is_i64());
}

#[tokio::test]
async fn rejected_submission_is_not_listed() {
    let app = app();
    send(
        &app,
        post_feedback(json!({"name": "A", "email": "a@b.com", "message": ""}).to_string()),
    )
    .await;

    let (_, body) = send(&app, get_feedbacks()).await;

    assert_eq!(body, json!([]));
}

#[tokio::test]
async fn listing_twice_returns_same_records() {
    let app = app();
    for name in ["A", "B", "C"] {
        send(
            &app,
            post_feedback(json!({"name": name, "email": "a@b.com", "message": "hi"}).to_string()),
        )
        .await;
    }

    let first = send(&app, get_feedbacks()).await;
    let second = send(&app, get_feedbacks()).await;

    assert_eq!(first, second);
}

#[tokio::test]
async fn listing_failure_returns_500_with_store_message() {
    let conn = open_db_in_memory().unwrap();
    conn.execute_batch("DROP TABLE feedbacks;").unwrap();
    let app = router(AppState::new(conn));

    let (status, body) = send(&app, get_feedbacks()).await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert!(body["error"].as_str().unwrap().contains("no such table"));
}

#[tokio::test]
async fn large_submission_is_stored_not_rejected_by_size() {
    let app = app();
    let message = "x".repeat(3 * 1024 * 1024);

    let (status, body) = send(
        &app,
        post_feedback(json!({"name": "A", "email": "a@b.com", "message": message}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));

    let (_, listed) = send(&app, get_feedbacks()).await;
    assert_eq!(listed[0]["message"].as_str().unwrap().len(), message.len());
}

#[tokio::test]
async fn panicked_request_does_not_break_later_requests() {
    let state = AppState::open(&DbLocation::Memory).unwrap();
    let panicked = catch_unwind(AssertUnwindSafe(|| {
        state.with_service::<(), _>(|_| panic!("handler blew up"))
    }));
    assert!(panicked.is_err());

    let app = router(state);
    let (status, body) = send(
        &app,
        post_feedback(json!({"name": "A", "email": "a@b.com", "message": "hi"}).to_string()),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({"success": true}));
}

#[tokio::test]
async fn wrong_method_is_rejected() {
    let app = app();
    let request = Request::builder()
        .method("GET")
        .uri("/api/submit-feedback")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
}

#[test]
fn state_opens_configured_file_database() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("feedback.sqlite3");
    let state = AppState::open(&DbLocation::File(path.clone())).unwrap();
    let count = state.with_service(|service| service.list_feedbacks().unwrap().len());

    assert_eq!(count, 0);
    assert!(path.exists());
}
