//! End-to-end tests for the todo API.
//!
//! These drive the full router (routing, JSON, validation, service,
//! repository) over the in-memory store, one request at a time.

#![allow(clippy::unwrap_used, clippy::expect_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use chrono::{Duration, TimeZone, Utc};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use std::sync::Arc;
use todo_api::{AppState, FixedClock, InMemoryTodoRepository, TodoService, router};
use tower::ServiceExt;

fn app() -> Router {
    router(AppState::new(TodoService::new(InMemoryTodoRepository::new())))
}

fn app_with_clock(clock: FixedClock) -> Router {
    router(AppState::new(TodoService::with_clock(
        InMemoryTodoRepository::new(),
        Arc::new(clock),
    )))
}

fn json_request(method: &str, uri: &str, body: &Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn get_request(uri: &str) -> Request<Body> {
    Request::builder().uri(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap_or(Value::Null)
    };
    (status, body)
}

fn draft(title: &str, percent: i32) -> Value {
    json!({
        "title": title,
        "description": "",
        "expiryDateTime": Utc::now() + Duration::days(1),
        "percentComplete": percent,
    })
}

async fn create_todo(app: &Router, body: &Value) -> Value {
    let (status, created) = send(app, json_request("POST", "/api/todo", body)).await;
    assert_eq!(status, StatusCode::CREATED);
    created
}

#[tokio::test]
async fn health_endpoint_responds_ok() {
    let app = app();
    let response = app.oneshot(get_request("/health")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_returns_created_with_location() {
    let app = app();
    let response = app
        .clone()
        .oneshot(json_request("POST", "/api/todo", &draft("Buy milk", 0)))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::CREATED);
    let location = response
        .headers()
        .get(header::LOCATION)
        .and_then(|v| v.to_str().ok())
        .unwrap()
        .to_string();

    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let body: Value = serde_json::from_slice(&bytes).unwrap();
    assert_eq!(location, format!("/api/todo/{}", body["id"]));
    assert_eq!(body["title"], "Buy milk");
    assert_eq!(body["percentComplete"], 0);
    assert_eq!(body["isDone"], false);
    assert!(body["updatedAt"].is_null());
}

#[tokio::test]
async fn create_then_fetch_round_trips() {
    let app = app();
    let created = create_todo(&app, &draft("Buy milk", 0)).await;

    let uri = format!("/api/todo/{}", created["id"]);
    let (status, fetched) = send(&app, get_request(&uri)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(fetched, created);
}

#[tokio::test]
async fn create_derives_done_from_full_percent() {
    let app = app();
    let created = create_todo(&app, &draft("Finished already", 100)).await;
    assert_eq!(created["isDone"], true);
}

#[tokio::test]
async fn create_rejects_empty_title_with_field_errors() {
    let app = app();
    let (status, body) = send(&app, json_request("POST", "/api/todo", &draft("", 0))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
    let errors = body["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 1);
    assert_eq!(errors[0]["field"], "title");
    assert_eq!(errors[0]["message"], "Title is required");
}

#[tokio::test]
async fn create_rejects_past_expiry() {
    let app = app();
    let mut payload = draft("Too late", 0);
    payload["expiryDateTime"] = json!(Utc::now() - Duration::hours(1));

    let (status, body) = send(&app, json_request("POST", "/api/todo", &payload)).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "expiryDateTime");
}

#[tokio::test]
async fn get_missing_returns_not_found() {
    let app = app();
    let (status, body) = send(&app, get_request("/api/todo/999")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["code"], "NOT_FOUND");
}

#[tokio::test]
async fn put_replaces_fields_and_recomputes_done() {
    let app = app();
    let created = create_todo(&app, &draft("Task", 100)).await;
    assert_eq!(created["isDone"], true);

    let uri = format!("/api/todo/{}", created["id"]);
    let (status, updated) = send(&app, json_request("PUT", &uri, &draft("Task again", 50))).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["title"], "Task again");
    assert_eq!(updated["percentComplete"], 50);
    // The replace path recomputes the flag from the incoming percent.
    assert_eq!(updated["isDone"], false);
    assert!(!updated["updatedAt"].is_null());
    assert_eq!(updated["createdAt"], created["createdAt"]);
}

#[tokio::test]
async fn put_missing_returns_not_found() {
    let app = app();
    let (status, _) = send(&app, json_request("PUT", "/api/todo/999", &draft("x", 0))).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn put_rejects_invalid_draft_before_lookup() {
    let app = app();
    let (status, body) = send(&app, json_request("PUT", "/api/todo/999", &draft("", 0))).await;
    // Validation short-circuits ahead of the not-found check.
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn percent_patch_ratchets_done_flag() {
    let app = app();
    let created = create_todo(&app, &draft("Task", 0)).await;
    let uri = format!("/api/todo/{}/percent", created["id"]);

    let (status, updated) = send(
        &app,
        json_request("PATCH", &uri, &json!({"percentComplete": 100})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["isDone"], true);

    // Dropping back below 100 leaves the flag set.
    let (status, updated) = send(
        &app,
        json_request("PATCH", &uri, &json!({"percentComplete": 40})),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["percentComplete"], 40);
    assert_eq!(updated["isDone"], true);
}

#[tokio::test]
async fn percent_patch_rejects_out_of_range() {
    let app = app();
    let created = create_todo(&app, &draft("Task", 0)).await;
    let uri = format!("/api/todo/{}/percent", created["id"]);

    let (status, body) = send(
        &app,
        json_request("PATCH", &uri, &json!({"percentComplete": 150})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "percentComplete");
}

#[tokio::test]
async fn percent_patch_missing_returns_not_found() {
    let app = app();
    let (status, _) = send(
        &app,
        json_request("PATCH", "/api/todo/999/percent", &json!({"percentComplete": 10})),
    )
    .await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn done_patch_forces_full_percent() {
    let app = app();
    let created = create_todo(&app, &draft("Task", 25)).await;
    let uri = format!("/api/todo/{}/done", created["id"]);

    let (status, updated) = send(&app, json_request("PATCH", &uri, &Value::Null)).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(updated["percentComplete"], 100);
    assert_eq!(updated["isDone"], true);
}

#[tokio::test]
async fn done_patch_missing_returns_not_found() {
    let app = app();
    let (status, _) = send(&app, json_request("PATCH", "/api/todo/999/done", &Value::Null)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn delete_removes_exactly_once() {
    let app = app();
    let created = create_todo(&app, &draft("Task", 0)).await;
    let uri = format!("/api/todo/{}", created["id"]);

    let delete_request = || {
        Request::builder()
            .method("DELETE")
            .uri(uri.as_str())
            .body(Body::empty())
            .unwrap()
    };

    let (status, _) = send(&app, delete_request()).await;
    assert_eq!(status, StatusCode::NO_CONTENT);

    let (status, _) = send(&app, delete_request()).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, get_request(&uri)).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn list_orders_by_expiry() {
    let app = app();

    let mut later = draft("later", 0);
    later["expiryDateTime"] = json!(Utc::now() + Duration::days(5));
    let mut sooner = draft("sooner", 0);
    sooner["expiryDateTime"] = json!(Utc::now() + Duration::days(2));

    create_todo(&app, &later).await;
    create_todo(&app, &sooner).await;

    let (status, body) = send(&app, get_request("/api/todo")).await;
    assert_eq!(status, StatusCode::OK);

    let titles: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|t| t["title"].as_str().unwrap())
        .collect();
    assert_eq!(titles, vec!["sooner", "later"]);
}

#[tokio::test]
async fn expiry_validation_follows_the_injected_clock() {
    // A clock pinned far in the past accepts an expiry that has long gone
    // by on the wall clock.
    let past = Utc.with_ymd_and_hms(2000, 1, 1, 0, 0, 0).unwrap();
    let app = app_with_clock(FixedClock::at(past));

    let mut payload = draft("Party like it's 1999", 0);
    payload["expiryDateTime"] = json!(past + Duration::days(1));

    let (status, _) = send(&app, json_request("POST", "/api/todo", &payload)).await;
    assert_eq!(status, StatusCode::CREATED);

    // And a clock pinned far in the future rejects an expiry that is still
    // ahead of the wall clock.
    let future = Utc.with_ymd_and_hms(2100, 1, 1, 0, 0, 0).unwrap();
    let app = app_with_clock(FixedClock::at(future));

    let (status, body) = send(
        &app,
        json_request("POST", "/api/todo", &draft("Too soon", 0)),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["errors"][0]["field"], "expiryDateTime");
}

#[tokio::test]
async fn cors_preflight_is_answered() {
    let app = app();
    let request = Request::builder()
        .method("OPTIONS")
        .uri("/api/todo")
        .header(header::ORIGIN, "https://example.com")
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .body(Body::empty())
        .unwrap();

    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key(header::ACCESS_CONTROL_ALLOW_ORIGIN)
    );
}

#[tokio::test]
async fn due_date_endpoints_respond_with_lists() {
    let app = app();
    create_todo(&app, &draft("Task", 0)).await;

    for uri in ["/api/todo/today", "/api/todo/tomorrow", "/api/todo/week"] {
        let (status, body) = send(&app, get_request(uri)).await;
        assert_eq!(status, StatusCode::OK, "endpoint {uri}");
        assert!(body.is_array(), "endpoint {uri}");
    }
}
