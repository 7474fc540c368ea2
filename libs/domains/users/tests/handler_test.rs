//! Handler tests for the Users domain
//!
//! These tests drive `handlers::router` end to end over the in-memory
//! repository:
//! - Request decoding (JSON → DTOs, path ids)
//! - Response encoding (password hash never present)
//! - HTTP status codes
//! - Error bodies

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use domain_users::*;
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt; // For oneshot()

const UNKNOWN_ID: &str = "65f1c0ffee0000000000abcd";

fn app() -> (Router, InMemoryUserRepository) {
    let repo = InMemoryUserRepository::new();
    let router = handlers::router(UserService::new(repo.clone()));
    (router, repo)
}

// Helper to parse JSON response body
async fn json_body(body: Body) -> Value {
    let bytes = body.collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

async fn send(app: &Router, method: &str, uri: &str, body: Option<Value>) -> (StatusCode, Body) {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
        Some(value) => {
            builder = builder.header(header::CONTENT_TYPE, "application/json");
            Body::from(value.to_string())
        }
        None => Body::empty(),
    };

    let response = app.clone().oneshot(builder.body(body).unwrap()).await.unwrap();
    (response.status(), response.into_body())
}

async fn create(app: &Router, username: &str, password: &str, email: &str) -> Value {
    let (status, body) = send(
        app,
        "POST",
        "/users",
        Some(json!({"username": username, "password": password, "email": email})),
    )
    .await;
    assert_eq!(status, StatusCode::CREATED);
    json_body(body).await
}

#[tokio::test]
async fn test_create_user_returns_201_without_password() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "al", "password": "pw1", "email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::CREATED);
    let user = json_body(body).await;
    let id = user["id"].as_str().unwrap();
    assert_eq!(id.len(), 24);
    assert_eq!(
        user,
        json!({"id": id, "username": "al", "email": "a@x.com"})
    );
}

#[tokio::test]
async fn test_create_then_get_round_trips() {
    let (app, _) = app();
    let created = create(&app, "al", "pw1", "a@x.com").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(&app, "GET", &format!("/users/{}", id), None).await;

    assert_eq!(status, StatusCode::OK);
    let fetched = json_body(body).await;
    assert_eq!(fetched, created);
    assert!(fetched.get("password").is_none());
    assert!(fetched.get("password_hash").is_none());
}

#[tokio::test]
async fn test_created_password_is_hashed() {
    let (app, repo) = app();
    let created = create(&app, "al", "secret", "a@x.com").await;

    let stored = repo
        .find_one(created["id"].as_str().unwrap())
        .await
        .unwrap();
    assert_ne!(stored.password_hash, "secret");
    assert!(verify_password("secret", &stored.password_hash).unwrap());
    assert!(!verify_password("secret2", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn test_list_users_empty_is_200_array() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", "/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(body).await, json!([]));
}

#[tokio::test]
async fn test_list_users_returns_all() {
    let (app, _) = app();
    let al = create(&app, "al", "pw", "a@x.com").await;
    let bo = create(&app, "bo", "pw", "b@x.com").await;

    let (status, body) = send(&app, "GET", "/users", None).await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(json_body(body).await, json!([al, bo]));
}

#[tokio::test]
async fn test_get_unknown_user_returns_404_body() {
    let (app, _) = app();

    let (status, body) = send(&app, "GET", &format!("/users/{}", UNKNOWN_ID), None).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(
        json_body(body).await,
        json!({
            "code": "NOT_FOUND",
            "message": "Resource not found",
            "developerMessage": format!("user {} not found", UNKNOWN_ID)
        })
    );
}

#[tokio::test]
async fn test_malformed_id_is_404_for_every_operation() {
    let (app, _) = app();
    let update = json!({"username": "al", "password": "pw", "email": "a@x.com"});

    for (method, body) in [("GET", None), ("PUT", Some(update)), ("DELETE", None)] {
        let (status, body) = send(&app, method, "/users/not-an-object-id", body).await;
        assert_eq!(status, StatusCode::NOT_FOUND, "{} should be 404", method);
        assert_eq!(json_body(body).await["code"], "NOT_FOUND");
    }
}

#[tokio::test]
async fn test_update_user_replaces_fields() {
    let (app, repo) = app();
    let created = create(&app, "al", "pw1", "a@x.com").await;
    let id = created["id"].as_str().unwrap();

    let (status, body) = send(
        &app,
        "PUT",
        &format!("/users/{}", id),
        Some(json!({
            "id": UNKNOWN_ID,
            "username": "bo",
            "password": "pw2",
            "email": "b@x.com"
        })),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        json_body(body).await,
        json!({"id": id, "username": "bo", "email": "b@x.com"})
    );

    let stored = repo.find_one(id).await.unwrap();
    assert!(verify_password("pw2", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn test_update_without_password_hashes_empty_string() {
    let (app, repo) = app();
    let created = create(&app, "al", "pw1", "a@x.com").await;
    let id = created["id"].as_str().unwrap();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{}", id),
        Some(json!({"username": "al", "email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let stored = repo.find_one(id).await.unwrap();
    assert!(verify_password("", &stored.password_hash).unwrap());
    assert!(!verify_password("pw1", &stored.password_hash).unwrap());
}

#[tokio::test]
async fn test_update_unknown_user_returns_404() {
    let (app, _) = app();

    let (status, _) = send(
        &app,
        "PUT",
        &format!("/users/{}", UNKNOWN_ID),
        Some(json!({"username": "al", "password": "pw", "email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_delete_twice_is_204_then_404() {
    let (app, _) = app();
    let created = create(&app, "al", "pw", "a@x.com").await;
    let uri = format!("/users/{}", created["id"].as_str().unwrap());

    let (status, body) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NO_CONTENT);
    assert!(body.collect().await.unwrap().to_bytes().is_empty());

    let (status, _) = send(&app, "DELETE", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let (status, _) = send(&app, "GET", &uri, None).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn test_create_with_malformed_json_returns_400() {
    let (app, _) = app();

    let request = Request::builder()
        .method("POST")
        .uri("/users")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(r#"{"username": "al""#))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = json_body(response.into_body()).await;
    assert_eq!(body["code"], "INVALID_JSON");
    assert_eq!(body["message"], "Invalid JSON format");
}

#[tokio::test]
async fn test_create_with_missing_field_returns_400() {
    let (app, repo) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "al", "password": "pw"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    let body = json_body(body).await;
    assert_eq!(body["code"], "INVALID_JSON");
    assert!(body["developerMessage"].as_str().unwrap().contains("email"));
    assert!(repo.find_all().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_create_with_empty_field_returns_400() {
    let (app, _) = app();

    let (status, body) = send(
        &app,
        "POST",
        "/users",
        Some(json!({"username": "", "password": "pw", "email": "a@x.com"})),
    )
    .await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(body).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn test_create_with_array_body_returns_400() {
    let (app, _) = app();

    let (status, body) = send(&app, "POST", "/users", Some(json!([1, 2, 3]))).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(json_body(body).await["code"], "INVALID_JSON");
}

#[tokio::test]
async fn test_responses_are_json() {
    let (app, _) = app();

    let response = app
        .oneshot(Request::get("/users").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(
        response.headers()[header::CONTENT_TYPE],
        "application/json"
    );
}
