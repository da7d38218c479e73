mod common;

use axum::http::{Method, StatusCode};
use serde_json::json;

use common::app::spawn_test_server;
use common::auth::{auth_header, register_and_login, TEST_PASSWORD};
use common::http::{assert_json_error, request, response_json};

#[tokio::test]
async fn register_returns_token_and_profile() {
    let server = spawn_test_server().await;

    let resp = request(
        &server.app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "Ada@Example.COM", "password": TEST_PASSWORD })),
        &[],
    )
    .await;

    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert!(body["data"]["token"].as_str().is_some_and(|t| !t.is_empty()));
    // Email is normalized before storage.
    assert_eq!(body["data"]["user"]["email"], "ada@example.com");
    assert!(body["data"]["user"]["id"].as_str().is_some());
}

#[tokio::test]
async fn register_rejects_invalid_email_and_weak_password() {
    let server = spawn_test_server().await;

    let resp = request(
        &server.app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "not-an-email", "password": TEST_PASSWORD })),
        &[],
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "AUTH_INVALID_EMAIL");

    let resp = request(
        &server.app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "ada@example.com", "password": "short1" })),
        &[],
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "AUTH_WEAK_PASSWORD");

    // Digits-only passwords are rejected too.
    let resp = request(
        &server.app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "ada@example.com", "password": "1234567890" })),
        &[],
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "AUTH_WEAK_PASSWORD");
}

#[tokio::test]
async fn duplicate_email_conflicts_case_insensitively() {
    let server = spawn_test_server().await;
    register_and_login(&server.app, "dup@example.com").await;

    let resp = request(
        &server.app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "DUP@example.com", "password": TEST_PASSWORD })),
        &[],
    )
    .await;

    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_json_error(&body, "AUTH_EMAIL_EXISTS");
}

#[tokio::test]
async fn login_round_trip_and_bad_credentials() {
    let server = spawn_test_server().await;
    register_and_login(&server.app, "login@example.com").await;

    let resp = request(
        &server.app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "login@example.com", "password": TEST_PASSWORD })),
        &[],
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::OK);
    assert!(body["data"]["token"].as_str().is_some());

    let resp = request(
        &server.app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "login@example.com", "password": "wrongpass1" })),
        &[],
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_json_error(&body, "AUTH_UNAUTHORIZED");

    // Unknown account answers identically to a wrong password.
    let resp = request(
        &server.app,
        Method::POST,
        "/api/auth/login",
        Some(json!({ "email": "ghost@example.com", "password": TEST_PASSWORD })),
        &[],
    )
    .await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_json_error(&body, "AUTH_UNAUTHORIZED");
}

#[tokio::test]
async fn malformed_body_yields_bad_request() {
    let server = spawn_test_server().await;

    let resp = request(
        &server.app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": "ada@example.com" })),
        &[],
    )
    .await;

    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_json_error(&body, "INVALID_REQUEST_BODY");
}

#[tokio::test]
async fn protected_routes_require_a_valid_token() {
    let server = spawn_test_server().await;

    let resp = request(&server.app, Method::GET, "/api/levels", None, &[]).await;
    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_json_error(&body, "AUTH_UNAUTHORIZED");

    let resp = request(
        &server.app,
        Method::GET,
        "/api/levels",
        None,
        &[auth_header("not-a-jwt")],
    )
    .await;
    let (status, _, _) = response_json(resp).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}
