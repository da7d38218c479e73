use axum::http::{Method, StatusCode};
use axum::Router;
use serde_json::json;

use super::http::{request, response_json};

pub const TEST_PASSWORD: &str = "sunrise42";

/// Registers a fresh account and returns its JWT.
pub async fn register_and_login(app: &Router, email: &str) -> String {
    let resp = request(
        app,
        Method::POST,
        "/api/auth/register",
        Some(json!({ "email": email, "password": TEST_PASSWORD })),
        &[],
    )
    .await;

    let (status, _, body) = response_json(resp).await;
    assert_eq!(status, StatusCode::CREATED, "register failed: {body}");

    body["data"]["token"]
        .as_str()
        .expect("token in register response")
        .to_string()
}

pub fn auth_header(token: &str) -> (&'static str, String) {
    ("authorization", format!("Bearer {token}"))
}
