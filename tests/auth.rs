mod common;

use axum::http::StatusCode;
use serde_json::json;

use common::*;

#[tokio::test]
async fn authenticate_returns_token_header() {
    let app = app();
    post(&app, "/api/v1/people", person_payload("131.147.860-49", "a@email.com")).await;

    let response = post(&app, "/api/v1/authenticate", json!({ "email": "a@email.com", "senha": "123456" })).await;
    assert_eq!(response.status, StatusCode::NO_CONTENT);
    let token = response.headers["token"].to_str().unwrap();
    assert_eq!(token.split('.').count(), 3);
}

#[tokio::test]
async fn wrong_password_or_email_is_unauthorized() {
    let app = app();
    post(&app, "/api/v1/people", person_payload("131.147.860-49", "a@email.com")).await;

    let wrong_password =
        post(&app, "/api/v1/authenticate", json!({ "email": "a@email.com", "senha": "654321" })).await;
    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);

    let unknown =
        post(&app, "/api/v1/authenticate", json!({ "email": "x@email.com", "senha": "123456" })).await;
    assert_eq!(unknown.status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn authenticate_payload_is_validated() {
    let app = app();
    let response = post(&app, "/api/v1/authenticate", json!({ "email": "a@email.com" })).await;
    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    assert_eq!(messages(&response.body), vec!["\"senha\" is required"]);
}

#[tokio::test]
async fn health_and_openapi() {
    let app = app();
    let health = get(&app, "/api/health").await;
    assert_eq!(health.status, StatusCode::OK);

    let docs = get(&app, "/api-docs/openapi.json").await;
    assert_eq!(docs.status, StatusCode::OK);
    assert!(docs.body["paths"]["/api/v1/car"].is_object());
}
