//! Liveness endpoint.

mod common;

use axum::http::StatusCode;
use common::*;

#[tokio::test]
async fn health_endpoint_reports_ok() {
    let app = spawn_app().await;

    let response = app.get("/health").await;
    assert_eq!(response.status(), StatusCode::OK);

    let body = response_json(response).await;
    assert_eq!(body["status"], "ok");
    assert!(!body["timestamp"].as_str().unwrap().is_empty());
}
