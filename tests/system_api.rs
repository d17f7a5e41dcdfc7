// ============================================================================
// Public system endpoint tests: health / docs / swagger
// ============================================================================

use api_gateway::app::build_router;
use api_gateway::config::Limits;
use axum::http::StatusCode;
use chrono::DateTime;

mod common;
use common::{app, get, send, state_with_docs};

#[tokio::test]
async fn health_reports_status_version_and_time() {
    let res = send(&app(), get("/health")).await;

    assert_eq!(res.status, StatusCode::OK);
    let body = res.json();
    assert_eq!(body["status"], "ok");
    assert_eq!(body["version"], env!("CARGO_PKG_VERSION"));
    let timestamp = body["timestamp"].as_str().unwrap();
    assert!(DateTime::parse_from_rfc3339(timestamp).is_ok());
}

#[tokio::test]
async fn docs_serves_the_manual() {
    let res = send(&app(), get("/api/docs")).await;

    assert_eq!(res.status, StatusCode::OK);
    let content = res.json()["content"].as_str().unwrap().to_string();
    assert!(content.starts_with("# API Gateway user manual"));
}

#[tokio::test]
async fn missing_docs_are_not_found() {
    let app = build_router(
        state_with_docs("/nonexistent/user-manual.md".into()),
        Limits::default(),
    );

    let res = send(&app, get("/api/docs")).await;

    assert_eq!(res.status, StatusCode::NOT_FOUND);
    let body = res.json();
    assert_eq!(body["code"], "NOT_FOUND");
    assert_eq!(body["message"], "Documentation not found");
    assert!(body["data"].is_null());
}

#[tokio::test]
async fn swagger_serves_ui_and_document() {
    let app = app();

    let res = send(&app, get("/swagger/index.html")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert!(String::from_utf8_lossy(&res.body).contains("/swagger/doc.json"));

    let res = send(&app, get("/swagger/doc.json")).await;
    assert_eq!(res.status, StatusCode::OK);
    assert_eq!(res.json()["openapi"], "3.0.3");
}
