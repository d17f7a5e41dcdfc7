// ============================================================================
// Shared helpers for router-level tests
// ============================================================================
#![allow(dead_code)]

use std::path::PathBuf;
use std::sync::Arc;

use api_gateway::app::build_router;
use api_gateway::config::Limits;
use api_gateway::services::auth::AuthService;
use api_gateway::state::AppState;
use axum::{
    Router,
    body::{Body, to_bytes},
    http::{HeaderMap, Request, StatusCode, header},
};
use serde_json::Value;
use tower::ServiceExt;

pub const SECRET: &str = "integration-test-secret";

pub fn manual_path() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR")).join("docs/public/user-manual.md")
}

pub fn state_with_docs(docs_path: PathBuf) -> AppState {
    AppState::new(Arc::new(AuthService::new(SECRET)), docs_path)
}

pub fn state() -> AppState {
    state_with_docs(manual_path())
}

pub fn app() -> Router {
    build_router(state(), Limits::default())
}

pub struct TestResponse {
    pub status: StatusCode,
    pub headers: HeaderMap,
    pub body: Vec<u8>,
}

impl TestResponse {
    pub fn json(&self) -> Value {
        serde_json::from_slice(&self.body).unwrap_or_else(|e| {
            panic!(
                "body is not JSON ({e}): {}",
                String::from_utf8_lossy(&self.body)
            )
        })
    }

    pub fn request_id(&self) -> Option<&str> {
        self.headers
            .get("x-request-id")
            .and_then(|v| v.to_str().ok())
    }
}

pub async fn send(app: &Router, req: Request<Body>) -> TestResponse {
    let response = app.clone().oneshot(req).await.unwrap();
    let status = response.status();
    let headers = response.headers().clone();
    let body = to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec();

    TestResponse {
        status,
        headers,
        body,
    }
}

pub fn get(path: &str) -> Request<Body> {
    Request::get(path).body(Body::empty()).unwrap()
}

pub fn get_with_token(path: &str, token: &str) -> Request<Body> {
    Request::get(path)
        .header(header::AUTHORIZATION, format!("Bearer {token}"))
        .body(Body::empty())
        .unwrap()
}

pub fn post_json(path: &str, body: &str, token: Option<&str>) -> Request<Body> {
    let mut builder = Request::post(path).header(header::CONTENT_TYPE, "application/json");
    if let Some(token) = token {
        builder = builder.header(header::AUTHORIZATION, format!("Bearer {token}"));
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

pub async fn login(app: &Router) -> String {
    let res = send(
        app,
        post_json(
            "/api/v1/auth/login",
            r#"{"username":"admin","password":"admin123"}"#,
            None,
        ),
    )
    .await;
    assert_eq!(res.status, StatusCode::OK);

    res.json()["data"]["token"]
        .as_str()
        .expect("token in login response")
        .to_string()
}
