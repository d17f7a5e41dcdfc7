//! HTTP-level middleware (cross-cutting concerns).
//!
//! Responsibility:
//! - The request pipeline, outermost to innermost:
//!   panic containment → access log → request id → auth gate → routes
//! - Transport limits around the routes (body size, handler timeout)
//!
//! The pipeline is applied with `Router::layer`, so it also wraps the
//! fallback: unknown paths are authenticated like any other route.

use axum::Router;
use axum::error_handling::HandleErrorLayer;
use axum::extract::Request;
use axum::http::{StatusCode, header};
use axum::middleware::{Next, from_fn, from_fn_with_state};
use axum::response::{IntoResponse, Response};
use tower::timeout::TimeoutLayer;
use tower::{BoxError, ServiceBuilder};
use tower_http::limit::RequestBodyLimitLayer;

use crate::config::Limits;
use crate::error::AppError;
use crate::middleware::{access_log, auth::AuthGate, recovery, request_id};

/// Wrap the router in the request pipeline.
pub fn apply(router: Router, gate: AuthGate) -> Router {
    // ServiceBuilder: first layer is the outermost.
    let pipeline = ServiceBuilder::new()
        .layer(from_fn(recovery::contain))
        .layer(from_fn(access_log::record))
        .layer(from_fn(request_id::assign))
        .layer(from_fn_with_state(gate, crate::middleware::auth::access::authenticate));

    router.layer(pipeline)
}

/// Apply body-size and timeout limits to the given Router.
pub fn limit(router: Router, limits: Limits) -> Router {
    let layers = ServiceBuilder::new()
        // Make the service error `Infallible` by converting errors into responses.
        .layer(HandleErrorLayer::new(|err: BoxError| async move {
            if err.is::<tower::timeout::error::Elapsed>() {
                AppError::Timeout
            } else {
                tracing::error!(error = %err, "unhandled service error");
                AppError::Internal("Internal server error")
            }
        }))
        .layer(TimeoutLayer::new(limits.request_timeout))
        .layer(RequestBodyLimitLayer::new(limits.body_limit_bytes));

    router.layer(layers).layer(from_fn(payload_too_large))
}

/// RequestBodyLimitLayer refuses an oversize `Content-Length` itself, with a
/// plain-text body. Re-render that refusal as the error envelope.
async fn payload_too_large(req: Request, next: Next) -> Response {
    let response = next.run(req).await;

    if response.status() == StatusCode::PAYLOAD_TOO_LARGE && !is_json(&response) {
        return AppError::PayloadTooLarge.into_response();
    }
    response
}

fn is_json(response: &Response) -> bool {
    response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v.starts_with("application/json"))
}
