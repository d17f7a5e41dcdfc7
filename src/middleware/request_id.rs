//! Request-Id assignment + propagation (`X-Request-ID`).
//!
//! An incoming non-empty id is reused verbatim so calls can be correlated
//! across services; otherwise a UUID v4 is generated. The id is stored on the
//! RequestContext, echoed on the response, and every log line emitted further
//! down the pipeline is recorded inside a `request{request_id}` span.

use axum::{
    extract::Request,
    http::{HeaderName, HeaderValue},
    middleware::Next,
    response::Response,
};
use tracing::Instrument;
use uuid::Uuid;

use crate::api::v1::extractors::RequestContext;

pub const REQUEST_ID_HEADER: HeaderName = HeaderName::from_static("x-request-id");

pub async fn assign(mut req: Request, next: Next) -> Response {
    let ctx = RequestContext::ensure(&mut req);

    let request_id = req
        .headers()
        .get(&REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .filter(|v| !v.is_empty())
        .map(str::to_owned)
        .unwrap_or_else(|| Uuid::new_v4().to_string());

    ctx.set_request_id(request_id.clone());

    let span = tracing::info_span!("request", request_id = %request_id);
    let mut response = next.run(req).instrument(span).await;

    set_header(&mut response, &request_id);
    response
}

pub(crate) fn set_header(response: &mut Response, request_id: &str) {
    if let Ok(value) = HeaderValue::from_str(request_id) {
        response.headers_mut().insert(REQUEST_ID_HEADER, value);
    }
}
