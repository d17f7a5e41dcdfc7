//! Panic containment: the outermost pipeline stage.
//!
//! Creates the RequestContext, then polls the rest of the pipeline inside
//! `catch_unwind`. A panic anywhere downstream becomes a generic 500 envelope;
//! the panic message is logged here and the backtrace by the process panic
//! hook (see `app::init_panic_hook`), both tagged with the request id.

use std::any::Any;
use std::panic::AssertUnwindSafe;

use axum::{
    extract::Request,
    middleware::Next,
    response::{IntoResponse, Response},
};
use futures::FutureExt;

use crate::api::v1::extractors::RequestContext;
use crate::error::AppError;
use crate::middleware::{access_log, request_id};

pub async fn contain(mut req: Request, next: Next) -> Response {
    let ctx = RequestContext::ensure(&mut req);

    match AssertUnwindSafe(next.run(req)).catch_unwind().await {
        Ok(response) => response,
        Err(panic) => {
            let id = ctx.request_id().unwrap_or_default();
            tracing::error!(
                request_id = id,
                error = %panic_message(panic.as_ref()),
                "panic recovered"
            );

            let mut response = AppError::Internal("Internal server error").into_response();
            if !id.is_empty() {
                request_id::set_header(&mut response, id);
            }
            // the access layer unwound before its "after" phase
            access_log::emit(&ctx, response.status());
            response
        }
    }
}

fn panic_message(panic: &(dyn Any + Send)) -> &str {
    if let Some(s) = panic.downcast_ref::<&'static str>() {
        s
    } else if let Some(s) = panic.downcast_ref::<String>() {
        s.as_str()
    } else {
        "non-string panic payload"
    }
}
