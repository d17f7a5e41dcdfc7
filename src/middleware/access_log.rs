//! Access log: one structured `request` event per request.
//!
//! The record is captured before delegating and parked on the RequestContext.
//! Whoever finishes the request (this layer, or the panic container when the
//! handler unwinds) takes it and emits it, so it is logged exactly once.

use std::net::SocketAddr;
use std::time::Instant;

use axum::{
    extract::{ConnectInfo, Request},
    http::{HeaderMap, Method, StatusCode, header},
    middleware::Next,
    response::Response,
};
use tracing::Level;

use crate::api::v1::extractors::RequestContext;

#[derive(Debug, Clone)]
pub struct AccessRecord {
    started: Instant,
    method: Method,
    path: String,
    query: String,
    client_ip: String,
    user_agent: String,
}

impl AccessRecord {
    pub fn capture(req: &Request) -> Self {
        let peer = req
            .extensions()
            .get::<ConnectInfo<SocketAddr>>()
            .map(|ConnectInfo(addr)| *addr);

        Self {
            started: Instant::now(),
            method: req.method().clone(),
            path: req.uri().path().to_string(),
            query: req.uri().query().unwrap_or_default().to_string(),
            client_ip: client_ip(req.headers(), peer),
            user_agent: req
                .headers()
                .get(header::USER_AGENT)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string(),
        }
    }
}

pub async fn record(mut req: Request, next: Next) -> Response {
    let ctx = RequestContext::ensure(&mut req);
    ctx.park_access(AccessRecord::capture(&req));

    let response = next.run(req).await;

    emit(&ctx, response.status());
    response
}

/// Emit the parked record, if it has not been emitted yet.
pub fn emit(ctx: &RequestContext, status: StatusCode) {
    let Some(record) = ctx.take_access() else {
        return;
    };

    let latency = record.started.elapsed();
    let request_id = ctx.request_id().unwrap_or_default();
    let user_id = ctx.subject();
    let status = status.as_u16();

    macro_rules! access_event {
        ($level:expr) => {
            tracing::event!(
                $level,
                request_id,
                method = %record.method,
                path = %record.path,
                query = %record.query,
                status,
                latency = ?latency,
                client_ip = %record.client_ip,
                user_agent = %record.user_agent,
                user_id,
                "request"
            )
        };
    }

    let level = severity(status);
    if level == Level::ERROR {
        access_event!(Level::ERROR);
    } else if level == Level::WARN {
        access_event!(Level::WARN);
    } else {
        access_event!(Level::INFO);
    }
}

pub fn severity(status: u16) -> Level {
    match status {
        500.. => Level::ERROR,
        400..=499 => Level::WARN,
        _ => Level::INFO,
    }
}

/// First `X-Forwarded-For` entry, then `X-Real-IP`, then the socket peer.
pub fn client_ip(headers: &HeaderMap, peer: Option<SocketAddr>) -> String {
    let header_ip = |name: &str| {
        headers
            .get(name)
            .and_then(|v| v.to_str().ok())
            .and_then(|v| v.split(',').next())
            .map(str::trim)
            .filter(|v| !v.is_empty())
            .map(str::to_owned)
    };

    header_ip("x-forwarded-for")
        .or_else(|| header_ip("x-real-ip"))
        .or_else(|| peer.map(|addr| addr.ip().to_string()))
        .unwrap_or_else(|| "unknown".to_string())
}
