/*
 * Responsibility
 * - 1 リクエスト分の状態 (request id / 認証済み subject / claims) を保持する型
 * - pipeline の各段が request extensions 経由で同じ handle を共有する
 *
 * Notes
 * - request を跨いで共有しない。handle の clone は同じ request の段同士だけ
 * - request id と identity は一度だけ書ける (OnceLock)
 */
use std::sync::{Arc, Mutex, OnceLock, PoisonError};

use axum::extract::Request;

use crate::middleware::access_log::AccessRecord;
use crate::services::auth::jwt::{Claims, VerifiedToken};

/// Authenticated principal: set by the auth gate, together or not at all.
#[derive(Debug, Clone, PartialEq)]
pub struct Identity {
    pub subject: String,
    pub claims: Claims,
}

impl From<VerifiedToken> for Identity {
    fn from(token: VerifiedToken) -> Self {
        Self {
            subject: token.subject,
            claims: token.claims,
        }
    }
}

#[derive(Debug, Default)]
struct Inner {
    request_id: OnceLock<String>,
    identity: OnceLock<Identity>,
    pending_access: Mutex<Option<AccessRecord>>,
}

#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    inner: Arc<Inner>,
}

impl RequestContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Context already attached to `req`, or a fresh one attached now.
    pub fn ensure(req: &mut Request) -> Self {
        if let Some(ctx) = req.extensions().get::<RequestContext>() {
            return ctx.clone();
        }
        let ctx = Self::new();
        req.extensions_mut().insert(ctx.clone());
        ctx
    }

    /// First write wins. Returns false when an id was already assigned.
    pub fn set_request_id(&self, request_id: impl Into<String>) -> bool {
        self.inner.request_id.set(request_id.into()).is_ok()
    }

    pub fn request_id(&self) -> Option<&str> {
        self.inner.request_id.get().map(String::as_str)
    }

    pub fn authenticate(&self, identity: Identity) -> bool {
        self.inner.identity.set(identity).is_ok()
    }

    pub fn identity(&self) -> Option<&Identity> {
        self.inner.identity.get()
    }

    pub fn subject(&self) -> Option<&str> {
        self.identity().map(|i| i.subject.as_str())
    }

    pub fn claims(&self) -> Option<&Claims> {
        self.identity().map(|i| &i.claims)
    }

    pub(crate) fn park_access(&self, record: AccessRecord) {
        *self
            .inner
            .pending_access
            .lock()
            .unwrap_or_else(PoisonError::into_inner) = Some(record);
    }

    /// Hands out the pending access record at most once.
    pub(crate) fn take_access(&self) -> Option<AccessRecord> {
        self.inner
            .pending_access
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .take()
    }
}
