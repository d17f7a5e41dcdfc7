use axum::extract::FromRequestParts;
use axum::http::request::Parts;

use crate::error::AppError;

use super::{Identity, RequestContext};

/// Handler で RequestContext を受け取るための extractor
/// pipeline の最外段が request.extensions() に insert 済みである前提
impl<S> FromRequestParts<S> for RequestContext
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        parts
            .extensions
            .get::<RequestContext>()
            .cloned()
            .ok_or(AppError::Internal("Internal server error"))
    }
}

/// Authenticated principal for protected handlers.
/// 見つからない場合は 401 (auth gate が掛かっていない)
pub struct Authenticated(pub Identity);

impl<S> FromRequestParts<S> for Authenticated
where
    S: Send + Sync,
{
    type Rejection = AppError;

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let ctx = RequestContext::from_request_parts(parts, state).await?;
        ctx.identity()
            .cloned()
            .map(Authenticated)
            .ok_or(AppError::Unauthorized("Unauthorized"))
    }
}
