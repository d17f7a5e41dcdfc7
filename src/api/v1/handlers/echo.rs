/*
 * Responsibility
 * - POST /api/v1/echo
 * - message を検証して、反転文字列と長さを返す
 */
use crate::{
    api::v1::{
        dto::{
            echo::{EchoRequest, EchoResponse},
            envelope::ApiResponse,
        },
        extractors::{RequestContext, ValidJson},
    },
    error::AppError,
};

pub async fn echo(
    ctx: RequestContext,
    ValidJson(req): ValidJson<EchoRequest>,
) -> Result<ApiResponse<EchoResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let reversed = reverse(&req.message);
    let length = req.message.len();

    Ok(ApiResponse::success(
        "Echo successful",
        EchoResponse {
            original: req.message,
            reversed,
            length,
            request_id: ctx.request_id().unwrap_or_default().to_string(),
        },
    ))
}

/// Reverse by Unicode scalar value, not by byte.
pub fn reverse(s: &str) -> String {
    s.chars().rev().collect()
}
