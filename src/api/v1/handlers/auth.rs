/*
 * Responsibility
 * - POST /api/v1/auth/login (public): 資格情報を検証してトークンを発行
 * - GET /api/v1/auth/me (protected): 認証済み subject を返す
 */
use axum::extract::State;

use crate::{
    api::v1::{
        dto::{
            auth::{LoginRequest, LoginResponse, UserInfoResponse},
            envelope::ApiResponse,
        },
        extractors::{Authenticated, RequestContext, ValidJson},
    },
    error::AppError,
    state::AppState,
};

pub async fn login(
    State(state): State<AppState>,
    ValidJson(req): ValidJson<LoginRequest>,
) -> Result<ApiResponse<LoginResponse>, AppError> {
    req.validate().map_err(AppError::validation)?;

    let issued = state.auth.issuer().issue(&req.username, &req.password)?;

    Ok(ApiResponse::success(
        "Login successful",
        LoginResponse {
            expires_at: issued.expires_at_rfc3339(),
            token: issued.token,
        },
    ))
}

pub async fn me(
    ctx: RequestContext,
    Authenticated(identity): Authenticated,
) -> ApiResponse<UserInfoResponse> {
    ApiResponse::success(
        "User info retrieved",
        UserInfoResponse {
            user_id: identity.subject,
            request_id: ctx.request_id().unwrap_or_default().to_string(),
        },
    )
}
