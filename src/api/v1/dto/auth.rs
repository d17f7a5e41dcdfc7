/*
 * Responsibility
 * - /auth 系の request/response DTO
 * - validate() で必須項目の形式チェック
 */
use serde::{Deserialize, Serialize};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

impl LoginRequest {
    pub fn validate(&self) -> Result<(), &'static str> {
        if self.username.is_empty() {
            return Err("username is required");
        }
        if self.password.is_empty() {
            return Err("password is required");
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    /// RFC-3339, UTC
    pub expires_at: String,
}

#[derive(Debug, Serialize)]
pub struct UserInfoResponse {
    pub user_id: String,
    pub request_id: String,
}
