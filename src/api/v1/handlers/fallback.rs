use crate::error::AppError;

/// Unmatched routes. Runs behind the auth gate like any protected route.
pub async fn not_found() -> AppError {
    AppError::NotFound("Resource not found")
}
