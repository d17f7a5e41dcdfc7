use axum::{Json, extract::State};

use crate::{api::v1::dto::system::DocsResponse, error::AppError, state::AppState};

/// GET /api/docs: the user manual as raw markdown.
pub async fn docs(State(state): State<AppState>) -> Result<Json<DocsResponse>, AppError> {
    let content = tokio::fs::read_to_string(state.docs_path.as_path())
        .await
        .map_err(|e| {
            tracing::warn!(path = %state.docs_path.display(), error = %e, "user manual unavailable");
            AppError::NotFound("Documentation not found")
        })?;

    Ok(Json(DocsResponse { content }))
}
