/*
 * Responsibility
 * - GET /health (疎通用, public)
 */
use axum::{Json, extract::State};
use chrono::{SecondsFormat, Utc};

use crate::{api::v1::dto::system::HealthResponse, state::AppState};

pub async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: state.version,
        timestamp: Utc::now().to_rfc3339_opts(SecondsFormat::Secs, true),
    })
}
