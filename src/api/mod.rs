/*
 * Responsibility
 * - top-level の URL 構造 (/health, /api/docs, /swagger, /api/v1)
 * - 未定義 path の fallback
 */
pub mod v1;

use axum::{Router, routing::get};

use crate::state::AppState;
use v1::handlers::{docs::docs, fallback::not_found, health::health, swagger};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/health", get(health))
        .route("/api/docs", get(docs))
        .route("/swagger", get(swagger::root))
        .route("/swagger/index.html", get(swagger::index))
        .route("/swagger/doc.json", get(swagger::doc))
        .nest("/api/v1", v1::routes())
        .fallback(not_found)
}
