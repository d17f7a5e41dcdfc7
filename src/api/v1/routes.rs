/*
 * Responsibility
 * - v1 の URL 構造を定義
 * - /auth, /ping, /echo
 * - 認証の要否は route ではなく middleware::auth 側の public path で決める
 */
use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

use crate::api::v1::handlers::{
    auth::{login, me},
    echo::echo,
    ping::ping,
};

pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/auth/login", post(login))
        .route("/auth/me", get(me))
        .route("/ping", get(ping))
        .route("/echo", post(echo))
}
