/*
 * Responsibility
 * - tracing / panic hook の初期化
 * - Config 読み込み → 依存生成 → Router 組み立て
 * - Middleware (pipeline / limits) の適用
 * - axum::serve() で起動
 */
use std::backtrace::Backtrace;
use std::net::SocketAddr;
use std::panic;
use std::sync::Arc;

use anyhow::Result;
use axum::Router;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use crate::api;
use crate::config::{Config, Limits, ServerMode};
use crate::middleware::{self, auth::AuthGate};
use crate::services::auth::AuthService;
use crate::state::AppState;

fn init_tracing(mode: ServerMode) {
    // Prefer RUST_LOG if set; otherwise use a sensible default.
    // Ex:
    // RUST_LOG=info,api_gateway=debug cargo run
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info"));

    let registry = tracing_subscriber::registry().with(filter);

    // Release: one JSON object per line for log shippers.
    if mode.is_production() {
        registry
            .with(tracing_subscriber::fmt::layer().json().with_current_span(true))
            .init();
    } else {
        registry.with(tracing_subscriber::fmt::layer()).init();
    }
}

fn init_panic_hook(mode: ServerMode) {
    // Keep the default hook as a fallback (prints to stderr with location/payload).
    let default_hook = panic::take_hook();

    panic::set_hook(Box::new(move |info| {
        // Always surface panics via tracing; inside a request the event carries
        // the request span (request_id). The request itself is answered by
        // middleware::recovery, so the process keeps serving.
        let backtrace = Backtrace::force_capture();
        tracing::error!(panic = %info, backtrace = %backtrace, "panic");

        if !mode.is_production() {
            default_hook(info);
        }
    }))
}

pub async fn run() -> Result<()> {
    let config = Config::from_env()?;
    init_tracing(config.mode);
    init_panic_hook(config.mode);

    tracing::info!(
        address = %config.addr,
        mode = ?config.mode,
        version = env!("CARGO_PKG_VERSION"),
        "starting server"
    );

    let state = build_state(&config);
    let app = build_router(state, config.limits);

    let listener = tokio::net::TcpListener::bind(config.addr).await?;
    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .with_graceful_shutdown(shutdown_signal())
    .await?;

    tracing::info!("server stopped");
    Ok(())
}

fn build_state(config: &Config) -> AppState {
    // Build process-level services here and inject them into the shared application state.
    // The secret is read once; issuer and verifier each keep their own key.
    let auth = Arc::new(AuthService::new(&config.jwt_secret));

    AppState::new(auth, config.docs_path.clone())
}

/// Routes + limits + request pipeline.
pub fn build_router(state: AppState, limits: Limits) -> Router {
    let gate = AuthGate::new(state.auth.verifier());

    let router = api::routes().with_state(state);
    let router = middleware::limit(router, limits);
    middleware::apply(router, gate)
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!(error = %e, "failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    tracing::info!("shutdown signal received");
}
