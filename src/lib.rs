/*
 * Responsibility
 * - crate の公開モジュール (binary と tests/ の両方から使う)
 */
pub mod api;
pub mod app;
pub mod client;
pub mod config;
pub mod error;
pub mod middleware;
pub mod services;
pub mod state;

pub use api::v1::extractors::RequestContext;
