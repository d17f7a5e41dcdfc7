/*
 * Responsibility
 * - middleware の公開インターフェース
 * - pipeline の各段 (recovery / access_log / request_id / auth) と組み立て (http)
 */
pub mod access_log;
pub mod auth;
pub mod http;
pub mod recovery;
pub mod request_id;

pub use http::{apply, limit};
