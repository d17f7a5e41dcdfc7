/*!
 * Request context extractor
 *
 * Responsibility:
 * - pipeline が作ったリクエスト単位のコンテキストを handler に提供する
 * - HTTP / axum 依存は core に閉じ込め、型定義は types に分離する
 *
 * Public API:
 * - RequestContext
 * - Identity
 * - Authenticated
 */

mod core;
mod types;

pub use self::core::Authenticated;
pub use types::{Identity, RequestContext};
