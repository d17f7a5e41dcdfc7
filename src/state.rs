/*
 * Responsibility
 * - Router に紐づける共有コンテキスト (AppState)
 *   - auth: AuthService, docs_path, version
 * - Clone 前提で持つ (内部は Arc/Clone cheap)
 */
use std::path::PathBuf;
use std::sync::Arc;

use crate::services::auth::AuthService;

#[derive(Clone, Debug)]
pub struct AppState {
    pub auth: Arc<AuthService>,
    pub docs_path: Arc<PathBuf>,
    pub version: &'static str,
}

impl AppState {
    pub fn new(auth: Arc<AuthService>, docs_path: PathBuf) -> Self {
        Self {
            auth,
            docs_path: Arc::new(docs_path),
            version: env!("CARGO_PKG_VERSION"),
        }
    }
}
