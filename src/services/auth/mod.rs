/*
 * Responsibility
 * - 発行 (TokenIssuer) と検証 (TokenVerifier) を同じ secret から組み立てる
 * - handler / middleware には AuthService 経由で渡す
 */
pub mod jwt;
pub mod token_issuer;

use std::sync::Arc;

use jwt::{JwtSigner, TokenVerifier};
use token_issuer::TokenIssuer;

#[derive(Clone)]
pub struct AuthService {
    issuer: TokenIssuer,
    verifier: Arc<TokenVerifier>,
}

impl std::fmt::Debug for AuthService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        // Do not print key material
        f.debug_struct("AuthService")
            .field("verifier", &self.verifier)
            .finish_non_exhaustive()
    }
}

impl AuthService {
    pub fn new(secret: &str) -> Self {
        Self {
            issuer: TokenIssuer::new(JwtSigner::new(secret)),
            verifier: Arc::new(TokenVerifier::new(secret)),
        }
    }

    pub fn issuer(&self) -> &TokenIssuer {
        &self.issuer
    }

    pub fn verifier(&self) -> Arc<TokenVerifier> {
        Arc::clone(&self.verifier)
    }
}
