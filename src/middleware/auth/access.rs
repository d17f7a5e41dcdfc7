//! Bearer token 検証 → Identity を RequestContext に入れる (auth gate)
//!
//! - public path (health / login / docs / swagger) は検証せずに通す
//! - `Authorization: Bearer <jwt>` を HS256 系で検証し、sub と claims を context へ
//! - 拒否時は 401 `{code: "UNAUTHORIZED", message, data: null}` で打ち切る

use std::sync::Arc;

use axum::{
    extract::{Request, State},
    http::{HeaderValue, header},
    middleware::Next,
    response::Response,
};

use crate::api::v1::extractors::{Identity, RequestContext};
use crate::error::AppError;
use crate::services::auth::jwt::TokenVerifier;

use super::public_paths::PublicPaths;

const BEARER_PREFIX: &str = "Bearer ";

/// Outcome of a successful gate decision.
#[derive(Debug, Clone, PartialEq)]
pub enum Decision {
    /// Public path; validation skipped, no identity.
    Public,
    Authenticated(Identity),
}

/// Immutable gate configuration, built once at startup.
#[derive(Debug, Clone)]
pub struct AuthGate {
    verifier: Arc<TokenVerifier>,
    public_paths: PublicPaths,
}

impl AuthGate {
    pub fn new(verifier: Arc<TokenVerifier>) -> Self {
        Self {
            verifier,
            public_paths: PublicPaths::default(),
        }
    }

    pub fn decide(
        &self,
        path: &str,
        authorization: Option<&HeaderValue>,
    ) -> Result<Decision, AppError> {
        self.decide_at(path, authorization, chrono::Utc::now().timestamp())
    }

    pub fn decide_at(
        &self,
        path: &str,
        authorization: Option<&HeaderValue>,
        now: i64,
    ) -> Result<Decision, AppError> {
        if self.public_paths.contains(path) {
            return Ok(Decision::Public);
        }

        let authorization =
            authorization.ok_or(AppError::Unauthorized("Missing authorization header"))?;

        let token = authorization
            .to_str()
            .ok()
            .and_then(bearer_token)
            .ok_or(AppError::Unauthorized("Invalid authorization format"))?;

        match self.verifier.verify_at(token, now) {
            Ok(verified) => Ok(Decision::Authenticated(verified.into())),
            Err(err) => {
                tracing::warn!(error = %err, path, "access token verification failed");
                Err(AppError::Unauthorized("Invalid or expired token"))
            }
        }
    }
}

/// The literal `Bearer ` prefix followed by a non-empty token.
fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix(BEARER_PREFIX)
        .filter(|token| !token.is_empty())
}

pub async fn authenticate(
    State(gate): State<AuthGate>,
    mut req: Request,
    next: Next,
) -> Result<Response, AppError> {
    let ctx = RequestContext::ensure(&mut req);

    let decision = gate.decide(req.uri().path(), req.headers().get(header::AUTHORIZATION))?;

    if let Decision::Authenticated(identity) = decision {
        // middleware → extractor への受け渡し
        ctx.authenticate(identity);
    }

    Ok(next.run(req).await)
}

#[cfg(test)]
mod tests {
    use crate::services::auth::jwt::{JwtSigner, TokenClaims};

    use super::*;

    const SECRET: &str = "gate-test-secret";
    const NOW: i64 = 1_700_000_000;

    fn gate() -> AuthGate {
        AuthGate::new(Arc::new(TokenVerifier::new(SECRET)))
    }

    fn bearer(secret: &str, exp: i64) -> HeaderValue {
        let token = JwtSigner::new(secret)
            .sign(&TokenClaims {
                sub: "user-123".into(),
                iat: NOW,
                exp,
            })
            .unwrap();
        HeaderValue::from_str(&format!("Bearer {token}")).unwrap()
    }

    fn rejection(result: Result<Decision, AppError>) -> &'static str {
        match result {
            Err(AppError::Unauthorized(message)) => message,
            other => panic!("expected unauthorized, got {other:?}"),
        }
    }

    #[test]
    fn public_paths_skip_validation() {
        let garbage = HeaderValue::from_static("garbage");

        for path in ["/health", "/api/v1/auth/login", "/api/docs", "/swagger/index.html"] {
            assert_eq!(gate().decide_at(path, None, NOW).unwrap(), Decision::Public);
            assert_eq!(
                gate().decide_at(path, Some(&garbage), NOW).unwrap(),
                Decision::Public
            );
        }
    }

    #[test]
    fn missing_header_is_rejected() {
        assert_eq!(
            rejection(gate().decide_at("/api/v1/ping", None, NOW)),
            "Missing authorization header"
        );
    }

    #[test]
    fn header_without_literal_prefix_is_rejected() {
        for raw in ["invalid-token", "bearer abc", "Bearer", "Bearer ", "Token abc", "Bearerabc"] {
            let value = HeaderValue::from_str(raw).unwrap();
            assert_eq!(
                rejection(gate().decide_at("/api/v1/ping", Some(&value), NOW)),
                "Invalid authorization format",
                "header {raw:?}"
            );
        }
    }

    #[test]
    fn invalid_or_expired_tokens_are_rejected() {
        let cases = [
            HeaderValue::from_static("Bearer invalid-token"),
            bearer("other-secret", NOW + 3600),
            bearer(SECRET, NOW),
            bearer(SECRET, NOW - 3600),
        ];

        for value in cases {
            assert_eq!(
                rejection(gate().decide_at("/api/v1/ping", Some(&value), NOW)),
                "Invalid or expired token"
            );
        }
    }

    #[test]
    fn valid_token_yields_identity() {
        let value = bearer(SECRET, NOW + 3600);

        match gate().decide_at("/api/v1/ping", Some(&value), NOW).unwrap() {
            Decision::Authenticated(identity) => {
                assert_eq!(identity.subject, "user-123");
                assert_eq!(identity.claims["exp"], NOW + 3600);
            }
            Decision::Public => panic!("protected path treated as public"),
        }
    }

    #[test]
    fn bearer_token_requires_the_exact_prefix() {
        assert_eq!(bearer_token("Bearer abc"), Some("abc"));
        assert_eq!(bearer_token("Bearer "), None);
        assert_eq!(bearer_token("Bearer"), None);
        assert_eq!(bearer_token("abc"), None);
    }
}
