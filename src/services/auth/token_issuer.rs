use chrono::{DateTime, Duration, SecondsFormat, Utc};
use tracing::warn;

use crate::error::AppError;
use crate::services::auth::jwt::{JwtSigner, TokenClaims};

/// Placeholder credential store: a single hardcoded pair.
const DEMO_USERNAME: &str = "admin";
const DEMO_PASSWORD: &str = "admin123";
/// Subject written into every token issued for the demo user.
pub const DEMO_SUBJECT: &str = "user-123";

pub const ACCESS_TOKEN_TTL_HOURS: i64 = 72;

#[derive(Debug, Clone)]
pub struct IssuedToken {
    pub token: String,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// `expires_at` as RFC-3339 UTC, second precision (`2024-01-19T10:00:00Z`).
    pub fn expires_at_rfc3339(&self) -> String {
        self.expires_at.to_rfc3339_opts(SecondsFormat::Secs, true)
    }
}

#[derive(Clone)]
pub struct TokenIssuer {
    jwt: JwtSigner,
    ttl: Duration,
}

impl TokenIssuer {
    pub fn new(jwt: JwtSigner) -> Self {
        Self {
            jwt,
            ttl: Duration::hours(ACCESS_TOKEN_TTL_HOURS),
        }
    }

    pub fn issue(&self, username: &str, password: &str) -> Result<IssuedToken, AppError> {
        self.issue_at(username, password, Utc::now())
    }

    /// Check the credential pair and, on match, sign a token valid for 72 hours from `now`.
    pub fn issue_at(
        &self,
        username: &str,
        password: &str,
        now: DateTime<Utc>,
    ) -> Result<IssuedToken, AppError> {
        if username != DEMO_USERNAME || password != DEMO_PASSWORD {
            warn!(username, "login rejected: invalid credentials");
            return Err(AppError::Unauthorized("Invalid credentials"));
        }

        // Token timestamps are whole seconds; keep expires_at consistent with exp.
        let issued_at = DateTime::from_timestamp(now.timestamp(), 0).unwrap_or(now);
        let expires_at = issued_at + self.ttl;

        let claims = TokenClaims {
            sub: DEMO_SUBJECT.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
        };

        let token = self.jwt.sign(&claims)?;

        Ok(IssuedToken { token, expires_at })
    }
}
