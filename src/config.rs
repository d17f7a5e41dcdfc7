/*
 * Responsibility
 * - 環境変数からの設定読み込み (SERVER_PORT, SERVER_MODE, JWT_SECRET など)
 * - 設定値のバリデーション (不正なら起動失敗)
 */
use std::fmt;
use std::net::SocketAddr;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

pub const DEV_JWT_SECRET: &str = "dev-secret-change-in-prod";
pub const DEFAULT_DOCS_PATH: &str = "docs/public/user-manual.md";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ServerMode {
    Debug,
    Release,
    Test,
}

impl ServerMode {
    fn parse(raw: Option<&str>) -> Self {
        match raw.unwrap_or("debug").to_ascii_lowercase().as_str() {
            "release" | "production" | "prod" => Self::Release,
            "test" => Self::Test,
            _ => Self::Debug,
        }
    }

    pub fn is_production(&self) -> bool {
        matches!(self, Self::Release)
    }
}

#[derive(Debug)]
pub enum ConfigError {
    Invalid(&'static str),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Invalid(key) => write!(f, "invalid configuration: {}", key),
        }
    }
}

impl std::error::Error for ConfigError {}

/// Transport limits applied around the routes.
#[derive(Debug, Clone, Copy)]
pub struct Limits {
    pub body_limit_bytes: usize,
    pub request_timeout: Duration,
}

impl Default for Limits {
    fn default() -> Self {
        Self {
            body_limit_bytes: 1024 * 1024,
            request_timeout: Duration::from_secs(30),
        }
    }
}

#[derive(Clone)]
pub struct Config {
    pub addr: SocketAddr,
    pub mode: ServerMode,
    // HS256 shared secret, known only to the token issuer and the auth gate
    pub jwt_secret: String,
    pub docs_path: PathBuf,
    pub limits: Limits,
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        // Do not print the secret
        f.debug_struct("Config")
            .field("addr", &self.addr)
            .field("mode", &self.mode)
            .field("docs_path", &self.docs_path)
            .field("limits", &self.limits)
            .finish_non_exhaustive()
    }
}

impl Config {
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        Self::from_source(|key| std::env::var(key).ok())
    }

    /// Build the config from an arbitrary key lookup. Empty values count as unset.
    pub fn from_source<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        let port: u16 = match get("SERVER_PORT") {
            Some(raw) => raw
                .trim()
                .parse()
                .map_err(|_| ConfigError::Invalid("SERVER_PORT"))?,
            None => 8080,
        };

        let addr: SocketAddr = SocketAddr::from_str(&format!("0.0.0.0:{}", port))
            .map_err(|_| ConfigError::Invalid("SERVER_PORT"))?;

        let mode = ServerMode::parse(get("SERVER_MODE").as_deref());

        let jwt_secret = get("JWT_SECRET").unwrap_or_else(|| DEV_JWT_SECRET.to_string());
        if mode.is_production() && jwt_secret == DEV_JWT_SECRET {
            return Err(ConfigError::Invalid("JWT_SECRET"));
        }

        let docs_path = get("DOCS_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|| PathBuf::from(DEFAULT_DOCS_PATH));

        let defaults = Limits::default();
        let body_limit_bytes = match get("REQUEST_BODY_LIMIT_BYTES") {
            Some(raw) => raw
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|n| *n > 0)
                .ok_or(ConfigError::Invalid("REQUEST_BODY_LIMIT_BYTES"))?,
            None => defaults.body_limit_bytes,
        };
        let request_timeout = match get("REQUEST_TIMEOUT_SECONDS") {
            Some(raw) => raw
                .trim()
                .parse::<u64>()
                .ok()
                .filter(|n| *n > 0)
                .map(Duration::from_secs)
                .ok_or(ConfigError::Invalid("REQUEST_TIMEOUT_SECONDS"))?,
            None => defaults.request_timeout,
        };

        Ok(Self {
            addr,
            mode,
            jwt_secret,
            docs_path,
            limits: Limits {
                body_limit_bytes,
                request_timeout,
            },
        })
    }
}
