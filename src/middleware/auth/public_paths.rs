/// Path prefixes that bypass token validation.
const PUBLIC_PATH_PREFIXES: &[&str] = &["/health", "/api/v1/auth/login", "/api/docs", "/swagger"];

#[derive(Debug, Clone)]
pub struct PublicPaths {
    prefixes: &'static [&'static str],
}

impl Default for PublicPaths {
    fn default() -> Self {
        Self {
            prefixes: PUBLIC_PATH_PREFIXES,
        }
    }
}

impl PublicPaths {
    /// Prefix match, so `/swagger/index.html` and `/swagger/doc.json` are public too.
    pub fn contains(&self, path: &str) -> bool {
        self.prefixes.iter().any(|prefix| path.starts_with(prefix))
    }
}
