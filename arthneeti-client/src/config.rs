//! Runtime configuration for API transports.
use std::time::Duration;

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:8000/api";
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Scheme prefixed to the credential in the `Authorization` header.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AuthScheme {
    /// `Authorization: Bearer <token>` (identity-provider ID tokens).
    Bearer,
    /// `Authorization: Token <token>` (tokens issued by the login endpoint).
    #[default]
    Token,
}

impl AuthScheme {
    #[must_use]
    pub const fn prefix(self) -> &'static str {
        match self {
            Self::Bearer => "Bearer",
            Self::Token => "Token",
        }
    }

    #[must_use]
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_ascii_lowercase().as_str() {
            "bearer" => Some(Self::Bearer),
            "token" => Some(Self::Token),
            _ => None,
        }
    }

    #[must_use]
    pub fn header_value(self, token: &str) -> String {
        format!("{} {token}", self.prefix())
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub api_base_url: String,
    pub timeout: Duration,
    pub auth_scheme: AuthScheme,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            auth_scheme: AuthScheme::default(),
        }
    }
}

impl ClientConfig {
    #[must_use]
    pub fn with_base_url(mut self, base: impl Into<String>) -> Self {
        self.api_base_url = base.into();
        self
    }

    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    #[must_use]
    pub const fn with_auth_scheme(mut self, scheme: AuthScheme) -> Self {
        self.auth_scheme = scheme;
        self
    }

    /// Defaults overridden by `ARTHNEETI_API_URL`, `ARTHNEETI_TIMEOUT_SECS`
    /// and `ARTHNEETI_AUTH_SCHEME` when set. Malformed values are ignored.
    #[must_use]
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let mut cfg = Self::default();
        if let Some(url) = lookup("ARTHNEETI_API_URL").filter(|v| !v.trim().is_empty()) {
            cfg.api_base_url = url.trim().to_string();
        }
        if let Some(secs) = lookup("ARTHNEETI_TIMEOUT_SECS").and_then(|v| v.trim().parse().ok()) {
            cfg.timeout = Duration::from_secs(secs);
        }
        if let Some(scheme) = lookup("ARTHNEETI_AUTH_SCHEME").and_then(|v| AuthScheme::parse(&v)) {
            cfg.auth_scheme = scheme;
        }
        cfg
    }

    /// Absolute URL for a path relative to the API root.
    #[must_use]
    pub fn url(&self, path: &str) -> String {
        join_url(&self.api_base_url, path)
    }
}

fn join_url(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let rel = path.trim_start_matches('/');
    format!("{base}/{rel}")
}
