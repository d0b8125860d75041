//! Store API client configuration.

use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::result::{ProbeError, ProbeResult};

/// Public demo store
pub const DEFAULT_BASE_URL: &str = "https://automationexercise.com";

/// Default request timeout (30 seconds)
pub const DEFAULT_API_TIMEOUT_MS: u64 = 30_000;

/// Environment variable overriding the base URL
pub const BASE_URL_ENV: &str = "STOREPROBE_BASE_URL";

/// Environment variable overriding the timeout, in milliseconds
pub const TIMEOUT_ENV: &str = "STOREPROBE_TIMEOUT_MS";

/// Store API client configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    /// Scheme and host, optionally with a path prefix
    pub base_url: String,
    /// Per-request timeout in milliseconds
    pub timeout_ms: u64,
    /// `User-Agent` header value
    pub user_agent: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: DEFAULT_BASE_URL.to_string(),
            timeout_ms: DEFAULT_API_TIMEOUT_MS,
            user_agent: format!("storeprobe/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl ApiConfig {
    /// Create configuration with defaults
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Defaults overridden by `STOREPROBE_BASE_URL` and `STOREPROBE_TIMEOUT_MS`
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] if the timeout variable is not a number.
    pub fn from_env() -> ProbeResult<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Defaults overridden through an arbitrary variable lookup
    ///
    /// # Errors
    ///
    /// Returns [`ProbeError::Config`] if the timeout value is not a number.
    pub fn from_lookup<F>(lookup: F) -> ProbeResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut config = Self::default();
        if let Some(url) = lookup(BASE_URL_ENV).filter(|u| !u.trim().is_empty()) {
            config.base_url = url.trim().to_string();
        }
        if let Some(raw) = lookup(TIMEOUT_ENV) {
            config.timeout_ms = raw.trim().parse().map_err(|_| {
                ProbeError::config(format!("{TIMEOUT_ENV} must be milliseconds, got {raw:?}"))
            })?;
        }
        Ok(config)
    }

    /// Set the base URL
    #[must_use]
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Set the timeout in milliseconds
    #[must_use]
    pub const fn with_timeout_ms(mut self, timeout_ms: u64) -> Self {
        self.timeout_ms = timeout_ms;
        self
    }

    /// Set the user agent
    #[must_use]
    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    /// Timeout as Duration
    #[must_use]
    pub const fn timeout(&self) -> Duration {
        Duration::from_millis(self.timeout_ms)
    }
}

/// Join `base` and `path` with exactly one slash between them.
///
/// Repeated slashes at the seam are collapsed, so `https://host//api/x`-style
/// endpoints resolve to `https://host/api/x`. Slashes inside `base` are left
/// alone.
#[must_use]
pub fn join_endpoint(base: &str, path: &str) -> String {
    let base = base.trim_end_matches('/');
    let path = path.trim_start_matches('/');
    if path.is_empty() {
        return base.to_string();
    }
    format!("{base}/{path}")
}
