//! Client configuration (code > env > defaults).

use std::path::PathBuf;
use std::time::Duration;

use bon::Builder;

/// Default API origin, matching the development server.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4000";

/// Default bound on a single refresh call. A hung renewal would otherwise
/// stall every queued caller.
pub const DEFAULT_REFRESH_TIMEOUT: Duration = Duration::from_secs(10);

/// Configuration for an authflow [`Session`](crate::session::Session).
///
/// # Example
/// ```
/// use authflow::config::AuthFlowConfig;
///
/// let config = AuthFlowConfig::builder()
///     .base_url("https://api.example.com".to_string())
///     .build();
/// ```
#[derive(Debug, Clone, Builder)]
pub struct AuthFlowConfig {
    /// Base URL of the remote auth API, without a trailing slash.
    #[builder(default = DEFAULT_BASE_URL.to_string())]
    pub base_url: String,
    /// Upper bound on a single refresh call.
    #[builder(default = DEFAULT_REFRESH_TIMEOUT)]
    pub refresh_timeout: Duration,
    /// Directory for the persisted refresh credential. `None` uses the
    /// per-user default (`~/.authflow`).
    pub storage_dir: Option<PathBuf>,
}

impl Default for AuthFlowConfig {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AuthFlowConfig {
    /// Load configuration from environment variables
    /// (`AUTHFLOW_API_BASE`, `AUTHFLOW_REFRESH_TIMEOUT_SECS`).
    pub fn from_env() -> Self {
        let _ = dotenvy::dotenv(); // load .env if present, ignore error

        let mut config = Self::default();
        if let Ok(base) = std::env::var("AUTHFLOW_API_BASE") {
            config.base_url = normalize_base_url(&base);
        }
        if let Some(secs) = std::env::var("AUTHFLOW_REFRESH_TIMEOUT_SECS")
            .ok()
            .and_then(|raw| raw.parse::<u64>().ok())
        {
            config.refresh_timeout = Duration::from_secs(secs);
        }
        config
    }

    /// Override the base URL, normalizing a trailing slash.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = normalize_base_url(&base_url.into());
        self
    }
}

fn normalize_base_url(raw: &str) -> String {
    raw.trim_end_matches('/').to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_points_at_local_dev_server() {
        let config = AuthFlowConfig::default();
        assert_eq!(config.base_url, DEFAULT_BASE_URL);
        assert_eq!(config.refresh_timeout, DEFAULT_REFRESH_TIMEOUT);
        assert!(config.storage_dir.is_none());
    }

    #[test]
    fn with_base_url_strips_trailing_slash() {
        let config = AuthFlowConfig::default().with_base_url("https://api.example.com/");
        assert_eq!(config.base_url, "https://api.example.com");
    }

    #[test]
    fn builder_accepts_custom_timeout() {
        let config = AuthFlowConfig::builder()
            .refresh_timeout(Duration::from_secs(3))
            .build();
        assert_eq!(config.refresh_timeout, Duration::from_secs(3));
    }
}
