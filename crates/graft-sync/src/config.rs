//! Sync service configuration.

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{Result, SyncError};

pub const DEFAULT_API_BASE_URL: &str = "https://api.figma.com/v1";
pub const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_REFRESH_TIMEOUT_SECS: u64 = 30;

/// Environment variable overriding [`SyncConfig::api_base_url`].
pub const ENV_API_BASE_URL: &str = "GRAFT_API_BASE_URL";
/// Environment variable overriding [`SyncConfig::request_timeout_secs`].
pub const ENV_REQUEST_TIMEOUT_SECS: &str = "GRAFT_REQUEST_TIMEOUT_SECS";
/// Environment variable overriding [`SyncConfig::refresh_timeout_secs`].
pub const ENV_REFRESH_TIMEOUT_SECS: &str = "GRAFT_REFRESH_TIMEOUT_SECS";

/// Configuration of the external design API client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SyncConfig {
    pub api_base_url: String,
    /// Applied to every outbound request.
    pub request_timeout_secs: u64,
    /// Applied to each credential lookup and refresh.
    pub refresh_timeout_secs: u64,
    pub user_agent: String,
}

impl Default for SyncConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            request_timeout_secs: DEFAULT_REQUEST_TIMEOUT_SECS,
            refresh_timeout_secs: DEFAULT_REFRESH_TIMEOUT_SECS,
            user_agent: format!("graft-sync/{}", env!("CARGO_PKG_VERSION")),
        }
    }
}

impl SyncConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Load from JSON; missing fields keep their defaults.
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Defaults overridden by `GRAFT_*` environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let mut config = Self::default();
        if let Some(url) = lookup(ENV_API_BASE_URL) {
            config.api_base_url = url;
        }
        if let Some(secs) = lookup(ENV_REQUEST_TIMEOUT_SECS) {
            config.request_timeout_secs = parse_secs(ENV_REQUEST_TIMEOUT_SECS, &secs)?;
        }
        if let Some(secs) = lookup(ENV_REFRESH_TIMEOUT_SECS) {
            config.refresh_timeout_secs = parse_secs(ENV_REFRESH_TIMEOUT_SECS, &secs)?;
        }
        config.validate()?;
        Ok(config)
    }

    pub fn with_api_base_url(mut self, url: impl Into<String>) -> Self {
        self.api_base_url = url.into();
        self
    }

    pub fn with_request_timeout_secs(mut self, secs: u64) -> Self {
        self.request_timeout_secs = secs;
        self
    }

    pub fn with_refresh_timeout_secs(mut self, secs: u64) -> Self {
        self.refresh_timeout_secs = secs;
        self
    }

    pub fn with_user_agent(mut self, user_agent: impl Into<String>) -> Self {
        self.user_agent = user_agent.into();
        self
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn refresh_timeout(&self) -> Duration {
        Duration::from_secs(self.refresh_timeout_secs)
    }

    /// Base URL without a trailing slash.
    pub fn base_url(&self) -> &str {
        self.api_base_url.trim_end_matches('/')
    }

    fn validate(&self) -> Result<()> {
        if self.request_timeout_secs == 0 {
            return Err(SyncError::Config("request timeout must be positive".to_string()));
        }
        if self.refresh_timeout_secs == 0 {
            return Err(SyncError::Config("refresh timeout must be positive".to_string()));
        }
        if !(self.api_base_url.starts_with("http://") || self.api_base_url.starts_with("https://")) {
            return Err(SyncError::Config(format!(
                "api base url must be http(s): {}",
                self.api_base_url
            )));
        }
        Ok(())
    }
}

fn parse_secs(key: &str, value: &str) -> Result<u64> {
    value
        .trim()
        .parse()
        .map_err(|_| SyncError::Config(format!("{} must be a whole number of seconds, got {:?}", key, value)))
}
