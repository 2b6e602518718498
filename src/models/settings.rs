//! Settings Models
//!
//! Application configuration and settings data structures.

use serde::{Deserialize, Serialize};

/// Environment variable that overrides `api_base_url` for one run.
pub const API_URL_ENV: &str = "SHIFT_DESK_API_URL";

/// Application configuration stored in config.json
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AppConfig {
    /// Root URL of the scheduling service, e.g. `http://localhost:8000/api`
    pub api_base_url: String,
    /// Per-request timeout in seconds
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,
    /// Optional proxy for every service call (http, https or socks5 URL)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub proxy_url: Option<String>,
    /// `tracing` filter used when RUST_LOG is unset
    #[serde(default = "default_log_filter")]
    pub log_filter: String,
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_log_filter() -> String {
    "info".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "http://localhost:8000/api".to_string(),
            request_timeout_secs: default_request_timeout_secs(),
            proxy_url: None,
            log_filter: default_log_filter(),
        }
    }
}

/// Settings update request (partial update)
#[derive(Debug, Clone, Serialize, Deserialize, Default)]
pub struct SettingsUpdate {
    pub api_base_url: Option<String>,
    pub request_timeout_secs: Option<u64>,
    /// `Some(None)` clears the proxy.
    pub proxy_url: Option<Option<String>>,
    pub log_filter: Option<String>,
}

impl SettingsUpdate {
    /// Whether the update would change nothing.
    pub fn is_empty(&self) -> bool {
        self.api_base_url.is_none()
            && self.request_timeout_secs.is_none()
            && self.proxy_url.is_none()
            && self.log_filter.is_none()
    }
}

impl AppConfig {
    /// Apply a partial update to the configuration
    pub fn apply_update(&mut self, update: SettingsUpdate) {
        if let Some(url) = update.api_base_url {
            self.api_base_url = url;
        }
        if let Some(timeout) = update.request_timeout_secs {
            self.request_timeout_secs = timeout;
        }
        if let Some(proxy) = update.proxy_url {
            self.proxy_url = proxy;
        }
        if let Some(filter) = update.log_filter {
            self.log_filter = filter;
        }
    }

    /// Replace the base URL from the environment, if set and non-empty.
    pub fn apply_env_override(&mut self) {
        if let Ok(url) = std::env::var(API_URL_ENV) {
            if !url.trim().is_empty() {
                self.api_base_url = url.trim().to_string();
            }
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        let url = self.api_base_url.trim();
        if url.is_empty() {
            return Err("api_base_url cannot be empty".to_string());
        }
        if !(url.starts_with("http://") || url.starts_with("https://")) {
            return Err(format!(
                "Invalid api_base_url: {}. Must start with http:// or https://",
                url
            ));
        }

        if self.request_timeout_secs == 0 {
            return Err("request_timeout_secs must be at least 1 second".to_string());
        }

        if let Some(proxy) = &self.proxy_url {
            if proxy.trim().is_empty() {
                return Err("proxy_url cannot be blank; omit it instead".to_string());
            }
        }

        Ok(())
    }
}
