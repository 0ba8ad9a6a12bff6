//! Application configuration
//!
//! Configuration loaded from a `.ghd.toml` file.

use serde::{Deserialize, Serialize};

/// Application configuration loaded from .ghd.toml
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct AppConfig {
    /// Background loop tick, in seconds
    #[serde(default = "default_poll_interval_secs")]
    pub poll_interval_secs: u64,

    /// Minimum seconds between refreshes of the same tracked user
    #[serde(default = "default_user_refresh_secs")]
    pub user_refresh_secs: i64,

    /// GitHub API base URL (override for GitHub Enterprise)
    #[serde(default = "default_api_url")]
    pub api_url: String,
}

fn default_poll_interval_secs() -> u64 {
    1
}

fn default_user_refresh_secs() -> i64 {
    60
}

fn default_api_url() -> String {
    "https://api.github.com".to_string()
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            poll_interval_secs: default_poll_interval_secs(),
            user_refresh_secs: default_user_refresh_secs(),
            api_url: default_api_url(),
        }
    }
}

impl AppConfig {
    /// Load config from CWD first, then home directory, or use defaults
    pub fn load() -> Self {
        if let Some(content) = crate::load_config_file() {
            match toml::from_str(&content) {
                Ok(config) => {
                    log::info!("Loaded app config from file");
                    return config;
                }
                Err(e) => {
                    log::warn!("Failed to parse config file: {}", e);
                }
            }
        }

        log::debug!("Using default app config");
        Self::default()
    }
}
