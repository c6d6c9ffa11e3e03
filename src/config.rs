// src/config.rs
// =============================================================================
// Runtime configuration, read from the environment.
//
// main() calls dotenv first, so a local .env file with CANVAS_TOKEN and
// GITHUB_TOKEN works the same as exported variables.
//
// Missing tokens are not an error here: requests simply go out without an
// Authorization header and the remote API rejects them.
// =============================================================================

use crate::error::{ReportError, Result};
use std::time::Duration;

pub const DEFAULT_CANVAS_BASE_URL: &str = "https://learning.flatironschool.com";
pub const DEFAULT_GITHUB_API_URL: &str = "https://api.github.com";
pub const DEFAULT_GITHUB_RAW_URL: &str = "https://raw.githubusercontent.com";
pub const DEFAULT_GITHUB_WEB_PREFIX: &str = "https://github.com/";
const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    pub canvas_token: Option<String>,
    pub github_token: Option<String>,
    pub canvas_base_url: String,
    pub github_api_url: String,
    pub github_raw_url: String,
    /// Links starting with this prefix are treated as repository links
    pub github_web_prefix: String,
    pub request_timeout: Duration,
}

impl Default for Config {
    fn default() -> Self {
        Config {
            canvas_token: None,
            github_token: None,
            canvas_base_url: DEFAULT_CANVAS_BASE_URL.to_string(),
            github_api_url: DEFAULT_GITHUB_API_URL.to_string(),
            github_raw_url: DEFAULT_GITHUB_RAW_URL.to_string(),
            github_web_prefix: DEFAULT_GITHUB_WEB_PREFIX.to_string(),
            request_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl Config {
    /// Builds the configuration from process environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Builds the configuration from any key lookup
    ///
    /// Empty values are treated the same as unset ones.
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let defaults = Config::default();

        let request_timeout = match get("REQUEST_TIMEOUT_SECS") {
            Some(raw) => {
                let secs: u64 = raw.trim().parse().map_err(|_| {
                    ReportError::Config(format!(
                        "REQUEST_TIMEOUT_SECS must be a whole number of seconds, got '{}'",
                        raw
                    ))
                })?;
                Duration::from_secs(secs)
            }
            None => defaults.request_timeout,
        };

        Ok(Config {
            canvas_token: get("CANVAS_TOKEN"),
            github_token: get("GITHUB_TOKEN"),
            canvas_base_url: get("CANVAS_BASE_URL").unwrap_or(defaults.canvas_base_url),
            github_api_url: get("GITHUB_API_URL").unwrap_or(defaults.github_api_url),
            github_raw_url: get("GITHUB_RAW_URL").unwrap_or(defaults.github_raw_url),
            github_web_prefix: get("GITHUB_WEB_PREFIX").unwrap_or(defaults.github_web_prefix),
            request_timeout,
        })
    }
}
