//! Client configuration loaded from environment variables.
//!
//! | Variable                    | Default                 |
//! |-----------------------------|-------------------------|
//! | `TASKBOARD_API_URL`         | `http://127.0.0.1:5000` |
//! | `TASKBOARD_TIMEOUT_SECS`    | `30`                    |
//! | `TASKBOARD_REQUIRE_PROJECT` | `true`                  |
//! | `TASKBOARD_TOKEN`           | unset                   |
//! | `TASKBOARD_LOG`             | `info`                  |

use std::time::Duration;
use thiserror::Error;

const API_URL_KEY: &str = "TASKBOARD_API_URL";
const TIMEOUT_KEY: &str = "TASKBOARD_TIMEOUT_SECS";
const REQUIRE_PROJECT_KEY: &str = "TASKBOARD_REQUIRE_PROJECT";
const TOKEN_KEY: &str = "TASKBOARD_TOKEN";
const LOG_KEY: &str = "TASKBOARD_LOG";

const DEFAULT_API_URL: &str = "http://127.0.0.1:5000";
const DEFAULT_TIMEOUT_SECS: u64 = 30;
const DEFAULT_LOG_FILTER: &str = "info";

/// Errors raised while reading configuration values.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum ConfigError {
    /// A variable is set but its value cannot be used.
    #[error("invalid value for {key}: {message}")]
    InvalidValue {
        /// Name of the offending variable.
        key: &'static str,
        /// Why the value was rejected.
        message: String,
    },
}

/// Settings for the remote API client and the task board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base URL of the task API, without a trailing slash.
    pub api_url: String,
    /// Per-request timeout.
    pub timeout: Duration,
    /// Whether new tasks must reference a project.
    pub require_project: bool,
    /// Bearer token to start the session with.
    pub token: Option<String>,
    /// Default `tracing` filter when `RUST_LOG` is unset.
    pub log_filter: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            api_url: DEFAULT_API_URL.to_owned(),
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            require_project: true,
            token: None,
            log_filter: DEFAULT_LOG_FILTER.to_owned(),
        }
    }
}

impl ClientConfig {
    /// Loads configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a variable is set to a value
    /// that cannot be parsed.
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Loads configuration through an arbitrary key lookup.
    ///
    /// Unset or blank values fall back to their defaults.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when a value cannot be parsed.
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let read = |key: &str| {
            lookup(key)
                .map(|value| value.trim().to_owned())
                .filter(|value| !value.is_empty())
        };
        let defaults = Self::default();

        let api_url = match read(API_URL_KEY) {
            Some(url) => parse_api_url(&url)?,
            None => defaults.api_url,
        };
        let timeout = match read(TIMEOUT_KEY) {
            Some(raw) => parse_timeout(&raw)?,
            None => defaults.timeout,
        };
        let require_project = match read(REQUIRE_PROJECT_KEY) {
            Some(raw) => parse_flag(REQUIRE_PROJECT_KEY, &raw)?,
            None => defaults.require_project,
        };

        Ok(Self {
            api_url,
            timeout,
            require_project,
            token: read(TOKEN_KEY),
            log_filter: read(LOG_KEY).unwrap_or(defaults.log_filter),
        })
    }

    /// Overrides the API base URL.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::InvalidValue`] when the URL is not `http(s)`.
    pub fn with_api_url(mut self, url: &str) -> Result<Self, ConfigError> {
        self.api_url = parse_api_url(url)?;
        Ok(self)
    }

    /// Overrides the bearer token.
    #[must_use]
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }
}

fn parse_api_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    let has_host = trimmed
        .strip_prefix("http://")
        .or_else(|| trimmed.strip_prefix("https://"))
        .is_some_and(|rest| !rest.is_empty());
    if !has_host {
        return Err(ConfigError::InvalidValue {
            key: API_URL_KEY,
            message: format!("'{raw}' is not an http(s) URL"),
        });
    }
    Ok(trimmed.to_owned())
}

fn parse_timeout(raw: &str) -> Result<Duration, ConfigError> {
    match raw.parse::<u64>() {
        Ok(secs) if secs > 0 => Ok(Duration::from_secs(secs)),
        Ok(_) => Err(ConfigError::InvalidValue {
            key: TIMEOUT_KEY,
            message: "timeout must be at least one second".to_owned(),
        }),
        Err(err) => Err(ConfigError::InvalidValue {
            key: TIMEOUT_KEY,
            message: err.to_string(),
        }),
    }
}

fn parse_flag(key: &'static str, raw: &str) -> Result<bool, ConfigError> {
    match raw.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::InvalidValue {
            key,
            message: format!("'{raw}' is not a boolean"),
        }),
    }
}
