//! Runtime configuration and the startup token guard.
//!
//! Secrets are read from the environment exactly once into `RawCredentials`.
//! `check_tokens` decides whether the process may start; `Config::from_raw`
//! then produces the immutable value every other component borrows.
use crate::error::ConfigError;
use std::env;
use std::fmt;
use std::time::Duration;

pub const PRACTICUM_TOKEN_VAR: &str = "PRACTICUM_TOKEN";
pub const TELEGRAM_TOKEN_VAR: &str = "TELEGRAM_TOKEN";
pub const CHAT_ID_VAR: &str = "CHAT_ID";
pub const ENDPOINT_VAR: &str = "PRACTICUM_ENDPOINT";

pub const DEFAULT_ENDPOINT: &str = "https://practicum.yandex.ru/api/user_api/homework_statuses/";
pub const DEFAULT_TELEGRAM_API: &str = "https://api.telegram.org";
pub const DEFAULT_POLL_INTERVAL_SECS: u64 = 600;

/// Configuration values exactly as found at startup, before any checks.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawCredentials {
    pub practicum_token: Option<String>,
    pub telegram_token: Option<String>,
    pub chat_id: Option<String>,
    pub endpoint: Option<String>,
}

impl RawCredentials {
    /// Read credentials from the process environment.
    ///
    /// The endpoint resolves as: explicit override, then `PRACTICUM_ENDPOINT`,
    /// then the public Practicum URL.
    pub fn from_env(endpoint_override: Option<String>) -> Self {
        Self::from_lookup(|name| env::var(name).ok(), endpoint_override)
    }

    pub fn from_lookup<F>(lookup: F, endpoint_override: Option<String>) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let endpoint = endpoint_override
            .or_else(|| lookup(ENDPOINT_VAR))
            .or_else(|| Some(DEFAULT_ENDPOINT.to_string()));
        Self {
            practicum_token: lookup(PRACTICUM_TOKEN_VAR),
            telegram_token: lookup(TELEGRAM_TOKEN_VAR),
            chat_id: lookup(CHAT_ID_VAR),
            endpoint,
        }
    }

    fn required(&self) -> [(&'static str, Option<&str>); 4] {
        [
            (PRACTICUM_TOKEN_VAR, self.practicum_token.as_deref()),
            (TELEGRAM_TOKEN_VAR, self.telegram_token.as_deref()),
            (CHAT_ID_VAR, self.chat_id.as_deref()),
            (ENDPOINT_VAR, self.endpoint.as_deref()),
        ]
    }
}

/// The first required value that is missing or empty, in check order.
pub fn first_problem(raw: &RawCredentials) -> Option<ConfigError> {
    raw.required()
        .into_iter()
        .find_map(|(name, value)| problem(name, value))
}

fn problem(name: &'static str, value: Option<&str>) -> Option<ConfigError> {
    match value {
        None => Some(ConfigError::Missing { name }),
        Some("") => Some(ConfigError::Empty { name }),
        Some(_) => None,
    }
}

/// Verify every required value is present and non-empty.
///
/// Logs the first failing value only.
pub fn check_tokens(raw: &RawCredentials) -> bool {
    match first_problem(raw) {
        None => true,
        Some(problem) => {
            tracing::error!(%problem, "startup configuration check failed");
            false
        }
    }
}

/// Validated, immutable runtime configuration.
#[derive(Clone)]
pub struct Config {
    pub practicum_token: String,
    pub telegram_token: String,
    pub chat_id: String,
    pub endpoint: String,
    pub telegram_api: String,
    pub poll_interval: Duration,
}

impl Config {
    pub fn from_raw(
        raw: RawCredentials,
        telegram_api: String,
        poll_interval: Duration,
    ) -> Result<Self, ConfigError> {
        // Fields are checked in the same order as `first_problem`.
        Ok(Self {
            practicum_token: require(raw.practicum_token, PRACTICUM_TOKEN_VAR)?,
            telegram_token: require(raw.telegram_token, TELEGRAM_TOKEN_VAR)?,
            chat_id: require(raw.chat_id, CHAT_ID_VAR)?,
            endpoint: require(raw.endpoint, ENDPOINT_VAR)?,
            telegram_api,
            poll_interval,
        })
    }
}

impl fmt::Debug for Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Config")
            .field("practicum_token", &"<redacted>")
            .field("telegram_token", &"<redacted>")
            .field("chat_id", &self.chat_id)
            .field("endpoint", &self.endpoint)
            .field("telegram_api", &self.telegram_api)
            .field("poll_interval", &self.poll_interval)
            .finish()
    }
}

fn require(value: Option<String>, name: &'static str) -> Result<String, ConfigError> {
    match problem(name, value.as_deref()) {
        Some(problem) => Err(problem),
        None => Ok(value.unwrap_or_default()),
    }
}
