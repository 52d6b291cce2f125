//! Homework status endpoint client.
use crate::config::Config;
use crate::error::FetchError;
use serde_json::Value;

/// Where poll cycles get their raw status payload from.
pub trait StatusSource {
    /// Fetch statuses changed since `from_date` (Unix seconds).
    fn fetch(&self, from_date: i64) -> Result<Value, FetchError>;
}

/// Shared HTTP agent for the status API and Telegram.
///
/// Non-2xx answers come back as responses so callers can classify them.
pub fn http_agent() -> ureq::Agent {
    ureq::Agent::config_builder()
        .http_status_as_error(false)
        .build()
        .into()
}

/// Blocking client for the Practicum homework status API.
pub struct PracticumClient<'a> {
    agent: ureq::Agent,
    config: &'a Config,
}

impl<'a> PracticumClient<'a> {
    pub fn new(agent: ureq::Agent, config: &'a Config) -> Self {
        Self { agent, config }
    }
}

impl StatusSource for PracticumClient<'_> {
    fn fetch(&self, from_date: i64) -> Result<Value, FetchError> {
        let endpoint = self.config.endpoint.as_str();
        let mut response = self
            .agent
            .get(endpoint)
            .header(
                "Authorization",
                format!("OAuth {}", self.config.practicum_token),
            )
            .query("from_date", from_date.to_string())
            .call()
            .map_err(|source| FetchError::Transport {
                endpoint: endpoint.to_string(),
                source,
            })?;

        let status = response.status();
        if !status.is_success() {
            return Err(FetchError::Status {
                endpoint: endpoint.to_string(),
                status: status.as_u16(),
            });
        }

        response
            .body_mut()
            .read_json::<Value>()
            .map_err(|source| FetchError::Decode {
                endpoint: endpoint.to_string(),
                source,
            })
    }
}
