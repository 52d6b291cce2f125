//! Telegram delivery of status and failure messages.
use crate::config::Config;
use crate::error::DeliveryError;
use serde::{Deserialize, Serialize};

/// Delivers plain-text messages to the configured chat.
pub trait Notifier {
    fn notify(&self, text: &str) -> Result<(), DeliveryError>;
}

#[derive(Serialize)]
struct SendMessage<'a> {
    chat_id: &'a str,
    text: &'a str,
}

#[derive(Deserialize)]
struct TelegramReply {
    ok: bool,
    #[serde(default)]
    description: Option<String>,
}

/// Bot API `sendMessage` client bound to one chat.
pub struct TelegramNotifier<'a> {
    agent: ureq::Agent,
    config: &'a Config,
}

impl<'a> TelegramNotifier<'a> {
    pub fn new(agent: ureq::Agent, config: &'a Config) -> Self {
        Self { agent, config }
    }

    fn send_message_url(&self) -> String {
        format!(
            "{}/bot{}/sendMessage",
            self.config.telegram_api.trim_end_matches('/'),
            self.config.telegram_token
        )
    }
}

impl Notifier for TelegramNotifier<'_> {
    fn notify(&self, text: &str) -> Result<(), DeliveryError> {
        let chat_id = self.config.chat_id.as_str();
        let mut response = self
            .agent
            .post(self.send_message_url())
            .send_json(SendMessage { chat_id, text })
            .map_err(|source| DeliveryError::Transport {
                chat_id: chat_id.to_string(),
                source,
            })?;

        let status = response.status();
        // Telegram explains rejections in the body; a 2xx without one is accepted.
        let reply = response.body_mut().read_json::<TelegramReply>().ok();
        let accepted = status.is_success() && reply.as_ref().map_or(true, |reply| reply.ok);
        if !accepted {
            return Err(DeliveryError::Rejected {
                chat_id: chat_id.to_string(),
                status: status.as_u16(),
                description: reply
                    .and_then(|reply| reply.description)
                    .unwrap_or_else(|| "no description".to_string()),
            });
        }

        tracing::debug!(chat_id, bytes = text.len(), "telegram message delivered");
        Ok(())
    }
}
