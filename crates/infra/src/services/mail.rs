use super::{reminder_title, Channel, IChannelSender};
use crate::config::MailRelayConfig;
use nudge_domain::{Reminder, User};
use serde::Serialize;

/// Sends email notifications by posting to a transactional mail relay.
pub struct MailRelaySender {
    config: MailRelayConfig,
    client: reqwest::Client,
}

impl MailRelaySender {
    pub fn new(config: MailRelayConfig) -> Self {
        Self {
            config,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct MailRelayRequest<'a> {
    to: &'a str,
    subject: &'a str,
    body: &'a str,
}

#[async_trait::async_trait]
impl IChannelSender for MailRelaySender {
    fn channel(&self) -> Channel {
        Channel::Email
    }

    async fn send(&self, recipient: &User, reminder: &Reminder) -> anyhow::Result<()> {
        let to = recipient
            .email
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Recipient has no email address"))?;

        let res = self
            .client
            .post(&self.config.url)
            .header("nudge-mail-relay-key", &self.config.key)
            .json(&MailRelayRequest {
                to,
                subject: reminder_title(reminder.reminder_type),
                body: &reminder.message,
            })
            .send()
            .await?;

        res.error_for_status()?;
        Ok(())
    }
}
