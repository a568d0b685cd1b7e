use super::{reminder_title, Channel, IChannelSender};
use nudge_domain::{Reminder, User};
use serde::Serialize;

/// Sends mobile push notifications by posting to a push gateway.
pub struct PushGatewaySender {
    url: String,
    client: reqwest::Client,
}

impl PushGatewaySender {
    pub fn new(url: String) -> Self {
        Self {
            url,
            client: reqwest::Client::new(),
        }
    }
}

#[derive(Debug, Serialize)]
struct PushGatewayRequest<'a> {
    device_token: &'a str,
    title: &'a str,
    body: &'a str,
}

#[async_trait::async_trait]
impl IChannelSender for PushGatewaySender {
    fn channel(&self) -> Channel {
        Channel::Push
    }

    async fn send(&self, recipient: &User, reminder: &Reminder) -> anyhow::Result<()> {
        let device_token = recipient
            .push_token
            .as_deref()
            .ok_or_else(|| anyhow::anyhow!("Recipient has no registered device token"))?;

        let res = self
            .client
            .post(&self.url)
            .json(&PushGatewayRequest {
                device_token,
                title: reminder_title(reminder.reminder_type),
                body: &reminder.message,
            })
            .send()
            .await?;

        res.error_for_status()?;
        Ok(())
    }
}
