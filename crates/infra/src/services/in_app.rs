use super::{Channel, IChannelSender};
use crate::services::notifier::{INotifier, RealtimeEvent};
use nudge_domain::{Reminder, User};
use std::sync::Arc;

/// Delivers a due reminder to the recipient scoped real-time topic. Any
/// client connected for that recipient sees a `reminderTriggered` event.
pub struct InAppSender {
    notifier: Arc<dyn INotifier>,
}

impl InAppSender {
    pub fn new(notifier: Arc<dyn INotifier>) -> Self {
        Self { notifier }
    }
}

#[async_trait::async_trait]
impl IChannelSender for InAppSender {
    fn channel(&self) -> Channel {
        Channel::InApp
    }

    async fn send(&self, recipient: &User, reminder: &Reminder) -> anyhow::Result<()> {
        self.notifier
            .notify(
                &recipient.id,
                RealtimeEvent::ReminderTriggered(reminder.clone()),
            )
            .await;
        Ok(())
    }
}
