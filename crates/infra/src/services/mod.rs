mod in_app;
mod mail;
mod notifier;
mod push;

use crate::config::Config;
pub use in_app::InAppSender;
pub use mail::MailRelaySender;
pub use notifier::{BroadcastNotifier, INotifier, RealtimeEvent};
use nudge_domain::{Reminder, ReminderType, User};
pub use push::PushGatewaySender;
use std::fmt::Display;
use std::sync::Arc;
use tracing::info;

/// One of the three independent delivery paths
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    InApp,
    Email,
    Push,
}

impl Display for Channel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::InApp => "in_app",
            Self::Email => "email",
            Self::Push => "push",
        };
        write!(f, "{}", name)
    }
}

/// Short human readable title for a reminder notification
pub fn reminder_title(reminder_type: ReminderType) -> &'static str {
    match reminder_type {
        ReminderType::TaskDue => "Task due soon",
        ReminderType::Meeting => "Upcoming meeting",
        ReminderType::GoalDeadline => "Goal deadline approaching",
        ReminderType::AppraisalSubmission => "Appraisal submission due",
        ReminderType::ManagerFeedback => "Manager feedback requested",
        ReminderType::Custom => "Reminder",
    }
}

/// A single delivery path for due reminders. Implementations derive their
/// own payload from the reminder and fail with an error when the provider
/// rejects the notification.
#[async_trait::async_trait]
pub trait IChannelSender: Send + Sync {
    fn channel(&self) -> Channel;
    async fn send(&self, recipient: &User, reminder: &Reminder) -> anyhow::Result<()>;
}

/// Fallback sender used when no provider is configured for a channel,
/// it only logs the notification.
pub struct LoggingSender {
    channel: Channel,
}

impl LoggingSender {
    pub fn new(channel: Channel) -> Self {
        Self { channel }
    }
}

#[async_trait::async_trait]
impl IChannelSender for LoggingSender {
    fn channel(&self) -> Channel {
        self.channel
    }

    async fn send(&self, recipient: &User, reminder: &Reminder) -> anyhow::Result<()> {
        info!(
            "{} notification for user: {} with message: {}",
            self.channel, recipient.id, reminder.message
        );
        Ok(())
    }
}

/// The three channel senders a due reminder fans out over
#[derive(Clone)]
pub struct ChannelSenders {
    pub in_app: Arc<dyn IChannelSender>,
    pub email: Arc<dyn IChannelSender>,
    pub push: Arc<dyn IChannelSender>,
}

impl ChannelSenders {
    pub fn create(config: &Config, notifier: Arc<dyn INotifier>) -> Self {
        let email: Arc<dyn IChannelSender> = match &config.mail_relay {
            Some(relay) => Arc::new(MailRelaySender::new(relay.clone())),
            None => Arc::new(LoggingSender::new(Channel::Email)),
        };
        let push: Arc<dyn IChannelSender> = match &config.push_gateway_url {
            Some(url) => Arc::new(PushGatewaySender::new(url.clone())),
            None => Arc::new(LoggingSender::new(Channel::Push)),
        };

        Self {
            in_app: Arc::new(InAppSender::new(notifier)),
            email,
            push,
        }
    }
}
