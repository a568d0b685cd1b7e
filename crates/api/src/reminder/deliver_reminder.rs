use crate::error::NudgeError;
use crate::shared::usecase::UseCase;
use futures::future::join_all;
use nudge_domain::{Reminder, ReminderStatus, ID};
use nudge_infra::{IChannelSender, NudgeContext};
use std::sync::Arc;
use tracing::{debug, warn};

/// Delivers one due `Reminder` across its enabled channels and finalizes
/// its status.
///
/// Channel sends are independent and unordered, a failing channel never
/// prevents the remaining ones from being attempted and never blocks the
/// transition to `Sent`. Only a failure of this usecase's own control
/// flow (an unresolvable recipient, a storage error) leaves the reminder
/// in a schedulable status so the next tick retries it.
#[derive(Debug)]
pub struct DeliverReminderUseCase {
    pub reminder: Reminder,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    RecipientNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::RecipientNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for DeliverReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DeliverReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let recipient = match ctx.repos.users.find(&self.reminder.owner_id).await {
            Some(recipient) => recipient,
            None => {
                return Err(UseCaseError::RecipientNotFound(
                    self.reminder.owner_id.clone(),
                ))
            }
        };

        let mut senders: Vec<Arc<dyn IChannelSender>> = Vec::new();
        if self.reminder.channels.in_app {
            senders.push(ctx.channels.in_app.clone());
        }
        if self.reminder.channels.email {
            if recipient.email.is_some() {
                senders.push(ctx.channels.email.clone());
            } else {
                debug!(
                    "Skipping email channel for reminder: {}, recipient has no email address",
                    self.reminder.id
                );
            }
        }
        if self.reminder.channels.push {
            if recipient.push_token.is_some() {
                senders.push(ctx.channels.push.clone());
            } else {
                debug!(
                    "Skipping push channel for reminder: {}, recipient has no device token",
                    self.reminder.id
                );
            }
        }

        let reminder = &self.reminder;
        let recipient = &recipient;
        let sends = senders
            .iter()
            .map(|sender| async move { (sender.channel(), sender.send(recipient, reminder).await) });
        for (channel, outcome) in join_all(sends).await {
            if let Err(e) = outcome {
                warn!(
                    "Failed to deliver reminder: {} on channel: {}. Error: {:?}",
                    self.reminder.id, channel, e
                );
            }
        }

        // Delivery was attempted on every reachable channel, finalize
        self.reminder.status = ReminderStatus::Sent;
        self.reminder.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .reminders
            .save(&self.reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(self.reminder.clone())
    }
}
