use super::subscribers::NotifyOnReminderUpdated;
use crate::error::NudgeError;
use crate::shared::usecase::{Subscriber, UseCase};
use nudge_domain::{Reminder, ReminderStatus, ID};
use nudge_infra::NudgeContext;

/// Dismisses a pending or snoozed `Reminder`. Dismissal is terminal, the
/// scheduler will never pick the reminder up again.
#[derive(Debug)]
pub struct DismissReminderUseCase {
    pub reminder_id: ID,
    pub actor_id: ID,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Unauthorized,
    InvalidStatus(ReminderStatus),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound(reminder_id) => Self::NotFound(format!(
                "The reminder with id: {}, was not found.",
                reminder_id
            )),
            UseCaseError::Unauthorized => {
                Self::Unauthorized("Only the owner of a reminder can dismiss it".into())
            }
            UseCaseError::InvalidStatus(status) => Self::Conflict(format!(
                "A reminder with status: {}, cannot be dismissed",
                status.as_str()
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for DismissReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "DismissReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        if reminder.owner_id != self.actor_id {
            return Err(UseCaseError::Unauthorized);
        }
        if !reminder.status.is_schedulable() {
            return Err(UseCaseError::InvalidStatus(reminder.status));
        }

        reminder.status = ReminderStatus::Dismissed;
        reminder.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .reminders
            .save(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyOnReminderUpdated)]
    }
}
