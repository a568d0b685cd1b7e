use super::subscribers::NotifyOnReminderCreated;
use crate::error::NudgeError;
use crate::shared::usecase::{Subscriber, UseCase};
use nudge_domain::{valid_message, DeliveryChannels, Reminder, ReminderStatus, ReminderType, TargetRef, ID};
use nudge_infra::NudgeContext;

/// Creates a `Reminder` on the explicit request of a user. The reminder
/// is marked as user created and must be due in the future.
#[derive(Debug)]
pub struct CreateReminderUseCase {
    pub owner_id: ID,
    /// The actor creating the reminder, usually the owner
    pub created_by: ID,
    pub reminder_type: ReminderType,
    pub target: Option<TargetRef>,
    pub message: String,
    /// When not provided the owner preference defaults are used
    pub channels: Option<DeliveryChannels>,
    pub remind_at: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidMessage,
    RemindAtNotInFuture(i64),
    OwnerNotFound(ID),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidMessage => Self::BadClientData(
                "The reminder message must be between 1 and 200 characters".into(),
            ),
            UseCaseError::RemindAtNotInFuture(remind_at) => Self::BadClientData(format!(
                "The remind at timestamp: {}, is not in the future.",
                remind_at
            )),
            UseCaseError::OwnerNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CreateReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        if !valid_message(&self.message) {
            return Err(UseCaseError::InvalidMessage);
        }

        let owner = match ctx.repos.users.find(&self.owner_id).await {
            Some(owner) => owner,
            None => return Err(UseCaseError::OwnerNotFound(self.owner_id.clone())),
        };

        let now = ctx.sys.get_timestamp_millis();
        if self.remind_at <= now {
            return Err(UseCaseError::RemindAtNotInFuture(self.remind_at));
        }

        let reminder = Reminder {
            id: Default::default(),
            owner_id: owner.id.clone(),
            reminder_type: self.reminder_type,
            target: self.target.clone(),
            message: self.message.clone(),
            channels: self
                .channels
                .unwrap_or(owner.preferences.default_delivery_channels),
            remind_at: self.remind_at,
            snooze_until: None,
            status: ReminderStatus::Pending,
            is_user_created: true,
            is_active: true,
            created_by: self.created_by.clone(),
            created: now,
            updated: now,
        };

        ctx.repos
            .reminders
            .insert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(reminder)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyOnReminderCreated)]
    }
}
