use super::subscribers::NotifyOnReminderUpdated;
use crate::error::NudgeError;
use crate::shared::usecase::{Subscriber, UseCase};
use nudge_domain::{
    valid_snooze_minutes, Reminder, ReminderStatus, ID, MAX_SNOOZE_MINUTES, MIN_SNOOZE_MINUTES,
};
use nudge_infra::NudgeContext;

/// Defers a pending or snoozed `Reminder` by a bounded number of minutes
/// without losing its identity.
#[derive(Debug)]
pub struct SnoozeReminderUseCase {
    pub reminder_id: ID,
    pub actor_id: ID,
    pub minutes: i64,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound(ID),
    Unauthorized,
    InvalidSnoozeMinutes(i64),
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
                Self::Unauthorized("Only the owner of a reminder can snooze it".into())
            }
            UseCaseError::InvalidSnoozeMinutes(minutes) => Self::BadClientData(format!(
                "Snooze minutes must be in the range [{}, {}], got: {}",
                MIN_SNOOZE_MINUTES, MAX_SNOOZE_MINUTES, minutes
            )),
            UseCaseError::InvalidStatus(status) => Self::Conflict(format!(
                "A reminder with status: {}, cannot be snoozed",
                status.as_str()
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for SnoozeReminderUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SnoozeReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let mut reminder = match ctx.repos.reminders.find(&self.reminder_id).await {
            Some(reminder) => reminder,
            None => return Err(UseCaseError::NotFound(self.reminder_id.clone())),
        };

        if reminder.owner_id != self.actor_id {
            return Err(UseCaseError::Unauthorized);
        }
        if !valid_snooze_minutes(self.minutes) {
            return Err(UseCaseError::InvalidSnoozeMinutes(self.minutes));
        }
        if !reminder.status.is_schedulable() {
            return Err(UseCaseError::InvalidStatus(reminder.status));
        }

        let now = ctx.sys.get_timestamp_millis();
        reminder.remind_at = now + self.minutes * 60 * 1000;
        reminder.snooze_until = Some(reminder.remind_at);
        reminder.status = ReminderStatus::Snoozed;
        reminder.updated = now;

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

#[cfg(test)]
mod test {
    use super::*;
    use nudge_domain::{DeliveryChannels, ReminderType, User};
    use nudge_infra::setup_context;

    struct TestContext {
        ctx: NudgeContext,
        owner: User,
        reminder: Reminder,
    }

    async fn setup() -> TestContext {
        let ctx = setup_context().await;
        let owner = User::new();
        ctx.repos.users.insert(&owner).await.unwrap();

        let now = ctx.sys.get_timestamp_millis();
        let reminder = Reminder {
            id: Default::default(),
            owner_id: owner.id.clone(),
            reminder_type: ReminderType::TaskDue,
            target: None,
            message: "Submit the report".into(),
            channels: DeliveryChannels::default(),
            remind_at: now + 1000 * 60 * 60,
            snooze_until: None,
            status: ReminderStatus::Pending,
            is_user_created: true,
            is_active: true,
            created_by: owner.id.clone(),
            created: now,
            updated: now,
        };
        ctx.repos.reminders.insert(&reminder).await.unwrap();

        TestContext {
            ctx,
            owner,
            reminder,
        }
    }

    #[tokio::test]
    async fn snoozes_pending_reminder() {
        let TestContext {
            ctx,
            owner,
            reminder,
        } = setup().await;

        let mut usecase = SnoozeReminderUseCase {
            reminder_id: reminder.id.clone(),
            actor_id: owner.id.clone(),
            minutes: 30,
        };
        let before = ctx.sys.get_timestamp_millis();
        let snoozed = usecase.execute(&ctx).await.unwrap();
        let after = ctx.sys.get_timestamp_millis();

        assert_eq!(snoozed.status, ReminderStatus::Snoozed);
        assert_eq!(snoozed.snooze_until, Some(snoozed.remind_at));
        assert!(snoozed.remind_at >= before + 30 * 60 * 1000);
        assert!(snoozed.remind_at <= after + 30 * 60 * 1000);

        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(persisted.status, ReminderStatus::Snoozed);
    }

    #[tokio::test]
    async fn rejects_minutes_outside_bounds() {
        let TestContext {
            ctx,
            owner,
            reminder,
        } = setup().await;

        for minutes in [4, 1441, 0, -10] {
            let mut usecase = SnoozeReminderUseCase {
                reminder_id: reminder.id.clone(),
                actor_id: owner.id.clone(),
                minutes,
            };
            assert_eq!(
                usecase.execute(&ctx).await,
                Err(UseCaseError::InvalidSnoozeMinutes(minutes))
            );
        }

        // Bounds are inclusive
        for minutes in [5, 1440] {
            let mut usecase = SnoozeReminderUseCase {
                reminder_id: reminder.id.clone(),
                actor_id: owner.id.clone(),
                minutes,
            };
            assert!(usecase.execute(&ctx).await.is_ok());
        }
    }

    #[tokio::test]
    async fn rejects_actor_that_is_not_the_owner() {
        let TestContext { ctx, reminder, .. } = setup().await;

        let mut usecase = SnoozeReminderUseCase {
            reminder_id: reminder.id.clone(),
            actor_id: ID::new(),
            minutes: 30,
        };
        assert_eq!(usecase.execute(&ctx).await, Err(UseCaseError::Unauthorized));

        // The reminder is left untouched
        let persisted = ctx.repos.reminders.find(&reminder.id).await.unwrap();
        assert_eq!(persisted, reminder);
    }

    #[tokio::test]
    async fn rejects_snoozing_a_dismissed_reminder() {
        let TestContext {
            ctx,
            owner,
            mut reminder,
        } = setup().await;

        reminder.status = ReminderStatus::Dismissed;
        ctx.repos.reminders.save(&reminder).await.unwrap();

        let mut usecase = SnoozeReminderUseCase {
            reminder_id: reminder.id.clone(),
            actor_id: owner.id.clone(),
            minutes: 30,
        };
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidStatus(ReminderStatus::Dismissed))
        );
    }

    #[tokio::test]
    async fn unknown_reminder_is_not_found() {
        let TestContext { ctx, owner, .. } = setup().await;

        let unknown_id = ID::new();
        let mut usecase = SnoozeReminderUseCase {
            reminder_id: unknown_id.clone(),
            actor_id: owner.id,
            minutes: 30,
        };
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NotFound(unknown_id))
        );
    }
}
