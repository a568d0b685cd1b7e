use super::subscribers::NotifyOnLinkedReminderSynced;
use crate::error::NudgeError;
use crate::shared::usecase::{Subscriber, UseCase};
use nudge_domain::{valid_message, Reminder, ReminderStatus, ReminderType, TargetRef, ID};
use nudge_infra::NudgeContext;

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum SyncOperation {
    Created,
    Updated,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SyncedReminder {
    pub reminder: Reminder,
    pub operation: SyncOperation,
}

/// Keeps exactly one reminder in lock-step with a deadline bearing entity.
///
/// External lifecycle handlers (goal created, goal deadline moved, ...)
/// call this on every create or update of the entity. The upsert is keyed
/// on `(owner, target, reminder type)`, so calling it twice never produces
/// a second record. An update re-derives channels and lead time from the
/// owner's current preferences, clears any snooze and re-arms a `Sent`
/// reminder back to `Pending`.
#[derive(Debug)]
pub struct SyncLinkedReminderUseCase {
    pub owner_id: ID,
    pub target: TargetRef,
    pub reminder_type: ReminderType,
    /// The entity's deadline in millis, `remind_at` is derived from it.
    /// May already have lapsed, the reminder is then delivered on the
    /// very next tick.
    pub deadline: i64,
    pub message: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    /// A reminder without a valid recipient is meaningless, the sync
    /// fails loudly instead of swallowing this
    OwnerNotFound(ID),
    InvalidMessage,
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::OwnerNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::InvalidMessage => Self::BadClientData(
                "The reminder message must be between 1 and 200 characters".into(),
            ),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for SyncLinkedReminderUseCase {
    type Response = SyncedReminder;

    type Error = UseCaseError;

    const NAME: &'static str = "SyncLinkedReminder";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let owner = match ctx.repos.users.find(&self.owner_id).await {
            Some(owner) => owner,
            None => return Err(UseCaseError::OwnerNotFound(self.owner_id.clone())),
        };
        if !valid_message(&self.message) {
            return Err(UseCaseError::InvalidMessage);
        }

        let lead_time_millis = owner.preferences.lead_time_minutes(self.reminder_type) * 60 * 1000;
        let remind_at = self.deadline - lead_time_millis;
        let channels = owner.preferences.default_delivery_channels;
        let now = ctx.sys.get_timestamp_millis();

        let existing = ctx
            .repos
            .reminders
            .find_by_link(&self.owner_id, &self.target, self.reminder_type)
            .await;

        match existing {
            None => {
                let reminder = Reminder {
                    id: Default::default(),
                    owner_id: owner.id.clone(),
                    reminder_type: self.reminder_type,
                    target: Some(self.target.clone()),
                    message: self.message.clone(),
                    channels,
                    remind_at,
                    snooze_until: None,
                    status: ReminderStatus::Pending,
                    is_user_created: false,
                    is_active: true,
                    created_by: owner.id,
                    created: now,
                    updated: now,
                };
                ctx.repos
                    .reminders
                    .insert(&reminder)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;

                Ok(SyncedReminder {
                    reminder,
                    operation: SyncOperation::Created,
                })
            }
            Some(mut reminder) => {
                reminder.message = self.message.clone();
                reminder.channels = channels;
                reminder.remind_at = remind_at;
                reminder.snooze_until = None;
                reminder.status = ReminderStatus::Pending;
                reminder.updated = now;

                ctx.repos
                    .reminders
                    .save(&reminder)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;

                Ok(SyncedReminder {
                    reminder,
                    operation: SyncOperation::Updated,
                })
            }
        }
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyOnLinkedReminderSynced)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nudge_domain::{TargetKind, User};
    use nudge_infra::setup_context;

    struct TestContext {
        ctx: NudgeContext,
        owner: User,
        target: TargetRef,
    }

    async fn setup() -> TestContext {
        let ctx = setup_context().await;
        let owner = User::new();
        ctx.repos.users.insert(&owner).await.unwrap();

        let target = TargetRef {
            kind: TargetKind::Goal,
            id: ID::new(),
        };

        TestContext { ctx, owner, target }
    }

    fn usecase(owner: &User, target: &TargetRef, deadline: i64) -> SyncLinkedReminderUseCase {
        SyncLinkedReminderUseCase {
            owner_id: owner.id.clone(),
            target: target.clone(),
            reminder_type: ReminderType::GoalDeadline,
            deadline,
            message: "Goal \"Learn Rust\" is due".into(),
        }
    }

    #[tokio::test]
    async fn creates_linked_reminder_with_lead_time() {
        let TestContext { ctx, owner, target } = setup().await;
        let now = ctx.sys.get_timestamp_millis();
        let deadline = now + 1000 * 60 * 60 * 48;

        let synced = usecase(&owner, &target, deadline)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(synced.operation, SyncOperation::Created);
        // Default goal deadline lead time is 1440 minutes, one day before
        assert_eq!(synced.reminder.remind_at, deadline - 1000 * 60 * 1440);
        assert_eq!(synced.reminder.status, ReminderStatus::Pending);
        assert!(!synced.reminder.is_user_created);
        assert_eq!(synced.reminder.target, Some(target));
    }

    #[tokio::test]
    async fn second_sync_updates_the_same_record() {
        let TestContext { ctx, owner, target } = setup().await;
        let now = ctx.sys.get_timestamp_millis();
        let deadline = now + 1000 * 60 * 60 * 48;

        let first = usecase(&owner, &target, deadline)
            .execute(&ctx)
            .await
            .unwrap();

        let moved_deadline = deadline + 1000 * 60 * 60 * 24;
        let second = usecase(&owner, &target, moved_deadline)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(second.operation, SyncOperation::Updated);
        assert_eq!(second.reminder.id, first.reminder.id);
        assert_eq!(
            second.reminder.remind_at,
            moved_deadline - 1000 * 60 * 1440
        );

        // Still exactly one reminder for the link key
        let found = ctx
            .repos
            .reminders
            .find_by_link(&owner.id, &target, ReminderType::GoalDeadline)
            .await
            .unwrap();
        assert_eq!(found.remind_at, second.reminder.remind_at);
    }

    #[tokio::test]
    async fn sync_rearms_sent_and_clears_snooze() {
        let TestContext { ctx, owner, target } = setup().await;
        let now = ctx.sys.get_timestamp_millis();
        let deadline = now + 1000 * 60 * 60 * 48;

        let mut synced = usecase(&owner, &target, deadline)
            .execute(&ctx)
            .await
            .unwrap();
        synced.reminder.status = ReminderStatus::Sent;
        synced.reminder.snooze_until = Some(now);
        ctx.repos.reminders.save(&synced.reminder).await.unwrap();

        let resynced = usecase(&owner, &target, deadline + 1000)
            .execute(&ctx)
            .await
            .unwrap();

        assert_eq!(resynced.operation, SyncOperation::Updated);
        assert_eq!(resynced.reminder.status, ReminderStatus::Pending);
        assert_eq!(resynced.reminder.snooze_until, None);
    }

    #[tokio::test]
    async fn lapsed_deadline_is_allowed() {
        let TestContext { ctx, owner, target } = setup().await;
        let now = ctx.sys.get_timestamp_millis();

        // Deadline already passed, the reminder is due on the next tick
        let synced = usecase(&owner, &target, now - 1000)
            .execute(&ctx)
            .await
            .unwrap();
        assert!(synced.reminder.remind_at < now);
        assert_eq!(synced.reminder.status, ReminderStatus::Pending);
    }

    #[tokio::test]
    async fn fails_loudly_for_unknown_owner() {
        let TestContext { ctx, target, .. } = setup().await;
        let stranger = User::new();

        let res = usecase(&stranger, &target, 0).execute(&ctx).await;
        assert_eq!(res, Err(UseCaseError::OwnerNotFound(stranger.id)));
    }

    #[tokio::test]
    async fn configured_lead_time_wins_over_default() {
        let TestContext {
            ctx, mut owner, ..
        } = setup().await;
        owner
            .preferences
            .default_reminder_times
            .insert(ReminderType::GoalDeadline, 60);
        ctx.repos.users.save(&owner).await.unwrap();

        let target = TargetRef {
            kind: TargetKind::Goal,
            id: ID::new(),
        };
        let now = ctx.sys.get_timestamp_millis();
        let deadline = now + 1000 * 60 * 60 * 48;

        let synced = usecase(&owner, &target, deadline)
            .execute(&ctx)
            .await
            .unwrap();
        assert_eq!(synced.reminder.remind_at, deadline - 1000 * 60 * 60);
    }
}
