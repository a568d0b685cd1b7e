use super::subscribers::NotifyOnLinkedRemindersDeleted;
use crate::error::NudgeError;
use crate::shared::usecase::{Subscriber, UseCase};
use nudge_domain::{Reminder, ReminderType, TargetRef, ID};
use nudge_infra::NudgeContext;

/// Removes every reminder tied to a linked entity. Called by the entity's
/// lifecycle handler when the entity itself is deleted.
#[derive(Debug)]
pub struct DeleteLinkedRemindersUseCase {
    pub owner_id: ID,
    pub target: TargetRef,
    pub reminder_type: ReminderType,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for DeleteLinkedRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "DeleteLinkedReminders";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        ctx.repos
            .reminders
            .delete_by_link(&self.owner_id, &self.target, self.reminder_type)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(NotifyOnLinkedRemindersDeleted)]
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::reminder::SyncLinkedReminderUseCase;
    use nudge_domain::{TargetKind, User};
    use nudge_infra::setup_context;

    #[tokio::test]
    async fn deletes_the_linked_reminder() {
        let ctx = setup_context().await;
        let owner = User::new();
        ctx.repos.users.insert(&owner).await.unwrap();
        let target = TargetRef {
            kind: TargetKind::Task,
            id: ID::new(),
        };

        let mut sync = SyncLinkedReminderUseCase {
            owner_id: owner.id.clone(),
            target: target.clone(),
            reminder_type: ReminderType::TaskDue,
            deadline: ctx.sys.get_timestamp_millis() + 1000 * 60 * 60,
            message: "Task is due".into(),
        };
        let synced = sync.execute(&ctx).await.unwrap();

        let mut usecase = DeleteLinkedRemindersUseCase {
            owner_id: owner.id.clone(),
            target: target.clone(),
            reminder_type: ReminderType::TaskDue,
        };
        let deleted = usecase.execute(&ctx).await.unwrap();

        assert_eq!(deleted.len(), 1);
        assert_eq!(deleted[0].id, synced.reminder.id);
        assert!(ctx
            .repos
            .reminders
            .find(&synced.reminder.id)
            .await
            .is_none());
    }

    #[tokio::test]
    async fn deleting_a_missing_link_is_a_noop() {
        let ctx = setup_context().await;

        let mut usecase = DeleteLinkedRemindersUseCase {
            owner_id: ID::new(),
            target: TargetRef {
                kind: TargetKind::Goal,
                id: ID::new(),
            },
            reminder_type: ReminderType::GoalDeadline,
        };
        let deleted = usecase.execute(&ctx).await.unwrap();
        assert!(deleted.is_empty());
    }
}
