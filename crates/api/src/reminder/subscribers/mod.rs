use super::create_reminder::CreateReminderUseCase;
use super::delete_linked_reminders::DeleteLinkedRemindersUseCase;
use super::dismiss_reminder::DismissReminderUseCase;
use super::snooze_reminder::SnoozeReminderUseCase;
use super::sync_linked_reminder::{SyncLinkedReminderUseCase, SyncOperation, SyncedReminder};
use crate::shared::usecase::Subscriber;
use nudge_domain::Reminder;
use nudge_infra::{NudgeContext, RealtimeEvent};

/// Pushes a `newReminder` event to the owner's real-time topic
pub struct NotifyOnReminderCreated;

#[async_trait::async_trait]
impl Subscriber<CreateReminderUseCase> for NotifyOnReminderCreated {
    async fn notify(&self, reminder: &Reminder, ctx: &NudgeContext) {
        ctx.notifier
            .notify(
                &reminder.owner_id,
                RealtimeEvent::NewReminder(reminder.clone()),
            )
            .await;
    }
}

/// Pushes a `reminderUpdated` event after a snooze or dismissal
pub struct NotifyOnReminderUpdated;

#[async_trait::async_trait]
impl Subscriber<SnoozeReminderUseCase> for NotifyOnReminderUpdated {
    async fn notify(&self, reminder: &Reminder, ctx: &NudgeContext) {
        ctx.notifier
            .notify(
                &reminder.owner_id,
                RealtimeEvent::ReminderUpdated(reminder.clone()),
            )
            .await;
    }
}

#[async_trait::async_trait]
impl Subscriber<DismissReminderUseCase> for NotifyOnReminderUpdated {
    async fn notify(&self, reminder: &Reminder, ctx: &NudgeContext) {
        ctx.notifier
            .notify(
                &reminder.owner_id,
                RealtimeEvent::ReminderUpdated(reminder.clone()),
            )
            .await;
    }
}

/// Consumers distinguish a first sync from a deadline update by the
/// event name that is broadcast
pub struct NotifyOnLinkedReminderSynced;

#[async_trait::async_trait]
impl Subscriber<SyncLinkedReminderUseCase> for NotifyOnLinkedReminderSynced {
    async fn notify(&self, synced: &SyncedReminder, ctx: &NudgeContext) {
        let event = match synced.operation {
            SyncOperation::Created => RealtimeEvent::NewReminder(synced.reminder.clone()),
            SyncOperation::Updated => RealtimeEvent::ReminderUpdated(synced.reminder.clone()),
        };
        ctx.notifier.notify(&synced.reminder.owner_id, event).await;
    }
}

/// Pushes a `reminderDeleted` event per removed reminder
pub struct NotifyOnLinkedRemindersDeleted;

#[async_trait::async_trait]
impl Subscriber<DeleteLinkedRemindersUseCase> for NotifyOnLinkedRemindersDeleted {
    async fn notify(&self, deleted: &Vec<Reminder>, ctx: &NudgeContext) {
        for reminder in deleted {
            ctx.notifier
                .notify(
                    &reminder.owner_id,
                    RealtimeEvent::ReminderDeleted(reminder.id.clone()),
                )
                .await;
        }
    }
}
