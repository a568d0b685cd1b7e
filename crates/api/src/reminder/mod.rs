mod create_reminder;
mod delete_linked_reminders;
mod deliver_reminder;
mod dismiss_reminder;
mod get_due_reminders;
mod snooze_reminder;
mod subscribers;
mod sync_linked_reminder;

pub use create_reminder::CreateReminderUseCase;
pub use delete_linked_reminders::DeleteLinkedRemindersUseCase;
pub use deliver_reminder::DeliverReminderUseCase;
pub use dismiss_reminder::DismissReminderUseCase;
pub use get_due_reminders::GetDueRemindersUseCase;
pub use snooze_reminder::SnoozeReminderUseCase;
pub use sync_linked_reminder::{SyncLinkedReminderUseCase, SyncOperation, SyncedReminder};
