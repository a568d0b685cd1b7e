mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
use nudge_domain::{Reminder, ReminderType, TargetRef, ID};
pub use postgres::PostgresReminderRepo;

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()>;
    async fn find(&self, reminder_id: &ID) -> Option<Reminder>;
    /// All active reminders in a schedulable status with `remind_at <= now`
    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>>;
    /// The reminder system generated for a linked entity, keyed on
    /// `(owner, target, reminder type)`
    async fn find_by_link(
        &self,
        owner_id: &ID,
        target: &TargetRef,
        reminder_type: ReminderType,
    ) -> Option<Reminder>;
    async fn delete(&self, reminder_id: &ID) -> Option<Reminder>;
    /// Deletes and returns every reminder for the given link key
    async fn delete_by_link(
        &self,
        owner_id: &ID,
        target: &TargetRef,
        reminder_type: ReminderType,
    ) -> anyhow::Result<Vec<Reminder>>;
}
