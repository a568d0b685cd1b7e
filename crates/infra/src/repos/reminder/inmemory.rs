use super::IReminderRepo;
use crate::repos::shared::inmemory_repo::*;
use nudge_domain::{Reminder, ReminderType, TargetRef, ID};

pub struct InMemoryReminderRepo {
    reminders: std::sync::Mutex<Vec<Reminder>>,
}

impl InMemoryReminderRepo {
    pub fn new() -> Self {
        Self {
            reminders: std::sync::Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryReminderRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IReminderRepo for InMemoryReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        insert(reminder, &self.reminders);
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        save(reminder, &self.reminders);
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        find(reminder_id, &self.reminders)
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        Ok(find_by(&self.reminders, |reminder| reminder.is_due(now)))
    }

    async fn find_by_link(
        &self,
        owner_id: &ID,
        target: &TargetRef,
        reminder_type: ReminderType,
    ) -> Option<Reminder> {
        find_by(&self.reminders, |reminder| {
            &reminder.owner_id == owner_id
                && reminder.target.as_ref() == Some(target)
                && reminder.reminder_type == reminder_type
        })
        .into_iter()
        .next()
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        delete(reminder_id, &self.reminders)
    }

    async fn delete_by_link(
        &self,
        owner_id: &ID,
        target: &TargetRef,
        reminder_type: ReminderType,
    ) -> anyhow::Result<Vec<Reminder>> {
        let res = find_and_delete_by(&self.reminders, |reminder| {
            &reminder.owner_id == owner_id
                && reminder.target.as_ref() == Some(target)
                && reminder.reminder_type == reminder_type
        });
        Ok(res)
    }
}
