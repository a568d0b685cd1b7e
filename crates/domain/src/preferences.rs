use crate::reminder::{DeliveryChannels, ReminderType};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// System default lead time in minutes for a `ReminderType`, used when the
/// owner has not configured one.
pub fn default_lead_time_minutes(reminder_type: ReminderType) -> i64 {
    match reminder_type {
        ReminderType::TaskDue => 60,
        ReminderType::Meeting => 30,
        ReminderType::GoalDeadline => 1440,
        ReminderType::AppraisalSubmission => 1440,
        ReminderType::ManagerFeedback => 720,
        ReminderType::Custom => 0,
    }
}

/// Per `User` defaults consulted when a reminder does not explicitly
/// override its channel or lead time configuration.
///
/// Updating preferences only affects future computations, existing
/// reminders keep the `remind_at` they were created with.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct UserPreferences {
    pub default_delivery_channels: DeliveryChannels,
    /// Lead time in minutes per `ReminderType`, `remind_at = deadline - lead_time`
    pub default_reminder_times: HashMap<ReminderType, i64>,
}

impl UserPreferences {
    pub fn lead_time_minutes(&self, reminder_type: ReminderType) -> i64 {
        self.default_reminder_times
            .get(&reminder_type)
            .copied()
            .unwrap_or_else(|| default_lead_time_minutes(reminder_type))
    }
}
