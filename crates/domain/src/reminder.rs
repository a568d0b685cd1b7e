use crate::shared::entity::{Entity, ID};
use serde::{Deserialize, Serialize};
use std::fmt::Display;
use std::str::FromStr;

/// Lower inclusive bound for how many minutes a `Reminder` can be snoozed
pub const MIN_SNOOZE_MINUTES: i64 = 5;
/// Upper inclusive bound for how many minutes a `Reminder` can be snoozed (24 hours)
pub const MAX_SNOOZE_MINUTES: i64 = 1440;
/// Maximum number of characters allowed in a `Reminder` message
pub const MAX_MESSAGE_LENGTH: usize = 200;

/// What kind of deadline or event a `Reminder` is about
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderType {
    TaskDue,
    Meeting,
    GoalDeadline,
    AppraisalSubmission,
    ManagerFeedback,
    Custom,
}

impl ReminderType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::TaskDue => "task_due",
            Self::Meeting => "meeting",
            Self::GoalDeadline => "goal_deadline",
            Self::AppraisalSubmission => "appraisal_submission",
            Self::ManagerFeedback => "manager_feedback",
            Self::Custom => "custom",
        }
    }
}

impl Display for ReminderType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Clone, thiserror::Error)]
#[error("Unknown variant: {0}")]
pub struct InvalidVariantError(pub String);

impl FromStr for ReminderType {
    type Err = InvalidVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "task_due" => Ok(Self::TaskDue),
            "meeting" => Ok(Self::Meeting),
            "goal_deadline" => Ok(Self::GoalDeadline),
            "appraisal_submission" => Ok(Self::AppraisalSubmission),
            "manager_feedback" => Ok(Self::ManagerFeedback),
            "custom" => Ok(Self::Custom),
            _ => Err(InvalidVariantError(s.to_string())),
        }
    }
}

/// The closed set of entity kinds a `Reminder` can point back at.
/// Target kinds outside this enum are rejected at the boundary.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TargetKind {
    Goal,
    Task,
    Meeting,
    Appraisal,
}

impl TargetKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Goal => "goal",
            Self::Task => "task",
            Self::Meeting => "meeting",
            Self::Appraisal => "appraisal",
        }
    }
}

impl FromStr for TargetKind {
    type Err = InvalidVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "goal" => Ok(Self::Goal),
            "task" => Ok(Self::Task),
            "meeting" => Ok(Self::Meeting),
            "appraisal" => Ok(Self::Appraisal),
            _ => Err(InvalidVariantError(s.to_string())),
        }
    }
}

/// Reference from a system generated `Reminder` back to the entity
/// whose deadline it tracks
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TargetRef {
    pub kind: TargetKind,
    pub id: ID,
}

/// Which of the three independent delivery paths are enabled for a `Reminder`
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeliveryChannels {
    pub in_app: bool,
    pub email: bool,
    pub push: bool,
}

impl DeliveryChannels {
    pub fn none_enabled(&self) -> bool {
        !self.in_app && !self.email && !self.push
    }
}

impl Default for DeliveryChannels {
    fn default() -> Self {
        Self {
            in_app: true,
            email: true,
            push: false,
        }
    }
}

/// Lifecycle state of a `Reminder`.
///
/// `Dismissed` is terminal. `Sent` is terminal for the occurrence, but a
/// linked reminder sync may re-arm it back to `Pending` when the underlying
/// deadline changes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReminderStatus {
    Pending,
    Snoozed,
    Dismissed,
    Sent,
}

impl ReminderStatus {
    /// Whether the scheduler may still pick this reminder up
    pub fn is_schedulable(&self) -> bool {
        matches!(self, Self::Pending | Self::Snoozed)
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Pending => "pending",
            Self::Snoozed => "snoozed",
            Self::Dismissed => "dismissed",
            Self::Sent => "sent",
        }
    }
}

impl FromStr for ReminderStatus {
    type Err = InvalidVariantError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(Self::Pending),
            "snoozed" => Ok(Self::Snoozed),
            "dismissed" => Ok(Self::Dismissed),
            "sent" => Ok(Self::Sent),
            _ => Err(InvalidVariantError(s.to_string())),
        }
    }
}

/// A `Reminder` is a scheduled notification with its own lifecycle,
/// independent of the entity that caused its creation. The owner `User`
/// is notified on the enabled `DeliveryChannels` once `remind_at` elapses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Reminder {
    pub id: ID,
    /// The `User` that will receive the notification
    pub owner_id: ID,
    pub reminder_type: ReminderType,
    /// Present for system generated reminders, `None` for purely custom ones
    pub target: Option<TargetRef>,
    pub message: String,
    pub channels: DeliveryChannels,
    /// The timestamp in millis at which this reminder becomes eligible for delivery
    pub remind_at: i64,
    /// Set when the owner snoozed the reminder, always equal to `remind_at` then
    pub snooze_until: Option<i64>,
    pub status: ReminderStatus,
    /// Distinguishes manually created reminders from system generated ones
    pub is_user_created: bool,
    /// Inactive reminders are never scheduled, used when the owning entity goes away
    pub is_active: bool,
    /// The actor that created the record, may differ from `owner_id`
    pub created_by: ID,
    pub created: i64,
    pub updated: i64,
}

impl Reminder {
    pub fn is_due(&self, now: i64) -> bool {
        self.is_active && self.status.is_schedulable() && self.remind_at <= now
    }
}

impl Entity for Reminder {
    fn id(&self) -> ID {
        self.id.clone()
    }
}

pub fn valid_snooze_minutes(minutes: i64) -> bool {
    (MIN_SNOOZE_MINUTES..=MAX_SNOOZE_MINUTES).contains(&minutes)
}

pub fn valid_message(message: &str) -> bool {
    let len = message.chars().count();
    len >= 1 && len <= MAX_MESSAGE_LENGTH
}

#[cfg(test)]
mod test {
    use super::*;

    #[test]
    fn snooze_bounds_are_inclusive() {
        assert!(!valid_snooze_minutes(4));
        assert!(valid_snooze_minutes(5));
        assert!(valid_snooze_minutes(720));
        assert!(valid_snooze_minutes(1440));
        assert!(!valid_snooze_minutes(1441));
        assert!(!valid_snooze_minutes(-5));
    }

    #[test]
    fn message_bounds() {
        assert!(!valid_message(""));
        assert!(valid_message("a"));
        assert!(valid_message(&"x".repeat(200)));
        assert!(!valid_message(&"x".repeat(201)));
    }

    #[test]
    fn schedulable_statuses() {
        assert!(ReminderStatus::Pending.is_schedulable());
        assert!(ReminderStatus::Snoozed.is_schedulable());
        assert!(!ReminderStatus::Dismissed.is_schedulable());
        assert!(!ReminderStatus::Sent.is_schedulable());
    }

    #[test]
    fn reminder_type_roundtrips_through_str() {
        for t in [
            ReminderType::TaskDue,
            ReminderType::Meeting,
            ReminderType::GoalDeadline,
            ReminderType::AppraisalSubmission,
            ReminderType::ManagerFeedback,
            ReminderType::Custom,
        ] {
            assert_eq!(t.as_str().parse::<ReminderType>().unwrap(), t);
        }
        assert!("birthday".parse::<ReminderType>().is_err());
    }
}
