mod preferences;
mod reminder;
mod shared;
mod user;

pub use preferences::{default_lead_time_minutes, UserPreferences};
pub use reminder::{
    valid_message, valid_snooze_minutes, DeliveryChannels, Reminder, ReminderStatus, ReminderType,
    TargetKind, TargetRef, MAX_MESSAGE_LENGTH, MAX_SNOOZE_MINUTES, MIN_SNOOZE_MINUTES,
};
pub use shared::entity::{Entity, ID};
pub use user::User;
