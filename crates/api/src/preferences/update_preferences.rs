use crate::error::NudgeError;
use crate::shared::usecase::UseCase;
use nudge_domain::{DeliveryChannels, ReminderType, UserPreferences, ID};
use nudge_infra::NudgeContext;
use std::collections::HashMap;

/// Replaces a user's notification defaults. Only the provided parts are
/// replaced, an omitted part keeps its current value. The update is
/// idempotent and only affects future reminder computations, existing
/// reminders keep their `remind_at`.
#[derive(Debug)]
pub struct UpdatePreferencesUseCase {
    pub user_id: ID,
    pub default_delivery_channels: Option<DeliveryChannels>,
    pub default_reminder_times: Option<HashMap<ReminderType, i64>>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    UserNotFound(ID),
    NegativeLeadTime(i64),
    StorageError,
}

impl From<UseCaseError> for NudgeError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::UserNotFound(user_id) => {
                Self::NotFound(format!("The user with id: {}, was not found.", user_id))
            }
            UseCaseError::NegativeLeadTime(minutes) => Self::BadClientData(format!(
                "A reminder lead time cannot be negative, got: {}",
                minutes
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait]
impl UseCase for UpdatePreferencesUseCase {
    type Response = UserPreferences;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdatePreferences";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        if let Some(times) = &self.default_reminder_times {
            if let Some(minutes) = times.values().find(|minutes| **minutes < 0) {
                return Err(UseCaseError::NegativeLeadTime(*minutes));
            }
        }

        let mut user = match ctx.repos.users.find(&self.user_id).await {
            Some(user) => user,
            None => return Err(UseCaseError::UserNotFound(self.user_id.clone())),
        };

        if let Some(channels) = self.default_delivery_channels {
            user.preferences.default_delivery_channels = channels;
        }
        if let Some(times) = self.default_reminder_times.take() {
            user.preferences.default_reminder_times = times;
        }

        ctx.repos
            .users
            .save(&user)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(user.preferences)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nudge_domain::User;
    use nudge_infra::setup_context;

    #[tokio::test]
    async fn updates_channels_and_lead_times() {
        let ctx = setup_context().await;
        let user = User::new();
        ctx.repos.users.insert(&user).await.unwrap();

        let channels = DeliveryChannels {
            in_app: true,
            email: false,
            push: true,
        };
        let mut times = HashMap::new();
        times.insert(ReminderType::GoalDeadline, 120);

        let mut usecase = UpdatePreferencesUseCase {
            user_id: user.id.clone(),
            default_delivery_channels: Some(channels),
            default_reminder_times: Some(times.clone()),
        };
        let prefs = usecase.execute(&ctx).await.unwrap();

        assert_eq!(prefs.default_delivery_channels, channels);
        assert_eq!(prefs.lead_time_minutes(ReminderType::GoalDeadline), 120);

        let persisted = ctx.repos.users.find(&user.id).await.unwrap();
        assert_eq!(persisted.preferences, prefs);
    }

    #[tokio::test]
    async fn update_is_idempotent() {
        let ctx = setup_context().await;
        let user = User::new();
        ctx.repos.users.insert(&user).await.unwrap();

        let channels = DeliveryChannels {
            in_app: false,
            email: true,
            push: false,
        };
        for _ in 0..2 {
            let mut usecase = UpdatePreferencesUseCase {
                user_id: user.id.clone(),
                default_delivery_channels: Some(channels),
                default_reminder_times: None,
            };
            let prefs = usecase.execute(&ctx).await.unwrap();
            assert_eq!(prefs.default_delivery_channels, channels);
        }
    }

    #[tokio::test]
    async fn omitted_parts_keep_their_value() {
        let ctx = setup_context().await;
        let mut user = User::new();
        user.preferences
            .default_reminder_times
            .insert(ReminderType::TaskDue, 15);
        ctx.repos.users.insert(&user).await.unwrap();

        let mut usecase = UpdatePreferencesUseCase {
            user_id: user.id.clone(),
            default_delivery_channels: Some(DeliveryChannels::default()),
            default_reminder_times: None,
        };
        let prefs = usecase.execute(&ctx).await.unwrap();

        assert_eq!(prefs.lead_time_minutes(ReminderType::TaskDue), 15);
    }

    #[tokio::test]
    async fn rejects_negative_lead_time() {
        let ctx = setup_context().await;
        let user = User::new();
        ctx.repos.users.insert(&user).await.unwrap();

        let mut times = HashMap::new();
        times.insert(ReminderType::Meeting, -5);

        let mut usecase = UpdatePreferencesUseCase {
            user_id: user.id.clone(),
            default_delivery_channels: None,
            default_reminder_times: Some(times),
        };
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NegativeLeadTime(-5))
        );
    }
}
