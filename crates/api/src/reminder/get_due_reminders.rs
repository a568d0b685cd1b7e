use crate::error::NudgeError;
use crate::shared::usecase::UseCase;
use nudge_domain::Reminder;
use nudge_infra::NudgeContext;

/// Surfaces every reminder that has become due: active, in a schedulable
/// status and with `remind_at` in the past. Runs once per scheduler tick.
#[derive(Debug)]
pub struct GetDueRemindersUseCase {}

#[derive(Debug)]
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
impl UseCase for GetDueRemindersUseCase {
    type Response = Vec<Reminder>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetDueReminders";

    async fn execute(&mut self, ctx: &NudgeContext) -> Result<Self::Response, Self::Error> {
        let now = ctx.sys.get_timestamp_millis();
        ctx.repos
            .reminders
            .find_due(now)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
