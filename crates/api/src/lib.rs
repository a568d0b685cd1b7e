mod error;
mod job_schedulers;
mod preferences;
mod reminder;
mod shared;

pub use error::NudgeError;
pub use preferences::UpdatePreferencesUseCase;
pub use reminder::{
    CreateReminderUseCase, DeleteLinkedRemindersUseCase, DismissReminderUseCase,
    SnoozeReminderUseCase, SyncLinkedReminderUseCase, SyncOperation, SyncedReminder,
};
pub use shared::usecase::{execute, Subscriber, UseCase};

use job_schedulers::start_send_reminders_job;
use nudge_infra::NudgeContext;

pub struct Application {
    context: NudgeContext,
}

impl Application {
    pub fn new(context: NudgeContext) -> Self {
        Self { context }
    }

    pub async fn start(self) -> Result<(), std::io::Error> {
        Application::start_job_schedulers(self.context);

        // The scheduler runs on spawned tasks, keep the process alive
        tokio::signal::ctrl_c().await
    }

    fn start_job_schedulers(context: NudgeContext) {
        start_send_reminders_job(context);
    }
}
