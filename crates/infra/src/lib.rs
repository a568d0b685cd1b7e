mod config;
mod repos;
mod services;
mod system;

pub use config::{Config, MailRelayConfig};
pub use repos::{IReminderRepo, IUserRepo, InMemoryReminderRepo, InMemoryUserRepo, Repos};
pub use services::*;
use sqlx::migrate::MigrateError;
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;
use tracing::info;

#[derive(Clone)]
pub struct NudgeContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
    /// Real-time layer handle, injected here instead of living in a
    /// process wide global
    pub notifier: Arc<dyn INotifier>,
    pub channels: ChannelSenders,
}

impl NudgeContext {
    async fn create_postgres(connection_string: &str) -> Self {
        let repos = Repos::create_postgres(connection_string)
            .await
            .expect("Postgres credentials must be set and valid");
        let config = Config::new();
        let notifier: Arc<dyn INotifier> = Arc::new(BroadcastNotifier::new());
        let channels = ChannelSenders::create(&config, notifier.clone());
        Self {
            repos,
            config,
            sys: Arc::new(RealSys {}),
            notifier,
            channels,
        }
    }

    fn create_inmemory() -> Self {
        let config = Config::new();
        let notifier: Arc<dyn INotifier> = Arc::new(BroadcastNotifier::new());
        let channels = ChannelSenders::create(&config, notifier.clone());
        Self {
            repos: Repos::create_inmemory(),
            config,
            sys: Arc::new(RealSys {}),
            notifier,
            channels,
        }
    }
}

/// Will setup the infrastructure context given the environment
pub async fn setup_context() -> NudgeContext {
    const DATABASE_URL: &str = "DATABASE_URL";

    match std::env::var(DATABASE_URL) {
        Ok(connection_string) => NudgeContext::create_postgres(&connection_string).await,
        Err(_) => {
            info!(
                "{} env var not set. Going to use inmemory infra.",
                DATABASE_URL
            );
            NudgeContext::create_inmemory()
        }
    }
}

pub async fn run_migration() -> Result<(), MigrateError> {
    let pool = PgPoolOptions::new()
        .max_connections(5)
        .connect(
            &std::env::var("DATABASE_URL").expect("DATABASE_URL env var to be present for migrations"),
        )
        .await
        .expect("TO CONNECT TO POSTGRES");

    sqlx::migrate!().run(&pool).await
}
