use tracing::{info, log::warn};

#[derive(Debug, Clone)]
pub struct MailRelayConfig {
    pub url: String,
    pub key: String,
}

#[derive(Debug, Clone)]
pub struct Config {
    /// How often the scheduler wakes up and looks for due reminders.
    /// This bounds delivery latency, it is not correctness critical.
    pub reminder_tick_interval_secs: u64,
    /// Transactional mail relay to post email notifications to. When absent
    /// the email channel falls back to a logging sender.
    pub mail_relay: Option<MailRelayConfig>,
    /// Mobile push gateway to post push notifications to. When absent
    /// the push channel falls back to a logging sender.
    pub push_gateway_url: Option<String>,
}

impl Config {
    pub fn new() -> Self {
        let default_tick = "60";
        let tick = std::env::var("REMINDER_TICK_INTERVAL_SECS").unwrap_or(default_tick.into());
        let reminder_tick_interval_secs = match tick.parse::<u64>() {
            Ok(secs) if secs > 0 => secs,
            _ => {
                warn!(
                    "The given REMINDER_TICK_INTERVAL_SECS: {} is not valid, falling back to the default: {}.",
                    tick, default_tick
                );
                default_tick.parse::<u64>().unwrap()
            }
        };

        let mail_relay = match (
            std::env::var("MAIL_RELAY_URL"),
            std::env::var("MAIL_RELAY_KEY"),
        ) {
            (Ok(url), Ok(key)) => Some(MailRelayConfig { url, key }),
            _ => {
                info!("MAIL_RELAY_URL and MAIL_RELAY_KEY env vars not set. Email notifications will only be logged.");
                None
            }
        };

        let push_gateway_url = match std::env::var("PUSH_GATEWAY_URL") {
            Ok(url) => Some(url),
            Err(_) => {
                info!("PUSH_GATEWAY_URL env var not set. Push notifications will only be logged.");
                None
            }
        };

        Self {
            reminder_tick_interval_secs,
            mail_relay,
            push_gateway_url,
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self::new()
    }
}
