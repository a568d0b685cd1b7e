use crate::reminder::{DeliverReminderUseCase, GetDueRemindersUseCase};
use crate::shared::usecase::execute;
use nudge_infra::NudgeContext;
use std::time::Duration;
use tokio::time::{interval, sleep};
use tracing::error;

pub fn get_start_delay(now_ts: usize, secs_before_min: usize) -> usize {
    let secs_to_next_minute = 60 - (now_ts / 1000) % 60;
    if secs_to_next_minute > secs_before_min {
        secs_to_next_minute - secs_before_min
    } else {
        secs_to_next_minute + (60 - secs_before_min)
    }
}

/// Starts the periodic scheduler that surfaces due reminders and hands
/// each of them to the delivery dispatcher.
///
/// Known risks, accepted and not prevented: a slow tick may overlap with
/// the next one, and running more than one scheduler instance against the
/// same store may deliver reminders twice.
pub fn start_send_reminders_job(ctx: NudgeContext) {
    tokio::spawn(async move {
        // With the default cadence, align the first tick to the top of the minute
        if ctx.config.reminder_tick_interval_secs == 60 {
            let now = ctx.sys.get_timestamp_millis();
            let secs_to_next_run = get_start_delay(now as usize, 0);
            sleep(Duration::from_secs(secs_to_next_run as u64)).await;
        }

        let mut tick_interval =
            interval(Duration::from_secs(ctx.config.reminder_tick_interval_secs));
        loop {
            tick_interval.tick().await;
            let context = ctx.clone();
            tokio::spawn(send_due_reminders(context));
        }
    });
}

/// One scheduler tick. Failures are logged and never break the loop: a
/// reminder that could not be dispatched stays in a schedulable status
/// and is retried on the next tick.
async fn send_due_reminders(ctx: NudgeContext) {
    let due_reminders = match execute(GetDueRemindersUseCase {}, &ctx).await {
        Ok(due_reminders) => due_reminders,
        // Store unreachable, skip this tick and retry on the next one
        Err(_) => return,
    };

    for reminder in due_reminders {
        let reminder_id = reminder.id.clone();
        if let Err(e) = execute(DeliverReminderUseCase { reminder }, &ctx).await {
            error!(
                "Unable to deliver due reminder: {}. Error: {:?}",
                reminder_id, e
            );
        }
    }
}
