use nudge_domain::{Reminder, ID};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Mutex;
use tokio::sync::broadcast;

/// Events emitted toward the real-time layer. The serialized event names
/// are the contract with connected clients.
#[derive(Debug, Clone, Serialize)]
#[serde(tag = "event", content = "payload", rename_all = "camelCase")]
pub enum RealtimeEvent {
    NewReminder(Reminder),
    ReminderUpdated(Reminder),
    ReminderDeleted(ID),
    ReminderTriggered(Reminder),
}

/// Pushes `RealtimeEvent`s to any currently connected client of a recipient.
/// Publishing is fire and forget, nothing is retried or acknowledged.
#[async_trait::async_trait]
pub trait INotifier: Send + Sync {
    async fn notify(&self, owner_id: &ID, event: RealtimeEvent);
}

/// In-process notifier with one broadcast topic per recipient. The
/// real-time transport subscribes a websocket (or similar) connection
/// to the owner topic and forwards whatever is published there.
pub struct BroadcastNotifier {
    topics: Mutex<HashMap<ID, broadcast::Sender<RealtimeEvent>>>,
}

const TOPIC_CAPACITY: usize = 32;

impl BroadcastNotifier {
    pub fn new() -> Self {
        Self {
            topics: Mutex::new(HashMap::new()),
        }
    }

    /// A receiver for all future events addressed to the given recipient
    pub fn subscribe(&self, owner_id: &ID) -> broadcast::Receiver<RealtimeEvent> {
        let mut topics = self.topics.lock().unwrap();
        topics
            .entry(owner_id.clone())
            .or_insert_with(|| broadcast::channel(TOPIC_CAPACITY).0)
            .subscribe()
    }
}

impl Default for BroadcastNotifier {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl INotifier for BroadcastNotifier {
    async fn notify(&self, owner_id: &ID, event: RealtimeEvent) {
        let topics = self.topics.lock().unwrap();
        if let Some(topic) = topics.get(owner_id) {
            // No connected clients for this recipient is fine
            let _ = topic.send(event);
        }
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use nudge_domain::{DeliveryChannels, ReminderStatus, ReminderType};

    fn reminder(owner_id: &ID) -> Reminder {
        Reminder {
            id: Default::default(),
            owner_id: owner_id.clone(),
            reminder_type: ReminderType::Custom,
            target: None,
            message: "Hello".into(),
            channels: DeliveryChannels::default(),
            remind_at: 0,
            snooze_until: None,
            status: ReminderStatus::Pending,
            is_user_created: true,
            is_active: true,
            created_by: owner_id.clone(),
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn delivers_to_subscribed_recipient() {
        let notifier = BroadcastNotifier::new();
        let owner_id = ID::new();
        let mut rx = notifier.subscribe(&owner_id);

        notifier
            .notify(&owner_id, RealtimeEvent::NewReminder(reminder(&owner_id)))
            .await;

        assert!(matches!(
            rx.try_recv(),
            Ok(RealtimeEvent::NewReminder(_))
        ));
    }

    #[tokio::test]
    async fn notify_without_subscribers_is_a_noop() {
        let notifier = BroadcastNotifier::new();
        let owner_id = ID::new();

        notifier
            .notify(&owner_id, RealtimeEvent::ReminderDeleted(ID::new()))
            .await;
    }

    #[tokio::test]
    async fn topics_are_scoped_per_recipient() {
        let notifier = BroadcastNotifier::new();
        let owner_id = ID::new();
        let other_id = ID::new();
        let mut rx = notifier.subscribe(&other_id);

        notifier
            .notify(&owner_id, RealtimeEvent::NewReminder(reminder(&owner_id)))
            .await;

        assert!(rx.try_recv().is_err());
    }

    #[test]
    fn event_names_are_the_contract() {
        let owner_id = ID::new();
        let event = RealtimeEvent::ReminderTriggered(reminder(&owner_id));
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"reminderTriggered\""));

        let event = RealtimeEvent::ReminderDeleted(ID::new());
        let json = serde_json::to_string(&event).unwrap();
        assert!(json.contains("\"event\":\"reminderDeleted\""));
    }
}
