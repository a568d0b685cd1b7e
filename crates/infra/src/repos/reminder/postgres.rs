use super::IReminderRepo;
use nudge_domain::{
    DeliveryChannels, Reminder, ReminderStatus, ReminderType, TargetKind, TargetRef, ID,
};
use sqlx::{types::Uuid, FromRow, PgPool};
use std::convert::TryFrom;

pub struct PostgresReminderRepo {
    pool: PgPool,
}

impl PostgresReminderRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    reminder_uid: Uuid,
    owner_uid: Uuid,
    reminder_type: String,
    target_kind: Option<String>,
    target_uid: Option<Uuid>,
    message: String,
    in_app: bool,
    email: bool,
    push: bool,
    remind_at: i64,
    snooze_until: Option<i64>,
    status: String,
    is_user_created: bool,
    is_active: bool,
    created_by: Uuid,
    created: i64,
    updated: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        let target = match (raw.target_kind, raw.target_uid) {
            (Some(kind), Some(uid)) => Some(TargetRef {
                kind: kind.parse::<TargetKind>()?,
                id: uid.into(),
            }),
            _ => None,
        };
        Ok(Self {
            id: raw.reminder_uid.into(),
            owner_id: raw.owner_uid.into(),
            reminder_type: raw.reminder_type.parse::<ReminderType>()?,
            target,
            message: raw.message,
            channels: DeliveryChannels {
                in_app: raw.in_app,
                email: raw.email,
                push: raw.push,
            },
            remind_at: raw.remind_at,
            snooze_until: raw.snooze_until,
            status: raw.status.parse::<ReminderStatus>()?,
            is_user_created: raw.is_user_created,
            is_active: raw.is_active,
            created_by: raw.created_by.into(),
            created: raw.created,
            updated: raw.updated,
        })
    }
}

fn target_columns(target: &Option<TargetRef>) -> (Option<&'static str>, Option<Uuid>) {
    match target {
        Some(t) => (Some(t.kind.as_str()), Some(*t.id.inner_ref())),
        None => (None, None),
    }
}

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn insert(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let (target_kind, target_uid) = target_columns(&reminder.target);
        sqlx::query(
            r#"
            INSERT INTO reminders
            (reminder_uid, owner_uid, reminder_type, target_kind, target_uid, message,
             in_app, email, push, remind_at, snooze_until, status,
             is_user_created, is_active, created_by, created, updated)
            VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16, $17)
            "#,
        )
        .bind(*reminder.id.inner_ref())
        .bind(*reminder.owner_id.inner_ref())
        .bind(reminder.reminder_type.as_str())
        .bind(target_kind)
        .bind(target_uid)
        .bind(&reminder.message)
        .bind(reminder.channels.in_app)
        .bind(reminder.channels.email)
        .bind(reminder.channels.push)
        .bind(reminder.remind_at)
        .bind(reminder.snooze_until)
        .bind(reminder.status.as_str())
        .bind(reminder.is_user_created)
        .bind(reminder.is_active)
        .bind(*reminder.created_by.inner_ref())
        .bind(reminder.created)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn save(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let (target_kind, target_uid) = target_columns(&reminder.target);
        sqlx::query(
            r#"
            UPDATE reminders SET
                owner_uid = $2,
                reminder_type = $3,
                target_kind = $4,
                target_uid = $5,
                message = $6,
                in_app = $7,
                email = $8,
                push = $9,
                remind_at = $10,
                snooze_until = $11,
                status = $12,
                is_user_created = $13,
                is_active = $14,
                updated = $15
            WHERE reminder_uid = $1
            "#,
        )
        .bind(*reminder.id.inner_ref())
        .bind(*reminder.owner_id.inner_ref())
        .bind(reminder.reminder_type.as_str())
        .bind(target_kind)
        .bind(target_uid)
        .bind(&reminder.message)
        .bind(reminder.channels.in_app)
        .bind(reminder.channels.email)
        .bind(reminder.channels.push)
        .bind(reminder.remind_at)
        .bind(reminder.snooze_until)
        .bind(reminder.status.as_str())
        .bind(reminder.is_user_created)
        .bind(reminder.is_active)
        .bind(reminder.updated)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn find(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE reminder_uid = $1
            "#,
        )
        .bind(*reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .and_then(|raw| Reminder::try_from(raw).ok())
    }

    async fn find_due(&self, now: i64) -> anyhow::Result<Vec<Reminder>> {
        let raw_reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.remind_at <= $1
                AND r.status IN ('pending', 'snoozed')
                AND r.is_active
            "#,
        )
        .bind(now)
        .fetch_all(&self.pool)
        .await?;

        raw_reminders.into_iter().map(Reminder::try_from).collect()
    }

    async fn find_by_link(
        &self,
        owner_id: &ID,
        target: &TargetRef,
        reminder_type: ReminderType,
    ) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders AS r
            WHERE r.owner_uid = $1
                AND r.target_kind = $2
                AND r.target_uid = $3
                AND r.reminder_type = $4
            "#,
        )
        .bind(*owner_id.inner_ref())
        .bind(target.kind.as_str())
        .bind(*target.id.inner_ref())
        .bind(reminder_type.as_str())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .and_then(|raw| Reminder::try_from(raw).ok())
    }

    async fn delete(&self, reminder_id: &ID) -> Option<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders
            WHERE reminder_uid = $1
            RETURNING *
            "#,
        )
        .bind(*reminder_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .ok()
        .flatten()
        .and_then(|raw| Reminder::try_from(raw).ok())
    }

    async fn delete_by_link(
        &self,
        owner_id: &ID,
        target: &TargetRef,
        reminder_type: ReminderType,
    ) -> anyhow::Result<Vec<Reminder>> {
        let raw_reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders AS r
            WHERE r.owner_uid = $1
                AND r.target_kind = $2
                AND r.target_uid = $3
                AND r.reminder_type = $4
            RETURNING *
            "#,
        )
        .bind(*owner_id.inner_ref())
        .bind(target.kind.as_str())
        .bind(*target.id.inner_ref())
        .bind(reminder_type.as_str())
        .fetch_all(&self.pool)
        .await?;

        raw_reminders.into_iter().map(Reminder::try_from).collect()
    }
}
