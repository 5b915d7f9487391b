use super::IReminderRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use trustkeeper_domain::{Reminder, ID};

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
    meetup_uid: Uuid,
    reminder_type: String,
    sent_at: Option<i64>,
    sent_by: Option<String>,
    note: Option<String>,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.reminder_uid.into(),
            meetup_id: raw.meetup_uid.into(),
            reminder_type: raw.reminder_type.parse()?,
            sent_at: raw.sent_at,
            sent_by: raw.sent_by,
            note: raw.note,
        })
    }
}

const SQL_UPSERT_REMINDER: &str = r#"
INSERT INTO reminders(reminder_uid, meetup_uid, reminder_type, sent_at, sent_by, note)
VALUES($1, $2, $3, $4, $5, $6)
ON CONFLICT (meetup_uid, reminder_type) DO UPDATE
SET sent_at = EXCLUDED.sent_at,
    sent_by = EXCLUDED.sent_by,
    note = EXCLUDED.note
RETURNING *
"#;

#[async_trait::async_trait]
impl IReminderRepo for PostgresReminderRepo {
    async fn upsert(&self, reminder: &Reminder) -> anyhow::Result<Reminder> {
        let raw = sqlx::query_as::<_, ReminderRaw>(SQL_UPSERT_REMINDER)
            .bind(reminder.id.inner_ref())
            .bind(reminder.meetup_id.inner_ref())
            .bind(reminder.reminder_type.as_str())
            .bind(reminder.sent_at)
            .bind(&reminder.sent_by)
            .bind(&reminder.note)
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Unable to upsert reminder: {:?}. DB returned error: {:?}",
                    reminder, e
                );
                e
            })?;
        raw.try_into()
    }

    async fn find_by_meetup(&self, meetup_id: &ID) -> Vec<Reminder> {
        sqlx::query_as::<_, ReminderRaw>(
            "SELECT * FROM reminders WHERE meetup_uid = $1 ORDER BY sent_at ASC",
        )
        .bind(meetup_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find reminders of meetup: {} failed. DB returned error: {:?}",
                meetup_id, e
            );
            e
        })
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| raw.try_into().ok())
        .collect()
    }
}
