use super::IMeetupRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use trustkeeper_domain::{Meetup, ID};

pub struct PostgresMeetupRepo {
    pool: PgPool,
}

impl PostgresMeetupRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct MeetupRaw {
    meetup_uid: Uuid,
    title: String,
    description: Option<String>,
    start_ts: i64,
    location: String,
    capacity: i64,
    waitlist_capacity: Option<i64>,
    fee_display: Option<String>,
    host_name: String,
    host_phone: String,
    host_code: String,
    host_uid: Option<Uuid>,
    status: String,
    confirmation_sent: bool,
    created: i64,
    updated: i64,
}

impl TryFrom<MeetupRaw> for Meetup {
    type Error = anyhow::Error;

    fn try_from(raw: MeetupRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.meetup_uid.into(),
            title: raw.title,
            description: raw.description,
            start_ts: raw.start_ts,
            location: raw.location,
            capacity: raw.capacity,
            waitlist_capacity: raw.waitlist_capacity,
            fee_display: raw.fee_display,
            host_name: raw.host_name,
            host_phone: raw.host_phone,
            host_code: raw.host_code,
            host_id: raw.host_uid.map(ID::from),
            status: raw.status.parse()?,
            confirmation_sent: raw.confirmation_sent,
            created: raw.created,
            updated: raw.updated,
        })
    }
}

const SQL_INSERT_MEETUP: &str = r#"
INSERT INTO meetups(
    meetup_uid, title, description, start_ts, location, capacity,
    waitlist_capacity, fee_display, host_name, host_phone, host_code,
    host_uid, status, confirmation_sent, created, updated
)
VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13, $14, $15, $16)
"#;

const SQL_UPDATE_MEETUP: &str = r#"
UPDATE meetups
SET title = $2,
    description = $3,
    start_ts = $4,
    location = $5,
    capacity = $6,
    waitlist_capacity = $7,
    fee_display = $8,
    host_name = $9,
    host_phone = $10,
    status = $11,
    confirmation_sent = $12,
    updated = $13
WHERE meetup_uid = $1
"#;

#[async_trait::async_trait]
impl IMeetupRepo for PostgresMeetupRepo {
    async fn insert(&self, meetup: &Meetup) -> anyhow::Result<()> {
        sqlx::query(SQL_INSERT_MEETUP)
            .bind(meetup.id.inner_ref())
            .bind(&meetup.title)
            .bind(&meetup.description)
            .bind(meetup.start_ts)
            .bind(&meetup.location)
            .bind(meetup.capacity)
            .bind(meetup.waitlist_capacity)
            .bind(&meetup.fee_display)
            .bind(&meetup.host_name)
            .bind(&meetup.host_phone)
            .bind(&meetup.host_code)
            .bind(meetup.host_id.map(|id| id.inner()))
            .bind(meetup.status.as_str())
            .bind(meetup.confirmation_sent)
            .bind(meetup.created)
            .bind(meetup.updated)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Unable to insert meetup: {:?}. DB returned error: {:?}", meetup, e);
                e
            })?;
        Ok(())
    }

    async fn save(&self, meetup: &Meetup) -> anyhow::Result<()> {
        sqlx::query(SQL_UPDATE_MEETUP)
            .bind(meetup.id.inner_ref())
            .bind(&meetup.title)
            .bind(&meetup.description)
            .bind(meetup.start_ts)
            .bind(&meetup.location)
            .bind(meetup.capacity)
            .bind(meetup.waitlist_capacity)
            .bind(&meetup.fee_display)
            .bind(&meetup.host_name)
            .bind(&meetup.host_phone)
            .bind(meetup.status.as_str())
            .bind(meetup.confirmation_sent)
            .bind(meetup.updated)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!("Unable to save meetup: {:?}. DB returned error: {:?}", meetup, e);
                e
            })?;
        Ok(())
    }

    async fn find(&self, meetup_id: &ID) -> Option<Meetup> {
        let raw = sqlx::query_as::<_, MeetupRaw>("SELECT * FROM meetups WHERE meetup_uid = $1")
            .bind(meetup_id.inner_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Find meetup with id: {:?} failed. DB returned error: {:?}", meetup_id, e);
                e
            })
            .ok()??;
        raw.try_into()
            .map_err(|e| error!("Stored meetup {:?} is invalid: {:?}", meetup_id, e))
            .ok()
    }

    async fn find_by_host(&self, host_id: &ID) -> Vec<Meetup> {
        sqlx::query_as::<_, MeetupRaw>(
            "SELECT * FROM meetups WHERE host_uid = $1 ORDER BY start_ts ASC",
        )
        .bind(host_id.inner_ref())
        .fetch_all(&self.pool)
        .await
        .map_err(|e| {
            error!("Find meetups by host: {:?} failed. DB returned error: {:?}", host_id, e);
            e
        })
        .unwrap_or_default()
        .into_iter()
        .filter_map(|raw| raw.try_into().ok())
        .collect()
    }
}
