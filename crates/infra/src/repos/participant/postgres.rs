use super::IParticipantRepo;
use sqlx::{types::Uuid, FromRow, PgPool};
use tracing::error;
use trustkeeper_domain::{phone::normalize_phone, Occupancy, Participant, ID};

pub struct PostgresParticipantRepo {
    pool: PgPool,
}

impl PostgresParticipantRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    async fn find_one(&self, sql: &str, param: &str, by: &str) -> Option<Participant> {
        let raw = sqlx::query_as::<_, ParticipantRaw>(sql)
            .bind(param)
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Find participant by {} failed. DB returned error: {:?}", by, e);
                e
            })
            .ok()??;
        into_participant(raw)
    }
}

#[derive(Debug, FromRow)]
struct ParticipantRaw {
    participant_uid: Uuid,
    meetup_uid: Uuid,
    token: String,
    name: String,
    phone: String,
    status: String,
    is_waitlisted: bool,
    registered_at: i64,
    confirmed_at: Option<i64>,
    checked_in_at: Option<i64>,
    promoted_at: Option<i64>,
}

impl TryFrom<ParticipantRaw> for Participant {
    type Error = anyhow::Error;

    fn try_from(raw: ParticipantRaw) -> anyhow::Result<Self> {
        Ok(Self {
            id: raw.participant_uid.into(),
            meetup_id: raw.meetup_uid.into(),
            token: raw.token,
            name: raw.name,
            phone: raw.phone,
            status: raw.status.parse()?,
            is_waitlisted: raw.is_waitlisted,
            registered_at: raw.registered_at,
            confirmed_at: raw.confirmed_at,
            checked_in_at: raw.checked_in_at,
            promoted_at: raw.promoted_at,
        })
    }
}

fn into_participant(raw: ParticipantRaw) -> Option<Participant> {
    let id = raw.participant_uid;
    raw.try_into()
        .map_err(|e| error!("Stored participant {} is invalid: {:?}", id, e))
        .ok()
}

const SQL_INSERT_PARTICIPANT: &str = r#"
INSERT INTO participants(
    participant_uid, meetup_uid, token, name, phone, phone_normalized, status,
    is_waitlisted, registered_at, confirmed_at, checked_in_at, promoted_at
)
VALUES($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12)
"#;

const SQL_UPDATE_PARTICIPANT: &str = r#"
UPDATE participants
SET status = $2,
    is_waitlisted = $3,
    confirmed_at = $4,
    checked_in_at = $5,
    promoted_at = $6
WHERE participant_uid = $1
"#;

const SQL_FIND_BY_MEETUP: &str = r#"
SELECT * FROM participants
WHERE meetup_uid = $1
ORDER BY registered_at ASC, participant_uid ASC
"#;

const SQL_FIND_ACTIVE_BY_PHONE: &str = r#"
SELECT * FROM participants
WHERE meetup_uid = $1 AND phone_normalized = $2 AND status <> 'cancelled'
LIMIT 1
"#;

const SQL_OCCUPANCY: &str = r#"
SELECT
    COUNT(*) FILTER (WHERE NOT is_waitlisted) AS registered,
    COUNT(*) FILTER (WHERE is_waitlisted) AS waitlisted
FROM participants
WHERE meetup_uid = $1 AND status <> 'cancelled'
"#;

const SQL_FIND_NEXT_IN_LINE: &str = r#"
SELECT * FROM participants
WHERE meetup_uid = $1
    AND is_waitlisted
    AND status IN ('waitlisted', 'confirmed')
ORDER BY registered_at ASC, participant_uid ASC
LIMIT 1
"#;

#[async_trait::async_trait]
impl IParticipantRepo for PostgresParticipantRepo {
    async fn insert(&self, participant: &Participant) -> anyhow::Result<()> {
        sqlx::query(SQL_INSERT_PARTICIPANT)
            .bind(participant.id.inner_ref())
            .bind(participant.meetup_id.inner_ref())
            .bind(&participant.token)
            .bind(&participant.name)
            .bind(&participant.phone)
            .bind(normalize_phone(&participant.phone))
            .bind(participant.status.as_str())
            .bind(participant.is_waitlisted)
            .bind(participant.registered_at)
            .bind(participant.confirmed_at)
            .bind(participant.checked_in_at)
            .bind(participant.promoted_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Unable to insert participant: {} for meetup: {}. DB returned error: {:?}",
                    participant.id, participant.meetup_id, e
                );
                e
            })?;
        Ok(())
    }

    async fn save(&self, participant: &Participant) -> anyhow::Result<()> {
        sqlx::query(SQL_UPDATE_PARTICIPANT)
            .bind(participant.id.inner_ref())
            .bind(participant.status.as_str())
            .bind(participant.is_waitlisted)
            .bind(participant.confirmed_at)
            .bind(participant.checked_in_at)
            .bind(participant.promoted_at)
            .execute(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Unable to save participant: {}. DB returned error: {:?}",
                    participant.id, e
                );
                e
            })?;
        Ok(())
    }

    async fn find(&self, participant_id: &ID) -> Option<Participant> {
        let raw = sqlx::query_as::<_, ParticipantRaw>(
            "SELECT * FROM participants WHERE participant_uid = $1",
        )
        .bind(participant_id.inner_ref())
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| {
            error!(
                "Find participant with id: {} failed. DB returned error: {:?}",
                participant_id, e
            );
            e
        })
        .ok()??;
        into_participant(raw)
    }

    async fn find_by_token(&self, token: &str) -> Option<Participant> {
        self.find_one("SELECT * FROM participants WHERE token = $1", token, "token")
            .await
    }

    async fn find_by_meetup(&self, meetup_id: &ID) -> Vec<Participant> {
        sqlx::query_as::<_, ParticipantRaw>(SQL_FIND_BY_MEETUP)
            .bind(meetup_id.inner_ref())
            .fetch_all(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find participants of meetup: {} failed. DB returned error: {:?}",
                    meetup_id, e
                );
                e
            })
            .unwrap_or_default()
            .into_iter()
            .filter_map(into_participant)
            .collect()
    }

    async fn find_active_by_phone(&self, meetup_id: &ID, phone: &str) -> Option<Participant> {
        let raw = sqlx::query_as::<_, ParticipantRaw>(SQL_FIND_ACTIVE_BY_PHONE)
            .bind(meetup_id.inner_ref())
            .bind(normalize_phone(phone))
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!("Find participant by phone failed. DB returned error: {:?}", e);
                e
            })
            .ok()??;
        into_participant(raw)
    }

    async fn occupancy(&self, meetup_id: &ID) -> anyhow::Result<Occupancy> {
        let (registered, waitlisted) = sqlx::query_as::<_, (i64, i64)>(SQL_OCCUPANCY)
            .bind(meetup_id.inner_ref())
            .fetch_one(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Counting participants of meetup: {} failed. DB returned error: {:?}",
                    meetup_id, e
                );
                e
            })?;
        Ok(Occupancy {
            registered,
            waitlisted,
        })
    }

    async fn find_next_in_line(&self, meetup_id: &ID) -> Option<Participant> {
        let raw = sqlx::query_as::<_, ParticipantRaw>(SQL_FIND_NEXT_IN_LINE)
            .bind(meetup_id.inner_ref())
            .fetch_optional(&self.pool)
            .await
            .map_err(|e| {
                error!(
                    "Find next waitlisted participant of meetup: {} failed. DB returned error: {:?}",
                    meetup_id, e
                );
                e
            })
            .ok()??;
        into_participant(raw)
    }
}
