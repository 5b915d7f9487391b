mod host;
mod meetup;
mod participant;
mod reminder;
mod shared;

pub use host::IHostRepo;
use host::{InMemoryHostRepo, PostgresHostRepo};
pub use meetup::IMeetupRepo;
use meetup::{InMemoryMeetupRepo, PostgresMeetupRepo};
pub use participant::IParticipantRepo;
use participant::{InMemoryParticipantRepo, PostgresParticipantRepo};
pub use reminder::IReminderRepo;
use reminder::{InMemoryReminderRepo, PostgresReminderRepo};
use sqlx::postgres::PgPoolOptions;
use std::sync::Arc;
use tracing::info;

#[derive(Clone)]
pub struct Repos {
    pub meetups: Arc<dyn IMeetupRepo>,
    pub participants: Arc<dyn IParticipantRepo>,
    pub reminders: Arc<dyn IReminderRepo>,
    pub hosts: Arc<dyn IHostRepo>,
}

impl Repos {
    pub async fn create_postgres(connection_string: &str) -> anyhow::Result<Self> {
        info!("DB CHECKING CONNECTION ...");
        let pool = PgPoolOptions::new()
            .max_connections(5)
            .connect(connection_string)
            .await?;
        info!("DB CHECKING CONNECTION ... [done]");

        info!("DB RUNNING MIGRATIONS ...");
        sqlx::migrate!().run(&pool).await?;
        info!("DB RUNNING MIGRATIONS ... [done]");

        Ok(Self {
            meetups: Arc::new(PostgresMeetupRepo::new(pool.clone())),
            participants: Arc::new(PostgresParticipantRepo::new(pool.clone())),
            reminders: Arc::new(PostgresReminderRepo::new(pool.clone())),
            hosts: Arc::new(PostgresHostRepo::new(pool)),
        })
    }

    pub fn create_inmemory() -> Self {
        Self {
            meetups: Arc::new(InMemoryMeetupRepo::new()),
            participants: Arc::new(InMemoryParticipantRepo::new()),
            reminders: Arc::new(InMemoryReminderRepo::new()),
            hosts: Arc::new(InMemoryHostRepo::new()),
        }
    }
}
