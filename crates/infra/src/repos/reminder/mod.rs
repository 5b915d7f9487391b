mod inmemory;
mod postgres;

pub use inmemory::InMemoryReminderRepo;
pub use postgres::PostgresReminderRepo;
use trustkeeper_domain::{Reminder, ID};

#[async_trait::async_trait]
pub trait IReminderRepo: Send + Sync {
    /// Stores the reminder, replacing the record with the same meetup and type
    async fn upsert(&self, reminder: &Reminder) -> anyhow::Result<Reminder>;
    async fn find_by_meetup(&self, meetup_id: &ID) -> Vec<Reminder>;
}
