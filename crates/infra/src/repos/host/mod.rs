mod inmemory;
mod postgres;

pub use inmemory::InMemoryHostRepo;
pub use postgres::PostgresHostRepo;
use trustkeeper_domain::{Host, ID};

#[async_trait::async_trait]
pub trait IHostRepo: Send + Sync {
    async fn insert(&self, host: &Host) -> anyhow::Result<()>;
    async fn find(&self, host_id: &ID) -> Option<Host>;
    async fn find_by_username(&self, username: &str) -> Option<Host>;
}
