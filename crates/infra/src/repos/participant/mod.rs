mod inmemory;
mod postgres;

pub use inmemory::InMemoryParticipantRepo;
pub use postgres::PostgresParticipantRepo;
use trustkeeper_domain::{Occupancy, Participant, ID};

#[async_trait::async_trait]
pub trait IParticipantRepo: Send + Sync {
    async fn insert(&self, participant: &Participant) -> anyhow::Result<()>;
    async fn save(&self, participant: &Participant) -> anyhow::Result<()>;
    async fn find(&self, participant_id: &ID) -> Option<Participant>;
    async fn find_by_token(&self, token: &str) -> Option<Participant>;
    /// All participants of the meetup in registration order
    async fn find_by_meetup(&self, meetup_id: &ID) -> Vec<Participant>;
    /// The non-cancelled participant registered with the given phone, compared normalized
    async fn find_active_by_phone(&self, meetup_id: &ID, phone: &str) -> Option<Participant>;
    async fn occupancy(&self, meetup_id: &ID) -> anyhow::Result<Occupancy>;
    /// Head of the waitlist queue
    async fn find_next_in_line(&self, meetup_id: &ID) -> Option<Participant>;
}
