mod inmemory;
mod postgres;

pub use inmemory::InMemoryMeetupRepo;
pub use postgres::PostgresMeetupRepo;
use trustkeeper_domain::{Meetup, ID};

#[async_trait::async_trait]
pub trait IMeetupRepo: Send + Sync {
    async fn insert(&self, meetup: &Meetup) -> anyhow::Result<()>;
    async fn save(&self, meetup: &Meetup) -> anyhow::Result<()>;
    async fn find(&self, meetup_id: &ID) -> Option<Meetup>;
    /// Meetups owned by the host, soonest first
    async fn find_by_host(&self, host_id: &ID) -> Vec<Meetup>;
}

#[cfg(test)]
mod tests {
    use crate::setup_inmemory_context;
    use trustkeeper_domain::{Entity, Meetup, MeetupStatus, ID};

    fn meetup(host_id: Option<ID>, start_ts: i64) -> Meetup {
        Meetup {
            id: Default::default(),
            title: "Board games".into(),
            description: None,
            start_ts,
            location: "Cafe".into(),
            capacity: 6,
            waitlist_capacity: Some(2),
            fee_display: None,
            host_name: "Choi".into(),
            host_phone: "010-5555-6666".into(),
            host_code: Meetup::generate_host_code(),
            host_id,
            status: MeetupStatus::Upcoming,
            confirmation_sent: false,
            created: 0,
            updated: 0,
        }
    }

    #[tokio::test]
    async fn create_and_update() {
        let ctx = setup_inmemory_context();
        let mut meetup = meetup(None, 100);

        assert!(ctx.repos.meetups.insert(&meetup).await.is_ok());
        let res = ctx.repos.meetups.find(&meetup.id).await.unwrap();
        assert!(Entity::eq(&res, &meetup));

        meetup.capacity = 12;
        meetup.status = MeetupStatus::Completed;
        assert!(ctx.repos.meetups.save(&meetup).await.is_ok());
        let res = ctx.repos.meetups.find(&meetup.id).await.unwrap();
        assert_eq!(res.capacity, 12);
        assert_eq!(res.status, MeetupStatus::Completed);

        assert!(ctx.repos.meetups.find(&ID::new()).await.is_none());
    }

    #[tokio::test]
    async fn find_by_host() {
        let ctx = setup_inmemory_context();
        let host_id = ID::new();
        let later = meetup(Some(host_id), 200);
        let sooner = meetup(Some(host_id), 100);
        let other = meetup(Some(ID::new()), 50);
        for m in [&later, &sooner, &other] {
            ctx.repos.meetups.insert(m).await.unwrap();
        }

        let res = ctx.repos.meetups.find_by_host(&host_id).await;
        let ids: Vec<_> = res.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![sooner.id, later.id]);
    }
}
