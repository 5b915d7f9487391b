use super::IMeetupRepo;
use crate::repos::shared::inmemory_repo::*;
use trustkeeper_domain::{Meetup, ID};

pub struct InMemoryMeetupRepo {
    meetups: std::sync::Mutex<Vec<Meetup>>,
}

impl InMemoryMeetupRepo {
    pub fn new() -> Self {
        Self {
            meetups: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IMeetupRepo for InMemoryMeetupRepo {
    async fn insert(&self, meetup: &Meetup) -> anyhow::Result<()> {
        insert(meetup, &self.meetups);
        Ok(())
    }

    async fn save(&self, meetup: &Meetup) -> anyhow::Result<()> {
        save(meetup, &self.meetups);
        Ok(())
    }

    async fn find(&self, meetup_id: &ID) -> Option<Meetup> {
        find(meetup_id, &self.meetups)
    }

    async fn find_by_host(&self, host_id: &ID) -> Vec<Meetup> {
        let mut meetups = find_by(&self.meetups, |m| m.is_owned_by(host_id));
        meetups.sort_by_key(|m| m.start_ts);
        meetups
    }
}
