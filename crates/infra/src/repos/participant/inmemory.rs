use super::IParticipantRepo;
use crate::repos::shared::inmemory_repo::*;
use trustkeeper_domain::{
    phone::phones_match,
    waitlist::{next_in_line, sort_by_registration},
    Occupancy, Participant, ID,
};

pub struct InMemoryParticipantRepo {
    participants: std::sync::Mutex<Vec<Participant>>,
}

impl InMemoryParticipantRepo {
    pub fn new() -> Self {
        Self {
            participants: std::sync::Mutex::new(Vec::new()),
        }
    }
}

#[async_trait::async_trait]
impl IParticipantRepo for InMemoryParticipantRepo {
    async fn insert(&self, participant: &Participant) -> anyhow::Result<()> {
        insert(participant, &self.participants);
        Ok(())
    }

    async fn save(&self, participant: &Participant) -> anyhow::Result<()> {
        save(participant, &self.participants);
        Ok(())
    }

    async fn find(&self, participant_id: &ID) -> Option<Participant> {
        find(participant_id, &self.participants)
    }

    async fn find_by_token(&self, token: &str) -> Option<Participant> {
        find_by(&self.participants, |p| p.token == token)
            .into_iter()
            .next()
    }

    async fn find_by_meetup(&self, meetup_id: &ID) -> Vec<Participant> {
        let mut participants = find_by(&self.participants, |p| p.meetup_id == *meetup_id);
        sort_by_registration(&mut participants);
        participants
    }

    async fn find_active_by_phone(&self, meetup_id: &ID, phone: &str) -> Option<Participant> {
        find_by(&self.participants, |p| {
            p.meetup_id == *meetup_id && p.is_active() && phones_match(&p.phone, phone)
        })
        .into_iter()
        .next()
    }

    async fn occupancy(&self, meetup_id: &ID) -> anyhow::Result<Occupancy> {
        Ok(Occupancy {
            registered: count_by(&self.participants, |p| {
                p.meetup_id == *meetup_id && p.holds_slot()
            }),
            waitlisted: count_by(&self.participants, |p| {
                p.meetup_id == *meetup_id && p.holds_waitlist_slot()
            }),
        })
    }

    async fn find_next_in_line(&self, meetup_id: &ID) -> Option<Participant> {
        let participants = find_by(&self.participants, |p| p.meetup_id == *meetup_id);
        next_in_line(&participants).cloned()
    }
}
