use serde::{Deserialize, Serialize};
use trustkeeper_domain::{Participant, ParticipantStatus, ID};

#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantDTO {
    pub id: ID,
    pub meetup_id: ID,
    pub token: String,
    pub name: String,
    pub phone: String,
    pub status: ParticipantStatus,
    pub is_waitlisted: bool,
    pub registered_at: i64,
    pub confirmed_at: Option<i64>,
    pub checked_in_at: Option<i64>,
    pub promoted_at: Option<i64>,
}

impl ParticipantDTO {
    pub fn new(participant: Participant) -> Self {
        Self {
            id: participant.id,
            meetup_id: participant.meetup_id,
            token: participant.token,
            name: participant.name,
            phone: participant.phone,
            status: participant.status,
            is_waitlisted: participant.is_waitlisted,
            registered_at: participant.registered_at,
            confirmed_at: participant.confirmed_at,
            checked_in_at: participant.checked_in_at,
            promoted_at: participant.promoted_at,
        }
    }
}
