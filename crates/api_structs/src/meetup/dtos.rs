use trustkeeper_domain::{Meetup, MeetupStatus, Participant, ParticipantStatus, ID};
use serde::{Deserialize, Serialize};

/// What everyone with the link of a meetup may see
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct MeetupDTO {
    pub id: ID,
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub location: String,
    pub capacity: i64,
    pub waitlist_capacity: Option<i64>,
    pub fee_display: Option<String>,
    pub host_name: String,
    pub status: MeetupStatus,
}

impl MeetupDTO {
    pub fn new(meetup: &Meetup) -> Self {
        Self {
            id: meetup.id,
            title: meetup.title.clone(),
            description: meetup.description.clone(),
            start_ts: meetup.start_ts,
            location: meetup.location.clone(),
            capacity: meetup.capacity,
            waitlist_capacity: meetup.waitlist_capacity,
            fee_display: meetup.fee_display.clone(),
            host_name: meetup.host_name.clone(),
            status: meetup.status,
        }
    }
}

/// The meetup as seen by its host, including the access code
#[derive(Debug, Deserialize, Serialize, Clone)]
#[serde(rename_all = "camelCase")]
pub struct HostMeetupDTO {
    #[serde(flatten)]
    pub meetup: MeetupDTO,
    pub host_phone: String,
    pub host_code: String,
    pub host_id: Option<ID>,
    pub confirmation_sent: bool,
    pub created: i64,
    pub updated: i64,
}

impl HostMeetupDTO {
    pub fn new(meetup: Meetup) -> Self {
        Self {
            meetup: MeetupDTO::new(&meetup),
            host_phone: meetup.host_phone,
            host_code: meetup.host_code,
            host_id: meetup.host_id,
            confirmation_sent: meetup.confirmation_sent,
            created: meetup.created,
            updated: meetup.updated,
        }
    }
}

#[derive(Debug, Deserialize, Serialize, Clone, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RosterStatsDTO {
    pub total: i64,
    pub registered: i64,
    pub waitlisted: i64,
    pub confirmed: i64,
    pub attended: i64,
    pub noshow: i64,
    pub cancelled: i64,
}

impl RosterStatsDTO {
    /// `registered` counts everyone holding a slot, `waitlisted` everyone
    /// holding a waitlist slot. The remaining fields count by status.
    pub fn new(participants: &[Participant]) -> Self {
        participants.iter().fold(Self::default(), |mut stats, p| {
            stats.total += 1;
            if p.holds_slot() {
                stats.registered += 1;
            }
            if p.holds_waitlist_slot() {
                stats.waitlisted += 1;
            }
            match p.status {
                ParticipantStatus::Confirmed => stats.confirmed += 1,
                ParticipantStatus::Attended => stats.attended += 1,
                ParticipantStatus::Noshow => stats.noshow += 1,
                ParticipantStatus::Cancelled => stats.cancelled += 1,
                ParticipantStatus::Registered | ParticipantStatus::Waitlisted => {}
            }
            stats
        })
    }
}
