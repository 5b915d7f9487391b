use crate::dtos::{HostMeetupDTO, MeetupDTO, ParticipantDTO, RosterStatsDTO};
use serde::{Deserialize, Deserializer, Serialize};
use trustkeeper_domain::{Meetup, MeetupStatus, Occupancy, Participant, ReminderType, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HostMeetupResponse {
    pub meetup: HostMeetupDTO,
}

impl HostMeetupResponse {
    pub fn new(meetup: Meetup) -> Self {
        Self {
            meetup: HostMeetupDTO::new(meetup),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct MeetupPathParams {
    pub meetup_id: ID,
}

/// Keeps an explicit `null` apart from a missing field
fn deserialize_explicit<'de, T, D>(deserializer: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(deserializer).map(Some)
}

pub mod create_meetup {
    use super::*;

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub title: String,
        pub description: Option<String>,
        pub start_ts: i64,
        pub location: String,
        pub capacity: Option<i64>,
        pub waitlist_capacity: Option<i64>,
        /// Whole amount, e.g. `15000`
        pub fee: Option<String>,
        pub host_name: String,
        pub host_phone: String,
    }

    pub type APIResponse = HostMeetupResponse;
}

pub mod update_meetup {
    use super::*;

    pub type PathParams = MeetupPathParams;

    #[derive(Serialize, Deserialize, Default)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        #[serde(skip_serializing_if = "Option::is_none")]
        pub title: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub description: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub start_ts: Option<i64>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub location: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub capacity: Option<i64>,
        /// `Some(None)` removes the bound of the waitlist
        #[serde(
            default,
            deserialize_with = "deserialize_explicit",
            skip_serializing_if = "Option::is_none"
        )]
        pub waitlist_capacity: Option<Option<i64>>,
        /// Whole amount, an empty string makes the meetup free
        #[serde(alias = "feeDisplay", skip_serializing_if = "Option::is_none")]
        pub fee: Option<String>,
        #[serde(skip_serializing_if = "Option::is_none")]
        pub status: Option<MeetupStatus>,
    }

    pub type APIResponse = HostMeetupResponse;
}

pub mod get_meetup {
    use super::*;

    pub type PathParams = MeetupPathParams;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub meetup: MeetupDTO,
        pub registered_count: i64,
        pub waitlisted_count: i64,
    }

    impl APIResponse {
        pub fn new(meetup: Meetup, occupancy: Occupancy) -> Self {
            Self {
                meetup: MeetupDTO::new(&meetup),
                registered_count: occupancy.registered,
                waitlisted_count: occupancy.waitlisted,
            }
        }
    }
}

pub mod get_roster {
    use super::*;

    pub type PathParams = MeetupPathParams;

    #[derive(Debug, Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub meetup: HostMeetupDTO,
        pub participants: Vec<ParticipantDTO>,
        pub stats: RosterStatsDTO,
    }

    impl APIResponse {
        pub fn new(meetup: Meetup, participants: Vec<Participant>) -> Self {
            Self {
                stats: RosterStatsDTO::new(&participants),
                meetup: HostMeetupDTO::new(meetup),
                participants: participants.into_iter().map(ParticipantDTO::new).collect(),
            }
        }
    }
}

pub mod request_confirmation {
    use super::*;

    pub type PathParams = MeetupPathParams;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub meetup: HostMeetupDTO,
        /// Participants that are asked to confirm
        pub participants: Vec<ParticipantDTO>,
    }

    impl APIResponse {
        pub fn new(meetup: Meetup, participants: Vec<Participant>) -> Self {
            Self {
                meetup: HostMeetupDTO::new(meetup),
                participants: participants.into_iter().map(ParticipantDTO::new).collect(),
            }
        }
    }
}

pub mod get_my_meetups {
    use super::*;

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct MeetupSummary {
        pub meetup: HostMeetupDTO,
        pub registered_count: i64,
        pub waitlisted_count: i64,
        pub pending_reminders: Vec<ReminderType>,
    }

    #[derive(Serialize, Deserialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub meetups: Vec<MeetupSummary>,
    }
}
