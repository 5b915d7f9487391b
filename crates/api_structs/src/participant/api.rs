use crate::dtos::{MeetupDTO, ParticipantDTO};
use serde::{Deserialize, Serialize};
use trustkeeper_domain::{Meetup, Participant, ID};

#[derive(Debug, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ParticipantResponse {
    pub participant: ParticipantDTO,
}

impl ParticipantResponse {
    pub fn new(participant: Participant) -> Self {
        Self {
            participant: ParticipantDTO::new(participant),
        }
    }
}

#[derive(Deserialize, Serialize)]
pub struct TokenPathParams {
    pub token: String,
}

pub mod register_participant {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub meetup_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub phone: String,
    }

    pub type APIResponse = ParticipantResponse;
}

pub mod get_participant_by_token {
    use super::*;

    pub type PathParams = TokenPathParams;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub participant: ParticipantDTO,
        pub meetup: MeetupDTO,
    }

    impl APIResponse {
        pub fn new(participant: Participant, meetup: Meetup) -> Self {
            Self {
                participant: ParticipantDTO::new(participant),
                meetup: MeetupDTO::new(&meetup),
            }
        }
    }
}

pub mod respond_to_meetup {
    use super::*;

    pub type PathParams = TokenPathParams;

    #[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum ResponseAction {
        Confirm,
        Cancel,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub action: ResponseAction,
    }

    pub type APIResponse = ParticipantResponse;
}

pub mod answer_waitlist_offer {
    use super::*;

    pub type PathParams = TokenPathParams;

    #[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "lowercase")]
    pub enum OfferAction {
        Accept,
        Pass,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub action: OfferAction,
    }

    pub type APIResponse = ParticipantResponse;
}

pub mod mark_attendance {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub meetup_id: ID,
        pub participant_id: ID,
    }

    #[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
    #[serde(rename_all = "snake_case")]
    pub enum AttendanceAction {
        CheckIn,
        Noshow,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub action: AttendanceAction,
    }

    pub type APIResponse = ParticipantResponse;
}

pub mod self_check_in {
    use super::*;

    #[derive(Deserialize, Serialize)]
    pub struct PathParams {
        pub meetup_id: ID,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub name: String,
        pub phone: String,
    }

    pub type APIResponse = ParticipantResponse;
}
