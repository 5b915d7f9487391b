use crate::{APIResponse, BaseClient, MeetupStatus, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use trustkeeper_api_structs::*;

#[derive(Clone)]
pub struct MeetupClient {
    base: Arc<BaseClient>,
}

pub struct CreateMeetupInput {
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub location: String,
    pub capacity: Option<i64>,
    pub waitlist_capacity: Option<i64>,
    pub fee: Option<String>,
    pub host_name: String,
    pub host_phone: String,
}

#[derive(Default)]
pub struct UpdateMeetupInput {
    pub meetup_id: ID,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_ts: Option<i64>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
    pub waitlist_capacity: Option<Option<i64>>,
    pub fee: Option<String>,
    pub status: Option<MeetupStatus>,
}

impl MeetupClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn create(&self, input: CreateMeetupInput) -> APIResponse<create_meetup::APIResponse> {
        let body = create_meetup::RequestBody {
            title: input.title,
            description: input.description,
            start_ts: input.start_ts,
            location: input.location,
            capacity: input.capacity,
            waitlist_capacity: input.waitlist_capacity,
            fee: input.fee,
            host_name: input.host_name,
            host_phone: input.host_phone,
        };
        self.base
            .post(body, "meetups".into(), StatusCode::CREATED)
            .await
    }

    pub async fn get(&self, meetup_id: ID) -> APIResponse<get_meetup::APIResponse> {
        self.base
            .get(format!("meetups/{}", meetup_id), StatusCode::OK)
            .await
    }

    pub async fn update(&self, input: UpdateMeetupInput) -> APIResponse<update_meetup::APIResponse> {
        let body = update_meetup::RequestBody {
            title: input.title,
            description: input.description,
            start_ts: input.start_ts,
            location: input.location,
            capacity: input.capacity,
            waitlist_capacity: input.waitlist_capacity,
            fee: input.fee,
            status: input.status,
        };
        self.base
            .put(body, format!("meetups/{}", input.meetup_id), StatusCode::OK)
            .await
    }

    pub async fn roster(&self, meetup_id: ID) -> APIResponse<get_roster::APIResponse> {
        self.base
            .get(format!("meetups/{}/roster", meetup_id), StatusCode::OK)
            .await
    }

    pub async fn request_confirmation(
        &self,
        meetup_id: ID,
    ) -> APIResponse<request_confirmation::APIResponse> {
        self.base
            .post(
                (),
                format!("meetups/{}/request-confirmation", meetup_id),
                StatusCode::OK,
            )
            .await
    }
}
