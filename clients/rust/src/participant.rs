use crate::{APIResponse, BaseClient, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use trustkeeper_api_structs::*;

#[derive(Clone)]
pub struct ParticipantClient {
    base: Arc<BaseClient>,
}

pub use answer_waitlist_offer::OfferAction;
pub use mark_attendance::AttendanceAction;
pub use respond_to_meetup::ResponseAction;

pub struct RegisterParticipantInput {
    pub meetup_id: ID,
    pub name: String,
    pub phone: String,
}

pub struct MarkAttendanceInput {
    pub meetup_id: ID,
    pub participant_id: ID,
    pub action: AttendanceAction,
}

impl ParticipantClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn register(
        &self,
        input: RegisterParticipantInput,
    ) -> APIResponse<register_participant::APIResponse> {
        let body = register_participant::RequestBody {
            name: input.name,
            phone: input.phone,
        };
        self.base
            .post(
                body,
                format!("meetups/{}/participants", input.meetup_id),
                StatusCode::CREATED,
            )
            .await
    }

    pub async fn get_by_token(
        &self,
        token: &str,
    ) -> APIResponse<get_participant_by_token::APIResponse> {
        self.base
            .get(format!("participants/{}", token), StatusCode::OK)
            .await
    }

    pub async fn respond(
        &self,
        token: &str,
        action: ResponseAction,
    ) -> APIResponse<respond_to_meetup::APIResponse> {
        let body = respond_to_meetup::RequestBody { action };
        self.base
            .post(
                body,
                format!("participants/{}/respond", token),
                StatusCode::OK,
            )
            .await
    }

    pub async fn answer_offer(
        &self,
        token: &str,
        action: OfferAction,
    ) -> APIResponse<answer_waitlist_offer::APIResponse> {
        let body = answer_waitlist_offer::RequestBody { action };
        self.base
            .post(
                body,
                format!("participants/{}/waitlist", token),
                StatusCode::OK,
            )
            .await
    }

    pub async fn mark_attendance(
        &self,
        input: MarkAttendanceInput,
    ) -> APIResponse<mark_attendance::APIResponse> {
        let body = mark_attendance::RequestBody {
            action: input.action,
        };
        self.base
            .post(
                body,
                format!(
                    "meetups/{}/participants/{}/attendance",
                    input.meetup_id, input.participant_id
                ),
                StatusCode::OK,
            )
            .await
    }

    pub async fn self_check_in(
        &self,
        meetup_id: ID,
        name: String,
        phone: String,
    ) -> APIResponse<self_check_in::APIResponse> {
        let body = self_check_in::RequestBody { name, phone };
        self.base
            .post(
                body,
                format!("meetups/{}/check-in", meetup_id),
                StatusCode::OK,
            )
            .await
    }
}
