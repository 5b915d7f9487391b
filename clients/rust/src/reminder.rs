use crate::{APIResponse, BaseClient, ReminderType, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use trustkeeper_api_structs::*;

#[derive(Clone)]
pub struct ReminderClient {
    base: Arc<BaseClient>,
}

pub struct MarkReminderSentInput {
    pub meetup_id: ID,
    pub reminder_type: ReminderType,
    pub sent_by: Option<String>,
    pub note: Option<String>,
}

impl ReminderClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn get(&self, meetup_id: ID) -> APIResponse<get_reminders::APIResponse> {
        self.base
            .get(format!("meetups/{}/reminders", meetup_id), StatusCode::OK)
            .await
    }

    pub async fn mark_sent(
        &self,
        input: MarkReminderSentInput,
    ) -> APIResponse<mark_reminder_sent::APIResponse> {
        let body = mark_reminder_sent::RequestBody {
            sent_by: input.sent_by,
            note: input.note,
        };
        self.base
            .put(
                body,
                format!(
                    "meetups/{}/reminders/{}",
                    input.meetup_id, input.reminder_type
                ),
                StatusCode::OK,
            )
            .await
    }
}
