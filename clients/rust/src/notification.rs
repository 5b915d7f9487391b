use crate::{APIResponse, BaseClient, NotificationKind, ID};
use reqwest::StatusCode;
use std::sync::Arc;
use trustkeeper_api_structs::*;

#[derive(Clone)]
pub struct NotificationClient {
    base: Arc<BaseClient>,
}

pub struct DispatchNotificationInput {
    pub meetup_id: ID,
    pub kind: NotificationKind,
    pub targets: Option<Vec<ID>>,
}

impl NotificationClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn dispatch(
        &self,
        input: DispatchNotificationInput,
    ) -> APIResponse<dispatch_notification::APIResponse> {
        let body = dispatch_notification::RequestBody {
            kind: input.kind.to_string(),
            targets: input.targets,
        };
        self.base
            .post(
                body,
                format!("meetups/{}/notifications", input.meetup_id),
                StatusCode::OK,
            )
            .await
    }
}
