use crate::{
    error::KeeperError,
    shared::{
        auth::{protect_host_route, HostCredential},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use trustkeeper_api_structs::mark_reminder_sent::*;
use trustkeeper_domain::{Reminder, ReminderType, ID};
use trustkeeper_infra::KeeperContext;

pub async fn mark_reminder_sent_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: Option<web::Json<RequestBody>>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let credential = protect_host_route(&http_req, &ctx)?;
    let reminder_type = path_params
        .reminder_type
        .parse::<ReminderType>()
        .map_err(|e| KeeperError::BadClientData(e.to_string()))?;

    let body = body.map(|b| b.into_inner()).unwrap_or_default();
    let usecase = MarkReminderSentUseCase {
        meetup_id: path_params.meetup_id,
        reminder_type,
        sent_by: body.sent_by.unwrap_or_else(|| credential.label()),
        note: body.note,
        credential,
    };

    execute(usecase, &ctx)
        .await
        .map(|reminder| HttpResponse::Ok().json(APIResponse::new(reminder)))
        .map_err(KeeperError::from)
}

/// Records that a scheduled reminder went out, overwriting an earlier record
/// of the same type
#[derive(Debug)]
pub struct MarkReminderSentUseCase {
    pub meetup_id: ID,
    pub reminder_type: ReminderType,
    pub sent_by: String,
    pub note: Option<String>,
    pub credential: HostCredential,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    Forbidden,
    StorageError,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => Self::NotFound("The requested meetup was not found".into()),
            UseCaseError::Forbidden => {
                Self::Forbidden("The credential does not grant access to the meetup".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkReminderSentUseCase {
    type Response = Reminder;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkReminderSent";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let meetup = ctx
            .repos
            .meetups
            .find(&self.meetup_id)
            .await
            .ok_or(UseCaseError::NotFound)?;
        if !self.credential.authorizes(&meetup) {
            return Err(UseCaseError::Forbidden);
        }

        let mut reminder = Reminder::new(meetup.id, self.reminder_type);
        reminder.mark_sent(
            ctx.sys.get_timestamp_millis(),
            Some(self.sent_by.clone()),
            self.note.clone(),
        );

        ctx.repos
            .reminders
            .upsert(&reminder)
            .await
            .map_err(|_| UseCaseError::StorageError)
    }
}
