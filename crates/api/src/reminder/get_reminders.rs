use crate::{
    error::KeeperError,
    shared::{
        auth::{protect_host_route, HostCredential},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use trustkeeper_api_structs::{dtos::ReminderDTO, get_reminders::*};
use trustkeeper_domain::{days_until, unsent_reminder_types, Reminder, ReminderType, ID};
use trustkeeper_infra::KeeperContext;

pub async fn get_reminders_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let credential = protect_host_route(&http_req, &ctx)?;

    let usecase = GetRemindersUseCase {
        meetup_id: path_params.meetup_id,
        credential,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| {
            HttpResponse::Ok().json(APIResponse {
                reminders: res.reminders.into_iter().map(ReminderDTO::new).collect(),
                days_until: res.days_until,
                unsent: res.unsent,
            })
        })
        .map_err(KeeperError::from)
}

/// Reminder state of a meetup, due reminders are computed on request
#[derive(Debug)]
pub struct GetRemindersUseCase {
    pub meetup_id: ID,
    pub credential: HostCredential,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub reminders: Vec<Reminder>,
    pub days_until: i64,
    pub unsent: Vec<ReminderType>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    Forbidden,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => Self::NotFound("The requested meetup was not found".into()),
            UseCaseError::Forbidden => {
                Self::Forbidden("The credential does not grant access to the meetup".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetRemindersUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetReminders";

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

        let reminders = ctx.repos.reminders.find_by_meetup(&meetup.id).await;
        let days_until = days_until(meetup.start_ts, ctx.sys.get_timestamp_millis());
        let unsent = unsent_reminder_types(days_until, &reminders);

        Ok(UseCaseResponse {
            reminders,
            days_until,
            unsent,
        })
    }
}
