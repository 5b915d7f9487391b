use crate::{
    error::KeeperError,
    shared::{
        auth::{protect_host_route, HostCredential},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use trustkeeper_api_structs::mark_attendance::*;
use trustkeeper_domain::{Participant, ParticipantStatus, TransitionError, ID};
use trustkeeper_infra::KeeperContext;

pub async fn mark_attendance_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let credential = protect_host_route(&http_req, &ctx)?;

    let usecase = MarkAttendanceUseCase {
        meetup_id: path_params.meetup_id,
        participant_id: path_params.participant_id,
        action: body.action,
        credential,
    };

    execute(usecase, &ctx)
        .await
        .map(|participant| HttpResponse::Ok().json(APIResponse::new(participant)))
        .map_err(KeeperError::from)
}

#[derive(Debug)]
pub struct MarkAttendanceUseCase {
    pub meetup_id: ID,
    pub participant_id: ID,
    pub action: AttendanceAction,
    pub credential: HostCredential,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MeetupNotFound,
    ParticipantNotFound,
    Forbidden,
    NotConfirmed(ParticipantStatus),
    StorageError,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MeetupNotFound => {
                Self::NotFound("The requested meetup was not found".into())
            }
            UseCaseError::ParticipantNotFound => {
                Self::NotFound("The participant was not found in the meetup".into())
            }
            UseCaseError::Forbidden => {
                Self::Forbidden("The credential does not grant access to the meetup".into())
            }
            UseCaseError::NotConfirmed(status) => Self::Conflict(format!(
                "Only confirmed participants can be marked, the participant is `{}`",
                status
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for MarkAttendanceUseCase {
    type Response = Participant;

    type Error = UseCaseError;

    const NAME: &'static str = "MarkAttendance";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let meetup = ctx
            .repos
            .meetups
            .find(&self.meetup_id)
            .await
            .ok_or(UseCaseError::MeetupNotFound)?;
        if !self.credential.authorizes(&meetup) {
            return Err(UseCaseError::Forbidden);
        }

        let _guard = ctx.locks.acquire(&meetup.id).await;
        let mut participant = match ctx.repos.participants.find(&self.participant_id).await {
            Some(p) if p.meetup_id == meetup.id => p,
            _ => return Err(UseCaseError::ParticipantNotFound),
        };

        match self.action {
            AttendanceAction::CheckIn => participant.check_in(ctx.sys.get_timestamp_millis()),
            AttendanceAction::Noshow => participant.mark_noshow(),
        }
        .map_err(|e| match e {
            TransitionError::AlreadyProcessed(status) => UseCaseError::NotConfirmed(status),
            _ => UseCaseError::NotConfirmed(participant.status),
        })?;

        ctx.repos
            .participants
            .save(&participant)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(participant)
    }
}
