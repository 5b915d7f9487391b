use crate::{
    error::KeeperError,
    shared::{
        auth::{protect_host_route, HostCredential},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use trustkeeper_api_structs::request_confirmation::*;
use trustkeeper_domain::{Meetup, Participant, ParticipantStatus, ID};
use trustkeeper_infra::KeeperContext;

pub async fn request_confirmation_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let credential = protect_host_route(&http_req, &ctx)?;

    let usecase = RequestConfirmationUseCase {
        meetup_id: path_params.meetup_id,
        credential,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.meetup, res.participants)))
        .map_err(KeeperError::from)
}

/// Opens the confirmation round of a meetup. Returns the participants that
/// hold a slot but did not confirm yet, to whom the confirm links are shared.
#[derive(Debug)]
pub struct RequestConfirmationUseCase {
    pub meetup_id: ID,
    pub credential: HostCredential,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub meetup: Meetup,
    pub participants: Vec<Participant>,
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
impl UseCase for RequestConfirmationUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "RequestConfirmation";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let _guard = ctx.locks.acquire(&self.meetup_id).await;
        let mut meetup = ctx
            .repos
            .meetups
            .find(&self.meetup_id)
            .await
            .ok_or(UseCaseError::NotFound)?;
        if !self.credential.authorizes(&meetup) {
            return Err(UseCaseError::Forbidden);
        }

        if !meetup.confirmation_sent {
            meetup.confirmation_sent = true;
            meetup.updated = ctx.sys.get_timestamp_millis();
            ctx.repos
                .meetups
                .save(&meetup)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
        }

        let participants = ctx
            .repos
            .participants
            .find_by_meetup(&meetup.id)
            .await
            .into_iter()
            .filter(|p| !p.is_waitlisted && p.status == ParticipantStatus::Registered)
            .collect();

        Ok(UseCaseResponse {
            meetup,
            participants,
        })
    }
}
