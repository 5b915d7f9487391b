use crate::{
    error::KeeperError,
    shared::{
        auth::{protect_host_route, HostCredential},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use trustkeeper_api_structs::get_roster::*;
use trustkeeper_domain::{Meetup, Participant, ID};
use trustkeeper_infra::KeeperContext;

pub async fn get_roster_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let credential = protect_host_route(&http_req, &ctx)?;

    let usecase = GetRosterUseCase {
        meetup_id: path_params.meetup_id,
        credential,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.meetup, res.participants)))
        .map_err(KeeperError::from)
}

/// Everything the host sees on the management page of a meetup
#[derive(Debug)]
pub struct GetRosterUseCase {
    pub meetup_id: ID,
    pub credential: HostCredential,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub meetup: Meetup,
    /// In registration order
    pub participants: Vec<Participant>,
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
impl UseCase for GetRosterUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetRoster";

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
        let participants = ctx.repos.participants.find_by_meetup(&meetup.id).await;

        Ok(UseCaseResponse {
            meetup,
            participants,
        })
    }
}
