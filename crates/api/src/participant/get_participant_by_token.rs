use crate::{
    error::KeeperError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use trustkeeper_api_structs::get_participant_by_token::*;
use trustkeeper_domain::{Meetup, Participant};
use trustkeeper_infra::KeeperContext;

pub async fn get_participant_by_token_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let usecase = GetParticipantByTokenUseCase {
        token: path_params.into_inner().token,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.participant, res.meetup)))
        .map_err(KeeperError::from)
}

#[derive(Debug)]
pub struct GetParticipantByTokenUseCase {
    pub token: String,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub participant: Participant,
    pub meetup: Meetup,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => {
                Self::NotFound("No registration was found for the given token".into())
            }
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetParticipantByTokenUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetParticipantByToken";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let participant = ctx
            .repos
            .participants
            .find_by_token(&self.token)
            .await
            .ok_or(UseCaseError::NotFound)?;
        let meetup = ctx
            .repos
            .meetups
            .find(&participant.meetup_id)
            .await
            .ok_or(UseCaseError::NotFound)?;

        Ok(UseCaseResponse {
            participant,
            meetup,
        })
    }
}
