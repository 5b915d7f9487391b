use crate::{
    error::KeeperError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use trustkeeper_api_structs::get_meetup::*;
use trustkeeper_domain::{Meetup, Occupancy, ID};
use trustkeeper_infra::KeeperContext;

pub async fn get_meetup_controller(
    path_params: web::Path<PathParams>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let usecase = GetMeetupUseCase {
        meetup_id: path_params.meetup_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.meetup, res.occupancy)))
        .map_err(KeeperError::from)
}

#[derive(Debug)]
pub struct GetMeetupUseCase {
    pub meetup_id: ID,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub meetup: Meetup,
    pub occupancy: Occupancy,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    StorageError,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => Self::NotFound("The requested meetup was not found".into()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMeetupUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMeetup";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let meetup = ctx
            .repos
            .meetups
            .find(&self.meetup_id)
            .await
            .ok_or(UseCaseError::NotFound)?;
        let occupancy = ctx
            .repos
            .participants
            .occupancy(&meetup.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(UseCaseResponse { meetup, occupancy })
    }
}
