use crate::{
    error::KeeperError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use trustkeeper_api_structs::register_participant::*;
use trustkeeper_domain::{
    waitlist::{decide_admission, AdmissionError},
    Participant, ID,
};
use trustkeeper_infra::KeeperContext;

pub async fn register_participant_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    Guard::against_empty("name", &body.name)?;
    Guard::against_malformed_phone(&body.phone)?;

    let body = body.into_inner();
    let usecase = RegisterParticipantUseCase {
        meetup_id: path_params.meetup_id,
        name: body.name.trim().to_string(),
        phone: body.phone.trim().to_string(),
    };

    execute(usecase, &ctx)
        .await
        .map(|participant| HttpResponse::Created().json(APIResponse::new(participant)))
        .map_err(KeeperError::from)
}

#[derive(Debug)]
pub struct RegisterParticipantUseCase {
    pub meetup_id: ID,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    MeetupNotFound,
    MeetupClosed,
    AlreadyRegistered,
    WaitlistFull,
    StorageError,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::MeetupNotFound => {
                Self::NotFound("The requested meetup was not found".into())
            }
            UseCaseError::MeetupClosed => {
                Self::Conflict("The meetup does not accept registrations".into())
            }
            UseCaseError::AlreadyRegistered => Self::Conflict(
                "A registration with this phone number already exists for the meetup".into(),
            ),
            UseCaseError::WaitlistFull => {
                Self::Conflict("The meetup and its waitlist are full".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl From<AdmissionError> for UseCaseError {
    fn from(e: AdmissionError) -> Self {
        match e {
            AdmissionError::WaitlistFull => Self::WaitlistFull,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RegisterParticipantUseCase {
    type Response = Participant;

    type Error = UseCaseError;

    const NAME: &'static str = "RegisterParticipant";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        // Capacity and status are read under the lock, edits of the meetup take it too
        let _guard = ctx.locks.acquire(&self.meetup_id).await;

        let meetup = ctx
            .repos
            .meetups
            .find(&self.meetup_id)
            .await
            .ok_or(UseCaseError::MeetupNotFound)?;
        if !meetup.is_open_for_registration() {
            return Err(UseCaseError::MeetupClosed);
        }

        if ctx
            .repos
            .participants
            .find_active_by_phone(&meetup.id, &self.phone)
            .await
            .is_some()
        {
            return Err(UseCaseError::AlreadyRegistered);
        }

        let occupancy = ctx
            .repos
            .participants
            .occupancy(&meetup.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        let admission = decide_admission(&meetup, &occupancy)?;

        let participant = Participant::new(
            meetup.id,
            self.name.clone(),
            self.phone.clone(),
            admission,
            ctx.sys.get_timestamp_millis(),
        );
        ctx.repos
            .participants
            .insert(&participant)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(participant)
    }
}
