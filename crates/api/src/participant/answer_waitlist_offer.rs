use super::promote_from_waitlist::PromoteFromWaitlistUseCase;
use crate::{
    error::KeeperError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tracing::error;
use trustkeeper_api_structs::answer_waitlist_offer::*;
use trustkeeper_domain::{
    waitlist::has_free_slot, Participant, ParticipantStatus, TransitionError,
};
use trustkeeper_infra::KeeperContext;

pub async fn answer_waitlist_offer_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let usecase = AnswerWaitlistOfferUseCase {
        token: path_params.into_inner().token,
        action: body.action,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.participant)))
        .map_err(KeeperError::from)
}

/// Accepts or passes on a slot offered from the waitlist. Passing hands the
/// slot to the next one in line.
#[derive(Debug)]
pub struct AnswerWaitlistOfferUseCase {
    pub token: String,
    pub action: OfferAction,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub participant: Participant,
    pub promoted: Option<Participant>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    NoPendingOffer(ParticipantStatus),
    NoFreeSlot,
    StorageError,
}

impl UseCaseError {
    fn from_transition(e: TransitionError, participant: &Participant) -> Self {
        match e {
            TransitionError::NoFreeSlot => Self::NoFreeSlot,
            _ => Self::NoPendingOffer(participant.status),
        }
    }
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => {
                Self::NotFound("No registration was found for the given token".into())
            }
            UseCaseError::NoPendingOffer(status) => Self::Conflict(format!(
                "There is no pending waitlist offer, the registration is `{}`",
                status
            )),
            UseCaseError::NoFreeSlot => {
                Self::Conflict("The meetup has no free slot at the moment".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for AnswerWaitlistOfferUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "AnswerWaitlistOffer";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let meetup_id = match ctx.repos.participants.find_by_token(&self.token).await {
            Some(p) => p.meetup_id,
            None => return Err(UseCaseError::NotFound),
        };
        let _guard = ctx.locks.acquire(&meetup_id).await;

        let mut participant = ctx
            .repos
            .participants
            .find_by_token(&self.token)
            .await
            .ok_or(UseCaseError::NotFound)?;
        let meetup = ctx
            .repos
            .meetups
            .find(&meetup_id)
            .await
            .ok_or(UseCaseError::NotFound)?;

        let passed = match self.action {
            OfferAction::Accept => {
                let occupancy = ctx
                    .repos
                    .participants
                    .occupancy(&meetup.id)
                    .await
                    .map_err(|_| UseCaseError::StorageError)?;
                participant
                    .accept_offer(
                        ctx.sys.get_timestamp_millis(),
                        has_free_slot(&meetup, &occupancy),
                    )
                    .map_err(|e| UseCaseError::from_transition(e, &participant))?;
                false
            }
            OfferAction::Pass => {
                participant
                    .pass_offer()
                    .map_err(|e| UseCaseError::from_transition(e, &participant))?;
                true
            }
        };
        ctx.repos
            .participants
            .save(&participant)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        // The offer may have been sent while the passer was still waitlisted,
        // so the next in line is tried even if no slot was given back.
        let promoted = if passed {
            execute(PromoteFromWaitlistUseCase { meetup: &meetup }, ctx)
                .await
                .unwrap_or_else(|e| {
                    error!(
                        "Participant: {} passed on the offer but promotion failed: {:?}",
                        participant.id, e
                    );
                    None
                })
        } else {
            None
        };

        Ok(UseCaseResponse {
            participant,
            promoted,
        })
    }
}
