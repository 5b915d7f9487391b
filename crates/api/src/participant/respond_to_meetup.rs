use super::promote_from_waitlist::PromoteFromWaitlistUseCase;
use crate::{
    error::KeeperError,
    shared::usecase::{execute, UseCase},
};
use actix_web::{web, HttpResponse};
use tracing::error;
use trustkeeper_api_structs::respond_to_meetup::*;
use trustkeeper_domain::{Participant, ParticipantStatus, TransitionError};
use trustkeeper_infra::KeeperContext;

pub async fn respond_to_meetup_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let usecase = RespondToMeetupUseCase {
        token: path_params.into_inner().token,
        action: body.action,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse::new(res.participant)))
        .map_err(KeeperError::from)
}

/// Self-service confirmation or cancellation, authorized by the token alone
#[derive(Debug)]
pub struct RespondToMeetupUseCase {
    pub token: String,
    pub action: ResponseAction,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub participant: Participant,
    /// Who took over the slot freed by a cancellation
    pub promoted: Option<Participant>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    AlreadyProcessed(ParticipantStatus),
    TooCloseToEvent(i64),
    StorageError,
}

impl From<TransitionError> for UseCaseError {
    fn from(e: TransitionError) -> Self {
        match e {
            TransitionError::TooCloseToEvent(hours) => Self::TooCloseToEvent(hours),
            TransitionError::AlreadyProcessed(status)
            | TransitionError::NoPendingOffer(status) => Self::AlreadyProcessed(status),
            TransitionError::AlreadyCheckedIn => {
                Self::AlreadyProcessed(ParticipantStatus::Attended)
            }
            TransitionError::NoFreeSlot => Self::AlreadyProcessed(ParticipantStatus::Waitlisted),
        }
    }
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => {
                Self::NotFound("No registration was found for the given token".into())
            }
            UseCaseError::AlreadyProcessed(status) => Self::Conflict(format!(
                "The request was already processed, the registration is `{}`",
                status
            )),
            UseCaseError::TooCloseToEvent(hours) => Self::PolicyViolation(format!(
                "Cancellation is not possible within {} hours of the meetup, please contact the host",
                hours
            )),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for RespondToMeetupUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "RespondToMeetup";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let meetup_id = match ctx.repos.participants.find_by_token(&self.token).await {
            Some(p) => p.meetup_id,
            None => return Err(UseCaseError::NotFound),
        };
        let _guard = ctx.locks.acquire(&meetup_id).await;

        // Read again now that no other request changes the meetup
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
        let now = ctx.sys.get_timestamp_millis();

        let freed_slot = match self.action {
            ResponseAction::Confirm => {
                participant.confirm(now)?;
                false
            }
            ResponseAction::Cancel => {
                participant
                    .cancel(meetup.start_ts, now, ctx.config.cancellation_cutoff_millis)?
                    .freed_slot
            }
        };
        ctx.repos
            .participants
            .save(&participant)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        let promoted = if freed_slot {
            execute(PromoteFromWaitlistUseCase { meetup: &meetup }, ctx)
                .await
                .unwrap_or_else(|e| {
                    error!(
                        "Cancellation of participant: {} succeeded but promotion failed: {:?}",
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

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::*;
    use trustkeeper_domain::Admission;

    async fn respond(
        ctx: &KeeperContext,
        participant: &Participant,
        action: ResponseAction,
    ) -> Result<UseCaseResponse, UseCaseError> {
        let mut usecase = RespondToMeetupUseCase {
            token: participant.token.clone(),
            action,
        };
        usecase.execute(ctx).await
    }

    #[actix_web::test]
    async fn rejects_unknown_tokens() {
        let TestContext { ctx, .. } = setup();
        let mut usecase = RespondToMeetupUseCase {
            token: "0000".into(),
            action: ResponseAction::Confirm,
        };
        assert_eq!(usecase.execute(&ctx).await, Err(UseCaseError::NotFound));
    }

    #[actix_web::test]
    async fn confirm_then_cancel_promotes_once() {
        let TestContext { ctx, .. } = setup();
        let meetup = insert_meetup(&ctx, 2, None, 10 * DAY).await;
        let alice = insert_participant(&ctx, meetup.id, "Alice", Admission::Registered).await;
        insert_participant(&ctx, meetup.id, "Bob", Admission::Registered).await;
        let carol = insert_participant(&ctx, meetup.id, "Carol", Admission::Waitlisted).await;
        let dave = insert_participant(&ctx, meetup.id, "Dave", Admission::Waitlisted).await;

        let res = respond(&ctx, &alice, ResponseAction::Confirm).await.unwrap();
        assert_eq!(res.participant.status, ParticipantStatus::Confirmed);
        assert!(res.participant.confirmed_at.is_some());
        assert!(res.promoted.is_none());

        let res = respond(&ctx, &alice, ResponseAction::Cancel).await.unwrap();
        assert_eq!(res.participant.status, ParticipantStatus::Cancelled);
        assert_eq!(res.promoted.map(|p| p.id), Some(carol.id));

        // Cancelling again is rejected and promotes nobody
        assert_eq!(
            respond(&ctx, &alice, ResponseAction::Cancel).await,
            Err(UseCaseError::AlreadyProcessed(ParticipantStatus::Cancelled))
        );
        let dave = ctx.repos.participants.find(&dave.id).await.unwrap();
        assert!(dave.is_waitlisted);
        assert_eq!(dave.status, ParticipantStatus::Waitlisted);
    }

    #[actix_web::test]
    async fn confirm_is_not_idempotent() {
        let TestContext { ctx, .. } = setup();
        let meetup = insert_meetup(&ctx, 2, None, 10 * DAY).await;
        let alice = insert_participant(&ctx, meetup.id, "Alice", Admission::Registered).await;

        assert!(respond(&ctx, &alice, ResponseAction::Confirm).await.is_ok());
        assert_eq!(
            respond(&ctx, &alice, ResponseAction::Confirm).await,
            Err(UseCaseError::AlreadyProcessed(ParticipantStatus::Confirmed))
        );
    }

    #[actix_web::test]
    async fn cancellation_cutoff() {
        let TestContext { ctx, sys, .. } = setup();
        let meetup = insert_meetup(&ctx, 2, None, 2 * DAY).await;
        let alice = insert_participant(&ctx, meetup.id, "Alice", Admission::Registered).await;
        let bob = insert_participant(&ctx, meetup.id, "Bob", Admission::Registered).await;

        sys.set(meetup.start_ts - DAY + 60 * 1000 - 10);
        assert_eq!(
            respond(&ctx, &alice, ResponseAction::Cancel).await,
            Err(UseCaseError::TooCloseToEvent(24))
        );
        let alice = ctx.repos.participants.find(&alice.id).await.unwrap();
        assert_eq!(alice.status, ParticipantStatus::Registered);

        sys.set(meetup.start_ts - DAY - 60 * 1000);
        let res = respond(&ctx, &bob, ResponseAction::Cancel).await.unwrap();
        assert_eq!(res.participant.status, ParticipantStatus::Cancelled);
    }

    #[actix_web::test]
    async fn waitlisted_cancel_anytime_without_promotion() {
        let TestContext { ctx, sys, .. } = setup();
        let meetup = insert_meetup(&ctx, 2, None, 2 * DAY).await;
        insert_participant(&ctx, meetup.id, "Alice", Admission::Registered).await;
        let carol = insert_participant(&ctx, meetup.id, "Carol", Admission::Waitlisted).await;
        let dave = insert_participant(&ctx, meetup.id, "Dave", Admission::Waitlisted).await;

        sys.set(meetup.start_ts - HOUR);
        let res = respond(&ctx, &carol, ResponseAction::Cancel).await.unwrap();
        assert_eq!(res.participant.status, ParticipantStatus::Cancelled);
        assert!(res.promoted.is_none());
        let dave = ctx.repos.participants.find(&dave.id).await.unwrap();
        assert!(dave.is_waitlisted);
    }
}
