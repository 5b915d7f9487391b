use crate::{
    error::KeeperError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use trustkeeper_api_structs::self_check_in::*;
use trustkeeper_domain::{Participant, TransitionError, ID};
use trustkeeper_infra::KeeperContext;

pub async fn self_check_in_controller(
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    Guard::against_empty("name", &body.name)?;
    Guard::against_empty("phone", &body.phone)?;

    let body = body.into_inner();
    let usecase = SelfCheckInUseCase {
        meetup_id: path_params.meetup_id,
        name: body.name,
        phone: body.phone,
    };

    execute(usecase, &ctx)
        .await
        .map(|participant| HttpResponse::Ok().json(APIResponse::new(participant)))
        .map_err(KeeperError::from)
}

/// On site check-in by the participant.
///
/// Anyone knowing the name and phone number of a registrant can check them
/// in, so the result must not be trusted for anything beyond attendance.
#[derive(Debug)]
pub struct SelfCheckInUseCase {
    pub meetup_id: ID,
    pub name: String,
    pub phone: String,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    AlreadyCheckedIn,
    StorageError,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => Self::NotFound(
                "No registration with the given name and phone number was found".into(),
            ),
            UseCaseError::AlreadyCheckedIn => {
                Self::Conflict("The participant has already checked in".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SelfCheckInUseCase {
    type Response = Participant;

    type Error = UseCaseError;

    const NAME: &'static str = "SelfCheckIn";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let _guard = ctx.locks.acquire(&self.meetup_id).await;

        let mut participant = match ctx
            .repos
            .participants
            .find_active_by_phone(&self.meetup_id, &self.phone)
            .await
        {
            Some(p) if p.name == self.name.trim() => p,
            _ => return Err(UseCaseError::NotFound),
        };

        participant
            .self_check_in(ctx.sys.get_timestamp_millis())
            .map_err(|e| match e {
                TransitionError::AlreadyCheckedIn => UseCaseError::AlreadyCheckedIn,
                _ => UseCaseError::NotFound,
            })?;
        ctx.repos
            .participants
            .save(&participant)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(participant)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::*;
    use trustkeeper_domain::{Admission, ParticipantStatus};

    async fn check_in(
        ctx: &KeeperContext,
        meetup_id: ID,
        name: &str,
        phone: &str,
    ) -> Result<Participant, UseCaseError> {
        let mut usecase = SelfCheckInUseCase {
            meetup_id,
            name: name.into(),
            phone: phone.into(),
        };
        usecase.execute(ctx).await
    }

    #[actix_web::test]
    async fn matches_name_and_normalized_phone() {
        let TestContext { ctx, .. } = setup();
        let meetup = insert_meetup(&ctx, 4, None, HOUR).await;
        let alice = insert_participant(&ctx, meetup.id, "Alice", Admission::Waitlisted).await;
        let compact_phone: String = alice.phone.chars().filter(|c| c.is_ascii_digit()).collect();

        assert_eq!(
            check_in(&ctx, meetup.id, "Alicia", &alice.phone).await,
            Err(UseCaseError::NotFound)
        );
        let res = check_in(&ctx, meetup.id, "Alice", &compact_phone)
            .await
            .unwrap();
        assert_eq!(res.id, alice.id);
        assert_eq!(res.status, ParticipantStatus::Attended);
        assert!(res.checked_in_at.is_some());

        assert_eq!(
            check_in(&ctx, meetup.id, "Alice", &alice.phone).await,
            Err(UseCaseError::AlreadyCheckedIn)
        );
    }

    #[actix_web::test]
    async fn ignores_cancelled_registrations() {
        let TestContext { ctx, .. } = setup();
        let meetup = insert_meetup(&ctx, 4, None, HOUR).await;
        let mut alice = insert_participant(&ctx, meetup.id, "Alice", Admission::Registered).await;
        alice.cancel(meetup.start_ts, NOW, 0).unwrap();
        ctx.repos.participants.save(&alice).await.unwrap();

        assert_eq!(
            check_in(&ctx, meetup.id, "Alice", &alice.phone).await,
            Err(UseCaseError::NotFound)
        );
    }
}
