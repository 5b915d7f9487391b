use crate::shared::usecase::UseCase;
use tracing::info;
use trustkeeper_domain::{waitlist::has_free_slot, Meetup, Participant};
use trustkeeper_infra::KeeperContext;

/// Moves the head of the waitlist into a free slot of the meetup.
///
/// Callers must hold the lock of the meetup. At most one participant is
/// promoted per execution.
#[derive(Debug)]
pub struct PromoteFromWaitlistUseCase<'a> {
    pub meetup: &'a Meetup,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

#[async_trait::async_trait(?Send)]
impl<'a> UseCase for PromoteFromWaitlistUseCase<'a> {
    type Response = Option<Participant>;

    type Error = UseCaseError;

    const NAME: &'static str = "PromoteFromWaitlist";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let occupancy = ctx
            .repos
            .participants
            .occupancy(&self.meetup.id)
            .await
            .map_err(|_| UseCaseError::StorageError)?;
        if !has_free_slot(self.meetup, &occupancy) {
            return Ok(None);
        }

        let mut next = match ctx
            .repos
            .participants
            .find_next_in_line(&self.meetup.id)
            .await
        {
            Some(p) => p,
            None => return Ok(None),
        };
        next.promote(ctx.sys.get_timestamp_millis());
        ctx.repos
            .participants
            .save(&next)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        info!(
            "Promoted participant: {} from the waitlist of meetup: {}",
            next.id, self.meetup.id
        );
        Ok(Some(next))
    }
}
