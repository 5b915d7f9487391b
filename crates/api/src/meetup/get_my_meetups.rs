use crate::{
    error::KeeperError,
    shared::{
        auth::protect_account_route,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use trustkeeper_api_structs::{dtos::HostMeetupDTO, get_my_meetups::*};
use trustkeeper_domain::{days_until, unsent_reminder_types, Meetup, Occupancy, ReminderType, ID};
use trustkeeper_infra::KeeperContext;

pub async fn get_my_meetups_controller(
    http_req: HttpRequest,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let host_id = protect_account_route(&http_req, &ctx)?;

    let usecase = GetMyMeetupsUseCase { host_id };

    execute(usecase, &ctx)
        .await
        .map(|meetups| {
            HttpResponse::Ok().json(APIResponse {
                meetups: meetups
                    .into_iter()
                    .map(|m| MeetupSummary {
                        registered_count: m.occupancy.registered,
                        waitlisted_count: m.occupancy.waitlisted,
                        pending_reminders: m.pending_reminders,
                        meetup: HostMeetupDTO::new(m.meetup),
                    })
                    .collect(),
            })
        })
        .map_err(KeeperError::from)
}

/// The dashboard of a host account
#[derive(Debug)]
pub struct GetMyMeetupsUseCase {
    pub host_id: ID,
}

#[derive(Debug, PartialEq)]
pub struct MeetupOverview {
    pub meetup: Meetup,
    pub occupancy: Occupancy,
    /// Reminders that are due and not sent yet
    pub pending_reminders: Vec<ReminderType>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    StorageError,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for GetMyMeetupsUseCase {
    type Response = Vec<MeetupOverview>;

    type Error = UseCaseError;

    const NAME: &'static str = "GetMyMeetups";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let meetups = ctx.repos.meetups.find_by_host(&self.host_id).await;
        let now = ctx.sys.get_timestamp_millis();

        let mut overviews = Vec::with_capacity(meetups.len());
        for meetup in meetups {
            let occupancy = ctx
                .repos
                .participants
                .occupancy(&meetup.id)
                .await
                .map_err(|_| UseCaseError::StorageError)?;
            let reminders = ctx.repos.reminders.find_by_meetup(&meetup.id).await;
            let pending_reminders =
                unsent_reminder_types(days_until(meetup.start_ts, now), &reminders);

            overviews.push(MeetupOverview {
                meetup,
                occupancy,
                pending_reminders,
            });
        }

        Ok(overviews)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::*;
    use trustkeeper_domain::{Admission, Reminder};

    #[actix_web::test]
    async fn lists_own_meetups_with_due_reminders() {
        let TestContext { ctx, .. } = setup();
        let host_id = ID::new();

        let mut soon = insert_meetup(&ctx, 2, None, 2 * DAY + HOUR).await;
        soon.host_id = Some(host_id);
        ctx.repos.meetups.save(&soon).await.unwrap();
        let mut later = insert_meetup(&ctx, 2, None, 30 * DAY).await;
        later.host_id = Some(host_id);
        ctx.repos.meetups.save(&later).await.unwrap();
        insert_meetup(&ctx, 2, None, DAY).await;
        insert_participant(&ctx, soon.id, "Alice", Admission::Registered).await;

        let mut sent = Reminder::new(soon.id, ReminderType::D7);
        sent.mark_sent(NOW, None, None);
        ctx.repos.reminders.upsert(&sent).await.unwrap();

        let mut usecase = GetMyMeetupsUseCase { host_id };
        let overviews = usecase.execute(&ctx).await.unwrap();
        assert_eq!(overviews.len(), 2);
        assert_eq!(overviews[0].meetup.id, soon.id);
        assert_eq!(overviews[0].occupancy.registered, 1);
        assert_eq!(overviews[0].pending_reminders, vec![ReminderType::D3]);
        assert_eq!(overviews[1].meetup.id, later.id);
        assert!(overviews[1].pending_reminders.is_empty());
    }
}
