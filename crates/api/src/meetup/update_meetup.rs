use crate::{
    error::KeeperError,
    shared::{
        auth::{protect_host_route, HostCredential},
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use trustkeeper_api_structs::update_meetup::*;
use trustkeeper_domain::{format_fee, Meetup, MeetupStatus, MeetupValidationError, ID};
use trustkeeper_infra::KeeperContext;

pub async fn update_meetup_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let credential = protect_host_route(&http_req, &ctx)?;

    let body = body.into_inner();
    let usecase = UpdateMeetupUseCase {
        meetup_id: path_params.meetup_id,
        credential,
        title: body.title,
        description: body.description,
        start_ts: body.start_ts,
        location: body.location,
        capacity: body.capacity,
        waitlist_capacity: body.waitlist_capacity,
        fee: body.fee,
        status: body.status,
    };

    execute(usecase, &ctx)
        .await
        .map(|meetup| HttpResponse::Ok().json(APIResponse::new(meetup)))
        .map_err(KeeperError::from)
}

#[derive(Debug)]
pub struct UpdateMeetupUseCase {
    pub meetup_id: ID,
    pub credential: HostCredential,
    pub title: Option<String>,
    pub description: Option<String>,
    pub start_ts: Option<i64>,
    pub location: Option<String>,
    pub capacity: Option<i64>,
    pub waitlist_capacity: Option<Option<i64>>,
    pub fee: Option<String>,
    pub status: Option<MeetupStatus>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NothingToUpdate,
    NotFound,
    Forbidden,
    InvalidMeetup(MeetupValidationError),
    StorageError,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NothingToUpdate => {
                Self::BadClientData("The request did not contain any field to update".into())
            }
            UseCaseError::NotFound => Self::NotFound("The requested meetup was not found".into()),
            UseCaseError::Forbidden => {
                Self::Forbidden("The credential does not grant access to the meetup".into())
            }
            UseCaseError::InvalidMeetup(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

impl UpdateMeetupUseCase {
    fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.start_ts.is_none()
            && self.location.is_none()
            && self.capacity.is_none()
            && self.waitlist_capacity.is_none()
            && self.fee.is_none()
            && self.status.is_none()
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for UpdateMeetupUseCase {
    type Response = Meetup;

    type Error = UseCaseError;

    const NAME: &'static str = "UpdateMeetup";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        if self.is_empty() {
            return Err(UseCaseError::NothingToUpdate);
        }

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

        if let Some(title) = &self.title {
            meetup.title = title.trim().to_string();
        }
        if let Some(description) = &self.description {
            let description = description.trim();
            meetup.description = if description.is_empty() {
                None
            } else {
                Some(description.to_string())
            };
        }
        if let Some(start_ts) = self.start_ts {
            meetup.start_ts = start_ts;
        }
        if let Some(location) = &self.location {
            meetup.location = location.trim().to_string();
        }
        if let Some(capacity) = self.capacity {
            meetup.capacity = capacity;
        }
        if let Some(waitlist_capacity) = self.waitlist_capacity {
            meetup.waitlist_capacity = waitlist_capacity;
        }
        if let Some(fee) = &self.fee {
            meetup.fee_display = format_fee(fee).map_err(UseCaseError::InvalidMeetup)?;
        }
        if let Some(status) = self.status {
            meetup.status = status;
        }
        meetup.validate().map_err(UseCaseError::InvalidMeetup)?;
        meetup.updated = ctx.sys.get_timestamp_millis();

        ctx.repos
            .meetups
            .save(&meetup)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(meetup)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::*;

    fn empty_update(meetup: &Meetup, credential: HostCredential) -> UpdateMeetupUseCase {
        UpdateMeetupUseCase {
            meetup_id: meetup.id,
            credential,
            title: None,
            description: None,
            start_ts: None,
            location: None,
            capacity: None,
            waitlist_capacity: None,
            fee: None,
            status: None,
        }
    }

    #[actix_web::test]
    async fn updates_given_fields_only() {
        let TestContext { ctx, .. } = setup();
        let meetup = insert_meetup(&ctx, 4, Some(2), 3 * DAY).await;

        let mut usecase = empty_update(&meetup, HostCredential::AccessCode(meetup.host_code.clone()));
        usecase.title = Some("Poetry night".into());
        usecase.capacity = Some(6);
        usecase.waitlist_capacity = Some(None);
        usecase.fee = Some("5000".into());

        let updated = usecase.execute(&ctx).await.unwrap();
        assert_eq!(updated.title, "Poetry night");
        assert_eq!(updated.capacity, 6);
        assert_eq!(updated.waitlist_capacity, None);
        assert_eq!(updated.fee_display.as_deref(), Some("5,000원"));
        assert_eq!(updated.location, meetup.location);
        assert_eq!(updated.start_ts, meetup.start_ts);
        assert!(updated.updated > meetup.updated);
        assert_eq!(ctx.repos.meetups.find(&meetup.id).await, Some(updated));
    }

    #[actix_web::test]
    async fn rejects_empty_and_invalid_updates() {
        let TestContext { ctx, .. } = setup();
        let meetup = insert_meetup(&ctx, 4, None, 3 * DAY).await;

        let mut usecase = empty_update(&meetup, HostCredential::Admin);
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::NothingToUpdate)
        );

        let mut usecase = empty_update(&meetup, HostCredential::Admin);
        usecase.capacity = Some(1);
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidMeetup(
                MeetupValidationError::CapacityTooSmall(1)
            ))
        );
        assert_eq!(ctx.repos.meetups.find(&meetup.id).await.unwrap().capacity, 4);
    }

    #[actix_web::test]
    async fn rejects_foreign_credentials() {
        let TestContext { ctx, .. } = setup();
        let meetup = insert_meetup(&ctx, 4, None, 3 * DAY).await;

        let mut usecase = empty_update(&meetup, HostCredential::Host(ID::new()));
        usecase.title = Some("Hijacked".into());
        assert_eq!(usecase.execute(&ctx).await, Err(UseCaseError::Forbidden));

        let mut usecase = empty_update(&meetup, HostCredential::AccessCode("nope".into()));
        usecase.title = Some("Hijacked".into());
        assert_eq!(usecase.execute(&ctx).await, Err(UseCaseError::Forbidden));
    }
}
