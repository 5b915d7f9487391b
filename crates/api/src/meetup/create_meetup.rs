use crate::{
    error::KeeperError,
    shared::{
        auth::optional_session_host,
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use trustkeeper_api_structs::create_meetup::*;
use trustkeeper_domain::{format_fee, Meetup, MeetupStatus, MeetupValidationError, ID};
use trustkeeper_infra::KeeperContext;

pub async fn create_meetup_controller(
    http_req: HttpRequest,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let host_id = optional_session_host(&http_req, &ctx)?;
    Guard::against_malformed_phone(&body.host_phone)?;

    let body = body.into_inner();
    let usecase = CreateMeetupUseCase {
        title: body.title,
        description: body.description,
        start_ts: body.start_ts,
        location: body.location,
        capacity: body.capacity,
        waitlist_capacity: body.waitlist_capacity,
        fee: body.fee,
        host_name: body.host_name,
        host_phone: body.host_phone,
        host_id,
    };

    execute(usecase, &ctx)
        .await
        .map(|meetup| HttpResponse::Created().json(APIResponse::new(meetup)))
        .map_err(KeeperError::from)
}

#[derive(Debug, Default)]
pub struct CreateMeetupUseCase {
    pub title: String,
    pub description: Option<String>,
    pub start_ts: i64,
    pub location: String,
    pub capacity: Option<i64>,
    pub waitlist_capacity: Option<i64>,
    pub fee: Option<String>,
    pub host_name: String,
    pub host_phone: String,
    /// The host account creating the meetup, if logged in
    pub host_id: Option<ID>,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidMeetup(MeetupValidationError),
    StorageError,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidMeetup(e) => Self::BadClientData(e.to_string()),
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for CreateMeetupUseCase {
    type Response = Meetup;

    type Error = UseCaseError;

    const NAME: &'static str = "CreateMeetup";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let fee_display = match &self.fee {
            Some(fee) => format_fee(fee).map_err(UseCaseError::InvalidMeetup)?,
            None => None,
        };
        let now = ctx.sys.get_timestamp_millis();

        let meetup = Meetup {
            id: Default::default(),
            title: self.title.trim().to_string(),
            description: self
                .description
                .as_ref()
                .map(|d| d.trim().to_string())
                .filter(|d| !d.is_empty()),
            start_ts: self.start_ts,
            location: self.location.trim().to_string(),
            capacity: self.capacity.unwrap_or(ctx.config.default_capacity),
            waitlist_capacity: self.waitlist_capacity,
            fee_display,
            host_name: self.host_name.trim().to_string(),
            host_phone: self.host_phone.trim().to_string(),
            host_code: Meetup::generate_host_code(),
            host_id: self.host_id,
            status: MeetupStatus::Upcoming,
            confirmation_sent: false,
            created: now,
            updated: now,
        };
        meetup.validate().map_err(UseCaseError::InvalidMeetup)?;

        ctx.repos
            .meetups
            .insert(&meetup)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(meetup)
    }
}

#[cfg(test)]
mod test {
    use super::*;
    use crate::shared::test_utils::*;

    fn valid_usecase() -> CreateMeetupUseCase {
        CreateMeetupUseCase {
            title: " Book club ".into(),
            start_ts: NOW + 7 * DAY,
            location: "Library".into(),
            host_name: "Kim".into(),
            host_phone: "010-1111-2222".into(),
            ..Default::default()
        }
    }

    #[actix_web::test]
    async fn creates_meetup_with_defaults() {
        let TestContext { ctx, .. } = setup();
        let mut usecase = valid_usecase();
        usecase.fee = Some("15000".into());

        let meetup = usecase.execute(&ctx).await.unwrap();
        assert_eq!(meetup.title, "Book club");
        assert_eq!(meetup.capacity, 10);
        assert_eq!(meetup.waitlist_capacity, None);
        assert_eq!(meetup.fee_display.as_deref(), Some("15,000원"));
        assert_eq!(meetup.host_code.len(), 8);
        assert_eq!(meetup.status, MeetupStatus::Upcoming);
        assert!(meetup.host_id.is_none());
        assert_eq!(ctx.repos.meetups.find(&meetup.id).await, Some(meetup));
    }

    #[actix_web::test]
    async fn rejects_invalid_meetups() {
        let TestContext { ctx, .. } = setup();

        let mut usecase = valid_usecase();
        usecase.capacity = Some(1);
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidMeetup(
                MeetupValidationError::CapacityTooSmall(1)
            ))
        );

        let mut usecase = valid_usecase();
        usecase.waitlist_capacity = Some(-1);
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidMeetup(
                MeetupValidationError::NegativeWaitlistCapacity(-1)
            ))
        );

        let mut usecase = valid_usecase();
        usecase.fee = Some("-500".into());
        assert!(matches!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidMeetup(MeetupValidationError::InvalidFee(_)))
        ));

        let mut usecase = valid_usecase();
        usecase.title = "  ".into();
        assert_eq!(
            usecase.execute(&ctx).await,
            Err(UseCaseError::InvalidMeetup(MeetupValidationError::EmptyField(
                "title"
            )))
        );
    }
}
