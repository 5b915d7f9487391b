use super::subscribers::RecordReminderOnDispatch;
use crate::{
    error::KeeperError,
    shared::{
        auth::{protect_host_route, HostCredential},
        usecase::{execute, Subscriber, UseCase},
    },
};
use actix_web::{web, HttpRequest, HttpResponse};
use tracing::{info, warn};
use trustkeeper_api_structs::dispatch_notification::*;
use trustkeeper_domain::{notification::compose_messages, NotificationKind, ID};
use trustkeeper_infra::KeeperContext;

pub async fn dispatch_notification_controller(
    http_req: HttpRequest,
    path_params: web::Path<PathParams>,
    body: web::Json<RequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let credential = protect_host_route(&http_req, &ctx)?;
    let kind = body
        .kind
        .parse::<NotificationKind>()
        .map_err(|e| KeeperError::BadClientData(e.to_string()))?;

    let usecase = DispatchNotificationUseCase {
        meetup_id: path_params.meetup_id,
        kind,
        targets: body.into_inner().targets,
        credential,
    };

    execute(usecase, &ctx)
        .await
        .map(|res| HttpResponse::Ok().json(APIResponse { count: res.count }))
        .map_err(KeeperError::from)
}

/// Renders the messages of the given kind and hands them to the sms provider
/// as one batch
#[derive(Debug)]
pub struct DispatchNotificationUseCase {
    pub meetup_id: ID,
    pub kind: NotificationKind,
    /// Restricts the recipients, an empty list means everyone
    pub targets: Option<Vec<ID>>,
    pub credential: HostCredential,
}

#[derive(Debug, PartialEq)]
pub struct UseCaseResponse {
    pub meetup_id: ID,
    pub kind: NotificationKind,
    pub count: usize,
    pub credential: HostCredential,
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    NotFound,
    Forbidden,
    NoTargets,
    TransportFailure(String),
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::NotFound => Self::NotFound("The requested meetup was not found".into()),
            UseCaseError::Forbidden => {
                Self::Forbidden("The credential does not grant access to the meetup".into())
            }
            UseCaseError::NoTargets => {
                Self::BadClientData("There are no recipients for this notification".into())
            }
            UseCaseError::TransportFailure(msg) => Self::TransportFailure(msg),
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for DispatchNotificationUseCase {
    type Response = UseCaseResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "DispatchNotification";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let meetup = ctx
            .repos
            .meetups
            .find(&self.meetup_id)
            .await
            .ok_or(UseCaseError::NotFound)?;
        if !self.credential.authorizes(&meetup) {
            return Err(UseCaseError::Forbidden);
        }

        let participants = ctx.repos.participants.find_by_meetup(&meetup.id).await;
        let targets = self.targets.as_deref().filter(|t| !t.is_empty());
        let messages = compose_messages(
            self.kind,
            &meetup,
            &participants,
            targets,
            &ctx.message_context(),
        );
        if messages.is_empty() {
            return Err(UseCaseError::NoTargets);
        }

        ctx.sms.send_bulk(&messages).await.map_err(|e| {
            warn!(
                "Unable to dispatch {} messages of kind: {} for meetup: {}. Error: {:?}",
                messages.len(),
                self.kind,
                meetup.id,
                e
            );
            UseCaseError::TransportFailure(e.to_string())
        })?;
        info!(
            "Dispatched {} messages of kind: {} for meetup: {}",
            messages.len(),
            self.kind,
            meetup.id
        );

        Ok(UseCaseResponse {
            meetup_id: meetup.id,
            kind: self.kind,
            count: messages.len(),
            credential: self.credential.clone(),
        })
    }

    fn subscribers() -> Vec<Box<dyn Subscriber<Self>>> {
        vec![Box::new(RecordReminderOnDispatch)]
    }
}
