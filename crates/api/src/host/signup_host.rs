use crate::{
    error::KeeperError,
    shared::{
        guard::Guard,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use trustkeeper_api_structs::signup_host::*;
use trustkeeper_domain::{Host, HostValidationError};
use trustkeeper_infra::KeeperContext;

pub async fn signup_host_controller(
    body: web::Json<RequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    Guard::against_empty("email", &body.email)?;
    Guard::against_malformed_phone(&body.phone)?;

    let body = body.into_inner();
    let usecase = SignupHostUseCase {
        username: body.username,
        password: body.password,
        name: body.name,
        email: body.email,
        phone: body.phone,
    };

    execute(usecase, &ctx)
        .await
        .map(|host| HttpResponse::Created().json(APIResponse::new(host)))
        .map_err(KeeperError::from)
}

pub struct SignupHostUseCase {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

// Keeps the password out of the logs
impl std::fmt::Debug for SignupHostUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SignupHostUseCase")
            .field("username", &self.username)
            .finish()
    }
}

#[derive(Debug, PartialEq)]
pub enum UseCaseError {
    InvalidHost(HostValidationError),
    UsernameTaken,
    StorageError,
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidHost(e) => Self::BadClientData(e.to_string()),
            UseCaseError::UsernameTaken => {
                Self::Conflict("A host with that username already exists".into())
            }
            UseCaseError::StorageError => Self::InternalError,
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for SignupHostUseCase {
    type Response = Host;

    type Error = UseCaseError;

    const NAME: &'static str = "SignupHost";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let host = Host::new(
            self.username.clone(),
            &self.password,
            self.name.trim().to_string(),
            self.email.trim().to_string(),
            self.phone.trim().to_string(),
            ctx.sys.get_timestamp_millis(),
        )
        .map_err(UseCaseError::InvalidHost)?;

        if ctx
            .repos
            .hosts
            .find_by_username(&host.username)
            .await
            .is_some()
        {
            return Err(UseCaseError::UsernameTaken);
        }

        ctx.repos
            .hosts
            .insert(&host)
            .await
            .map_err(|_| UseCaseError::StorageError)?;

        Ok(host)
    }
}
