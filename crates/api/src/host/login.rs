use crate::{
    error::KeeperError,
    shared::{
        auth::create_session,
        usecase::{execute, UseCase},
    },
};
use actix_web::{web, HttpResponse};
use constant_time_eq::constant_time_eq;
use trustkeeper_api_structs::{LoginRequestBody, SessionResponse, SessionRole};
use trustkeeper_infra::KeeperContext;

pub async fn login_host_controller(
    body: web::Json<LoginRequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let body = body.into_inner();
    let usecase = LoginUseCase {
        role: SessionRole::Host,
        username: body.username,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|session| HttpResponse::Ok().json(session))
        .map_err(KeeperError::from)
}

pub async fn login_admin_controller(
    body: web::Json<LoginRequestBody>,
    ctx: web::Data<KeeperContext>,
) -> Result<HttpResponse, KeeperError> {
    let body = body.into_inner();
    let usecase = LoginUseCase {
        role: SessionRole::Admin,
        username: body.username,
        password: body.password,
    };

    execute(usecase, &ctx)
        .await
        .map(|session| HttpResponse::Ok().json(session))
        .map_err(KeeperError::from)
}

/// Exchanges a username and password for a session token.
///
/// Hosts are looked up in the host repository, the operator account comes
/// from the configuration.
pub struct LoginUseCase {
    pub role: SessionRole,
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for LoginUseCase {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LoginUseCase")
            .field("role", &self.role)
            .field("username", &self.username)
            .finish()
    }
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidCredentials,
    Session(KeeperError),
}

impl From<UseCaseError> for KeeperError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidCredentials => {
                Self::Unauthorized("Invalid username or password".into())
            }
            UseCaseError::Session(e) => e,
        }
    }
}

impl LoginUseCase {
    async fn authenticate(&self, ctx: &KeeperContext) -> Result<String, UseCaseError> {
        match self.role {
            SessionRole::Admin => match &ctx.config.admin {
                Some(admin)
                    if constant_time_eq(admin.username.as_bytes(), self.username.as_bytes())
                        && constant_time_eq(
                            admin.password.as_bytes(),
                            self.password.as_bytes(),
                        ) =>
                {
                    Ok(admin.username.clone())
                }
                _ => Err(UseCaseError::InvalidCredentials),
            },
            SessionRole::Host => match ctx.repos.hosts.find_by_username(self.username.trim()).await
            {
                Some(host) if host.verify_password(&self.password) => Ok(host.id.to_string()),
                _ => Err(UseCaseError::InvalidCredentials),
            },
        }
    }
}

#[async_trait::async_trait(?Send)]
impl UseCase for LoginUseCase {
    type Response = SessionResponse;

    type Error = UseCaseError;

    const NAME: &'static str = "Login";

    async fn execute(&mut self, ctx: &KeeperContext) -> Result<Self::Response, Self::Error> {
        let subject = self.authenticate(ctx).await?;
        create_session(&subject, self.role, ctx).map_err(UseCaseError::Session)
    }
}
