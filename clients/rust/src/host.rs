use crate::{APIResponse, BaseClient};
use reqwest::StatusCode;
use std::sync::Arc;
use trustkeeper_api_structs::*;

#[derive(Clone)]
pub struct HostClient {
    base: Arc<BaseClient>,
}

pub struct SignupHostInput {
    pub username: String,
    pub password: String,
    pub name: String,
    pub email: String,
    pub phone: String,
}

impl HostClient {
    pub(crate) fn new(base: Arc<BaseClient>) -> Self {
        Self { base }
    }

    pub async fn signup(&self, input: SignupHostInput) -> APIResponse<signup_host::APIResponse> {
        let body = signup_host::RequestBody {
            username: input.username,
            password: input.password,
            name: input.name,
            email: input.email,
            phone: input.phone,
        };
        self.base
            .post(body, "hosts/signup".into(), StatusCode::CREATED)
            .await
    }

    pub async fn login(
        &self,
        username: String,
        password: String,
    ) -> APIResponse<login_host::APIResponse> {
        let body = LoginRequestBody { username, password };
        self.base
            .post(body, "hosts/login".into(), StatusCode::OK)
            .await
    }

    pub async fn login_admin(
        &self,
        username: String,
        password: String,
    ) -> APIResponse<login_admin::APIResponse> {
        let body = LoginRequestBody { username, password };
        self.base
            .post(body, "admin/login".into(), StatusCode::OK)
            .await
    }

    /// Meetups of the logged in host
    pub async fn my_meetups(&self) -> APIResponse<get_my_meetups::APIResponse> {
        self.base
            .get("hosts/me/meetups".into(), StatusCode::OK)
            .await
    }
}
