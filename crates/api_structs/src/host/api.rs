use crate::dtos::HostDTO;
use serde::{Deserialize, Serialize};
use trustkeeper_domain::Host;

/// Who a session token was issued to
#[derive(Deserialize, Serialize, Debug, Clone, Copy, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum SessionRole {
    Host,
    Admin,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionResponse {
    pub token: String,
    pub role: SessionRole,
    /// Expiry of the token in millis
    pub expires_at: i64,
}

#[derive(Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginRequestBody {
    pub username: String,
    pub password: String,
}

pub mod signup_host {
    use super::*;

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct RequestBody {
        pub username: String,
        pub password: String,
        pub name: String,
        pub email: String,
        pub phone: String,
    }

    #[derive(Deserialize, Serialize)]
    #[serde(rename_all = "camelCase")]
    pub struct APIResponse {
        pub host: HostDTO,
    }

    impl APIResponse {
        pub fn new(host: Host) -> Self {
            Self {
                host: HostDTO::new(host),
            }
        }
    }
}

pub mod login_host {
    use super::*;

    pub type RequestBody = LoginRequestBody;
    pub type APIResponse = SessionResponse;
}

pub mod login_admin {
    use super::*;

    pub type RequestBody = LoginRequestBody;
    pub type APIResponse = SessionResponse;
}
