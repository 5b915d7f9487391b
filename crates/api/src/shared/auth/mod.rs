mod session;

use crate::error::KeeperError;
use actix_web::HttpRequest;
pub use session::{create_session, decode_session, Claims};
use trustkeeper_api_structs::SessionRole;
use trustkeeper_domain::{Meetup, ID};
use trustkeeper_infra::KeeperContext;

pub const HOST_CODE_HEADER: &str = "x-host-code";

/// What a client presented to act as the host of a meetup
#[derive(Debug, Clone, PartialEq)]
pub enum HostCredential {
    /// Operator session, trusted for every meetup
    Admin,
    /// Session of a host account
    Host(ID),
    /// The access code of a single meetup
    AccessCode(String),
}

impl HostCredential {
    /// Full trust over the meetup or none at all
    pub fn authorizes(&self, meetup: &Meetup) -> bool {
        match self {
            Self::Admin => true,
            Self::Host(host_id) => meetup.is_owned_by(host_id),
            Self::AccessCode(code) => meetup.verify_host_code(code),
        }
    }

    /// Label recorded when the host marks something as done
    pub fn label(&self) -> String {
        match self {
            Self::Admin => "admin".into(),
            Self::Host(host_id) => format!("host:{}", host_id),
            Self::AccessCode(_) => "host-code".into(),
        }
    }
}

fn parse_authtoken_header(token_header_value: &str) -> String {
    token_header_value
        .trim_start_matches("Bearer")
        .trim_start_matches("bearer")
        .trim()
        .to_string()
}

fn get_header<'a>(req: &'a HttpRequest, name: &str) -> Option<&'a str> {
    req.headers()
        .get(name)
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.trim().is_empty())
}

/// Reads the session from the `authorization` header, if any
pub fn get_session(req: &HttpRequest, ctx: &KeeperContext) -> Result<Option<Claims>, KeeperError> {
    match get_header(req, "authorization") {
        Some(token) => {
            let token = parse_authtoken_header(token);
            decode_session(&token, ctx)
                .map(Some)
                .map_err(|_| KeeperError::Unauthorized("Invalid or expired session token".into()))
        }
        None => Ok(None),
    }
}

/// Extracts the credential of a host action. A session takes precedence
/// over an access code.
pub fn protect_host_route(
    req: &HttpRequest,
    ctx: &KeeperContext,
) -> Result<HostCredential, KeeperError> {
    if let Some(claims) = get_session(req, ctx)? {
        return claims.credential();
    }
    match get_header(req, HOST_CODE_HEADER) {
        Some(code) => Ok(HostCredential::AccessCode(code.trim().to_string())),
        None => Err(KeeperError::Unauthorized(format!(
            "Expected a session token in the `authorization` header or an access code in the `{}` header",
            HOST_CODE_HEADER
        ))),
    }
}

/// Routes only available to a logged in host account
pub fn protect_account_route(req: &HttpRequest, ctx: &KeeperContext) -> Result<ID, KeeperError> {
    match get_session(req, ctx)? {
        Some(claims) => match claims.credential()? {
            HostCredential::Host(host_id) => Ok(host_id),
            _ => Err(KeeperError::Forbidden(
                "Only host accounts can access this resource".into(),
            )),
        },
        None => Err(KeeperError::Unauthorized(
            "Expected a session token in the `authorization` header".into(),
        )),
    }
}

/// The host account of the session if the request carries one
pub fn optional_session_host(
    req: &HttpRequest,
    ctx: &KeeperContext,
) -> Result<Option<ID>, KeeperError> {
    match get_session(req, ctx)? {
        Some(claims) if claims.role == SessionRole::Host => match claims.credential()? {
            HostCredential::Host(host_id) => Ok(Some(host_id)),
            _ => Ok(None),
        },
        _ => Ok(None),
    }
}
