use super::HostCredential;
use crate::error::KeeperError;
use chrono::Utc;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use tracing::error;
use trustkeeper_api_structs::{SessionResponse, SessionRole};
use trustkeeper_infra::KeeperContext;

#[derive(Debug, Serialize, Deserialize)]
pub struct Claims {
    /// Host id, or the admin username
    pub sub: String,
    pub role: SessionRole,
    /// Issued at (as UTC timestamp in seconds)
    pub iat: i64,
    /// Expiration time (as UTC timestamp in seconds)
    pub exp: i64,
}

impl Claims {
    pub fn credential(&self) -> Result<HostCredential, KeeperError> {
        match self.role {
            SessionRole::Admin => Ok(HostCredential::Admin),
            SessionRole::Host => self
                .sub
                .parse()
                .map(HostCredential::Host)
                .map_err(|_| KeeperError::Unauthorized("Malformed session subject".into())),
        }
    }
}

/// Issues a signed session token valid for the configured lifetime
pub fn create_session(
    subject: &str,
    role: SessionRole,
    ctx: &KeeperContext,
) -> Result<SessionResponse, KeeperError> {
    let iat = Utc::now().timestamp();
    let exp = iat + ctx.config.session_ttl_secs;
    let claims = Claims {
        sub: subject.to_string(),
        role,
        iat,
        exp,
    };
    let token = encode(
        &Header::new(Algorithm::HS256),
        &claims,
        &EncodingKey::from_secret(ctx.config.session_secret.as_bytes()),
    )
    .map_err(|e| {
        error!("Unable to sign session token: {:?}", e);
        KeeperError::InternalError
    })?;

    Ok(SessionResponse {
        token,
        role,
        expires_at: exp * 1000,
    })
}

pub fn decode_session(token: &str, ctx: &KeeperContext) -> anyhow::Result<Claims> {
    let claims = decode::<Claims>(
        token,
        &DecodingKey::from_secret(ctx.config.session_secret.as_bytes()),
        &Validation::new(Algorithm::HS256),
    )?
    .claims;
    Ok(claims)
}
