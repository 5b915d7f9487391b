use actix_web::{http::StatusCode, HttpResponse};
use serde::Serialize;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum KeeperError {
    #[error("Internal server error")]
    InternalError,
    #[error("Invalid data provided: Error message: `{0}`")]
    BadClientData(String),
    #[error("404 Not found. Error message: `{0}`")]
    NotFound(String),
    #[error("Unauthorized request. Error message: `{0}`")]
    Unauthorized(String),
    #[error("Forbidden request. Error message: `{0}`")]
    Forbidden(String),
    #[error("There was a conflict with the request. Error message: `{0}`")]
    Conflict(String),
    #[error("The request violates a policy. Error message: `{0}`")]
    PolicyViolation(String),
    #[error("Unable to deliver messages. Error message: `{0}`")]
    TransportFailure(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    kind: &'static str,
    message: &'a str,
}

impl KeeperError {
    /// Stable machine readable category of the error
    pub fn kind(&self) -> &'static str {
        match self {
            Self::InternalError => "InternalError",
            Self::BadClientData(_) => "ValidationError",
            Self::NotFound(_) => "NotFound",
            Self::Unauthorized(_) => "Unauthorized",
            Self::Forbidden(_) => "Forbidden",
            Self::Conflict(_) => "Conflict",
            Self::PolicyViolation(_) => "PolicyViolation",
            Self::TransportFailure(_) => "TransportFailure",
        }
    }

    fn message(&self) -> &str {
        match self {
            Self::InternalError => "Internal server error",
            Self::BadClientData(msg)
            | Self::NotFound(msg)
            | Self::Unauthorized(msg)
            | Self::Forbidden(msg)
            | Self::Conflict(msg)
            | Self::PolicyViolation(msg)
            | Self::TransportFailure(msg) => msg,
        }
    }
}

impl actix_web::error::ResponseError for KeeperError {
    fn status_code(&self) -> StatusCode {
        match *self {
            Self::InternalError => StatusCode::INTERNAL_SERVER_ERROR,
            Self::BadClientData(_) => StatusCode::BAD_REQUEST,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Forbidden(_) => StatusCode::FORBIDDEN,
            Self::Conflict(_) => StatusCode::CONFLICT,
            Self::PolicyViolation(_) => StatusCode::UNPROCESSABLE_ENTITY,
            Self::TransportFailure(_) => StatusCode::BAD_GATEWAY,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(ErrorBody {
            kind: self.kind(),
            message: self.message(),
        })
    }
}
