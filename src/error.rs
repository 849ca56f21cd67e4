use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error as ThisError;

use std::num;

#[derive(Debug, ThisError)]
pub enum Error {
    #[error("database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("{0}")]
    Validation(String),

    #[error("{0} not found")]
    NotFound(&'static str),

    #[error("not the owner of this survey")]
    NotOwner,

    #[error("survey is not accepting answers")]
    SurveyInactive,

    #[error("vote quota already reached")]
    QuotaExceeded,

    #[error("survey already answered")]
    DuplicateResponse,

    #[error("{0}")]
    AnonymousLimit(&'static str),

    #[error("jwt error: {0}")]
    Jwt(#[from] jsonwebtoken::errors::Error),

    #[error("dotenv error: {0}")]
    DotEnv(#[from] dotenv::Error),

    #[error("parse int error: {0}")]
    ParseInt(#[from] num::ParseIntError),
}

impl ResponseError for Error {
    fn status_code(&self) -> StatusCode {
        match self {
            Error::Validation(_) => StatusCode::BAD_REQUEST,
            Error::NotFound(_) => StatusCode::NOT_FOUND,
            Error::NotOwner | Error::AnonymousLimit(_) => StatusCode::FORBIDDEN,
            Error::SurveyInactive | Error::QuotaExceeded | Error::DuplicateResponse => StatusCode::CONFLICT,
            Error::Jwt(_) => StatusCode::UNAUTHORIZED,
            _ => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    fn error_response(&self) -> HttpResponse {
        HttpResponse::build(self.status_code()).json(serde_json::json!({ "error": self.to_string() }))
    }
}
