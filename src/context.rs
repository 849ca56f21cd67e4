use actix_web::{self, error::ErrorUnauthorized, FromRequest, HttpMessage};
use std::future::{ready, Ready};

/// Sentinel identity for callers without a token. They can browse, answer
/// and create within the anonymous limits configured in `Config`.
pub const ANONYMOUS_USER: &str = "anonymous";

#[derive(Debug, Clone)]
pub struct UserInfo {
    pub id: String,
    pub is_anonymous: bool,
}

impl UserInfo {
    pub fn anonymous() -> Self {
        Self {
            id: ANONYMOUS_USER.into(),
            is_anonymous: true,
        }
    }
}

impl FromRequest for UserInfo {
    type Error = actix_web::Error;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &actix_web::HttpRequest, _payload: &mut actix_web::dev::Payload) -> Self::Future {
        if let Some(user) = req.extensions().get::<Self>() {
            ready(Ok(user.clone()))
        } else {
            ready(Err(ErrorUnauthorized("no caller identity")))
        }
    }
}
