use jsonwebtoken::{decode, DecodingKey, Validation};
use serde::{Deserialize, Serialize};

use actix_web::{
    dev::{Service, ServiceRequest, Transform},
    error::ErrorUnauthorized,
    Error, HttpMessage,
};
use std::future::{ready, Future, Ready};
use std::pin::Pin;
use std::task::{Context, Poll};

use crate::context::UserInfo;

/// Claims issued by the external identity provider. `anon` marks
/// provider-side anonymous sessions, which are subject to the anonymous
/// limits even though they carry a real subject id.
#[derive(Debug, Deserialize, Serialize)]
pub struct Claims {
    pub sub: String,
    #[serde(default)]
    pub anon: bool,
    pub exp: i64,
}

pub struct Jwt {
    secret: Vec<u8>,
}

impl Jwt {
    pub fn new(secret: Vec<u8>) -> Self {
        Self { secret }
    }
}

impl<S> Transform<S, ServiceRequest> for Jwt
where
    S: Service<ServiceRequest> + 'static,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Response = S::Response;
    type Error = Error;
    type Transform = JwtService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtService {
            key: DecodingKey::from_secret(&self.secret),
            next_service: service,
        }))
    }
}

pub struct JwtService<S> {
    key: DecodingKey,
    next_service: S,
}

impl<S> Service<ServiceRequest> for JwtService<S>
where
    S: Service<ServiceRequest>,
    S::Future: 'static,
    S::Error: Into<Error>,
{
    type Response = S::Response;
    type Error = Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>>>>;

    fn poll_ready(&self, ctx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.next_service.poll_ready(ctx).map_err(|e| e.into())
    }

    fn call(&self, req: ServiceRequest) -> Self::Future {
        // no token means the sentinel anonymous caller, not a rejection
        let user = match req.headers().get("Authorization") {
            None => UserInfo::anonymous(),
            Some(header) => {
                let token = match header.to_str() {
                    Ok(value) => value.trim_start_matches("Bearer ").trim(),
                    Err(e) => return Box::pin(async move { Err(ErrorUnauthorized(e)) }),
                };
                match decode::<Claims>(token, &self.key, &Validation::default()) {
                    Ok(data) => UserInfo {
                        id: data.claims.sub,
                        is_anonymous: data.claims.anon,
                    },
                    Err(e) => return Box::pin(async move { Err(ErrorUnauthorized(e)) }),
                }
            }
        };
        req.extensions_mut().insert(user);
        let res_fut = self.next_service.call(req);
        Box::pin(async move { res_fut.await.map_err(|e| e.into()) })
    }
}
