use actix_web::dev::Payload;
use actix_web::{Error as ActixError, FromRequest, HttpMessage, HttpRequest};
use std::future::{ready, Ready};
use uuid::Uuid;

use crate::auth::token::Claims;
use crate::auth::ACCESS_DENIED;
use crate::error::AppError;

/// The identity attached to a request by `AuthMiddleware`.
///
/// Handlers on protected routes take this as an argument. If the middleware did
/// not run, extraction fails with the same 401 a missing token would produce.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct AuthenticatedUser {
    pub id: Uuid,
}

impl From<Claims> for AuthenticatedUser {
    fn from(claims: Claims) -> Self {
        Self { id: claims.id }
    }
}

impl FromRequest for AuthenticatedUser {
    type Error = ActixError; // AppError will be converted into ActixError via ResponseError
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        match req.extensions().get::<AuthenticatedUser>().copied() {
            Some(user) => ready(Ok(user)),
            None => {
                log::warn!(
                    "No authenticated user on {}; is AuthMiddleware applied?",
                    req.path()
                );
                ready(Err(AppError::Unauthorized(ACCESS_DENIED.into()).into()))
            }
        }
    }
}
