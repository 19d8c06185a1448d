use actix_web::{
    body::EitherBody,
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    web, Error, HttpMessage, ResponseError,
};
use futures::future::{ready, LocalBoxFuture, Ready};

use crate::auth::extractors::AuthenticatedUser;
use crate::auth::token::{TokenService, INVALID_TOKEN};
use crate::auth::{ACCESS_DENIED, AUTH_TOKEN_HEADER};
use crate::error::AppError;

/// Rejects requests without a valid `x-auth-token` header.
///
/// Tokens are checked with the `web::Data<TokenService>` registered on the app.
/// On success the request carries an [`AuthenticatedUser`] extension; otherwise
/// it is answered with the error response right here, before the wrapped
/// service (and therefore any store access) runs.
pub struct AuthMiddleware;

impl<S, B> Transform<S, ServiceRequest> for AuthMiddleware
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Transform = AuthMiddlewareService<S>;
    type InitError = ();
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(AuthMiddlewareService { service }))
    }
}

pub struct AuthMiddlewareService<S> {
    service: S,
}

fn authenticate(req: &ServiceRequest) -> Result<AuthenticatedUser, AppError> {
    let header = req
        .headers()
        .get(AUTH_TOKEN_HEADER)
        .ok_or_else(|| AppError::Unauthorized(ACCESS_DENIED.into()))?;

    let token = header
        .to_str()
        .map_err(|_| AppError::BadRequest(INVALID_TOKEN.into()))?;

    let tokens = req.app_data::<web::Data<TokenService>>().ok_or_else(|| {
        AppError::InternalServerError("TokenService is not registered as app data".into())
    })?;

    tokens.verify(token).map(AuthenticatedUser::from)
}

impl<S, B> Service<ServiceRequest> for AuthMiddlewareService<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        match authenticate(&req) {
            Ok(user) => {
                req.extensions_mut().insert(user);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(app_err) => {
                log::debug!("Rejected {} {}: {}", req.method(), req.path(), app_err);
                let response = req
                    .into_response(app_err.error_response())
                    .map_into_right_body();
                Box::pin(async move { Ok(response) })
            }
        }
    }
}
