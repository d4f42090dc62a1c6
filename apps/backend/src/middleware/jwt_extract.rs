//! Bearer-token gate for protected scopes.
//!
//! Verifies the `Authorization: Bearer <token>` header and stores the
//! decoded [`TokenClaims`] in request extensions. Requests without a usable
//! token are answered with a 401 envelope and never reach the handler; the
//! rejection is a regular response so outer middleware (CORS, logging)
//! still sees it.

use actix_web::body::EitherBody;
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::header;
use actix_web::{web, Error, HttpMessage};
use futures_util::future::{ready, LocalBoxFuture, Ready};

use crate::auth::{extract_bearer, TokenClaims};
use crate::error::AppError;
use crate::logging::security;
use crate::state::app_state::AppState;

pub const MISSING_TOKEN: &str = "Token de autenticación no proporcionado";
pub const INVALID_TOKEN: &str = "Token de autenticación inválido o expirado";

pub struct JwtExtract;

impl<S, B> Transform<S, ServiceRequest> for JwtExtract
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = JwtExtractMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(JwtExtractMiddleware { service }))
    }
}

pub struct JwtExtractMiddleware<S> {
    service: S,
}

impl<S, B> Service<ServiceRequest> for JwtExtractMiddleware<S>
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
        match verify_request(&req) {
            Ok(claims) => {
                req.extensions_mut().insert(claims);
                let fut = self.service.call(req);
                Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) })
            }
            Err(err) => {
                let res = req.error_response(err).map_into_right_body();
                Box::pin(async move { Ok(res) })
            }
        }
    }
}

fn verify_request(req: &ServiceRequest) -> Result<TokenClaims, AppError> {
    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok());
    let Some(token) = extract_bearer(header_value) else {
        security::token_rejected("missing_bearer", req.path());
        return Err(AppError::unauthorized(MISSING_TOKEN));
    };

    let state = req
        .app_data::<web::Data<AppState>>()
        .ok_or_else(|| AppError::config("AppState not registered"))?;
    state.tokens.verify(token).ok_or_else(|| {
        security::token_rejected("invalid_token", req.path());
        AppError::unauthorized(INVALID_TOKEN)
    })
}
