//! Production guard for server errors.
//!
//! When enabled, every 5xx response body is replaced: `/api` paths get a
//! generic JSON envelope, other paths a minimal HTML page. The status code
//! is kept. Register it innermost so outer middleware still decorates the
//! replacement response.

use std::future::{ready, Ready};

use actix_web::body::{EitherBody, MessageBody};
use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error, HttpResponse};
use futures_util::future::LocalBoxFuture;
use serde_json::Value;
use tracing::error;

use crate::http::envelope;

pub const GENERIC_ERROR_MESSAGE: &str = "Se ha producido un error en el servidor";

const GENERIC_ERROR_HTML: &str = "<!DOCTYPE html><html><head><meta charset=\"utf-8\"><title>Error</title></head><body><h1>Error</h1><p>Se ha producido un error en el servidor.</p></body></html>";

#[derive(Clone, Copy)]
pub struct ErrorShield {
    enabled: bool,
}

impl ErrorShield {
    pub fn new(enabled: bool) -> Self {
        Self { enabled }
    }
}

impl<S, B> Transform<S, ServiceRequest> for ErrorShield
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type InitError = ();
    type Transform = ErrorShieldMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(ErrorShieldMiddleware {
            service,
            enabled: self.enabled,
        }))
    }
}

pub struct ErrorShieldMiddleware<S> {
    service: S,
    enabled: bool,
}

impl<S, B> Service<ServiceRequest> for ErrorShieldMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: MessageBody + 'static,
{
    type Response = ServiceResponse<EitherBody<B>>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let fut = self.service.call(req);
        if !self.enabled {
            return Box::pin(async move { fut.await.map(ServiceResponse::map_into_left_body) });
        }

        Box::pin(async move {
            let res = fut.await?;
            let status = res.status();
            if !status.is_server_error() {
                return Ok(res.map_into_left_body());
            }

            let is_api = res.request().path().starts_with("/api");
            error!(status = status.as_u16(), path = %res.request().path(), "server error body replaced");
            let (request, _) = res.into_parts();
            Ok(ServiceResponse::new(request, generic_response(status, is_api)).map_into_right_body())
        })
    }
}

fn generic_response(status: StatusCode, is_api: bool) -> HttpResponse {
    if is_api {
        envelope::error(GENERIC_ERROR_MESSAGE, Value::Null, status)
    } else {
        HttpResponse::build(status)
            .content_type("text/html; charset=utf-8")
            .body(GENERIC_ERROR_HTML)
    }
}
