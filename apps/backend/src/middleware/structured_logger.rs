use std::future::{ready, Ready};
use std::time::Instant;

use actix_web::dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform};
use actix_web::http::StatusCode;
use actix_web::{Error as ActixError, HttpMessage};
use futures_util::future::LocalBoxFuture;
use tracing::{error, info, warn, Level};

use crate::middleware::request_trace::RequestId;

/// Access log. One `request_completed` line per request, at `error` for 5xx,
/// `warn` for 4xx and `info` otherwise.
///
/// `http.route` carries the matched pattern (`/api/clientes/{id}`), or
/// `unmatched` when no resource claims the path.
pub struct StructuredLogger;

impl<S, B> Transform<S, ServiceRequest> for StructuredLogger
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type InitError = ();
    type Transform = StructuredLoggerMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(StructuredLoggerMiddleware { service }))
    }
}

pub struct StructuredLoggerMiddleware<S> {
    service: S,
}

struct AccessRecord {
    method: String,
    path: String,
    route: String,
    trace_id: String,
    started: Instant,
}

impl AccessRecord {
    fn from_request(req: &ServiceRequest) -> Self {
        Self {
            method: req.method().to_string(),
            path: req.path().to_string(),
            route: req.match_pattern().unwrap_or_else(|| "unmatched".to_string()),
            trace_id: req
                .extensions()
                .get::<RequestId>()
                .map(|id| id.0.clone())
                .unwrap_or_else(|| "unknown".to_string()),
            started: Instant::now(),
        }
    }

    fn emit(&self, status: StatusCode) {
        let duration_us = self.started.elapsed().as_micros() as u64;
        let status_code = status.as_u16();
        let (method, path, route, trace_id) = (&self.method, &self.path, &self.route, &self.trace_id);

        let level = level_for(status);
        if level == Level::ERROR {
            error!(http.method = %method, url.path = %path, http.route = %route, http.status_code = status_code, duration_us, trace_id = %trace_id, "request_completed");
        } else if level == Level::WARN {
            warn!(http.method = %method, url.path = %path, http.route = %route, http.status_code = status_code, duration_us, trace_id = %trace_id, "request_completed");
        } else {
            info!(http.method = %method, url.path = %path, http.route = %route, http.status_code = status_code, duration_us, trace_id = %trace_id, "request_completed");
        }
    }
}

fn level_for(status: StatusCode) -> Level {
    if status.is_server_error() {
        Level::ERROR
    } else if status.is_client_error() {
        Level::WARN
    } else {
        Level::INFO
    }
}

impl<S, B> Service<ServiceRequest> for StructuredLoggerMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = ActixError>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = ActixError;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        let record = AccessRecord::from_request(&req);
        let fut = self.service.call(req);

        Box::pin(async move {
            let result = fut.await;
            let status = match &result {
                Ok(res) => res.status(),
                Err(err) => err.as_response_error().status_code(),
            };
            record.emit(status);
            result
        })
    }
}
