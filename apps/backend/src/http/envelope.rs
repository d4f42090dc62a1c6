//! Uniform JSON envelope for every response.
//!
//! Success: `{"status": "success", "data": ...}`.
//! Error: `{"status": "error", "message": ..., "details": {...}}`, with
//! `details` left out entirely when there is nothing to report.

use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde::Serialize;
use serde_json::{Map, Value};
use tracing::error;

pub const JSON_CONTENT_TYPE: &str = "application/json; charset=utf-8";

#[derive(Debug, Serialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum Envelope<T> {
    Success {
        data: T,
    },
    Error {
        message: String,
        #[serde(skip_serializing_if = "Map::is_empty")]
        details: Map<String, Value>,
    },
}

/// Wrap `data` in a success envelope.
pub fn success<T: Serialize>(data: T, status: StatusCode) -> HttpResponse {
    respond(status, &Envelope::Success { data })
}

pub fn ok<T: Serialize>(data: T) -> HttpResponse {
    success(data, StatusCode::OK)
}

pub fn created<T: Serialize>(data: T) -> HttpResponse {
    success(data, StatusCode::CREATED)
}

/// Error envelope. `details` is expected to be an object or `null`;
/// anything else is dropped.
pub fn error(message: &str, details: Value, status: StatusCode) -> HttpResponse {
    let details = match details {
        Value::Object(map) => map,
        _ => Map::new(),
    };
    respond::<()>(
        status,
        &Envelope::Error {
            message: message.to_string(),
            details,
        },
    )
}

fn respond<T: Serialize>(status: StatusCode, envelope: &Envelope<T>) -> HttpResponse {
    match serde_json::to_vec(envelope) {
        Ok(body) => HttpResponse::build(status)
            .content_type(JSON_CONTENT_TYPE)
            .body(body),
        Err(e) => {
            error!(error = %e, "failed to serialize response envelope");
            HttpResponse::InternalServerError()
                .content_type(JSON_CONTENT_TYPE)
                .body(r#"{"status":"error","message":"Error al serializar la respuesta"}"#)
        }
    }
}
