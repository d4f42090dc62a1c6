use std::ops::Deref;

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};
use bytes::BytesMut;
use futures_util::StreamExt;
use serde_json::{Map, Value};
use tracing::{debug, warn};

use crate::error::AppError;
use crate::logging::pii::Redacted;
use crate::trace_ctx;

/// Largest request body accepted, in bytes.
const MAX_BODY_BYTES: usize = 256 * 1024;

/// Request body as a JSON object.
///
/// Validation rules run against the raw field map, so the body is not
/// bound to a struct. An empty body yields an empty map.
#[derive(Debug, Default)]
pub struct JsonBody(pub Map<String, Value>);

impl JsonBody {
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl Deref for JsonBody {
    type Target = Map<String, Value>;

    fn deref(&self) -> &Self::Target {
        &self.0
    }
}

impl FromRequest for JsonBody {
    type Error = AppError;
    type Future = std::pin::Pin<Box<dyn std::future::Future<Output = Result<Self, Self::Error>>>>;

    fn from_request(_req: &HttpRequest, payload: &mut Payload) -> Self::Future {
        let mut payload = payload.take();

        Box::pin(async move {
            let trace_id = trace_ctx::trace_id();

            let mut body = BytesMut::new();
            while let Some(chunk) = payload.next().await {
                let chunk = chunk.map_err(|e| {
                    warn!(trace_id = %trace_id, error = %e, "Failed to read request body chunk");
                    AppError::bad_request("No se pudo leer el cuerpo de la solicitud")
                })?;
                if body.len() + chunk.len() > MAX_BODY_BYTES {
                    return Err(AppError::bad_request(
                        "El cuerpo de la solicitud es demasiado grande",
                    ));
                }
                body.extend_from_slice(&chunk);
            }

            parse_object(&body).map(JsonBody)
        })
    }
}

fn parse_object(body: &[u8]) -> Result<Map<String, Value>, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(Map::new());
    }
    match serde_json::from_slice::<Value>(body) {
        Ok(Value::Object(map)) => Ok(map),
        Ok(Value::Null) => Ok(Map::new()),
        Ok(other) => {
            debug!(kind = json_kind(&other), "JSON body is not an object");
            Err(AppError::bad_request("JSON inválido"))
        }
        Err(e) => {
            debug!(
                error = %Redacted(&e.to_string()),
                line = e.line(),
                body_size = body.len(),
                "JSON parsing failed"
            );
            Err(AppError::bad_request("JSON inválido"))
        }
    }
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "bool",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn empty_and_null_bodies_are_empty_objects() {
        assert!(parse_object(b"").unwrap().is_empty());
        assert!(parse_object(b"  \n").unwrap().is_empty());
        assert!(parse_object(b"null").unwrap().is_empty());
    }

    #[test]
    fn objects_parse() {
        let map = parse_object(br#"{"email": "a@b.com", "n": 1}"#).unwrap();
        assert_eq!(map.get("email"), Some(&json!("a@b.com")));
    }

    #[test]
    fn malformed_or_non_object_is_bad_request() {
        let bodies: [&[u8]; 3] = [b"{\"email\": ", b"[1, 2]", b"\"text\""];
        for body in bodies {
            match parse_object(body) {
                Err(AppError::BadRequest { message }) => assert_eq!(message, "JSON inválido"),
                other => panic!("unexpected: {other:?}"),
            }
        }
    }
}
