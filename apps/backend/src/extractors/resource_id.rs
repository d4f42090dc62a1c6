use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpRequest};

use crate::error::AppError;

/// Numeric `{id}` path segment.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResourceId(pub i64);

impl FromRequest for ResourceId {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(parse_id(req.match_info().get("id")))
    }
}

fn parse_id(raw: Option<&str>) -> Result<ResourceId, AppError> {
    raw.and_then(|s| s.parse::<i64>().ok())
        .map(ResourceId)
        .ok_or_else(|| AppError::bad_request("Identificador inválido"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_integers_only() {
        assert_eq!(parse_id(Some("42")).unwrap(), ResourceId(42));
        assert!(parse_id(Some("4a")).is_err());
        assert!(parse_id(Some("")).is_err());
        assert!(parse_id(None).is_err());
    }
}
