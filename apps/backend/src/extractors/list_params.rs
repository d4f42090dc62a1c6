use std::collections::HashMap;
use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{web, FromRequest, HttpRequest};

use crate::db::pagination::{PageRequest, DEFAULT_LIMIT};
use crate::error::AppError;

/// Listing flags from the query string: `page`, `limit`, `all`, `exact`.
///
/// Parsing never fails; unreadable numbers fall back to the defaults and
/// the boolean flags are on only for the literal `true`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ListParams {
    pub page: PageRequest,
    pub all: bool,
    pub exact: bool,
}

impl ListParams {
    pub fn from_query(query: &str) -> Self {
        let params = web::Query::<HashMap<String, String>>::from_query(query)
            .map(web::Query::into_inner)
            .unwrap_or_default();
        let number = |key: &str, default: u64| {
            params
                .get(key)
                .and_then(|v| v.trim().parse::<i64>().ok())
                .and_then(|n| u64::try_from(n).ok())
                .unwrap_or(default)
        };
        let flag = |key: &str| params.get(key).is_some_and(|v| v == "true");

        Self {
            page: PageRequest::new(number("page", 1), number("limit", DEFAULT_LIMIT)),
            all: flag("all"),
            exact: flag("exact"),
        }
    }
}

impl FromRequest for ListParams {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _: &mut Payload) -> Self::Future {
        ready(Ok(Self::from_query(req.query_string())))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults() {
        let params = ListParams::from_query("");
        assert_eq!(params.page, PageRequest::new(1, DEFAULT_LIMIT));
        assert!(!params.all);
        assert!(!params.exact);
    }

    #[test]
    fn reads_values_and_clamps() {
        let params = ListParams::from_query("page=3&limit=5&all=true&exact=TRUE");
        assert_eq!(params.page, PageRequest::new(3, 5));
        assert!(params.all);
        assert!(!params.exact);

        let params = ListParams::from_query("page=-2&limit=abc");
        assert_eq!(params.page, PageRequest::new(1, DEFAULT_LIMIT));
    }
}
