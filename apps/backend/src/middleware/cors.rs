use actix_cors::Cors;
use actix_web::http::header::{self, HeaderName};
use actix_web::HttpResponse;

use crate::config::{AllowedOrigins, CorsConfig};

pub const ALLOWED_METHODS: [&str; 6] = ["GET", "POST", "PUT", "PATCH", "DELETE", "OPTIONS"];
pub const ALLOWED_HEADERS: [&str; 5] = [
    "x-requested-with",
    "content-type",
    "accept",
    "origin",
    "authorization",
];

/// CORS policy from configuration.
///
/// A wildcard policy answers any origin without credentials; an explicit
/// list allows credentials for those origins only. Preflight handling is
/// left to the `OPTIONS` route (see [`preflight_response`]) so that every
/// `OPTIONS` request gets a 200, including ones a browser would not send.
pub fn cors_middleware(config: &CorsConfig) -> Cors {
    let cors = Cors::default()
        .disable_preflight()
        .allowed_methods(ALLOWED_METHODS)
        .allowed_headers(ALLOWED_HEADERS.map(HeaderName::from_static))
        .expose_headers([HeaderName::from_static("x-request-id")])
        .max_age(config.max_age);

    match &config.origins {
        AllowedOrigins::Any => cors.allow_any_origin().send_wildcard(),
        AllowedOrigins::List(origins) => origins
            .iter()
            .fold(cors, |cors, origin| cors.allowed_origin(origin))
            .supports_credentials(),
    }
}

/// Empty 200 carrying the preflight headers. The origin headers are added
/// by [`cors_middleware`] on the way out.
pub fn preflight_response(config: &CorsConfig) -> HttpResponse {
    HttpResponse::Ok()
        .insert_header((header::ACCESS_CONTROL_ALLOW_METHODS, ALLOWED_METHODS.join(", ")))
        .insert_header((header::ACCESS_CONTROL_ALLOW_HEADERS, ALLOWED_HEADERS.join(", ")))
        .insert_header((header::ACCESS_CONTROL_MAX_AGE, config.max_age.to_string()))
        .finish()
}

#[cfg(test)]
mod tests {
    use actix_web::{test, web, App};

    use super::*;

    fn origin_list() -> CorsConfig {
        CorsConfig {
            origins: AllowedOrigins::List(vec!["http://app.example.com".to_string()]),
            max_age: 600,
        }
    }

    #[actix_web::test]
    async fn listed_origin_is_echoed_with_credentials() {
        let config = origin_list();
        let app = test::init_service(
            App::new()
                .wrap(cors_middleware(&config))
                .route("/ping", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let req = test::TestRequest::get()
            .uri("/ping")
            .insert_header((header::ORIGIN, "http://app.example.com"))
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_ORIGIN).unwrap(),
            "http://app.example.com"
        );
        assert_eq!(
            resp.headers().get(header::ACCESS_CONTROL_ALLOW_CREDENTIALS).unwrap(),
            "true"
        );
    }

    #[actix_web::test]
    async fn preflight_lists_methods_and_headers() {
        let resp = preflight_response(&origin_list());
        let headers = resp.headers();
        assert_eq!(
            headers.get(header::ACCESS_CONTROL_ALLOW_METHODS).unwrap(),
            "GET, POST, PUT, PATCH, DELETE, OPTIONS"
        );
        assert!(headers
            .get(header::ACCESS_CONTROL_ALLOW_HEADERS)
            .unwrap()
            .to_str()
            .unwrap()
            .contains("authorization"));
        assert_eq!(headers.get(header::ACCESS_CONTROL_MAX_AGE).unwrap(), "600");
    }
}
