mod common;
mod support;

use actix_web::http::{header, StatusCode};
use actix_web::test;
use backend_test_support::envelope::{assert_error, assert_success};
use common::json_response;
use lazy_regex::regex_is_match;
use miapi::middleware::error_shield::GENERIC_ERROR_MESSAGE;
use miapi::middleware::request_trace::REQUEST_ID_HEADER;
use miapi::config::AppConfig;
use miapi::AppState;
use time::macros::{format_description, offset};
use time::{OffsetDateTime, PrimitiveDateTime};
use support::{create_test_app, test_state, test_tokens};

fn state_without_db() -> AppState {
    AppState::without_db(Default::default(), test_tokens(), Default::default())
}

#[actix_web::test]
async fn welcome_and_info() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;
    let data = assert_success(status, &body, StatusCode::OK);
    assert_eq!(data["message"], "Bienvenido a miapi");

    let req = test::TestRequest::get().uri("/api/info").to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(header::CONTENT_TYPE).and_then(|v| v.to_str().ok()),
        Some("application/json; charset=utf-8")
    );
    let (status, body) = json_response(resp).await;
    let data = assert_success(status, &body, StatusCode::OK);
    assert_eq!(data["app"]["name"], "miapi");
    assert_eq!(data["app"]["environment"], "testing");
    assert_eq!(data["app"]["version"], env!("CARGO_PKG_VERSION"));
    let server_time = data["server_time"].as_str().unwrap_or_default();
    assert!(regex_is_match!(
        r"^\d{4}-\d{2}-\d{2} \d{2}:\d{2}:\d{2}$",
        server_time
    ));
    assert_eq!(data["app"]["timezone"], "UTC");
    Ok(())
}

#[actix_web::test]
async fn info_reports_time_in_configured_zone() -> Result<(), Box<dyn std::error::Error>> {
    let app_config = AppConfig {
        timezone: "America/Bogota".parse()?,
        ..AppConfig::default()
    };
    let state = AppState::without_db(app_config, test_tokens(), Default::default());
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/api/info").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;
    let data = assert_success(status, &body, StatusCode::OK);
    assert_eq!(data["app"]["timezone"], "America/Bogota");

    let server_time = PrimitiveDateTime::parse(
        data["server_time"].as_str().unwrap_or_default(),
        format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"),
    )?
    .assume_offset(offset!(-5));
    let drift = (OffsetDateTime::now_utc() - server_time).abs();
    assert!(drift < time::Duration::minutes(1), "drift {drift}");
    Ok(())
}

#[actix_web::test]
async fn health_reports_database_and_migrations() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;
    let data = assert_success(status, &body, StatusCode::OK);
    assert_eq!(data["db"], "ok");
    assert_ne!(data["migrations"], "no_migrations");

    let app = create_test_app(state_without_db()).build().await;
    let req = test::TestRequest::get().uri("/health").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;
    let data = assert_success(status, &body, StatusCode::OK);
    assert_eq!(data["db"], "error");
    Ok(())
}

#[actix_web::test]
async fn options_is_always_ok() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    for uri in ["/api/usuarios", "/api/clientes/5/estado", "/cualquier/ruta"] {
        let req = test::TestRequest::default()
            .method(actix_web::http::Method::OPTIONS)
            .uri(uri)
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK, "OPTIONS {uri}");
    }

    let req = test::TestRequest::default()
        .method(actix_web::http::Method::OPTIONS)
        .uri("/api/clientes")
        .insert_header((header::ORIGIN, "http://app.example.com"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_METHOD, "PATCH"))
        .insert_header((header::ACCESS_CONTROL_REQUEST_HEADERS, "authorization"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(
        resp.headers()
            .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
            .and_then(|v| v.to_str().ok()),
        Some("*")
    );
    assert!(resp.headers().contains_key(header::ACCESS_CONTROL_ALLOW_METHODS));
    Ok(())
}

#[actix_web::test]
async fn request_id_is_echoed_or_generated() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get()
        .uri("/api/info")
        .insert_header((REQUEST_ID_HEADER, "req-123"))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(
        resp.headers().get(REQUEST_ID_HEADER).and_then(|v| v.to_str().ok()),
        Some("req-123")
    );

    let req = test::TestRequest::get().uri("/api/info").to_request();
    let resp = test::call_service(&app, req).await;
    let generated = resp
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default();
    assert_eq!(generated.len(), 36);
    Ok(())
}

#[actix_web::test]
async fn unknown_route_is_a_json_404() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::get().uri("/api/no-existe").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;
    assert_error(status, &body, StatusCode::NOT_FOUND, "Ruta no encontrada");
    Ok(())
}

#[actix_web::test]
async fn server_errors_carry_context_outside_production() {
    let app = create_test_app(state_without_db()).build().await;

    let req = test::TestRequest::get().uri("/api/clientes").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;
    let details = assert_error(
        status,
        &body,
        StatusCode::INTERNAL_SERVER_ERROR,
        "Error al obtener los clientes",
    );
    assert!(details.is_some_and(|d| d["error"].is_string()));
}

#[actix_web::test]
async fn production_shield_hides_server_errors() {
    let app = create_test_app(state_without_db())
        .in_production()
        .build()
        .await;

    let req = test::TestRequest::get().uri("/api/clientes").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;
    assert_error(
        status,
        &body,
        StatusCode::INTERNAL_SERVER_ERROR,
        GENERIC_ERROR_MESSAGE,
    );

    // Client errors pass through untouched.
    let req = test::TestRequest::get().uri("/api/clientes/abc").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;
    assert_error(status, &body, StatusCode::BAD_REQUEST, "Identificador inválido");
}
