mod common;
mod support;

use actix_web::http::StatusCode;
use actix_web::test;
use backend_test_support::envelope::{
    assert_error, assert_field_error, assert_success, assert_validation_errors,
};
use common::json_response;
use serde_json::json;
use support::{create_test_app, seed_user, test_state, test_tokens};

#[actix_web::test]
async fn login_returns_user_and_token() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let user = seed_user(&state).await;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"email": user.email, "password": user.password}))
        .to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;

    let data = assert_success(status, &body, StatusCode::OK);
    assert_eq!(data["message"], "Login exitoso");
    assert_eq!(data["user"]["id_usuario"], user.id);
    assert_eq!(data["user"]["email"], user.email);
    assert!(data["user"].get("password").is_none());

    let token = data["token"].as_str().expect("token is a string");
    let claims = test_tokens().verify(token).expect("token verifies");
    assert_eq!(claims.sub, user.id.to_string());
    Ok(())
}

#[actix_web::test]
async fn wrong_password_is_unauthorized() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let user = seed_user(&state).await;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"email": user.email, "password": "incorrecta"}))
        .to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;

    assert_error(status, &body, StatusCode::UNAUTHORIZED, "Credenciales inválidas");
    assert_eq!(
        body,
        json!({"status": "error", "message": "Credenciales inválidas"})
    );
    Ok(())
}

#[actix_web::test]
async fn unknown_email_is_unauthorized() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"email": "nadie@example.com", "password": "secreto123"}))
        .to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;

    assert_error(status, &body, StatusCode::UNAUTHORIZED, "Credenciales inválidas");
    Ok(())
}

#[actix_web::test]
async fn login_validation_errors() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"password": "123"}))
        .to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;

    let errors = assert_validation_errors(status, &body, "Errores de validación");
    assert_field_error(&errors, "email", "El email es requerido");
    assert_field_error(
        &errors,
        "password",
        "La contraseña debe tener al menos 6 caracteres",
    );

    let req = test::TestRequest::post()
        .uri("/api/login")
        .set_json(json!({"email": "a@b", "password": "secreto123"}))
        .to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;
    let errors = assert_validation_errors(status, &body, "Errores de validación");
    assert_field_error(&errors, "email", "El formato del email no es válido");
    Ok(())
}

#[actix_web::test]
async fn empty_body_counts_as_empty_object() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post().uri("/api/login").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;

    let errors = assert_validation_errors(status, &body, "Errores de validación");
    assert_field_error(&errors, "email", "El email es requerido");
    assert_field_error(&errors, "password", "La contraseña es requerida");
    Ok(())
}

#[actix_web::test]
async fn malformed_json_is_bad_request() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post()
        .uri("/api/login")
        .insert_header(("content-type", "application/json"))
        .set_payload("{\"email\": ")
        .to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;

    assert_error(status, &body, StatusCode::BAD_REQUEST, "JSON inválido");
    Ok(())
}

#[actix_web::test]
async fn logout_always_succeeds() -> Result<(), Box<dyn std::error::Error>> {
    let state = test_state().await?;
    let app = create_test_app(state).build().await;

    let req = test::TestRequest::post().uri("/api/logout").to_request();
    let (status, body) = json_response(test::call_service(&app, req).await).await;

    let data = assert_success(status, &body, StatusCode::OK);
    assert_eq!(data["message"], "Sesión cerrada exitosamente");
    Ok(())
}
