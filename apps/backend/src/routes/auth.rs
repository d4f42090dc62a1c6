use actix_web::{web, HttpResponse};
use serde_json::{json, Map, Value};

use super::{handle, message_payload, text_field};
use crate::db::require_db;
use crate::error::AppError;
use crate::extractors::{AuthUser, JsonBody};
use crate::http::envelope;
use crate::services::auth::authenticate;
use crate::state::app_state::AppState;
use crate::validation::Validator;

/// `POST /api/login`: exchange email and password for a bearer token.
async fn login(state: web::Data<AppState>, body: JsonBody) -> Result<HttpResponse, AppError> {
    handle("Error al iniciar sesión", login_user(&state, body.into_inner())).await
}

async fn login_user(state: &AppState, input: Map<String, Value>) -> Result<HttpResponse, AppError> {
    Validator::new(&input)
        .required("email")
        .message("El email es requerido")
        .email("email")
        .message("El formato del email no es válido")
        .required("password")
        .message("La contraseña es requerida")
        .min("password", 6)
        .message("La contraseña debe tener al menos 6 caracteres")
        .check("Errores de validación")?;

    let email = text_field(&input, "email").unwrap_or_default();
    let password = text_field(&input, "password").unwrap_or_default();

    let db = require_db(state)?;
    let user = authenticate(db, &email, &password)
        .await?
        .ok_or_else(|| AppError::unauthorized("Credenciales inválidas"))?;

    let token = state.tokens.issue(&user.id_usuario.to_string())?;
    Ok(envelope::ok(message_payload(
        "Login exitoso",
        json!({ "user": user, "token": token }),
    )))
}

/// Tokens are stateless; the client discards its copy.
async fn logout() -> HttpResponse {
    envelope::ok(json!({ "message": "Sesión cerrada exitosamente" }))
}

async fn profile(user: AuthUser) -> HttpResponse {
    envelope::ok(message_payload(
        "Perfil obtenido exitosamente",
        json!({ "user": subject_value(user.subject()) }),
    ))
}

async fn refresh_token(
    state: web::Data<AppState>,
    user: AuthUser,
) -> Result<HttpResponse, AppError> {
    let token = state.tokens.issue(user.subject())?;
    Ok(envelope::ok(message_payload(
        "Token refrescado exitosamente",
        json!({ "token": token }),
    )))
}

/// Numeric subjects are reported as numbers.
fn subject_value(subject: &str) -> Value {
    subject
        .parse::<i64>()
        .map(Value::from)
        .unwrap_or_else(|_| Value::String(subject.to_string()))
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/login", web::post().to(login))
        .route("/api/logout", web::post().to(logout));
}

/// Mounted under the JWT-protected `/api/protected` scope.
pub fn configure_protected_routes(cfg: &mut web::ServiceConfig) {
    cfg.route("/user/profile", web::get().to(profile))
        .route("/refresh-token", web::post().to(refresh_token));
}
