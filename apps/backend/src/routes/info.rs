use actix_web::{web, HttpResponse};
use serde_json::json;
use time::macros::format_description;

use crate::error::AppError;
use crate::http::envelope;
use crate::state::app_state::AppState;

pub async fn welcome(state: web::Data<AppState>) -> HttpResponse {
    envelope::ok(json!({ "message": format!("Bienvenido a {}", state.app.name) }))
}

/// Application metadata; `server_time` is `YYYY-MM-DD HH:MM:SS` in the
/// configured `APP_TIMEZONE`.
pub async fn info(state: web::Data<AppState>) -> Result<HttpResponse, AppError> {
    let server_time = state
        .app
        .timezone
        .now()
        .format(format_description!("[year]-[month]-[day] [hour]:[minute]:[second]"))
        .map_err(|e| AppError::internal("Error al obtener la información", e.to_string()))?;

    Ok(envelope::ok(json!({
        "app": {
            "name": state.app.name,
            "version": state.app.version,
            "environment": state.app.env.as_str(),
            "timezone": state.app.timezone.name(),
        },
        "server_time": server_time,
    })))
}
