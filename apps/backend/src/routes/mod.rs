use std::future::Future;

use actix_web::{guard, web, HttpResponse};
use serde_json::{json, Map, Value};

use crate::error::AppError;
use crate::http::envelope;
use crate::middleware::cors::preflight_response;
use crate::middleware::jwt_extract::JwtExtract;
use crate::state::app_state::AppState;
use crate::validation::rules::as_text;

pub mod auth;
pub mod clientes;
pub mod health;
pub mod info;
pub mod usuarios;

/// Full route table. `main.rs` and the integration tests both mount it, so
/// tests exercise exactly the production wiring below the app-level
/// middleware.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.app_data(web::QueryConfig::default().error_handler(|_, _| {
        AppError::bad_request("Parámetros de consulta inválidos").into()
    }));

    // Registered first so any OPTIONS request is answered before scope routing.
    cfg.service(
        web::resource("/{tail:.*}")
            .guard(guard::Options())
            .to(preflight),
    );

    cfg.route("/", web::get().to(info::welcome));
    cfg.route("/health", web::get().to(health::health));
    cfg.route("/api/info", web::get().to(info::info));

    cfg.configure(auth::configure_routes);
    cfg.service(
        web::scope("/api/protected")
            .wrap(JwtExtract)
            .configure(auth::configure_protected_routes),
    );
    cfg.service(web::scope("/api/clientes").configure(clientes::configure_routes));
    cfg.service(
        web::scope("/api/usuarios")
            .wrap(JwtExtract)
            .configure(usuarios::configure_routes),
    );
}

async fn preflight(state: web::Data<AppState>) -> HttpResponse {
    preflight_response(&state.cors)
}

/// Fallback for unmatched paths.
pub async fn not_found() -> HttpResponse {
    envelope::error(
        "Ruta no encontrada",
        Value::Null,
        actix_web::http::StatusCode::NOT_FOUND,
    )
}

/// Run a handler body; server-side failures are reported under `context`.
pub(crate) async fn handle<F>(context: &str, body: F) -> Result<HttpResponse, AppError>
where
    F: Future<Output = Result<HttpResponse, AppError>>,
{
    body.await.map_err(|e| e.context(context))
}

/// Field present with a non-null value.
pub(crate) fn is_set(input: &Map<String, Value>, field: &str) -> bool {
    input.get(field).is_some_and(|v| !v.is_null())
}

/// Scalar field as text; `None` when absent, null or not a scalar.
pub(crate) fn text_field(input: &Map<String, Value>, field: &str) -> Option<String> {
    input
        .get(field)
        .and_then(as_text)
        .map(|text| text.into_owned())
}

/// `{"message": ..., <key>: <value>, ...}` payload used by every handler.
pub(crate) fn message_payload(message: &str, extra: Value) -> Value {
    let mut payload = Map::new();
    payload.insert("message".to_string(), json!(message));
    if let Value::Object(fields) = extra {
        payload.extend(fields);
    }
    Value::Object(payload)
}
