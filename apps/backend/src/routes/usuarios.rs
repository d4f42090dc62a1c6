use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde_json::{json, Map, Value};

use super::{handle, is_set, message_payload, text_field};
use crate::db::require_db;
use crate::entities::usuarios::UserStatus;
use crate::error::AppError;
use crate::extractors::{JsonBody, ListParams, ResourceId};
use crate::http::envelope;
use crate::repos::users::{self, UserCreate, UserCriteria, UserUpdate};
use crate::services::users as user_service;
use crate::state::app_state::AppState;
use crate::validation::unique::{Collection, UniqueRule};
use crate::validation::Validator;

const NOT_FOUND: &str = "Usuario no encontrado";
const VALIDATION_FAILED: &str = "Error de validación";
const STATUS_VALUES: [&str; 2] = ["1", "2"];
const DEFAULT_ROLE: &str = "usuario";
const DEFAULT_PERMISSION: &str = "basico";

async fn list(
    state: web::Data<AppState>,
    params: ListParams,
) -> Result<HttpResponse, AppError> {
    handle("Error al obtener los usuarios", list_users(&state, params)).await
}

async fn list_users(state: &AppState, params: ListParams) -> Result<HttpResponse, AppError> {
    let db = require_db(state)?;
    if params.all {
        let usuarios = users::get_all(db).await?;
        let total = usuarios.len();
        return Ok(envelope::ok(message_payload(
            "Usuarios obtenidos exitosamente",
            json!({ "usuarios": usuarios, "total": total }),
        )));
    }

    let page = users::get_paginated(db, params.page).await?;
    Ok(envelope::ok(message_payload(
        "Usuarios obtenidos exitosamente",
        json!({ "usuarios": page.items, "pagination": page.pagination }),
    )))
}

async fn search(
    state: web::Data<AppState>,
    criteria: web::Query<UserCriteria>,
    params: ListParams,
) -> Result<HttpResponse, AppError> {
    handle(
        "Error al buscar usuarios",
        search_users(&state, criteria.into_inner(), params),
    )
    .await
}

async fn search_users(
    state: &AppState,
    criteria: UserCriteria,
    params: ListParams,
) -> Result<HttpResponse, AppError> {
    if criteria.is_empty() {
        return Err(AppError::bad_request(
            "Debe proporcionar al menos un criterio de búsqueda",
        ));
    }
    let db = require_db(state)?;
    let page = users::search(db, &criteria, params.page, params.exact).await?;
    Ok(envelope::ok(message_payload(
        "Búsqueda realizada correctamente",
        json!({ "usuarios": page.items, "pagination": page.pagination }),
    )))
}

async fn show(state: web::Data<AppState>, id: ResourceId) -> Result<HttpResponse, AppError> {
    handle("Error al obtener el usuario", show_user(&state, id.0)).await
}

async fn show_user(state: &AppState, id: i64) -> Result<HttpResponse, AppError> {
    let db = require_db(state)?;
    let usuario = users::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND, id))?;
    Ok(envelope::ok(message_payload(
        "Usuario obtenido exitosamente",
        json!({ "usuario": usuario }),
    )))
}

async fn create(state: web::Data<AppState>, body: JsonBody) -> Result<HttpResponse, AppError> {
    handle("Error al crear el usuario", create_user(&state, body.into_inner())).await
}

async fn create_user(
    state: &AppState,
    input: Map<String, Value>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(state)?;
    validate_new_user(db, &input).await?;

    let password = text_field(&input, "password").unwrap_or_default();
    let usuario = user_service::create_user(db, new_user(&input), password).await?;
    Ok(envelope::created(message_payload(
        "Usuario creado exitosamente",
        json!({ "usuario": usuario }),
    )))
}

async fn update(
    state: web::Data<AppState>,
    id: ResourceId,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    handle(
        "Error al actualizar el usuario",
        update_user(&state, id.0, body.into_inner()),
    )
    .await
}

async fn update_user(
    state: &AppState,
    id: i64,
    input: Map<String, Value>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(state)?;
    if users::find_by_id(db, id).await?.is_none() {
        return Err(AppError::not_found(NOT_FOUND, id));
    }
    if input.is_empty() {
        return Err(AppError::unprocessable(
            "No se proporcionaron datos para actualizar",
        ));
    }
    validate_user_changes(db, &input, id).await?;

    let new_password = text_field(&input, "password").filter(|p| !p.is_empty());
    let (usuario, rows_affected) =
        user_service::update_user(db, id, user_changes(&input), new_password).await?;
    if rows_affected == 0 {
        return Err(AppError::internal(
            "No se pudo actualizar el usuario",
            format!("no rows updated for id_usuario {id}"),
        ));
    }
    Ok(envelope::ok(message_payload(
        "Usuario actualizado exitosamente",
        json!({ "usuario": usuario }),
    )))
}

async fn update_status(
    state: web::Data<AppState>,
    id: ResourceId,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    handle(
        "Error al actualizar el estado del usuario",
        update_user_status(&state, id.0, body.into_inner()),
    )
    .await
}

async fn update_user_status(
    state: &AppState,
    id: i64,
    input: Map<String, Value>,
) -> Result<HttpResponse, AppError> {
    if !is_set(&input, "estado") {
        return Err(AppError::unprocessable("El estado es obligatorio"));
    }
    Validator::new(&input)
        .one_of("estado", &STATUS_VALUES)
        .message("El estado debe ser activo o inactivo")
        .check(VALIDATION_FAILED)?;
    let estado = parse_status(&input)
        .ok_or_else(|| AppError::unprocessable("El estado debe ser activo o inactivo"))?;

    let db = require_db(state)?;
    if users::find_by_id(db, id).await?.is_none() {
        return Err(AppError::not_found(NOT_FOUND, id));
    }
    let rows_affected = users::update_status(db, id, estado).await?;
    let usuario = users::find_by_id(db, id).await?;
    Ok(envelope::ok(message_payload(
        "Estado del usuario actualizado correctamente",
        json!({ "usuario": usuario, "rows_affected": rows_affected }),
    )))
}

async fn validate_new_user(
    db: &DatabaseConnection,
    input: &Map<String, Value>,
) -> Result<(), AppError> {
    Validator::new(input)
        .with_lookup(db)
        .required("cedula")
        .message("La cédula es obligatoria")
        .required("nombre")
        .message("El nombre es obligatorio")
        .required("apellidos")
        .message("Los apellidos son obligatorios")
        .required("email")
        .message("El email es obligatorio")
        .email("email")
        .message("El formato del email no es válido")
        .required("password")
        .message("La contraseña es obligatoria")
        .min("password", 6)
        .message("La contraseña debe tener al menos 6 caracteres")
        .required("password_confirmation")
        .message("La confirmación de la contraseña es obligatoria")
        .equals("password_confirmation", "password")
        .message("Las contraseñas no coinciden")
        .unique("email", UniqueRule::on(Collection::Usuarios))
        .await?
        .message("Este email ya está registrado")
        .unique("cedula", UniqueRule::on(Collection::Usuarios))
        .await?
        .message("Esta cédula ya está registrada")
        .max("nombre", 100)
        .max("apellidos", 100)
        .max("email", 150)
        .max("telefono", 20)
        .numeric("telefono")
        .one_of("estado", &STATUS_VALUES)
        .message("El estado debe ser activo o inactivo")
        .check(VALIDATION_FAILED)
}

/// Rules apply only to the fields present in the body.
async fn validate_user_changes(
    db: &DatabaseConnection,
    input: &Map<String, Value>,
    id: i64,
) -> Result<(), AppError> {
    let mut validator = Validator::new(input).with_lookup(db);
    if is_set(input, "nombre") {
        validator = validator.min("nombre", 2);
    }
    if is_set(input, "apellidos") {
        validator = validator.min("apellidos", 2);
    }
    if is_set(input, "telefono") {
        validator = validator.min("telefono", 8).numeric("telefono");
    }
    if is_set(input, "password") {
        validator = validator
            .min("password", 6)
            .message("La contraseña debe tener al menos 6 caracteres")
            .equals("password_confirmation", "password")
            .message("Las contraseñas no coinciden");
    }

    validator
        .email("email")
        .unique("email", UniqueRule::on(Collection::Usuarios).except(id))
        .await?
        .message("Este email ya está registrado")
        .unique("cedula", UniqueRule::on(Collection::Usuarios).except(id))
        .await?
        .message("Esta cédula ya está registrada")
        .one_of("estado", &STATUS_VALUES)
        .message("El estado debe ser activo o inactivo")
        .check(VALIDATION_FAILED)
}

fn parse_status(input: &Map<String, Value>) -> Option<UserStatus> {
    text_field(input, "estado")
        .and_then(|raw| raw.trim().parse::<i32>().ok())
        .and_then(|value| UserStatus::try_from(value).ok())
}

/// The hash is filled in by the service once the password is hashed.
fn new_user(input: &Map<String, Value>) -> UserCreate {
    let or_default = |name: &str, default: &str| {
        text_field(input, name)
            .filter(|value| !value.is_empty())
            .unwrap_or_else(|| default.to_string())
    };
    UserCreate {
        cedula: text_field(input, "cedula").unwrap_or_default(),
        nombre: text_field(input, "nombre").unwrap_or_default(),
        apellidos: text_field(input, "apellidos").unwrap_or_default(),
        telefono: text_field(input, "telefono"),
        email: text_field(input, "email").unwrap_or_default(),
        rol: or_default("rol", DEFAULT_ROLE),
        estado: parse_status(input).unwrap_or(UserStatus::Activo),
        permiso: or_default("permiso", DEFAULT_PERMISSION),
        password_hash: String::new(),
    }
}

fn user_changes(input: &Map<String, Value>) -> UserUpdate {
    let field = |name: &str| text_field(input, name).filter(|value| !value.is_empty());
    UserUpdate {
        cedula: field("cedula"),
        nombre: field("nombre"),
        apellidos: field("apellidos"),
        telefono: field("telefono"),
        email: field("email"),
        rol: field("rol"),
        estado: parse_status(input),
        permiso: field("permiso"),
        password_hash: None,
    }
}

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("")
            .route(web::get().to(list))
            .route(web::post().to(create)),
    )
    .service(web::resource("/search").route(web::get().to(search)))
    .service(
        web::resource("/{id}")
            .route(web::get().to(show))
            .route(web::put().to(update)),
    )
    .service(web::resource("/{id}/estado").route(web::patch().to(update_status)));
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn object(value: Value) -> Map<String, Value> {
        match value {
            Value::Object(map) => map,
            _ => unreachable!(),
        }
    }

    #[test]
    fn new_user_applies_defaults() {
        let input = object(json!({
            "cedula": "2002",
            "nombre": "Luis",
            "apellidos": "Mora",
            "email": "luis@example.com",
            "password": "secreto1"
        }));
        let dto = new_user(&input);
        assert_eq!(dto.rol, "usuario");
        assert_eq!(dto.permiso, "basico");
        assert_eq!(dto.estado, UserStatus::Activo);
        assert!(dto.password_hash.is_empty());
    }

    #[test]
    fn status_accepts_numbers_and_numeric_strings() {
        assert_eq!(parse_status(&object(json!({"estado": 2}))), Some(UserStatus::Inactivo));
        assert_eq!(parse_status(&object(json!({"estado": "1"}))), Some(UserStatus::Activo));
        assert_eq!(parse_status(&object(json!({"estado": 3}))), None);
        assert_eq!(parse_status(&object(json!({}))), None);
    }

    #[test]
    fn changes_never_carry_a_hash() {
        let input = object(json!({"password": "nueva123", "rol": "admin"}));
        let changes = user_changes(&input);
        assert_eq!(changes.password_hash, None);
        assert_eq!(changes.rol.as_deref(), Some("admin"));
    }
}
