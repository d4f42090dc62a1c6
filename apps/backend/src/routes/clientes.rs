use actix_web::{web, HttpResponse};
use sea_orm::DatabaseConnection;
use serde_json::{json, Map, Value};

use super::{handle, is_set, message_payload, text_field};
use crate::db::require_db;
use crate::entities::clientes::CustomerStatus;
use crate::error::AppError;
use crate::extractors::{JsonBody, ListParams, ResourceId};
use crate::http::envelope;
use crate::repos::customers::{self, CustomerCreate, CustomerCriteria, CustomerUpdate};
use crate::services::customers as customer_service;
use crate::state::app_state::AppState;
use crate::validation::unique::{Collection, UniqueRule};
use crate::validation::Validator;

const NOT_FOUND: &str = "Cliente no encontrado";
const VALIDATION_FAILED: &str = "Error de validación";

async fn list(
    state: web::Data<AppState>,
    params: ListParams,
) -> Result<HttpResponse, AppError> {
    handle("Error al obtener los clientes", list_customers(&state, params)).await
}

async fn list_customers(state: &AppState, params: ListParams) -> Result<HttpResponse, AppError> {
    let db = require_db(state)?;
    if params.all {
        let clientes = customers::get_all(db).await?;
        let total = clientes.len();
        return Ok(envelope::ok(message_payload(
            "Clientes obtenidos correctamente",
            json!({ "clientes": clientes, "total": total }),
        )));
    }

    let page = customers::get_paginated(db, params.page).await?;
    Ok(envelope::ok(message_payload(
        "Clientes obtenidos correctamente",
        json!({ "clientes": page.items, "pagination": page.pagination }),
    )))
}

async fn create(state: web::Data<AppState>, body: JsonBody) -> Result<HttpResponse, AppError> {
    handle("Error al crear el cliente", create_customer(&state, body.into_inner())).await
}

async fn create_customer(
    state: &AppState,
    input: Map<String, Value>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(state)?;
    validate(db, &input, None).await?;

    let cliente = customer_service::create_customer(db, new_customer(&input)).await?;
    Ok(envelope::created(message_payload(
        "Cliente creado correctamente",
        json!({ "cliente": cliente }),
    )))
}

async fn show(state: web::Data<AppState>, id: ResourceId) -> Result<HttpResponse, AppError> {
    handle("Error al obtener el cliente", show_customer(&state, id.0)).await
}

async fn show_customer(state: &AppState, id: i64) -> Result<HttpResponse, AppError> {
    let db = require_db(state)?;
    let cliente = customers::find_by_id(db, id)
        .await?
        .ok_or_else(|| AppError::not_found(NOT_FOUND, id))?;
    Ok(envelope::ok(message_payload(
        "Cliente obtenido correctamente",
        json!({ "cliente": cliente }),
    )))
}

async fn search(
    state: web::Data<AppState>,
    criteria: web::Query<CustomerCriteria>,
    params: ListParams,
) -> Result<HttpResponse, AppError> {
    handle(
        "Error al buscar clientes",
        search_customers(&state, criteria.into_inner(), params),
    )
    .await
}

async fn search_customers(
    state: &AppState,
    criteria: CustomerCriteria,
    params: ListParams,
) -> Result<HttpResponse, AppError> {
    if criteria.is_empty() {
        return Err(AppError::bad_request(
            "Debe proporcionar al menos un criterio de búsqueda",
        ));
    }
    let db = require_db(state)?;
    let page = customers::search(db, &criteria, params.page, params.exact).await?;
    Ok(envelope::ok(message_payload(
        "Búsqueda realizada correctamente",
        json!({ "clientes": page.items, "pagination": page.pagination }),
    )))
}

async fn update(
    state: web::Data<AppState>,
    id: ResourceId,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    handle(
        "Error al actualizar el cliente",
        update_customer(&state, id.0, body.into_inner()),
    )
    .await
}

async fn update_customer(
    state: &AppState,
    id: i64,
    input: Map<String, Value>,
) -> Result<HttpResponse, AppError> {
    let db = require_db(state)?;
    if customers::find_by_id(db, id).await?.is_none() {
        return Err(AppError::not_found(NOT_FOUND, id));
    }
    validate(db, &input, Some(id)).await?;

    let (cliente, rows_affected) =
        customer_service::update_customer(db, id, customer_changes(&input)).await?;
    Ok(envelope::ok(message_payload(
        "Cliente actualizado correctamente",
        json!({ "cliente": cliente, "rows_affected": rows_affected }),
    )))
}

async fn update_status(
    state: web::Data<AppState>,
    id: ResourceId,
    body: JsonBody,
) -> Result<HttpResponse, AppError> {
    handle(
        "Error al actualizar el estado del cliente",
        update_customer_status(&state, id.0, body.into_inner()),
    )
    .await
}

async fn update_customer_status(
    state: &AppState,
    id: i64,
    input: Map<String, Value>,
) -> Result<HttpResponse, AppError> {
    if !is_set(&input, "estado") {
        return Err(AppError::unprocessable("El estado es obligatorio"));
    }
    Validator::new(&input)
        .one_of("estado", &CustomerStatus::VALUES)
        .message("El estado debe ser activo o inactivo")
        .check(VALIDATION_FAILED)?;
    let estado = text_field(&input, "estado")
        .and_then(|raw| CustomerStatus::parse(&raw))
        .ok_or_else(|| AppError::unprocessable("El estado debe ser activo o inactivo"))?;

    let db = require_db(state)?;
    if customers::find_by_id(db, id).await?.is_none() {
        return Err(AppError::not_found(NOT_FOUND, id));
    }
    let rows_affected = customers::update_status(db, id, estado).await?;
    let cliente = customers::find_by_id(db, id).await?;
    Ok(envelope::ok(message_payload(
        "Estado del cliente actualizado correctamente",
        json!({ "cliente": cliente, "rows_affected": rows_affected }),
    )))
}

/// Field rules for create (`existing == None`) and partial update.
///
/// On update only the fields present in the body are checked, and
/// uniqueness ignores the record being updated.
async fn validate(
    db: &DatabaseConnection,
    input: &Map<String, Value>,
    existing: Option<i64>,
) -> Result<(), AppError> {
    let checks = |field: &str| existing.is_none() || is_set(input, field);
    let unique_rule = || {
        let rule = UniqueRule::on(Collection::Clientes);
        match existing {
            Some(id) => rule.except(id),
            None => rule,
        }
    };

    let mut validator = Validator::new(input).with_lookup(db);
    if checks("cedula") {
        validator = validator
            .required("cedula")
            .message("La cédula es obligatoria");
    }
    if checks("nombre") {
        validator = validator
            .required("nombre")
            .message("El nombre es obligatorio");
    }
    if checks("apellidos") {
        validator = validator
            .required("apellidos")
            .message("Los apellidos son obligatorios");
    }
    if checks("email") {
        validator = validator
            .required("email")
            .message("El email es obligatorio")
            .email("email")
            .message("El formato del email es inválido");
    }

    validator
        .unique("email", unique_rule())
        .await?
        .message("Este email ya está registrado")
        .unique("cedula", unique_rule())
        .await?
        .message("Esta cédula ya está registrada")
        .max("nombre", 100)
        .message("El nombre no debe exceder los 100 caracteres")
        .max("apellidos", 100)
        .message("Los apellidos no deben exceder los 100 caracteres")
        .max("email", 150)
        .message("El email no debe exceder los 150 caracteres")
        .max("telefono", 20)
        .message("El teléfono no debe exceder los 20 caracteres")
        .max("direccion", 200)
        .message("La dirección no debe exceder los 200 caracteres")
        .max("barrio", 100)
        .message("El barrio no debe exceder los 100 caracteres")
        .one_of("estado", &CustomerStatus::VALUES)
        .message("El estado debe ser activo o inactivo")
        .check(VALIDATION_FAILED)
}

fn new_customer(input: &Map<String, Value>) -> CustomerCreate {
    CustomerCreate {
        cedula: text_field(input, "cedula").unwrap_or_default(),
        nombre: text_field(input, "nombre").unwrap_or_default(),
        apellidos: text_field(input, "apellidos").unwrap_or_default(),
        email: text_field(input, "email").unwrap_or_default(),
        telefono: text_field(input, "telefono"),
        direccion: text_field(input, "direccion"),
        barrio: text_field(input, "barrio"),
        estado: text_field(input, "estado")
            .and_then(|raw| CustomerStatus::parse(&raw))
            .unwrap_or(CustomerStatus::Activo),
    }
}

/// Empty strings leave the stored value untouched.
fn customer_changes(input: &Map<String, Value>) -> CustomerUpdate {
    let field = |name: &str| text_field(input, name).filter(|value| !value.is_empty());
    CustomerUpdate {
        cedula: field("cedula"),
        nombre: field("nombre"),
        apellidos: field("apellidos"),
        email: field("email"),
        telefono: field("telefono"),
        direccion: field("direccion"),
        barrio: field("barrio"),
        estado: field("estado").and_then(|raw| CustomerStatus::parse(&raw)),
    }
}

/// `/search` is registered before `/{id}` so it is not taken for an id.
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
