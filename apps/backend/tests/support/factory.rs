//! Rows inserted straight through the repositories, bypassing HTTP.

use backend_test_support::unique_helpers::{unique_cedula, unique_email};
use miapi::auth::password::hash_with_cost;
use miapi::entities::clientes::CustomerStatus;
use miapi::entities::usuarios::UserStatus;
use miapi::repos::customers::{self, Customer, CustomerCreate};
use miapi::repos::users::{self, UserCreate};
use miapi::{AppState, TokenService};

pub const SEED_PASSWORD: &str = "secreto123";

#[derive(Debug, Clone)]
pub struct SeededUser {
    pub id: i64,
    pub email: String,
    pub password: String,
}

/// Active user with [`SEED_PASSWORD`], hashed at the lowest bcrypt cost.
pub async fn seed_user(state: &AppState) -> SeededUser {
    let db = state.db().expect("test state has a database");
    let email = unique_email("usuario");
    let dto = UserCreate {
        cedula: unique_cedula(),
        nombre: "Laura".to_string(),
        apellidos: "Gómez".to_string(),
        telefono: Some("3001234567".to_string()),
        email: email.clone(),
        rol: "admin".to_string(),
        estado: UserStatus::Activo,
        permiso: "basico".to_string(),
        password_hash: hash_with_cost(SEED_PASSWORD, 4).expect("hash"),
    };
    let user = users::create(db, dto).await.expect("insert user");
    SeededUser {
        id: user.id_usuario,
        email,
        password: SEED_PASSWORD.to_string(),
    }
}

pub async fn seed_customer(state: &AppState, nombre: &str, apellidos: &str) -> Customer {
    let db = state.db().expect("test state has a database");
    let dto = CustomerCreate {
        cedula: unique_cedula(),
        nombre: nombre.to_string(),
        apellidos: apellidos.to_string(),
        email: unique_email("cliente"),
        telefono: Some("6041234567".to_string()),
        direccion: Some("Calle 10 # 20-30".to_string()),
        barrio: Some("Laureles".to_string()),
        estado: CustomerStatus::Activo,
    };
    customers::create(db, dto).await.expect("insert customer")
}

/// `Authorization` header value for `user_id`.
pub fn bearer(tokens: &TokenService, user_id: i64) -> String {
    let token = tokens.issue(&user_id.to_string()).expect("issue token");
    format!("Bearer {token}")
}
