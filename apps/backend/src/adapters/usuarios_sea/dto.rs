//! DTOs for usuarios_sea adapter.

use crate::entities::usuarios::UserStatus;

/// DTO for inserting a user. `password_hash` must already be hashed.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub cedula: String,
    pub nombre: String,
    pub apellidos: String,
    pub telefono: Option<String>,
    pub email: String,
    pub rol: String,
    pub estado: UserStatus,
    pub permiso: String,
    pub password_hash: String,
}

/// DTO for a partial update; `None` leaves the column untouched.
#[derive(Debug, Clone, Default)]
pub struct UserUpdate {
    pub cedula: Option<String>,
    pub nombre: Option<String>,
    pub apellidos: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub rol: Option<String>,
    pub estado: Option<UserStatus>,
    pub permiso: Option<String>,
    pub password_hash: Option<String>,
}
