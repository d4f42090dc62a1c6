//! User repository.

use sea_orm::{ConnectionTrait, Order};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::usuarios_sea as usuarios_adapter;
use crate::db::filter::{all_of, Filter};
use crate::db::pagination::{PageRequest, Paginated};
use crate::entities::usuarios::{self, Column, UserStatus};
use crate::errors::domain::DomainError;

pub use usuarios_adapter::{UserCreate, UserUpdate};

/// User as returned by the API. Never carries the password hash.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct User {
    pub id_usuario: i64,
    pub cedula: String,
    pub nombre: String,
    pub apellidos: String,
    pub telefono: Option<String>,
    pub email: String,
    pub rol: String,
    pub estado: UserStatus,
    pub permiso: String,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// A user together with the stored bcrypt hash, for login only.
#[derive(Debug, Clone)]
pub struct UserCredentials {
    pub user: User,
    pub password_hash: String,
}

/// Search criteria accepted by `GET /api/usuarios/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct UserCriteria {
    pub id_usuario: Option<i64>,
    pub cedula: Option<String>,
    pub nombre: Option<String>,
    pub apellidos: Option<String>,
    pub nombre_completo: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub estado: Option<i32>,
    pub rol: Option<String>,
}

impl UserCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    pub fn filters(&self, exact: bool) -> Vec<Filter<Column>> {
        let mut filters = Vec::new();
        if let Some(id) = self.id_usuario {
            filters.push(Filter::eq(Column::IdUsuario, id));
        }
        if let Some(v) = &self.cedula {
            filters.push(Filter::eq(Column::Cedula, v.as_str()));
        }
        if let Some(v) = &self.telefono {
            filters.push(Filter::eq(Column::Telefono, v.as_str()));
        }
        if let Some(v) = self.estado {
            filters.push(Filter::eq(Column::Estado, v));
        }
        if let Some(v) = &self.rol {
            filters.push(Filter::eq(Column::Rol, v.as_str()));
        }
        for (column, value) in [
            (Column::Nombre, &self.nombre),
            (Column::Apellidos, &self.apellidos),
            (Column::Email, &self.email),
        ] {
            if let Some(v) = value {
                filters.push(Filter::text(column, v.as_str(), exact));
            }
        }
        if let Some(v) = &self.nombre_completo {
            filters.push(Filter::any(vec![
                Filter::text(Column::Nombre, v.as_str(), exact),
                Filter::text(Column::Apellidos, v.as_str(), exact),
            ]));
        }
        filters
    }
}

pub async fn get_paginated<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request: PageRequest,
) -> Result<Paginated<User>, DomainError> {
    let page = usuarios_adapter::find_page(conn, all_of::<Column>(Vec::new()), Order::Asc, request)
        .await?;
    Ok(page.map(User::from))
}

pub async fn get_all<C: ConnectionTrait + Send + Sync>(conn: &C) -> Result<Vec<User>, DomainError> {
    let rows = usuarios_adapter::find_all(conn).await?;
    Ok(rows.into_iter().map(User::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<User>, DomainError> {
    let row = usuarios_adapter::find_by_id(conn, id).await?;
    Ok(row.map(User::from))
}

pub async fn find_credentials_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<UserCredentials>, DomainError> {
    let row = usuarios_adapter::find_by_email(conn, email).await?;
    Ok(row.map(UserCredentials::from))
}

/// Newest first.
pub async fn search<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    criteria: &UserCriteria,
    request: PageRequest,
    exact: bool,
) -> Result<Paginated<User>, DomainError> {
    let condition = all_of(criteria.filters(exact));
    let page = usuarios_adapter::find_page(conn, condition, Order::Desc, request).await?;
    Ok(page.map(User::from))
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<User, DomainError> {
    let row = usuarios_adapter::create(conn, dto).await?;
    Ok(User::from(row))
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: UserUpdate,
) -> Result<u64, DomainError> {
    Ok(usuarios_adapter::update(conn, id, dto).await?)
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    estado: UserStatus,
) -> Result<u64, DomainError> {
    Ok(usuarios_adapter::update_status(conn, id, estado).await?)
}

// Conversions between SeaORM models and domain models

impl From<usuarios::Model> for User {
    fn from(model: usuarios::Model) -> Self {
        Self {
            id_usuario: model.id_usuario,
            cedula: model.cedula,
            nombre: model.nombre,
            apellidos: model.apellidos,
            telefono: model.telefono,
            email: model.email,
            rol: model.rol,
            estado: model.estado,
            permiso: model.permiso,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

impl From<usuarios::Model> for UserCredentials {
    fn from(mut model: usuarios::Model) -> Self {
        let password_hash = std::mem::take(&mut model.password);
        Self {
            user: User::from(model),
            password_hash,
        }
    }
}
