use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

/// Stored as an integer: 1 = activo, 2 = inactivo.
#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "i32", db_type = "Integer")]
#[serde(into = "i32", try_from = "i32")]
pub enum UserStatus {
    #[sea_orm(num_value = 1)]
    Activo,
    #[sea_orm(num_value = 2)]
    Inactivo,
}

impl From<UserStatus> for i32 {
    fn from(status: UserStatus) -> Self {
        match status {
            UserStatus::Activo => 1,
            UserStatus::Inactivo => 2,
        }
    }
}

impl TryFrom<i32> for UserStatus {
    type Error = String;

    fn try_from(value: i32) -> Result<Self, Self::Error> {
        match value {
            1 => Ok(UserStatus::Activo),
            2 => Ok(UserStatus::Inactivo),
            other => Err(format!("unknown user status {other}")),
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "usuarios")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_usuario: i64,
    #[sea_orm(unique)]
    pub cedula: String,
    pub nombre: String,
    pub apellidos: String,
    pub telefono: Option<String>,
    #[sea_orm(unique)]
    pub email: String,
    pub rol: String,
    pub estado: UserStatus,
    pub permiso: String,
    /// bcrypt hash
    pub password: String,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
