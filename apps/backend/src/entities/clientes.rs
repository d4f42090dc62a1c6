use sea_orm::entity::prelude::*;
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumIter, DeriveActiveEnum, Serialize, Deserialize)]
#[sea_orm(rs_type = "String", db_type = "String(StringLen::N(10))")]
#[serde(rename_all = "lowercase")]
pub enum CustomerStatus {
    #[sea_orm(string_value = "activo")]
    Activo,
    #[sea_orm(string_value = "inactivo")]
    Inactivo,
}

impl CustomerStatus {
    pub const VALUES: [&'static str; 2] = ["activo", "inactivo"];

    pub fn parse(raw: &str) -> Option<Self> {
        match raw {
            "activo" => Some(Self::Activo),
            "inactivo" => Some(Self::Inactivo),
            _ => None,
        }
    }
}

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "clientes")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id_cliente: i64,
    #[sea_orm(unique)]
    pub cedula: String,
    pub nombre: String,
    pub apellidos: String,
    #[sea_orm(unique)]
    pub email: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub barrio: Option<String>,
    pub estado: CustomerStatus,
    pub created_at: OffsetDateTime,
    pub updated_at: OffsetDateTime,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {}

impl ActiveModelBehavior for ActiveModel {}
