//! Customer repository.

use sea_orm::{ConnectionTrait, Order};
use serde::{Deserialize, Serialize};
use time::OffsetDateTime;

use crate::adapters::clientes_sea as clientes_adapter;
use crate::db::filter::{all_of, Filter};
use crate::db::pagination::{PageRequest, Paginated};
use crate::entities::clientes::{self, Column, CustomerStatus};
use crate::errors::domain::DomainError;

pub use clientes_adapter::{CustomerCreate, CustomerUpdate};

/// Customer as returned by the API.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Customer {
    pub id_cliente: i64,
    pub cedula: String,
    pub nombre: String,
    pub apellidos: String,
    pub email: String,
    pub telefono: Option<String>,
    pub direccion: Option<String>,
    pub barrio: Option<String>,
    pub estado: CustomerStatus,
    #[serde(with = "time::serde::rfc3339")]
    pub created_at: OffsetDateTime,
    #[serde(with = "time::serde::rfc3339")]
    pub updated_at: OffsetDateTime,
}

/// Search criteria accepted by `GET /api/clientes/search`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct CustomerCriteria {
    pub id_cliente: Option<i64>,
    pub cedula: Option<String>,
    pub nombre: Option<String>,
    pub apellidos: Option<String>,
    pub nombre_completo: Option<String>,
    pub telefono: Option<String>,
    pub email: Option<String>,
    pub estado: Option<String>,
    pub barrio: Option<String>,
    pub direccion: Option<String>,
}

impl CustomerCriteria {
    pub fn is_empty(&self) -> bool {
        *self == Self::default()
    }

    /// Identifiers match exactly; free-text fields match by substring
    /// unless `exact`.
    pub fn filters(&self, exact: bool) -> Vec<Filter<Column>> {
        let mut filters = Vec::new();
        if let Some(id) = self.id_cliente {
            filters.push(Filter::eq(Column::IdCliente, id));
        }
        if let Some(v) = &self.cedula {
            filters.push(Filter::eq(Column::Cedula, v.as_str()));
        }
        if let Some(v) = &self.telefono {
            filters.push(Filter::eq(Column::Telefono, v.as_str()));
        }
        if let Some(v) = &self.estado {
            filters.push(Filter::eq(Column::Estado, v.as_str()));
        }
        for (column, value) in [
            (Column::Nombre, &self.nombre),
            (Column::Apellidos, &self.apellidos),
            (Column::Email, &self.email),
            (Column::Barrio, &self.barrio),
            (Column::Direccion, &self.direccion),
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

/// Newest first, like [`get_all`] and [`search`].
pub async fn get_paginated<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    request: PageRequest,
) -> Result<Paginated<Customer>, DomainError> {
    let page = clientes_adapter::find_page(conn, all_of::<Column>(Vec::new()), Order::Desc, request)
        .await?;
    Ok(page.map(Customer::from))
}

pub async fn get_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<Customer>, DomainError> {
    let rows = clientes_adapter::find_all(conn).await?;
    Ok(rows.into_iter().map(Customer::from).collect())
}

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<Customer>, DomainError> {
    let row = clientes_adapter::find_by_id(conn, id).await?;
    Ok(row.map(Customer::from))
}

/// Newest first.
pub async fn search<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    criteria: &CustomerCriteria,
    request: PageRequest,
    exact: bool,
) -> Result<Paginated<Customer>, DomainError> {
    let condition = all_of(criteria.filters(exact));
    let page = clientes_adapter::find_page(conn, condition, Order::Desc, request).await?;
    Ok(page.map(Customer::from))
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CustomerCreate,
) -> Result<Customer, DomainError> {
    let row = clientes_adapter::create(conn, dto).await?;
    Ok(Customer::from(row))
}

pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: CustomerUpdate,
) -> Result<u64, DomainError> {
    Ok(clientes_adapter::update(conn, id, dto).await?)
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    estado: CustomerStatus,
) -> Result<u64, DomainError> {
    Ok(clientes_adapter::update_status(conn, id, estado).await?)
}

impl From<clientes::Model> for Customer {
    fn from(model: clientes::Model) -> Self {
        Self {
            id_cliente: model.id_cliente,
            cedula: model.cedula,
            nombre: model.nombre,
            apellidos: model.apellidos,
            email: model.email,
            telefono: model.telefono,
            direccion: model.direccion,
            barrio: model.barrio,
            estado: model.estado,
            created_at: model.created_at,
            updated_at: model.updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::{DbBackend, EntityTrait, QueryFilter, QueryTrait};

    use super::*;

    fn where_clause(criteria: &CustomerCriteria, exact: bool) -> String {
        let sql = clientes::Entity::find()
            .filter(all_of(criteria.filters(exact)))
            .build(DbBackend::Sqlite)
            .to_string();
        sql.split_once("WHERE ").map(|(_, w)| w.to_string()).unwrap_or_default()
    }

    #[test]
    fn empty_criteria() {
        assert!(CustomerCriteria::default().is_empty());
        let criteria = CustomerCriteria {
            barrio: Some("Centro".into()),
            ..Default::default()
        };
        assert!(!criteria.is_empty());
    }

    #[test]
    fn identifiers_stay_exact_and_text_follows_flag() {
        let criteria = CustomerCriteria {
            cedula: Some("1020".into()),
            nombre: Some("Ana".into()),
            ..Default::default()
        };
        let fuzzy = where_clause(&criteria, false);
        assert!(fuzzy.contains(r#""clientes"."cedula" = '1020' AND "#), "{fuzzy}");
        assert!(fuzzy.contains(r#""clientes"."nombre" LIKE '%Ana%'"#), "{fuzzy}");

        let exact = where_clause(&criteria, true);
        assert!(exact.contains(r#""clientes"."nombre" = 'Ana'"#), "{exact}");
        assert!(!exact.contains("LIKE"), "{exact}");
    }

    #[test]
    fn full_name_ors_first_and_last_name() {
        let criteria = CustomerCriteria {
            nombre_completo: Some("Gómez".into()),
            ..Default::default()
        };
        let clause = where_clause(&criteria, false);
        assert!(
            clause.contains(r#""clientes"."nombre" LIKE '%Gómez%' OR "clientes"."apellidos" LIKE '%Gómez%'"#),
            "{clause}"
        );
    }
}
