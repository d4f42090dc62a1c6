//! SeaORM adapter for the customer repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, NotSet, Order,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::db::pagination::{fetch_page, PageRequest, Paginated};
use crate::entities::clientes::{self, CustomerStatus};

pub mod dto;

pub use dto::{CustomerCreate, CustomerUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<clientes::Model>, DbErr> {
    clientes::Entity::find_by_id(id).one(conn).await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<clientes::Model>, DbErr> {
    clientes::Entity::find()
        .order_by_desc(clientes::Column::IdCliente)
        .all(conn)
        .await
}

pub async fn find_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    condition: Condition,
    order: Order,
    request: PageRequest,
) -> Result<Paginated<clientes::Model>, DbErr> {
    fetch_page::<clientes::Entity, C>(conn, condition, clientes::Column::IdCliente, order, request)
        .await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: CustomerCreate,
) -> Result<clientes::Model, DbErr> {
    let now = OffsetDateTime::now_utc();
    let active = clientes::ActiveModel {
        id_cliente: NotSet,
        cedula: Set(dto.cedula),
        nombre: Set(dto.nombre),
        apellidos: Set(dto.apellidos),
        email: Set(dto.email),
        telefono: Set(dto.telefono),
        direccion: Set(dto.direccion),
        barrio: Set(dto.barrio),
        estado: Set(dto.estado),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(conn).await
}

/// Apply the provided columns and refresh `updated_at`. Returns rows affected.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: CustomerUpdate,
) -> Result<u64, DbErr> {
    let mut active = clientes::ActiveModel {
        updated_at: Set(OffsetDateTime::now_utc()),
        ..Default::default()
    };
    if let Some(v) = dto.cedula {
        active.cedula = Set(v);
    }
    if let Some(v) = dto.nombre {
        active.nombre = Set(v);
    }
    if let Some(v) = dto.apellidos {
        active.apellidos = Set(v);
    }
    if let Some(v) = dto.email {
        active.email = Set(v);
    }
    if let Some(v) = dto.telefono {
        active.telefono = Set(Some(v));
    }
    if let Some(v) = dto.direccion {
        active.direccion = Set(Some(v));
    }
    if let Some(v) = dto.barrio {
        active.barrio = Set(Some(v));
    }
    if let Some(v) = dto.estado {
        active.estado = Set(v);
    }

    let result = clientes::Entity::update_many()
        .set(active)
        .filter(clientes::Column::IdCliente.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    estado: CustomerStatus,
) -> Result<u64, DbErr> {
    update(
        conn,
        id,
        CustomerUpdate {
            estado: Some(estado),
            ..Default::default()
        },
    )
    .await
}
