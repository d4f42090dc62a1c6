//! SeaORM adapter for the user repository.

use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, ConnectionTrait, DbErr, EntityTrait, NotSet, Order,
    QueryFilter, QueryOrder, Set,
};
use time::OffsetDateTime;

use crate::db::pagination::{fetch_page, PageRequest, Paginated};
use crate::entities::usuarios::{self, UserStatus};

pub mod dto;

pub use dto::{UserCreate, UserUpdate};

pub async fn find_by_id<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
) -> Result<Option<usuarios::Model>, DbErr> {
    usuarios::Entity::find_by_id(id).one(conn).await
}

pub async fn find_by_email<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
) -> Result<Option<usuarios::Model>, DbErr> {
    usuarios::Entity::find()
        .filter(usuarios::Column::Email.eq(email))
        .one(conn)
        .await
}

pub async fn find_all<C: ConnectionTrait + Send + Sync>(
    conn: &C,
) -> Result<Vec<usuarios::Model>, DbErr> {
    usuarios::Entity::find()
        .order_by_asc(usuarios::Column::IdUsuario)
        .all(conn)
        .await
}

pub async fn find_page<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    condition: Condition,
    order: Order,
    request: PageRequest,
) -> Result<Paginated<usuarios::Model>, DbErr> {
    fetch_page::<usuarios::Entity, C>(conn, condition, usuarios::Column::IdUsuario, order, request)
        .await
}

pub async fn create<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    dto: UserCreate,
) -> Result<usuarios::Model, DbErr> {
    let now = OffsetDateTime::now_utc();
    let active = usuarios::ActiveModel {
        id_usuario: NotSet,
        cedula: Set(dto.cedula),
        nombre: Set(dto.nombre),
        apellidos: Set(dto.apellidos),
        telefono: Set(dto.telefono),
        email: Set(dto.email),
        rol: Set(dto.rol),
        estado: Set(dto.estado),
        permiso: Set(dto.permiso),
        password: Set(dto.password_hash),
        created_at: Set(now),
        updated_at: Set(now),
    };
    active.insert(conn).await
}

/// Apply the provided columns and refresh `updated_at`. Returns rows affected.
pub async fn update<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    dto: UserUpdate,
) -> Result<u64, DbErr> {
    let mut active = usuarios::ActiveModel {
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
    if let Some(v) = dto.telefono {
        active.telefono = Set(Some(v));
    }
    if let Some(v) = dto.email {
        active.email = Set(v);
    }
    if let Some(v) = dto.rol {
        active.rol = Set(v);
    }
    if let Some(v) = dto.estado {
        active.estado = Set(v);
    }
    if let Some(v) = dto.permiso {
        active.permiso = Set(v);
    }
    if let Some(v) = dto.password_hash {
        active.password = Set(v);
    }

    let result = usuarios::Entity::update_many()
        .set(active)
        .filter(usuarios::Column::IdUsuario.eq(id))
        .exec(conn)
        .await?;
    Ok(result.rows_affected)
}

pub async fn update_status<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    id: i64,
    estado: UserStatus,
) -> Result<u64, DbErr> {
    update(
        conn,
        id,
        UserUpdate {
            estado: Some(estado),
            ..Default::default()
        },
    )
    .await
}
