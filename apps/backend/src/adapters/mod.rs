//! SeaORM adapters. Functions here return `DbErr`; the repos layer maps
//! to `DomainError` via `From<DbErr>`.

pub mod clientes_sea;
pub mod unique_sea;
pub mod usuarios_sea;
