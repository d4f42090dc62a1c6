use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Index, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Clientes {
    Table,
    IdCliente,
    Cedula,
    Nombre,
    Apellidos,
    Email,
    Telefono,
    Direccion,
    Barrio,
    Estado,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Clientes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Clientes::IdCliente)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Clientes::Cedula).string_len(20).not_null().unique_key())
                    .col(ColumnDef::new(Clientes::Nombre).string_len(100).not_null())
                    .col(ColumnDef::new(Clientes::Apellidos).string_len(100).not_null())
                    .col(ColumnDef::new(Clientes::Email).string_len(150).not_null().unique_key())
                    .col(ColumnDef::new(Clientes::Telefono).string_len(20).null())
                    .col(ColumnDef::new(Clientes::Direccion).string_len(200).null())
                    .col(ColumnDef::new(Clientes::Barrio).string_len(100).null())
                    .col(
                        ColumnDef::new(Clientes::Estado)
                            .string_len(10)
                            .not_null()
                            .default("activo"),
                    )
                    .col(
                        ColumnDef::new(Clientes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Clientes::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_clientes_estado")
                    .table(Clientes::Table)
                    .col(Clientes::Estado)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_index(
                Index::drop()
                    .name("idx_clientes_estado")
                    .table(Clientes::Table)
                    .to_owned(),
            )
            .await?;
        manager
            .drop_table(Table::drop().table(Clientes::Table).to_owned())
            .await
    }
}
