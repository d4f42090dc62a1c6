use sea_orm_migration::prelude::*;
use sea_orm_migration::sea_query::{ColumnDef, Table};

#[derive(DeriveMigrationName)]
pub struct Migration;

#[derive(Iden)]
enum Usuarios {
    Table,
    IdUsuario,
    Cedula,
    Nombre,
    Apellidos,
    Telefono,
    Email,
    Rol,
    Estado,
    Permiso,
    Password,
    CreatedAt,
    UpdatedAt,
}

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Usuarios::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Usuarios::IdUsuario)
                            .big_integer()
                            .not_null()
                            .primary_key()
                            .auto_increment(),
                    )
                    .col(ColumnDef::new(Usuarios::Cedula).string_len(20).not_null().unique_key())
                    .col(ColumnDef::new(Usuarios::Nombre).string_len(100).not_null())
                    .col(ColumnDef::new(Usuarios::Apellidos).string_len(100).not_null())
                    .col(ColumnDef::new(Usuarios::Telefono).string_len(20).null())
                    .col(ColumnDef::new(Usuarios::Email).string_len(150).not_null().unique_key())
                    .col(
                        ColumnDef::new(Usuarios::Rol)
                            .string_len(30)
                            .not_null()
                            .default("usuario"),
                    )
                    .col(
                        ColumnDef::new(Usuarios::Estado)
                            .integer()
                            .not_null()
                            .default(1),
                    )
                    .col(
                        ColumnDef::new(Usuarios::Permiso)
                            .string_len(30)
                            .not_null()
                            .default("basico"),
                    )
                    .col(ColumnDef::new(Usuarios::Password).string_len(255).not_null())
                    .col(
                        ColumnDef::new(Usuarios::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Usuarios::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Usuarios::Table).to_owned())
            .await
    }
}
