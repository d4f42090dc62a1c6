//! Uniqueness checks against stored records.

use async_trait::async_trait;
use serde_json::Value;

use crate::error::AppError;

/// Tables a uniqueness rule may target.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Collection {
    Clientes,
    Usuarios,
}

impl Collection {
    pub fn table(self) -> &'static str {
        match self {
            Collection::Clientes => "clientes",
            Collection::Usuarios => "usuarios",
        }
    }

    /// Default column used to exclude the record being updated.
    pub fn primary_key(self) -> &'static str {
        match self {
            Collection::Clientes => "id_cliente",
            Collection::Usuarios => "id_usuario",
        }
    }

    pub fn has_column(self, column: &str) -> bool {
        let columns: &[&str] = match self {
            Collection::Clientes => &[
                "id_cliente",
                "cedula",
                "nombre",
                "apellidos",
                "email",
                "telefono",
                "direccion",
                "barrio",
                "estado",
            ],
            Collection::Usuarios => &[
                "id_usuario",
                "cedula",
                "nombre",
                "apellidos",
                "telefono",
                "email",
                "rol",
                "estado",
                "permiso",
            ],
        };
        columns.contains(&column)
    }
}

/// Target of a `unique` rule: collection, optional column override and an
/// optional record to exclude.
#[derive(Debug, Clone)]
pub struct UniqueRule<'a> {
    pub(crate) collection: Collection,
    pub(crate) column: Option<&'a str>,
    pub(crate) except: Option<Value>,
    pub(crate) except_column: Option<&'a str>,
}

impl<'a> UniqueRule<'a> {
    pub fn on(collection: Collection) -> Self {
        Self {
            collection,
            column: None,
            except: None,
            except_column: None,
        }
    }

    /// Compare against `column` instead of the field name.
    pub fn column(mut self, column: &'a str) -> Self {
        self.column = Some(column);
        self
    }

    /// Ignore the record whose primary key (or `except_column`) equals `id`.
    pub fn except(mut self, id: impl Into<Value>) -> Self {
        self.except = Some(id.into());
        self
    }

    pub fn except_column(mut self, column: &'a str) -> Self {
        self.except_column = Some(column);
        self
    }
}

/// A resolved lookup handed to the storage layer.
#[derive(Debug, Clone, Copy)]
pub struct UniqueProbe<'a> {
    pub table: &'static str,
    pub column: &'a str,
    pub value: &'a Value,
    pub except: Option<(&'a str, &'a Value)>,
}

/// Storage collaborator answering "does a row with column = value exist?".
#[async_trait]
pub trait UniqueLookup: Send + Sync {
    async fn exists(&self, probe: UniqueProbe<'_>) -> Result<bool, AppError>;
}
