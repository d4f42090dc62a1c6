//! Uniqueness lookups for the validator, answered with a `SELECT 1 ... LIMIT 1`.

use async_trait::async_trait;
use sea_orm::sea_query::{Alias, Expr, Query};
use sea_orm::{ConnectionTrait, DatabaseConnection, Value};
use serde_json::Value as Json;

use crate::error::AppError;
use crate::validation::rules::as_text;
use crate::validation::{UniqueLookup, UniqueProbe};

/// Probed values compare against text columns, so scalars are sent as text.
fn text_value(value: &Json) -> Value {
    as_text(value)
        .map(|text| Value::from(text.into_owned()))
        .unwrap_or_else(|| Value::from(value.to_string()))
}

/// Keys keep their JSON type so integer primary keys compare as integers.
fn key_value(value: &Json) -> Value {
    match value {
        Json::Number(n) => match n.as_i64() {
            Some(i) => Value::from(i),
            None => Value::from(n.as_f64().unwrap_or_default()),
        },
        other => text_value(other),
    }
}

pub async fn exists<C: ConnectionTrait>(conn: &C, probe: UniqueProbe<'_>) -> Result<bool, sea_orm::DbErr> {
    let mut query = Query::select();
    query
        .expr(Expr::val(1))
        .from(Alias::new(probe.table))
        .and_where(Expr::col(Alias::new(probe.column)).eq(text_value(probe.value)))
        .limit(1);
    if let Some((column, id)) = probe.except {
        query.and_where(Expr::col(Alias::new(column)).ne(key_value(id)));
    }

    let statement = conn.get_database_backend().build(&query);
    Ok(conn.query_one(statement).await?.is_some())
}

#[async_trait]
impl UniqueLookup for DatabaseConnection {
    async fn exists(&self, probe: UniqueProbe<'_>) -> Result<bool, AppError> {
        Ok(exists(self, probe).await?)
    }
}
