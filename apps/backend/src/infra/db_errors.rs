//! SeaORM -> DomainError translation.
//!
//! Repositories return `DbErr` freely; it is converted here into a
//! `DomainError` with sanitized detail, and higher layers map that to
//! `AppError` via `From`.

use sea_orm::DbErr;
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind, NotFoundKind};
use crate::logging::pii::Redacted;
use crate::trace_ctx;

fn mentions_sqlstate(msg: &str, code: &str) -> bool {
    msg.contains(code) || msg.contains(&format!("SQLSTATE({code})"))
}

fn is_unique_violation(msg: &str) -> bool {
    mentions_sqlstate(msg, "23505")
        || msg.contains("duplicate key value violates unique constraint")
        || msg.contains("UNIQUE constraint failed")
        || msg.contains("Duplicate entry")
}

/// SQLite: "UNIQUE constraint failed: table.column"
fn sqlite_table_column(msg: &str) -> Option<&str> {
    let (_, rest) = msg.split_once("UNIQUE constraint failed: ")?;
    rest.split(|c: char| c.is_whitespace() || c == '"' || c == ',')
        .next()
        .filter(|s| !s.is_empty())
}

/// MySQL: "Duplicate entry 'x' for key 'clientes.email'" (8.0) or
/// "... for key 'email'" (5.7).
fn mysql_key(msg: &str) -> Option<&str> {
    let (_, rest) = msg.split_once(" for key '")?;
    rest.split('\'').next()
}

fn conflict_for_column(column: &str) -> Option<(ConflictKind, &'static str)> {
    let column = column.rsplit('.').next().unwrap_or(column);
    match column {
        "email" => Some((ConflictKind::UniqueEmail, "Email already registered")),
        "cedula" => Some((ConflictKind::UniqueCedula, "Cedula already registered")),
        _ => None,
    }
}

/// PostgreSQL default constraint names, e.g. `clientes_email_key`.
fn conflict_for_constraint(msg: &str) -> Option<(ConflictKind, &'static str)> {
    for table in ["clientes", "usuarios"] {
        if msg.contains(&format!("{table}_email_key")) {
            return conflict_for_column("email");
        }
        if msg.contains(&format!("{table}_cedula_key")) {
            return conflict_for_column("cedula");
        }
    }
    None
}

/// Translate a `DbErr` into a `DomainError` with sanitized, PII-safe detail.
pub fn map_db_err(e: DbErr) -> DomainError {
    let error_msg = e.to_string();
    let trace_id = trace_ctx::trace_id();

    match &e {
        DbErr::RecordNotFound(_) => {
            return DomainError::not_found(NotFoundKind::Other("Record".into()), "Record not found");
        }
        DbErr::ConnectionAcquire(_) | DbErr::Conn(_) => {
            warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database unavailable");
            return DomainError::infra(InfraErrorKind::DbUnavailable, "Database unavailable");
        }
        _ => {}
    }

    if is_unique_violation(&error_msg) {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unique constraint violation");

        let by_column = sqlite_table_column(&error_msg)
            .or_else(|| mysql_key(&error_msg))
            .and_then(conflict_for_column);
        if let Some((kind, detail)) = by_column.or_else(|| conflict_for_constraint(&error_msg)) {
            return DomainError::conflict(kind, detail);
        }

        return DomainError::conflict(
            ConflictKind::Other("Unique".into()),
            "Unique constraint violation",
        );
    }

    if mentions_sqlstate(&error_msg, "23503") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Foreign key constraint violation");
        return DomainError::validation("Foreign key constraint violation");
    }

    if error_msg.contains("timeout") || error_msg.contains("timed out") {
        warn!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Database timeout");
        return DomainError::infra(InfraErrorKind::Timeout, "Database timeout");
    }

    error!(trace_id = %trace_id, raw_error = %Redacted(&error_msg), "Unhandled database error");
    DomainError::infra(InfraErrorKind::Other("DbErr".into()), "Database operation failed")
}
