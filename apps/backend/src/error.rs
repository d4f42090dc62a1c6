use actix_web::error::ResponseError;
use actix_web::http::StatusCode;
use actix_web::HttpResponse;
use serde_json::{json, Value};
use thiserror::Error;
use tracing::{error, warn};

use crate::errors::domain::{ConflictKind, DomainError, InfraErrorKind};
use crate::http::envelope;
use crate::logging::pii::Redacted;
use crate::trace_ctx;
use crate::validation::ValidationErrors;

/// Error crossing the handler boundary. Each variant renders as an error
/// envelope with a fixed status code.
#[derive(Error, Debug)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        errors: ValidationErrors,
    },
    #[error("{message}")]
    Unprocessable { message: String },
    #[error("{message}")]
    BadRequest { message: String },
    #[error("{message}")]
    Unauthorized { message: String },
    #[error("{message}")]
    NotFound { message: String, id: Option<Value> },
    #[error("{message}: {detail}")]
    Internal { message: String, detail: String },
    #[error("Configuration error: {detail}")]
    Config { detail: String },
    #[error("Database error: {detail}")]
    Db { detail: String },
    #[error("Database unavailable")]
    DbUnavailable,
}

impl AppError {
    pub fn status(&self) -> StatusCode {
        match self {
            AppError::Validation { .. } | AppError::Unprocessable { .. } => {
                StatusCode::UNPROCESSABLE_ENTITY
            }
            AppError::BadRequest { .. } => StatusCode::BAD_REQUEST,
            AppError::Unauthorized { .. } => StatusCode::UNAUTHORIZED,
            AppError::NotFound { .. } => StatusCode::NOT_FOUND,
            AppError::Internal { .. }
            | AppError::Config { .. }
            | AppError::Db { .. }
            | AppError::DbUnavailable => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Client-facing message of the envelope.
    fn message(&self) -> &str {
        match self {
            AppError::Validation { message, .. }
            | AppError::Unprocessable { message }
            | AppError::BadRequest { message }
            | AppError::Unauthorized { message }
            | AppError::NotFound { message, .. }
            | AppError::Internal { message, .. } => message,
            AppError::Config { .. } => "Error de configuración del servidor",
            AppError::Db { .. } => "Error de base de datos",
            AppError::DbUnavailable => "Base de datos no disponible",
        }
    }

    fn details(&self) -> Value {
        match self {
            AppError::Validation { errors, .. } => json!({ "errors": errors }),
            AppError::NotFound { id: Some(id), .. } => json!({ "id": id }),
            AppError::Internal { detail, .. }
            | AppError::Config { detail }
            | AppError::Db { detail } => json!({ "error": detail }),
            _ => Value::Null,
        }
    }

    /// Outermost catch-all for a handler: server-side failures are rewrapped
    /// under `message`, client errors pass through untouched.
    pub fn context(self, message: &str) -> Self {
        if self.status().is_server_error() {
            let detail = match &self {
                AppError::Internal { detail, .. } => detail.clone(),
                other => other.to_string(),
            };
            AppError::Internal {
                message: message.to_string(),
                detail,
            }
        } else {
            self
        }
    }

    pub fn validation(message: impl Into<String>, errors: ValidationErrors) -> Self {
        Self::Validation {
            message: message.into(),
            errors,
        }
    }

    pub fn unprocessable(message: impl Into<String>) -> Self {
        Self::Unprocessable {
            message: message.into(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest {
            message: message.into(),
        }
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        Self::Unauthorized {
            message: message.into(),
        }
    }

    pub fn not_found(message: impl Into<String>, id: impl Into<Value>) -> Self {
        Self::NotFound {
            message: message.into(),
            id: Some(id.into()),
        }
    }

    pub fn internal(message: impl Into<String>, detail: impl Into<String>) -> Self {
        Self::Internal {
            message: message.into(),
            detail: detail.into(),
        }
    }

    pub fn config(detail: impl Into<String>) -> Self {
        Self::Config {
            detail: detail.into(),
        }
    }

    pub fn db(detail: impl Into<String>) -> Self {
        Self::Db {
            detail: detail.into(),
        }
    }

    pub fn db_unavailable() -> Self {
        Self::DbUnavailable
    }
}

impl From<DomainError> for AppError {
    fn from(e: DomainError) -> Self {
        match e {
            DomainError::Validation(detail) => AppError::unprocessable(detail),
            DomainError::Conflict(ConflictKind::UniqueEmail, _) => AppError::validation(
                "Error de validación",
                ValidationErrors::single("email", "Este email ya está registrado"),
            ),
            DomainError::Conflict(ConflictKind::UniqueCedula, _) => AppError::validation(
                "Error de validación",
                ValidationErrors::single("cedula", "Esta cédula ya está registrada"),
            ),
            DomainError::Conflict(_, detail) => AppError::unprocessable(detail),
            DomainError::NotFound(_, detail) => AppError::NotFound {
                message: detail,
                id: None,
            },
            DomainError::Infra(InfraErrorKind::DbUnavailable, _) => AppError::db_unavailable(),
            DomainError::Infra(_, detail) => AppError::db(detail),
        }
    }
}

impl From<sea_orm::DbErr> for AppError {
    fn from(e: sea_orm::DbErr) -> Self {
        DomainError::from(e).into()
    }
}

impl From<actix_web::error::BlockingError> for AppError {
    fn from(e: actix_web::error::BlockingError) -> Self {
        AppError::internal("Error interno del servidor", e.to_string())
    }
}

impl ResponseError for AppError {
    fn status_code(&self) -> StatusCode {
        self.status()
    }

    fn error_response(&self) -> HttpResponse {
        let status = self.status();
        let trace_id = trace_ctx::trace_id();
        if status.is_server_error() {
            error!(%trace_id, status = status.as_u16(), error = %Redacted(&self.to_string()), "request failed");
        } else if status != StatusCode::UNPROCESSABLE_ENTITY {
            warn!(%trace_id, status = status.as_u16(), reason = self.message(), "request rejected");
        }

        envelope::error(self.message(), self.details(), status)
    }
}
