//! Declarative request validation.
//!
//! A [`Validator`] borrows the decoded JSON body and accumulates error
//! messages per field. Rules are independent: none short-circuits another,
//! and every rule except `required` skips fields that are absent or empty.
//!
//! ```ignore
//! let errors = Validator::new(&body)
//!     .required("email")
//!     .message("El email es requerido")
//!     .email("email")
//!     .min("password", 6)
//!     .validate();
//! ```

pub mod rules;
pub mod unique;

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{Map, Value};

use crate::error::AppError;
pub use unique::{Collection, UniqueLookup, UniqueProbe, UniqueRule};

/// Field name to accumulated messages, in field order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, Vec<String>>);

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &[String])> {
        self.0.iter().map(|(k, v)| (k.as_str(), v.as_slice()))
    }

    fn replace_last(&mut self, field: &str, message: String) {
        if let Some(last) = self.0.get_mut(field).and_then(|m| m.last_mut()) {
            *last = message;
        }
    }
}

/// Accumulates rule failures over a borrowed input mapping.
pub struct Validator<'a> {
    input: &'a Map<String, Value>,
    lookup: Option<&'a dyn UniqueLookup>,
    errors: ValidationErrors,
    last_failed: Option<String>,
}

impl<'a> Validator<'a> {
    pub fn new(input: &'a Map<String, Value>) -> Self {
        Self {
            input,
            lookup: None,
            errors: ValidationErrors::new(),
            last_failed: None,
        }
    }

    /// Attach the storage collaborator used by [`Validator::unique`].
    pub fn with_lookup(mut self, lookup: &'a dyn UniqueLookup) -> Self {
        self.lookup = Some(lookup);
        self
    }

    /// Replace the message of the previous rule, if that rule failed.
    pub fn message(mut self, message: impl Into<String>) -> Self {
        if let Some(field) = self.last_failed.take() {
            self.errors.replace_last(&field, message.into());
            self.last_failed = Some(field);
        }
        self
    }

    pub fn required(self, field: &str) -> Self {
        let failed = rules::is_blank(self.input.get(field));
        self.record(field, failed, || format!("El campo '{field}' es requerido"))
    }

    pub fn email(self, field: &str) -> Self {
        let failed = self.present(field).is_some_and(|value| {
            !rules::as_text(value).is_some_and(|text| rules::is_email(&text))
        });
        self.record(field, failed, || {
            format!("El campo '{field}' debe ser un email válido")
        })
    }

    /// Minimum length in characters.
    pub fn min(self, field: &str, min: usize) -> Self {
        let failed = self.present(field).is_some_and(|value| {
            !rules::as_text(value).is_some_and(|text| text.chars().count() >= min)
        });
        self.record(field, failed, || {
            format!("El campo '{field}' debe tener al menos {min} caracteres")
        })
    }

    /// Maximum length in characters.
    pub fn max(self, field: &str, max: usize) -> Self {
        let failed = self.present(field).is_some_and(|value| {
            !rules::as_text(value).is_some_and(|text| text.chars().count() <= max)
        });
        self.record(field, failed, || {
            format!("El campo '{field}' debe tener como máximo {max} caracteres")
        })
    }

    pub fn numeric(self, field: &str) -> Self {
        let failed = self
            .present(field)
            .is_some_and(|value| !rules::is_numeric(value));
        self.record(field, failed, || format!("El campo '{field}' debe ser un número"))
    }

    /// Fails when both fields are present and differ, compared strictly.
    pub fn equals(self, field: &str, other: &str) -> Self {
        let failed = match (self.present(field), self.present(other)) {
            (Some(a), Some(b)) => a != b,
            _ => false,
        };
        self.record(field, failed, || {
            format!("El campo '{field}' debe ser igual a '{other}'")
        })
    }

    /// Set membership over the textual form of the value.
    pub fn one_of(self, field: &str, allowed: &[&str]) -> Self {
        let failed = self.present(field).is_some_and(|value| {
            !rules::as_text(value).is_some_and(|text| allowed.contains(&&*text))
        });
        self.record(field, failed, || {
            format!("El campo '{field}' debe ser uno de: {}", allowed.join(", "))
        })
    }

    /// Fails when another stored record already holds the value.
    ///
    /// Without a lookup collaborator this is a configuration error rather
    /// than a validation failure.
    pub async fn unique(mut self, field: &str, rule: UniqueRule<'_>) -> Result<Self, AppError> {
        let Some(value) = self.present(field) else {
            self.last_failed = None;
            return Ok(self);
        };
        let lookup = self.lookup.ok_or_else(|| {
            AppError::config(format!(
                "uniqueness rule on '{field}' requires a lookup collaborator"
            ))
        })?;

        let collection = rule.collection;
        let column = rule.column.unwrap_or(field);
        let except_column = rule.except_column.unwrap_or(collection.primary_key());
        for name in [column, except_column] {
            if !collection.has_column(name) {
                return Err(AppError::config(format!(
                    "unknown column '{name}' for table '{}'",
                    collection.table()
                )));
            }
        }

        let probe = UniqueProbe {
            table: collection.table(),
            column,
            value,
            except: rule.except.as_ref().map(|id| (except_column, id)),
        };
        let taken = lookup.exists(probe).await?;
        Ok(self.record(field, taken, || {
            format!("El valor del campo '{field}' ya está registrado")
        }))
    }

    pub fn passes(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn fails(&self) -> bool {
        !self.passes()
    }

    pub fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    /// `None` when every rule passed.
    pub fn validate(self) -> Option<ValidationErrors> {
        if self.errors.is_empty() {
            None
        } else {
            Some(self.errors)
        }
    }

    /// Turn accumulated failures into a 422 error carrying `message`.
    pub fn check(self, message: &str) -> Result<(), AppError> {
        match self.validate() {
            None => Ok(()),
            Some(errors) => Err(AppError::validation(message, errors)),
        }
    }

    fn present(&self, field: &str) -> Option<&'a Value> {
        let input: &'a Map<String, Value> = self.input;
        input.get(field).filter(|v| !rules::is_missing(Some(v)))
    }

    fn record(mut self, field: &str, failed: bool, message: impl FnOnce() -> String) -> Self {
        if failed {
            self.errors.add(field, message());
            self.last_failed = Some(field.to_string());
        } else {
            self.last_failed = None;
        }
        self
    }
}
