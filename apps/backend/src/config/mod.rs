//! Environment-driven configuration, read once at startup.

pub mod app;
pub mod cors;
pub mod db;
pub mod jwt;

use std::env;
use std::str::FromStr;

use crate::error::AppError;

pub use app::{AppConfig, AppTimezone, RuntimeEnv, ServerConfig};
pub use cors::{AllowedOrigins, CorsConfig};
pub use db::{DbConfig, DbDriver};
pub use jwt::JwtConfig;

/// Every configuration section the binary needs.
#[derive(Debug, Clone)]
pub struct Settings {
    pub app: AppConfig,
    pub server: ServerConfig,
    pub db: DbConfig,
    pub jwt: JwtConfig,
    pub cors: CorsConfig,
}

impl Settings {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            app: AppConfig::from_env()?,
            server: ServerConfig::from_env()?,
            db: DbConfig::from_env()?,
            jwt: JwtConfig::from_env()?,
            cors: CorsConfig::from_env(),
        })
    }
}

/// Required variable; unset and empty are both errors.
pub(crate) fn must_var(name: &str) -> Result<String, AppError> {
    optional_var(name)
        .ok_or_else(|| AppError::config(format!("Required environment variable '{name}' is not set")))
}

/// Variable value with empty strings treated as unset.
pub(crate) fn optional_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}

pub(crate) fn var_or(name: &str, default: &str) -> String {
    optional_var(name).unwrap_or_else(|| default.to_string())
}

pub(crate) fn parse_var<T: FromStr>(name: &str, default: T) -> Result<T, AppError> {
    match optional_var(name) {
        None => Ok(default),
        Some(raw) => raw.trim().parse().map_err(|_| {
            AppError::config(format!("Environment variable '{name}' has an invalid value: '{raw}'"))
        }),
    }
}

#[cfg(test)]
mod tests {
    use serial_test::serial;

    use super::*;

    #[test]
    #[serial]
    fn must_var_rejects_unset_and_empty() {
        env::remove_var("MIAPI_TEST_VAR");
        assert!(matches!(must_var("MIAPI_TEST_VAR"), Err(AppError::Config { .. })));
        env::set_var("MIAPI_TEST_VAR", "  ");
        assert!(must_var("MIAPI_TEST_VAR").is_err());
        env::set_var("MIAPI_TEST_VAR", "value");
        assert_eq!(must_var("MIAPI_TEST_VAR").unwrap(), "value");
        env::remove_var("MIAPI_TEST_VAR");
    }

    #[test]
    #[serial]
    fn typed_helpers_parse_or_default() {
        env::remove_var("MIAPI_TEST_NUM");
        assert_eq!(parse_var("MIAPI_TEST_NUM", 7u16).unwrap(), 7);
        env::set_var("MIAPI_TEST_NUM", "8081");
        assert_eq!(parse_var("MIAPI_TEST_NUM", 7u16).unwrap(), 8081);
        env::set_var("MIAPI_TEST_NUM", "eighty");
        assert!(parse_var("MIAPI_TEST_NUM", 7u16).is_err());
        env::remove_var("MIAPI_TEST_NUM");
    }
}
