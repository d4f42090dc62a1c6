use jsonwebtoken::Algorithm;

use crate::config::{must_var, parse_var, var_or};
use crate::error::AppError;

pub const DEFAULT_EXPIRATION_SECS: i64 = 86_400;

/// Token signing settings. Only HMAC algorithms are accepted since the
/// secret is shared.
#[derive(Debug, Clone)]
pub struct JwtConfig {
    pub secret: String,
    pub algorithm: Algorithm,
    pub expiration_secs: i64,
}

impl JwtConfig {
    pub fn from_env() -> Result<Self, AppError> {
        Ok(Self {
            secret: must_var("JWT_SECRET")?,
            algorithm: parse_algorithm(&var_or("JWT_ALGORITHM", "HS256"))?,
            expiration_secs: parse_var("JWT_EXPIRATION", DEFAULT_EXPIRATION_SECS)?,
        })
    }
}

pub fn parse_algorithm(name: &str) -> Result<Algorithm, AppError> {
    match name.trim().to_ascii_uppercase().as_str() {
        "HS256" => Ok(Algorithm::HS256),
        "HS384" => Ok(Algorithm::HS384),
        "HS512" => Ok(Algorithm::HS512),
        other => Err(AppError::config(format!(
            "JWT_ALGORITHM must be HS256, HS384 or HS512, got '{other}'"
        ))),
    }
}

#[cfg(test)]
mod tests {
    use std::env;

    use serial_test::serial;

    use super::*;

    #[test]
    fn only_hmac_algorithms() {
        assert_eq!(parse_algorithm("hs512").unwrap(), Algorithm::HS512);
        assert!(parse_algorithm("RS256").is_err());
    }

    #[test]
    #[serial]
    fn secret_is_required() {
        env::remove_var("JWT_SECRET");
        assert!(JwtConfig::from_env().is_err());

        env::set_var("JWT_SECRET", "s3cret");
        env::set_var("JWT_EXPIRATION", "3600");
        let config = JwtConfig::from_env().unwrap();
        assert_eq!(config.secret, "s3cret");
        assert_eq!(config.algorithm, Algorithm::HS256);
        assert_eq!(config.expiration_secs, 3600);
        env::remove_var("JWT_SECRET");
        env::remove_var("JWT_EXPIRATION");
    }
}
