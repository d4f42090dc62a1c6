//! bcrypt password hashing.
//!
//! Hashing and verification are CPU-bound, so request handlers go through
//! the `*_blocking` variants which run on actix's blocking pool.

use actix_web::web;
use tracing::warn;

use crate::error::AppError;

pub use bcrypt::DEFAULT_COST;

pub fn hash_password(plain: &str) -> Result<String, AppError> {
    hash_with_cost(plain, DEFAULT_COST)
}

pub fn hash_with_cost(plain: &str, cost: u32) -> Result<String, AppError> {
    bcrypt::hash(plain, cost)
        .map_err(|e| AppError::internal("Error al procesar la contraseña", e.to_string()))
}

/// Constant-time comparison. A stored hash that cannot be parsed counts as
/// a mismatch.
pub fn verify_password(plain: &str, hash: &str) -> bool {
    match bcrypt::verify(plain, hash) {
        Ok(matches) => matches,
        Err(e) => {
            warn!(error = %e, "stored password hash is unreadable");
            false
        }
    }
}

pub async fn hash_password_blocking(plain: String) -> Result<String, AppError> {
    web::block(move || hash_password(&plain)).await?
}

pub async fn verify_password_blocking(plain: String, hash: String) -> Result<bool, AppError> {
    Ok(web::block(move || verify_password(&plain, &hash)).await?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hash_and_verify() {
        let hash = hash_with_cost("secreto123", 4).unwrap();
        assert!(hash.starts_with("$2"));
        assert!(verify_password("secreto123", &hash));
        assert!(!verify_password("otra-clave", &hash));
    }

    #[test]
    fn accepts_2y_prefix() {
        let hash = hash_with_cost("secreto123", 4).unwrap();
        let php_style = format!("$2y${}", &hash[4..]);
        assert!(verify_password("secreto123", &php_style));
    }

    #[test]
    fn malformed_hash_never_matches() {
        assert!(!verify_password("secreto123", "not-a-hash"));
        assert!(!verify_password("secreto123", ""));
    }

    #[actix_web::test]
    async fn blocking_variants_agree() {
        let hash = web::block(|| hash_with_cost("secreto123", 4)).await.unwrap().unwrap();
        assert!(verify_password_blocking("secreto123".into(), hash).await.unwrap());
    }
}
