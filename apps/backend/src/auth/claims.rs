//! Claims carried by backend-issued bearer tokens.

use serde::{Deserialize, Serialize};

/// Decoded token payload, inserted into request extensions by the auth
/// middleware once the signature and time bounds have been checked.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TokenClaims {
    /// Issued-at (seconds since epoch)
    pub iat: i64,
    /// Expiry (seconds since epoch)
    pub exp: i64,
    pub iss: String,
    pub aud: String,
    /// User identifier (`usuarios.id_usuario`)
    pub sub: String,
}
