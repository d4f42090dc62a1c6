use std::future::{ready, Ready};

use actix_web::dev::Payload;
use actix_web::{FromRequest, HttpMessage, HttpRequest};

use crate::auth::TokenClaims;
use crate::error::AppError;

/// Authenticated caller, read from the claims the `JwtExtract` middleware
/// stored in request extensions.
#[derive(Debug, Clone)]
pub struct AuthUser {
    pub claims: TokenClaims,
}

impl AuthUser {
    /// User identifier carried in the token subject.
    pub fn subject(&self) -> &str {
        &self.claims.sub
    }
}

impl FromRequest for AuthUser {
    type Error = AppError;
    type Future = Ready<Result<Self, Self::Error>>;

    fn from_request(req: &HttpRequest, _payload: &mut Payload) -> Self::Future {
        let claims = req.extensions().get::<TokenClaims>().cloned();
        ready(
            claims
                .map(|claims| AuthUser { claims })
                .ok_or_else(|| AppError::unauthorized("Token de autenticación no proporcionado")),
        )
    }
}
