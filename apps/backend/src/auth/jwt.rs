use std::fmt;
use std::time::{SystemTime, UNIX_EPOCH};

use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use lazy_regex::regex_captures;
use tracing::debug;

use crate::auth::claims::TokenClaims;
use crate::config::{AppConfig, JwtConfig};
use crate::error::AppError;

/// Issues and verifies signed, time-bounded bearer tokens.
#[derive(Clone)]
pub struct TokenService {
    encoding: EncodingKey,
    decoding: DecodingKey,
    algorithm: Algorithm,
    expiration_secs: i64,
    issuer: String,
    audience: String,
}

impl fmt::Debug for TokenService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TokenService")
            .field("algorithm", &self.algorithm)
            .field("expiration_secs", &self.expiration_secs)
            .field("issuer", &self.issuer)
            .field("audience", &self.audience)
            .finish_non_exhaustive()
    }
}

impl TokenService {
    pub fn new(
        secret: &[u8],
        algorithm: Algorithm,
        expiration_secs: i64,
        issuer: impl Into<String>,
        audience: impl Into<String>,
    ) -> Self {
        Self {
            encoding: EncodingKey::from_secret(secret),
            decoding: DecodingKey::from_secret(secret),
            algorithm,
            expiration_secs,
            issuer: issuer.into(),
            audience: audience.into(),
        }
    }

    /// Issuer and audience are both the public application URL.
    pub fn from_config(jwt: &JwtConfig, app: &AppConfig) -> Self {
        Self::new(
            jwt.secret.as_bytes(),
            jwt.algorithm,
            jwt.expiration_secs,
            app.url.clone(),
            app.url.clone(),
        )
    }

    pub fn expiration_secs(&self) -> i64 {
        self.expiration_secs
    }

    pub fn issue(&self, subject: &str) -> Result<String, AppError> {
        self.issue_at(subject, SystemTime::now())
    }

    /// Sign a token as if issued at `now`.
    pub fn issue_at(&self, subject: &str, now: SystemTime) -> Result<String, AppError> {
        let iat = unix_seconds(now)?;
        let claims = TokenClaims {
            iat,
            exp: iat + self.expiration_secs,
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            sub: subject.to_string(),
        };

        encode(&Header::new(self.algorithm), &claims, &self.encoding)
            .map_err(|e| AppError::internal("Error al generar el token", e.to_string()))
    }

    /// Claims of a valid token, `None` otherwise.
    ///
    /// Malformed, forged, expired and not-yet-valid tokens are
    /// indistinguishable to the caller.
    pub fn verify(&self, token: &str) -> Option<TokenClaims> {
        let mut validation = Validation::new(self.algorithm);
        validation.leeway = 0;
        validation.validate_exp = true;
        validation.validate_nbf = true;
        validation.set_issuer(&[&self.issuer]);
        validation.set_audience(&[&self.audience]);
        validation.set_required_spec_claims(&["exp", "iat", "iss", "aud", "sub"]);

        let claims = match decode::<TokenClaims>(token, &self.decoding, &validation) {
            Ok(data) => data.claims,
            Err(e) => {
                debug!(reason = ?e.kind(), "token rejected");
                return None;
            }
        };

        let now = unix_seconds(SystemTime::now()).ok()?;
        if claims.iat > now {
            debug!(iat = claims.iat, now, "token issued in the future");
            return None;
        }
        Some(claims)
    }
}

/// Token part of a `Bearer <token>` header, scheme matched case-insensitively.
pub fn extract_bearer(header: Option<&str>) -> Option<&str> {
    let (_, token) = regex_captures!(r"(?i)^\s*bearer\s+(\S+)\s*$", header?)?;
    Some(token)
}

fn unix_seconds(at: SystemTime) -> Result<i64, AppError> {
    at.duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs() as i64)
        .map_err(|e| AppError::internal("Error al generar el token", e.to_string()))
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use super::*;

    const SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";

    fn service(expiration_secs: i64) -> TokenService {
        TokenService::new(
            SECRET,
            Algorithm::HS256,
            expiration_secs,
            "http://localhost",
            "http://localhost",
        )
    }

    #[test]
    fn issue_then_verify_returns_subject() {
        let tokens = service(86_400);
        let token = tokens.issue("42").unwrap();
        let claims = tokens.verify(&token).unwrap();
        assert_eq!(claims.sub, "42");
        assert_eq!(claims.iss, "http://localhost");
        assert_eq!(claims.aud, "http://localhost");
        assert_eq!(claims.exp, claims.iat + 86_400);
    }

    #[test]
    fn already_expired_token_is_invalid() {
        let tokens = service(-1);
        let token = tokens.issue("42").unwrap();
        assert!(tokens.verify(&token).is_none());
    }

    #[test]
    fn token_from_the_past_is_expired() {
        let tokens = service(60);
        let issued = SystemTime::now() - Duration::from_secs(120);
        let token = tokens.issue_at("42", issued).unwrap();
        assert!(tokens.verify(&token).is_none());
    }

    #[test]
    fn token_from_the_future_is_not_yet_valid() {
        let tokens = service(600);
        let issued = SystemTime::now() + Duration::from_secs(300);
        let token = tokens.issue_at("42", issued).unwrap();
        assert!(tokens.verify(&token).is_none());
    }

    #[test]
    fn wrong_secret_issuer_or_audience_is_invalid() {
        let token = service(600).issue("42").unwrap();

        let other_secret =
            TokenService::new(b"another", Algorithm::HS256, 600, "http://localhost", "http://localhost");
        assert!(other_secret.verify(&token).is_none());

        let other_issuer =
            TokenService::new(SECRET, Algorithm::HS256, 600, "https://evil.test", "http://localhost");
        assert!(other_issuer.verify(&token).is_none());

        let other_audience =
            TokenService::new(SECRET, Algorithm::HS256, 600, "http://localhost", "https://evil.test");
        assert!(other_audience.verify(&token).is_none());
    }

    #[test]
    fn garbage_is_invalid() {
        let tokens = service(600);
        assert!(tokens.verify("").is_none());
        assert!(tokens.verify("abc.def.ghi").is_none());
        assert!(tokens.verify("not a token").is_none());
    }

    #[test]
    fn bearer_extraction() {
        assert_eq!(extract_bearer(Some("Bearer abc123")), Some("abc123"));
        assert_eq!(extract_bearer(Some("bearer   abc123 ")), Some("abc123"));
        assert_eq!(extract_bearer(Some("BEARER abc123")), Some("abc123"));
        assert_eq!(extract_bearer(Some("abc123")), None);
        assert_eq!(extract_bearer(Some("Bearer ")), None);
        assert_eq!(extract_bearer(Some("Basic dXNlcjpwYXNz")), None);
        assert_eq!(extract_bearer(Some("Bearer a b")), None);
        assert_eq!(extract_bearer(None), None);
    }
}
