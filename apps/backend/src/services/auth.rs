use sea_orm::ConnectionTrait;
use tracing::debug;

use crate::auth::password::verify_password_blocking;
use crate::error::AppError;
use crate::logging::security;
use crate::repos::users::{self, User};

/// Check an email/password pair against the stored bcrypt hash.
///
/// Returns `None` for an unknown email and for a wrong password alike.
pub async fn authenticate<C: ConnectionTrait + Send + Sync>(
    conn: &C,
    email: &str,
    password: &str,
) -> Result<Option<User>, AppError> {
    let Some(credentials) = users::find_credentials_by_email(conn, email).await? else {
        security::login_failed("unknown_email", Some(email));
        return Ok(None);
    };

    let matches =
        verify_password_blocking(password.to_string(), credentials.password_hash).await?;
    if !matches {
        security::login_failed("bad_password", Some(email));
        return Ok(None);
    }

    debug!(user_id = credentials.user.id_usuario, "credentials verified");
    security::login_succeeded(credentials.user.id_usuario);
    Ok(Some(credentials.user))
}
