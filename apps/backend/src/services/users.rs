use sea_orm::DatabaseConnection;

use crate::auth::password::hash_password_blocking;
use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::repos::users::{self, User, UserCreate, UserUpdate};

/// Hash `password` off the async executor, then insert.
pub async fn create_user(
    db: &DatabaseConnection,
    mut dto: UserCreate,
    password: String,
) -> Result<User, AppError> {
    dto.password_hash = hash_password_blocking(password).await?;
    with_txn(db, move |txn| {
        Box::pin(async move { Ok(users::create(txn, dto).await?) })
    })
    .await
}

/// Partial update; a new password, when given, is re-hashed first.
pub async fn update_user(
    db: &DatabaseConnection,
    id: i64,
    mut changes: UserUpdate,
    new_password: Option<String>,
) -> Result<(Option<User>, u64), AppError> {
    if let Some(password) = new_password {
        changes.password_hash = Some(hash_password_blocking(password).await?);
    }
    with_txn(db, move |txn| {
        Box::pin(async move {
            let rows = users::update(txn, id, changes).await?;
            let user = users::find_by_id(txn, id).await?;
            Ok((user, rows))
        })
    })
    .await
}
