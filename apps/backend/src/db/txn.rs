use std::future::Future;
use std::pin::Pin;

use sea_orm::{DatabaseTransaction, TransactionTrait};
use tracing::warn;

use crate::error::AppError;

/// Boxed future borrowing the transaction for its lifetime.
pub type TxnFuture<'c, T> = Pin<Box<dyn Future<Output = Result<T, AppError>> + 'c>>;

/// Run `f` inside a transaction.
///
/// Commits when `f` returns `Ok`; on `Err` the transaction is rolled back
/// and the original error is returned.
///
/// ```ignore
/// let created = with_txn(db, move |txn| Box::pin(async move {
///     customers::create(txn, new_customer).await.map_err(AppError::from)
/// }))
/// .await?;
/// ```
pub async fn with_txn<D, F, T>(db: &D, f: F) -> Result<T, AppError>
where
    D: TransactionTrait,
    F: for<'c> FnOnce(&'c DatabaseTransaction) -> TxnFuture<'c, T>,
{
    let txn = db.begin().await?;
    match f(&txn).await {
        Ok(value) => {
            txn.commit().await?;
            Ok(value)
        }
        Err(err) => {
            if let Err(rollback_err) = txn.rollback().await {
                warn!(error = %rollback_err, "rollback failed");
            }
            Err(err)
        }
    }
}
