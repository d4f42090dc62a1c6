use sea_orm::DatabaseConnection;

use crate::db::txn::with_txn;
use crate::error::AppError;
use crate::repos::customers::{self, Customer, CustomerCreate, CustomerUpdate};

pub async fn create_customer(
    db: &DatabaseConnection,
    dto: CustomerCreate,
) -> Result<Customer, AppError> {
    with_txn(db, move |txn| {
        Box::pin(async move { Ok(customers::create(txn, dto).await?) })
    })
    .await
}

/// Apply `changes` and return the refreshed record with the affected row count.
pub async fn update_customer(
    db: &DatabaseConnection,
    id: i64,
    changes: CustomerUpdate,
) -> Result<(Option<Customer>, u64), AppError> {
    with_txn(db, move |txn| {
        Box::pin(async move {
            let rows = customers::update(txn, id, changes).await?;
            let customer = customers::find_by_id(txn, id).await?;
            Ok((customer, rows))
        })
    })
    .await
}
