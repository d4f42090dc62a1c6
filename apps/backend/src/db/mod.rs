pub mod filter;
pub mod pagination;
pub mod txn;

use sea_orm::DatabaseConnection;

use crate::error::AppError;
use crate::state::app_state::AppState;

/// Database connection of the running app, or `DbUnavailable`.
pub fn require_db(state: &AppState) -> Result<&DatabaseConnection, AppError> {
    state.db().ok_or_else(AppError::db_unavailable)
}

#[cfg(test)]
mod tests {
    use actix_web::ResponseError;

    use super::*;

    #[test]
    fn missing_db_is_500() {
        let state = AppState::for_tests_without_db();
        let err = require_db(&state).unwrap_err();
        assert!(matches!(err, AppError::DbUnavailable));
        assert_eq!(
            err.error_response().status(),
            actix_web::http::StatusCode::INTERNAL_SERVER_ERROR
        );
    }
}
