use std::time::{Duration, Instant};

use migration::{migrate, MigrationCommand};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use tracing::info;

use crate::config::DbConfig;
use crate::error::AppError;

const CONNECT_TIMEOUT: Duration = Duration::from_secs(8);

/// Open a connection pool. Does NOT run migrations.
pub async fn connect_db(config: &DbConfig) -> Result<DatabaseConnection, AppError> {
    let mut options = ConnectOptions::new(config.url.clone());
    options
        .max_connections(config.max_connections)
        .connect_timeout(CONNECT_TIMEOUT)
        .sqlx_logging(false);

    let started = Instant::now();
    let conn = Database::connect(options).await.map_err(|e| {
        AppError::config(format!(
            "Could not connect to {}: {e}",
            sanitize_db_url(&config.url)
        ))
    })?;
    info!(
        url = %sanitize_db_url(&config.url),
        max_connections = config.max_connections,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "database connected"
    );
    Ok(conn)
}

/// Connect and bring the schema up to date.
pub async fn bootstrap_db(config: &DbConfig) -> Result<DatabaseConnection, AppError> {
    let conn = connect_db(config).await?;
    migrate(&conn, MigrationCommand::Up)
        .await
        .map_err(|e| AppError::config(format!("Migration failed: {e}")))?;
    Ok(conn)
}

/// Connection URL with the password masked, for logs and error messages.
pub fn sanitize_db_url(url: &str) -> String {
    let Some((scheme, rest)) = url.split_once("://") else {
        return url.to_string();
    };
    let Some((credentials, host)) = rest.rsplit_once('@') else {
        return url.to_string();
    };
    match credentials.split_once(':') {
        Some((user, _)) => format!("{scheme}://{user}:***@{host}"),
        None => url.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use sea_orm::ConnectionTrait;

    use super::*;

    #[test]
    fn sanitize_masks_password_only() {
        assert_eq!(
            sanitize_db_url("mysql://root:s3cr%40t@db:3306/miapi"),
            "mysql://root:***@db:3306/miapi"
        );
        assert_eq!(
            sanitize_db_url("postgres://app@db:5432/miapi"),
            "postgres://app@db:5432/miapi"
        );
        assert_eq!(sanitize_db_url("sqlite::memory:"), "sqlite::memory:");
    }

    #[actix_web::test]
    async fn bootstrap_creates_tables_in_memory() {
        let conn = bootstrap_db(&DbConfig::sqlite_memory()).await.unwrap();
        let backend = conn.get_database_backend();
        let row = conn
            .query_one(sea_orm::Statement::from_string(
                backend,
                "SELECT COUNT(*) AS n FROM clientes",
            ))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(row.try_get::<i64>("", "n").unwrap(), 0);
    }
}
