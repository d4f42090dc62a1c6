use actix_web::{web, HttpResponse};
use migration::get_latest_migration_version;
use sea_orm::{ConnectionTrait, Statement};
use serde::Serialize;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

use crate::db::require_db;
use crate::http::envelope;
use crate::state::app_state::AppState;

#[derive(Debug, Serialize)]
struct HealthReport {
    app_version: &'static str,
    db: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    db_error: Option<String>,
    migrations: String,
    time: String,
}

/// Liveness plus a cheap database round-trip. Always 200; the body says
/// whether storage is reachable.
pub async fn health(state: web::Data<AppState>) -> HttpResponse {
    let time = OffsetDateTime::now_utc()
        .format(&Rfc3339)
        .unwrap_or_else(|_| "unknown".to_string());

    let (db, db_error, migrations) = match require_db(&state) {
        Ok(conn) => {
            let ping = Statement::from_string(conn.get_database_backend(), "SELECT 1");
            match conn.query_one(ping).await {
                Ok(_) => {
                    let version = match get_latest_migration_version(conn).await {
                        Ok(Some(version)) => version,
                        Ok(None) => "no_migrations".to_string(),
                        Err(_) => "unknown".to_string(),
                    };
                    ("ok", None, version)
                }
                Err(e) => ("error", Some(format!("DB query failed: {e}")), "unknown".to_string()),
            }
        }
        Err(e) => ("error", Some(e.to_string()), "unknown".to_string()),
    };

    envelope::ok(HealthReport {
        app_version: state.app.version,
        db,
        db_error,
        migrations,
        time,
    })
}
