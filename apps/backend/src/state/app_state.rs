use sea_orm::DatabaseConnection;

use crate::auth::TokenService;
use crate::config::{AppConfig, CorsConfig};

/// Shared application context, built once at startup and handed to every
/// worker through `web::Data`.
#[derive(Debug, Clone)]
pub struct AppState {
    /// Database connection (absent in some test scenarios)
    db: Option<DatabaseConnection>,
    pub app: AppConfig,
    pub tokens: TokenService,
    pub cors: CorsConfig,
}

impl AppState {
    pub fn new(
        db: DatabaseConnection,
        app: AppConfig,
        tokens: TokenService,
        cors: CorsConfig,
    ) -> Self {
        Self {
            db: Some(db),
            app,
            tokens,
            cors,
        }
    }

    pub fn without_db(app: AppConfig, tokens: TokenService, cors: CorsConfig) -> Self {
        Self {
            db: None,
            app,
            tokens,
            cors,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }

    #[cfg(test)]
    pub fn for_tests_without_db() -> Self {
        let app = AppConfig::default();
        let tokens = TokenService::new(
            b"unit-test-secret",
            jsonwebtoken::Algorithm::HS256,
            3600,
            app.url.clone(),
            app.url.clone(),
        );
        Self::without_db(app, tokens, CorsConfig::default())
    }
}
