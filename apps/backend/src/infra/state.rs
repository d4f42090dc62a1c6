use crate::auth::TokenService;
use crate::config::{AppConfig, CorsConfig, DbConfig};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::state::app_state::AppState;

/// Builder for [`AppState`], shared by the binary and the tests.
pub struct StateBuilder {
    app: AppConfig,
    tokens: Option<TokenService>,
    cors: CorsConfig,
    db: Option<DbConfig>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            app: AppConfig::default(),
            tokens: None,
            cors: CorsConfig::default(),
            db: None,
        }
    }

    pub fn with_app(mut self, app: AppConfig) -> Self {
        self.app = app;
        self
    }

    pub fn with_tokens(mut self, tokens: TokenService) -> Self {
        self.tokens = Some(tokens);
        self
    }

    pub fn with_cors(mut self, cors: CorsConfig) -> Self {
        self.cors = cors;
        self
    }

    pub fn with_db(mut self, db: DbConfig) -> Self {
        self.db = Some(db);
        self
    }

    /// Connects and migrates when a database was configured.
    pub async fn build(self) -> Result<AppState, AppError> {
        let tokens = self
            .tokens
            .ok_or_else(|| AppError::config("token service not configured"))?;
        match self.db {
            Some(db) => {
                let conn = bootstrap_db(&db).await?;
                Ok(AppState::new(conn, self.app, tokens, self.cors))
            }
            None => Ok(AppState::without_db(self.app, tokens, self.cors)),
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
