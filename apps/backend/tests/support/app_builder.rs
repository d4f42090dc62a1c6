use actix_http::Request;
use actix_web::body::MessageBody;
use actix_web::dev::{Service, ServiceResponse};
use actix_web::{test, web, App, Error};
use jsonwebtoken::Algorithm;
use miapi::config::{AppConfig, CorsConfig, DbConfig, RuntimeEnv};
use miapi::infra::state::build_state;
use miapi::middleware::{
    cors_middleware, ErrorShield, RequestTrace, StructuredLogger, TraceSpan,
};
use miapi::routes;
use miapi::{AppError, AppState, TokenService};

pub const TEST_SECRET: &[u8] = b"test_secret_key_for_testing_purposes_only";
pub const TEST_URL: &str = "http://localhost";

pub fn test_tokens() -> TokenService {
    TokenService::new(TEST_SECRET, Algorithm::HS256, 3600, TEST_URL, TEST_URL)
}

/// Fresh migrated in-memory database per call.
pub async fn test_state() -> Result<AppState, AppError> {
    build_state()
        .with_app(AppConfig::default())
        .with_tokens(test_tokens())
        .with_cors(CorsConfig::default())
        .with_db(DbConfig::sqlite_memory())
        .build()
        .await
}

/// Builder for test Actix services carrying the production middleware
/// stack and route table.
pub struct TestAppBuilder {
    state: AppState,
}

impl TestAppBuilder {
    pub fn new(state: AppState) -> Self {
        Self { state }
    }

    /// Run as `APP_ENV=production`, which turns the error shield on.
    pub fn in_production(mut self) -> Self {
        self.state.app.env = RuntimeEnv::Production;
        self
    }

    pub async fn build(
        self,
    ) -> impl Service<Request, Response = ServiceResponse<impl MessageBody>, Error = Error> {
        let shield = self.state.app.is_production();
        let cors = self.state.cors.clone();
        let data = web::Data::new(self.state);

        test::init_service(
            App::new()
                .wrap(ErrorShield::new(shield))
                .wrap(TraceSpan)
                .wrap(StructuredLogger)
                .wrap(RequestTrace)
                .wrap(cors_middleware(&cors))
                .app_data(data)
                .configure(routes::configure)
                .default_service(web::to(routes::not_found)),
        )
        .await
    }
}

pub fn create_test_app(state: AppState) -> TestAppBuilder {
    TestAppBuilder::new(state)
}
