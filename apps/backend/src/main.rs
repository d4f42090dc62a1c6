use std::io;

use actix_web::{web, App, HttpServer};
use miapi::auth::TokenService;
use miapi::config::Settings;
use miapi::infra::state::build_state;
use miapi::middleware::{
    cors_middleware, ErrorShield, RequestTrace, StructuredLogger, TraceSpan,
};
use miapi::routes;
use miapi::telemetry::init_tracing;
use tracing::{error, info};

#[actix_web::main]
async fn main() -> io::Result<()> {
    // A missing .env file is fine; the environment may already be set.
    dotenvy::dotenv().ok();
    init_tracing();

    let settings = Settings::from_env().map_err(|e| {
        error!(error = %e, "invalid configuration");
        io::Error::other(e.to_string())
    })?;

    let tokens = TokenService::from_config(&settings.jwt, &settings.app);
    let app_state = build_state()
        .with_app(settings.app.clone())
        .with_tokens(tokens)
        .with_cors(settings.cors.clone())
        .with_db(settings.db.clone())
        .build()
        .await
        .map_err(|e| {
            error!(error = %e, "failed to build application state");
            io::Error::other(e.to_string())
        })?;

    let shield_errors = app_state.app.is_production();
    let cors = settings.cors.clone();
    let data = web::Data::new(app_state);

    let (host, port) = (settings.server.host.clone(), settings.server.port);
    info!(
        %host,
        port,
        app = %settings.app.name,
        env = %settings.app.env,
        "starting server"
    );

    // Last `wrap` is outermost. RequestTrace must sit outside the logger and
    // the span, which both read the id it stores.
    HttpServer::new(move || {
        App::new()
            .wrap(ErrorShield::new(shield_errors))
            .wrap(TraceSpan)
            .wrap(StructuredLogger)
            .wrap(RequestTrace)
            .wrap(cors_middleware(&cors))
            .app_data(data.clone())
            .configure(routes::configure)
            .default_service(web::to(routes::not_found))
    })
    .bind((host.as_str(), port))?
    .run()
    .await
}
