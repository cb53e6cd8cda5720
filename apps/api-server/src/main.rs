//! # Quill API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

mod config;
mod handlers;
mod middleware;
mod observability;
mod state;
mod telemetry;

use config::AppConfig;
use observability::RequestIdMiddleware;
use state::AppState;
use telemetry::{TelemetryConfig, init_telemetry};

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting Quill API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::from_config(&config).await;

    #[cfg(feature = "auth")]
    let token_service: std::sync::Arc<dyn quill_core::ports::TokenService> =
        std::sync::Arc::new(quill_infra::JwtTokenService::from_env());

    #[cfg(not(feature = "auth"))]
    tracing::warn!("Built without the auth feature; every caller is anonymous.");

    HttpServer::new(move || {
        let app = App::new().app_data(web::Data::new(state.clone()));

        #[cfg(feature = "auth")]
        let app = app.app_data(web::Data::new(token_service.clone()));

        app.wrap(RequestIdMiddleware)
            .wrap(TracingLogger::default())
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
