//! # IdeasLab API Server
//!
//! The main entry point for the Actix-web HTTP server.

use actix_web::{App, HttpServer, web};
use tracing_actix_web::TracingLogger;

use ideaslab_core::ports::message_handler;
use ideaslab_core::services::IDEA_CHANGES_CHANNEL;

mod config;
mod handlers;
mod middleware;
mod state;
mod telemetry;

use config::AppConfig;
use state::AppState;
use telemetry::TelemetryConfig;

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    // Load .env file if present
    dotenvy::dotenv().ok();

    telemetry::init_telemetry(&TelemetryConfig::from_env());

    let config = AppConfig::from_env();

    tracing::info!(
        "Starting IdeasLab API Server on {}:{}",
        config.host,
        config.port
    );

    let state = AppState::new(&config).await;

    // Change feed; real clients would attach here
    if let Err(e) = state
        .changes
        .subscribe(
            IDEA_CHANGES_CHANNEL,
            message_handler(|msg| async move {
                tracing::debug!(channel = %msg.channel, payload = %msg.payload, "Idea change");
            }),
        )
        .await
    {
        tracing::warn!("Failed to subscribe to idea changes: {}", e);
    }

    HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(web::Data::new(state.clone()))
            .configure(handlers::configure_routes)
    })
    .bind((config.host.as_str(), config.port))?
    .run()
    .await
}
