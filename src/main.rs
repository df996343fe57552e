//! YaMDb server bootstrap: loads configuration, installs logging,
//! provisions superusers, and runs until a shutdown signal arrives.

use yamdb::App;
use yamdb::telemetry::init_logging;
use yamdb_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let env = std::env::var("YAMDB_ENV").unwrap_or_else(|_| "development".to_string());
    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    init_logging(&config.logging);
    tracing::info!(env = %env, "Configuration loaded");

    let _app = match App::build(&config).await {
        Ok(app) => app,
        Err(e) => {
            tracing::error!("Startup error: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!("YaMDb ready");

    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::process::exit(1);
    }
    tracing::info!("Shutdown signal received");
}
