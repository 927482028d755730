//! OpsHub server — multi-tenant server access-control backend.
//!
//! Main entry point: loads configuration, initializes tracing, and
//! delegates to the API crate's server wiring.

use tracing_subscriber::{EnvFilter, fmt};

use opshub_core::config::AppConfig;

#[tokio::main]
async fn main() {
    let env = std::env::var("OPSHUB_ENV").unwrap_or_else(|_| "development".to_string());

    let config = match AppConfig::load(&env) {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Failed to load configuration: {e}");
            std::process::exit(1);
        }
    };

    init_logging(&config);

    tracing::info!(version = env!("CARGO_PKG_VERSION"), env = %env, "Starting OpsHub");

    // Startup-phase failures are fatal; once serving, per-request errors
    // are handled per request.
    if let Err(e) = opshub_api::run_server(config).await {
        tracing::error!("Server error: {e}");
        std::process::exit(1);
    }
}

/// Initialize tracing/logging from configuration.
fn init_logging(config: &AppConfig) {
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format.as_str() {
        "json" => {
            fmt().json().with_env_filter(filter).with_target(true).init();
        }
        _ => {
            fmt().pretty().with_env_filter(filter).with_target(true).init();
        }
    }
}
