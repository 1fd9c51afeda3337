//! Payroll engine HTTP server.
//!
//! Loads every company's statutory configuration from
//! `PAYROLL_CONFIG_DIR` (default `./config/companies`) and serves the
//! payroll API on `PAYROLL_BIND_ADDR` (default `0.0.0.0:8080`).

use tracing::{error, info};

use payroll_engine::api::{AppState, create_router};
use payroll_engine::config::ConfigLoader;

const DEFAULT_CONFIG_DIR: &str = "./config/companies";
const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8080";

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("info")),
        )
        .init();

    let config_dir =
        std::env::var("PAYROLL_CONFIG_DIR").unwrap_or_else(|_| DEFAULT_CONFIG_DIR.to_string());
    let bind_addr =
        std::env::var("PAYROLL_BIND_ADDR").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string());

    let config = match ConfigLoader::load(&config_dir) {
        Ok(config) => config,
        Err(e) => {
            error!("Failed to load company configurations from {}: {}", config_dir, e);
            return Err(e.into());
        }
    };
    let companies: Vec<&str> = config.company_codes().collect();
    info!("Companies loaded: {}", companies.join(", "));

    let state = AppState::new(config);
    info!("Serving payroll for {} companies", state.company_count());
    let router = create_router(state);

    let listener = tokio::net::TcpListener::bind(&bind_addr).await?;
    info!("Payroll API listening on http://{}", bind_addr);

    axum::serve(listener, router)
        .with_graceful_shutdown(async {
            if let Err(e) = tokio::signal::ctrl_c().await {
                error!("Failed to listen for shutdown signal: {}", e);
            }
            info!("Shutdown signal received");
        })
        .await?;

    info!("Payroll API stopped");
    Ok(())
}
