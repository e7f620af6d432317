mod analysis;
mod config;
mod errors;
mod factlog;
mod routes;
mod state;

use anyhow::Result;
use std::net::SocketAddr;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crate::config::Config;
use crate::factlog::FactLogStore;
use crate::routes::build_router;
use crate::state::AppState;

const QUALITY_LOG_FILE: &str = "quality_fact_log.csv";
const SAFETY_LOG_FILE: &str = "safety_fact_log.csv";

#[tokio::main]
async fn main() -> Result<()> {
    let config = Config::from_env()?;

    // Initialize structured logging
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| {
            EnvFilter::new(format!("{}={}", env!("CARGO_PKG_NAME"), &config.rust_log))
        }))
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting Gemba API v{}", env!("CARGO_PKG_VERSION"));

    let quality_log = FactLogStore::new(config.data_dir.clone(), QUALITY_LOG_FILE);
    let safety_log = FactLogStore::new(config.data_dir.clone(), SAFETY_LOG_FILE);

    // Storage problems at startup are not fatal: each append retries
    // directory creation and surfaces its own error to the operator.
    for store in [&quality_log, &safety_log] {
        if let Err(e) = store.ensure_storage_ready() {
            warn!("storage not ready at startup: {e}");
        }
    }
    info!("Fact logs under {}", config.data_dir.display());

    let state = AppState {
        quality_log,
        safety_log,
    };

    let app = build_router(state)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive()); // TODO: tighten CORS in production

    let addr: SocketAddr = format!("0.0.0.0:{}", config.port).parse()?;
    info!("Listening on {addr}");

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}
