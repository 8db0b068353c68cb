use std::sync::Arc;

use anyhow::{anyhow, Context};
use tokio::net::TcpListener;
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use gradeplan::config::ServerConfig;
use gradeplan::db::DocumentStore;
use gradeplan::grading::{PlannerConfig, StudyAdvisor};
use gradeplan::server::create_router;
use gradeplan::types::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    let config = ServerConfig::from_env();

    let planner = match config.planner_config_path {
        Some(ref path) => PlannerConfig::load_from_file(path)
            .map_err(|e| anyhow!("Failed to load planner config {}: {}", path.display(), e))?,
        None => PlannerConfig::default(),
    };
    info!(
        "Planner: {} nominal credits, default target '{}'",
        planner.nominal_credits, planner.default_target_class
    );

    // The calculators work without a store, so a bad path only disables persistence.
    let store = match DocumentStore::open(&config.database_url, &config.database_name) {
        Ok(store) => {
            info!("Document store '{}' opened at {}", store.name(), config.database_url);
            Some(store)
        }
        Err(e) => {
            warn!("Could not open document store at {}: {}", config.database_url, e);
            None
        }
    };

    let state = Arc::new(AppState::new(
        store,
        StudyAdvisor::new(planner),
        config.database_url_set,
    ));

    let address = config.bind_address();
    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("Failed to bind {}", address))?;
    info!("Listening on {}", address);

    axum::serve(listener, create_router(state))
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {}", e);
    }
}
