use std::sync::Arc;

use anyhow::{Context, Result};
use gdp_dashboard::config::DashboardConfig;
use gdp_dashboard::data::loader;
use gdp_dashboard::server::{self, DashboardState};

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::init();

    let config = DashboardConfig::default();

    // Fail before binding the socket if any cell cannot be normalised.
    let dataset = loader::load_file(&config.data_path)
        .inspect_err(|e| log::error!("Failed to load {}: {e}", config.data_path.display()))
        .with_context(|| format!("loading {}", config.data_path.display()))?;

    let state = Arc::new(DashboardState::new(dataset, &config));
    server::serve(state, &config)
        .await
        .context("serving dashboard")
}
