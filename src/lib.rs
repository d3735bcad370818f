pub mod config;
pub mod dca;
pub mod error;
pub mod portfolio;
pub mod routes;

use config::Config;
use portfolio::Portfolio;
use routes::AppState;
use std::sync::Arc;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

pub fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();
}

pub fn build_state(config: &Config) -> Result<Arc<AppState>, portfolio::PortfolioError> {
    let portfolio = match &config.portfolio_path {
        Some(path) => Portfolio::load(path)?,
        None => {
            tracing::warn!("DCA_PORTFOLIO_PATH not set, serving an empty portfolio");
            Portfolio::empty()
        }
    };
    Ok(Arc::new(AppState { portfolio }))
}
