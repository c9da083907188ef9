//! Summit API Server
//!
//! Run with: cargo run --bin summit-api
//!
//! # Configuration
//!
//! Settings come from the config file (see `summit config`), overridden by:
//! - `SUMMIT_BASE_URL`: Customers/transactions service URL
//! - `SUMMIT_TIMEOUT_SECS`: Request timeout for the service
//! - `SUMMIT_API_HOST`: Host to bind to (default: 0.0.0.0)
//! - `SUMMIT_API_PORT`: Port to listen on (default: 8090)
//! - `SUMMIT_CONFIG`: Explicit config file path
//! - `RUST_LOG`: Log filter (default: summit=info,tower_http=debug)

use std::path::PathBuf;
use std::sync::Arc;

use summit::api::{serve, AppState};
use summit::config::{Config, ConfigLoad};
use summit::dashboard::Dashboard;
use summit::source::{DataSource, HttpSource};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let loaded = match std::env::var("SUMMIT_CONFIG") {
        Ok(path) => {
            let path = PathBuf::from(path);
            ConfigLoad::explicit(&path, Config::load_with_env(&path)?)
        }
        Err(_) => Config::load_default(),
    };

    summit::logging::init(&loaded.config.logging, "summit=info,tower_http=debug");
    loaded.report();
    let config = loaded.config;

    tracing::info!("Starting Summit API server v{}", env!("CARGO_PKG_VERSION"));
    tracing::info!("Data source: {}", config.source.base_url);

    let source: Arc<dyn DataSource> = Arc::new(HttpSource::new(config.source.http())?);
    let state = AppState::new(Arc::new(Dashboard::new()), config.api.clone());

    serve(state, source).await?;

    tracing::info!("Summit API server stopped");
    Ok(())
}
