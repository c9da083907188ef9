//! Summit REST API
//!
//! HTTP API layer for Summit, built with Axum. Serves the dashboard views
//! derived from the customers and transactions loaded at startup.
//!
//! # Endpoints
//!
//! ## Customers
//! - `GET /api/v1/customers?search=` - Per-customer totals, filtered by name
//! - `GET /api/v1/customers/options` - All customers for a selector
//! - `GET /api/v1/customers/:id/series` - Per-date totals for one customer
//!
//! ## Dashboard
//! - `GET /api/v1/dashboard?search=&customer=` - Everything above in one call
//!
//! ## Health
//! - `GET /health/live` - Liveness probe
//! - `GET /health/ready` - Readiness probe (503 until the data is loaded)
//! - `GET /health` - Full health status
//!
//! Data routes answer `503 LOADING` until the load finishes and
//! `502 LOAD_FAILED` if it failed.
//!
//! # Example
//!
//! ```rust,ignore
//! use summit::api::{serve, AppState};
//! use summit::config::Config;
//! use summit::dashboard::Dashboard;
//! use summit::source::HttpSource;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::load_default().config;
//!     let source = Arc::new(HttpSource::new(config.source.http())?);
//!     let state = AppState::new(Arc::new(Dashboard::new()), config.api.clone());
//!
//!     serve(state, source).await?;
//!     Ok(())
//! }
//! ```

pub mod dto;
pub mod error;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use state::AppState;

use axum::{routing::get, Router};
use std::sync::Arc;
use tokio::task::JoinHandle;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::dashboard::Dashboard;
use crate::source::DataSource;

/// Build the API router with all routes and middleware
pub fn build_router(state: AppState) -> Router {
    let api_routes = Router::new()
        .route("/customers", get(routes::customers::list_customers))
        .route("/customers/options", get(routes::customers::list_options))
        .route("/customers/:id/series", get(routes::customers::customer_series))
        .route("/dashboard", get(routes::dashboard::get_dashboard));

    let health_routes = Router::new()
        .route("/live", get(routes::health::liveness))
        .route("/ready", get(routes::health::readiness))
        .route("/", get(routes::health::full_health));

    let shared_state = Arc::new(state);

    Router::new()
        .nest("/api/v1", api_routes)
        .nest("/health", health_routes)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(shared_state)
}

/// Run the one-time data load in the background
pub fn spawn_load(dashboard: Arc<Dashboard>, source: Arc<dyn DataSource>) -> JoinHandle<()> {
    tokio::spawn(async move {
        // Failures are recorded in the dashboard state and logged there
        let _ = dashboard.load(source.as_ref()).await;
    })
}

/// Start the API server.
///
/// The listener is bound before the data load starts, so clients see
/// `loading` instead of connection errors while the fetch runs.
pub async fn serve(state: AppState, source: Arc<dyn DataSource>) -> Result<(), ApiError> {
    let addr = state.config.addr();
    let listener = tokio::net::TcpListener::bind(&addr).await?;

    tracing::info!("Summit API listening on {}", addr);

    let load_handle = spawn_load(Arc::clone(&state.dashboard), source);
    let router = build_router(state);

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| ApiError::Internal(format!("Server error: {}", e)))?;

    load_handle.abort();
    tracing::info!("Summit API shut down gracefully");
    Ok(())
}

/// Wait for shutdown signal
async fn shutdown_signal() {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            tracing::error!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                tracing::error!("Failed to install SIGTERM handler: {}", e);
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
