//! Health Routes
//!
//! Health check endpoints for monitoring and Kubernetes probes.
//!
//! - GET /health/live - Liveness probe (process is alive)
//! - GET /health/ready - Readiness probe (data loaded)
//! - GET /health - Full health status

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;

use crate::api::dto::HealthResponse;
use crate::api::state::AppState;
use crate::dashboard::LoadState;
use crate::pipeline;

/// GET /health/live
///
/// Kubernetes liveness probe.
/// Returns 200 if the process is alive, no dependency checks.
pub async fn liveness() -> StatusCode {
    StatusCode::OK
}

/// GET /health/ready
///
/// Kubernetes readiness probe.
/// Returns 200 once both collections are loaded.
pub async fn readiness(State(state): State<Arc<AppState>>) -> StatusCode {
    match state.dashboard.state().await {
        LoadState::Ready(_) => StatusCode::OK,
        LoadState::Loading | LoadState::Failed(_) => StatusCode::SERVICE_UNAVAILABLE,
    }
}

/// GET /health
///
/// Full health status with load details.
pub async fn full_health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    let load_state = state.dashboard.state().await;

    let mut response = HealthResponse {
        status: load_state.label().to_string(),
        error: None,
        customers: 0,
        transactions: 0,
        unmatched_transactions: 0,
        loaded_at: None,
        uptime_seconds: state.uptime_seconds(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    match load_state {
        LoadState::Ready(snapshot) => {
            response.customers = snapshot.customers.len();
            response.transactions = snapshot.transactions.len();
            response.unmatched_transactions =
                pipeline::unmatched_transactions(&snapshot.customers, &snapshot.transactions)
                    .len();
            response.loaded_at = Some(snapshot.loaded_at);
        }
        LoadState::Failed(msg) => response.error = Some(msg),
        LoadState::Loading => {}
    }

    Json(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_liveness() {
        let status = liveness().await;
        assert_eq!(status, StatusCode::OK);
    }
}
