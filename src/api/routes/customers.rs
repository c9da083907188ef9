//! Customer Routes
//!
//! Read-only views over the loaded customers and transactions.
//!
//! - GET /api/v1/customers?search= - Totals table
//! - GET /api/v1/customers/options - Selector entries
//! - GET /api/v1/customers/:id/series - Per-date series for one customer

use axum::{
    extract::{
        rejection::{PathRejection, QueryRejection},
        Path, Query, State,
    },
    Json,
};
use std::sync::Arc;

use crate::api::dto::{CustomerListResponse, OptionsResponse, SearchParams, SeriesResponse};
use crate::api::error::ApiResult;
use crate::api::state::AppState;

/// GET /api/v1/customers
///
/// One row per customer whose name contains `search` (any case).
pub async fn list_customers(
    State(state): State<Arc<AppState>>,
    params: Result<Query<SearchParams>, QueryRejection>,
) -> ApiResult<Json<CustomerListResponse>> {
    let Query(params) = params?;
    let rows = state.dashboard.rows(&params.search).await?;
    tracing::debug!(search = %params.search, rows = rows.len(), "Customer table");

    Ok(Json(CustomerListResponse {
        total: rows.len(),
        rows,
    }))
}

/// GET /api/v1/customers/options
pub async fn list_options(State(state): State<Arc<AppState>>) -> ApiResult<Json<OptionsResponse>> {
    let options = state.dashboard.options().await?;
    Ok(Json(OptionsResponse { options }))
}

/// GET /api/v1/customers/:id/series
pub async fn customer_series(
    State(state): State<Arc<AppState>>,
    id: Result<Path<u64>, PathRejection>,
) -> ApiResult<Json<SeriesResponse>> {
    let Path(id) = id?;
    let selection = state.dashboard.selection(id).await?;

    Ok(Json(SeriesResponse {
        customer: selection.customer,
        total: selection.total,
        series: selection.series,
    }))
}
