//! Dashboard Route
//!
//! - GET /api/v1/dashboard?search=&customer= - Table, selector and selection in one response

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    Json,
};
use std::sync::Arc;

use crate::api::error::ApiResult;
use crate::api::state::AppState;
use crate::dashboard::{DashboardView, ViewQuery};

/// GET /api/v1/dashboard
///
/// `selection` is null unless `customer` is given.
pub async fn get_dashboard(
    State(state): State<Arc<AppState>>,
    query: Result<Query<ViewQuery>, QueryRejection>,
) -> ApiResult<Json<DashboardView>> {
    let Query(query) = query?;
    let view = state.dashboard.view(&query).await?;
    Ok(Json(view))
}
