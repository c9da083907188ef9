//! Data Transfer Objects
//!
//! Request and response types for the API endpoints.
//! These types are serialized/deserialized to/from JSON.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::dashboard::CustomerOption;
use crate::model::{Customer, CustomerSummary, DatePoint};

/// Query string for the customer table
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    /// Case-insensitive name filter
    #[serde(default)]
    pub search: String,
}

/// Customer table response
#[derive(Debug, Serialize)]
pub struct CustomerListResponse {
    pub rows: Vec<CustomerSummary>,
    pub total: usize,
}

/// Customer selector response
#[derive(Debug, Serialize)]
pub struct OptionsResponse {
    pub options: Vec<CustomerOption>,
}

/// Date series for one customer
#[derive(Debug, Serialize)]
pub struct SeriesResponse {
    pub customer: Customer,
    /// Sum over the whole series
    pub total: f64,
    pub series: Vec<DatePoint>,
}

/// Full health status
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    /// "ready", "loading" or "failed"
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub customers: usize,
    pub transactions: usize,
    /// Transactions pointing at no known customer
    pub unmatched_transactions: usize,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub loaded_at: Option<DateTime<Utc>>,
    pub uptime_seconds: u64,
    pub version: String,
}
