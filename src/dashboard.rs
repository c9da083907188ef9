//! Dashboard State
//!
//! Holds the loading flag and the raw collections, and derives everything a
//! front end renders from a search string and an optional selection.
//!
//! The state moves from `Loading` to either `Ready` or `Failed` exactly once.
//! Nothing is re-fetched afterwards.

use serde::{Deserialize, Serialize};
use std::sync::Arc;
use tokio::sync::RwLock;

use crate::model::{Customer, CustomerSummary, DatePoint, Snapshot};
use crate::pipeline;
use crate::source::{load_snapshot, DataSource};

/// Where the initial fetch stands
#[derive(Debug, Clone)]
pub enum LoadState {
    Loading,
    Ready(Arc<Snapshot>),
    Failed(String),
}

impl LoadState {
    pub fn label(&self) -> &'static str {
        match self {
            LoadState::Loading => "loading",
            LoadState::Ready(_) => "ready",
            LoadState::Failed(_) => "failed",
        }
    }
}

/// What the caller wants to see
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ViewQuery {
    /// Name filter; empty matches every customer
    #[serde(default)]
    pub search: String,
    /// Selected customer identifier
    #[serde(default, rename = "customer")]
    pub selected: Option<u64>,
}

impl ViewQuery {
    pub fn search(mut self, search: impl Into<String>) -> Self {
        self.search = search.into();
        self
    }

    pub fn select(mut self, customer_id: u64) -> Self {
        self.selected = Some(customer_id);
        self
    }
}

/// Selector entry for one customer
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct CustomerOption {
    pub id: u64,
    pub name: String,
}

/// The selected customer and its date series
#[derive(Debug, Clone, Serialize)]
pub struct Selection {
    pub customer: Customer,
    pub total: f64,
    pub series: Vec<DatePoint>,
}

/// Everything derived for one render
#[derive(Debug, Clone, Serialize)]
pub struct DashboardView {
    /// Table rows for the current search
    pub rows: Vec<CustomerSummary>,
    /// All customers, unfiltered
    pub options: Vec<CustomerOption>,
    /// Present only while a customer is selected
    pub selection: Option<Selection>,
}

/// Errors from reading the dashboard
#[derive(Debug, Clone, thiserror::Error)]
pub enum DashboardError {
    #[error("Data is still loading")]
    Loading,

    #[error("Data failed to load: {0}")]
    Failed(String),

    #[error("Customer {0} not found")]
    UnknownCustomer(u64),
}

/// Shared dashboard state
#[derive(Debug)]
pub struct Dashboard {
    state: RwLock<LoadState>,
}

impl Default for Dashboard {
    fn default() -> Self {
        Self::new()
    }
}

impl Dashboard {
    /// Create a dashboard in the `Loading` state
    pub fn new() -> Self {
        Self {
            state: RwLock::new(LoadState::Loading),
        }
    }

    /// Create a dashboard that is already loaded
    pub fn ready(snapshot: Snapshot) -> Self {
        Self {
            state: RwLock::new(LoadState::Ready(Arc::new(snapshot))),
        }
    }

    /// Fetch both collections and leave the `Loading` state.
    ///
    /// A failure is recorded as `Failed`; there is no retry. Once the state
    /// has left `Loading`, further calls fetch nothing and report the
    /// outcome already recorded.
    pub async fn load(&self, source: &dyn DataSource) -> Result<(), DashboardError> {
        match &*self.state.read().await {
            LoadState::Loading => {}
            LoadState::Ready(_) => {
                tracing::debug!("Already loaded; ignoring load from {}", source.describe());
                return Ok(());
            }
            LoadState::Failed(msg) => return Err(DashboardError::Failed(msg.clone())),
        }

        match load_snapshot(source).await {
            Ok(snapshot) => {
                let unmatched =
                    pipeline::unmatched_transactions(&snapshot.customers, &snapshot.transactions)
                        .len();
                if unmatched > 0 {
                    tracing::warn!(
                        count = unmatched,
                        "Transactions reference unknown customers and are left out of every total"
                    );
                }
                tracing::info!("Loaded {}", snapshot);
                *self.state.write().await = LoadState::Ready(Arc::new(snapshot));
                Ok(())
            }
            Err(e) => {
                tracing::error!("Failed to load data from {}: {}", source.describe(), e);
                let message = e.to_string();
                *self.state.write().await = LoadState::Failed(message.clone());
                Err(DashboardError::Failed(message))
            }
        }
    }

    /// Current load state
    pub async fn state(&self) -> LoadState {
        self.state.read().await.clone()
    }

    pub async fn is_loading(&self) -> bool {
        matches!(*self.state.read().await, LoadState::Loading)
    }

    /// The loaded snapshot, or why there is none
    pub async fn snapshot(&self) -> Result<Arc<Snapshot>, DashboardError> {
        match &*self.state.read().await {
            LoadState::Loading => Err(DashboardError::Loading),
            LoadState::Failed(msg) => Err(DashboardError::Failed(msg.clone())),
            LoadState::Ready(snapshot) => Ok(Arc::clone(snapshot)),
        }
    }

    /// Table rows for `search`
    pub async fn rows(&self, search: &str) -> Result<Vec<CustomerSummary>, DashboardError> {
        let snapshot = self.snapshot().await?;
        Ok(pipeline::customer_totals(
            &snapshot.customers,
            &snapshot.transactions,
            search,
        ))
    }

    /// Every customer as a selector entry
    pub async fn options(&self) -> Result<Vec<CustomerOption>, DashboardError> {
        let snapshot = self.snapshot().await?;
        Ok(customer_options(&snapshot))
    }

    /// Date series for one customer
    pub async fn selection(&self, customer_id: u64) -> Result<Selection, DashboardError> {
        let snapshot = self.snapshot().await?;
        select(&snapshot, customer_id)
    }

    /// Derive the whole view for one render
    pub async fn view(&self, query: &ViewQuery) -> Result<DashboardView, DashboardError> {
        let snapshot = self.snapshot().await?;
        build_view(&snapshot, query)
    }
}

/// Derive the whole view from a loaded snapshot
pub fn build_view(snapshot: &Snapshot, query: &ViewQuery) -> Result<DashboardView, DashboardError> {
    let rows =
        pipeline::customer_totals(&snapshot.customers, &snapshot.transactions, &query.search);

    let selection = query
        .selected
        .map(|id| select(snapshot, id))
        .transpose()?;

    Ok(DashboardView {
        rows,
        options: customer_options(snapshot),
        selection,
    })
}

fn customer_options(snapshot: &Snapshot) -> Vec<CustomerOption> {
    snapshot
        .customers
        .iter()
        .map(|c| CustomerOption {
            id: c.id,
            name: c.name.clone(),
        })
        .collect()
}

fn select(snapshot: &Snapshot, customer_id: u64) -> Result<Selection, DashboardError> {
    let customer = pipeline::find_customer(&snapshot.customers, customer_id)
        .ok_or(DashboardError::UnknownCustomer(customer_id))?;

    Ok(Selection {
        customer: customer.clone(),
        total: pipeline::customer_total(&snapshot.transactions, customer.id),
        series: pipeline::date_series(&snapshot.transactions, customer.id),
    })
}
