//! # Summit
//!
//! Customer transaction dashboard. Fetches customers and transactions once from
//! a remote service, then derives:
//!
//! - a table of per-customer totals, filtered by a case-insensitive name search
//! - a per-date series of one selected customer's amounts
//!
//! ## Modules
//!
//! - [`model`]: Customers, transactions and derived rows
//! - [`source`]: Where the data comes from (HTTP service, JSON file)
//! - [`pipeline`]: Filtering and aggregation
//! - [`dashboard`]: Loading state and view derivation
//! - [`render`]: Terminal table and chart output
//! - [`api`]: REST API server with Axum
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use summit::dashboard::{Dashboard, ViewQuery};
//! use summit::source::{HttpSource, HttpSourceConfig};
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let source = HttpSource::new(HttpSourceConfig::default())?;
//!
//!     let dashboard = Dashboard::new();
//!     dashboard.load(&source).await?;
//!
//!     let view = dashboard.view(&ViewQuery::default().search("ali").select(1)).await?;
//!     for row in &view.rows {
//!         println!("{}: {}", row.name, row.amount);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod api;
pub mod config;
pub mod dashboard;
pub mod logging;
pub mod model;
pub mod pipeline;
pub mod render;
pub mod source;

// Re-export top-level types for convenience
pub use model::{Customer, CustomerSummary, DatePoint, Snapshot, Transaction};

pub use source::{
    load_snapshot, DataSource, HttpSource, HttpSourceConfig, MemorySource, SourceError,
    SourceResult,
};

pub use dashboard::{
    CustomerOption, Dashboard, DashboardError, DashboardView, LoadState, Selection, ViewQuery,
};

pub use api::{build_router, serve, ApiError, AppState};

pub use config::{ApiConfig, Config, ConfigError, ConfigLoad, LoggingConfig, SourceConfig};

pub use render::{ChartConfig, OutputFormat, RenderError};
