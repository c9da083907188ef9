//! Data Sources
//!
//! Where customers and transactions come from:
//! - `HttpSource`: the remote REST service (`GET /customers`, `GET /transactions`)
//! - `MemorySource`: fixed collections, in memory or read from a JSON file
//!
//! `load_snapshot` fetches both collections once, customers first, then
//! transactions. There is no retry and no re-fetch.

mod http;
mod memory;

pub use http::{HttpSource, HttpSourceConfig};
pub use memory::MemorySource;

use async_trait::async_trait;
use thiserror::Error;

use crate::model::{Customer, Snapshot, Transaction};

/// Common trait for all data sources
#[async_trait]
pub trait DataSource: Send + Sync {
    /// Human-readable description (URL, file path, ...)
    fn describe(&self) -> String;

    /// Fetch the full customer list
    async fn fetch_customers(&self) -> SourceResult<Vec<Customer>>;

    /// Fetch the full transaction list
    async fn fetch_transactions(&self) -> SourceResult<Vec<Transaction>>;
}

/// Fetch both collections, one after the other.
pub async fn load_snapshot(source: &dyn DataSource) -> SourceResult<Snapshot> {
    tracing::info!("Loading customers and transactions from {}", source.describe());

    let customers = source.fetch_customers().await?;
    tracing::debug!("Fetched {} customers", customers.len());

    let transactions = source.fetch_transactions().await?;
    tracing::debug!("Fetched {} transactions", transactions.len());

    Ok(Snapshot::new(customers, transactions))
}

/// Errors that can occur while fetching data
#[derive(Error, Debug)]
pub enum SourceError {
    #[error("Service unavailable: {0}")]
    Unavailable(String),

    #[error("Request timeout")]
    Timeout,

    #[error("Request failed: {0}")]
    Request(#[from] reqwest::Error),

    #[error("Service returned {status}: {message}")]
    Status { status: u16, message: String },

    #[error("Invalid response body: {0}")]
    Decode(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::Decode(err.to_string())
    }
}

/// Result type alias for data source operations
pub type SourceResult<T> = Result<T, SourceError>;

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Mutex;

    /// Records the order in which collections were requested
    struct RecordingSource {
        calls: Mutex<Vec<&'static str>>,
        fail_transactions: bool,
        customer_calls: AtomicUsize,
    }

    #[async_trait]
    impl DataSource for RecordingSource {
        fn describe(&self) -> String {
            "recording".to_string()
        }

        async fn fetch_customers(&self) -> SourceResult<Vec<Customer>> {
            self.customer_calls.fetch_add(1, Ordering::SeqCst);
            self.calls.lock().unwrap().push("customers");
            Ok(vec![Customer::new(1, "Acme")])
        }

        async fn fetch_transactions(&self) -> SourceResult<Vec<Transaction>> {
            self.calls.lock().unwrap().push("transactions");
            if self.fail_transactions {
                return Err(SourceError::Status {
                    status: 500,
                    message: "boom".to_string(),
                });
            }
            Ok(vec![Transaction::new(10, 1, "2024-01-01", 5.0)])
        }
    }

    fn recording(fail_transactions: bool) -> RecordingSource {
        RecordingSource {
            calls: Mutex::new(Vec::new()),
            fail_transactions,
            customer_calls: AtomicUsize::new(0),
        }
    }

    #[tokio::test]
    async fn test_load_snapshot_fetches_customers_first() {
        let source = recording(false);
        let snapshot = load_snapshot(&source).await.unwrap();

        assert_eq!(*source.calls.lock().unwrap(), vec!["customers", "transactions"]);
        assert_eq!(snapshot.customers.len(), 1);
        assert_eq!(snapshot.transactions.len(), 1);
    }

    #[tokio::test]
    async fn test_load_snapshot_propagates_failure_without_retry() {
        let source = recording(true);
        let err = load_snapshot(&source).await.unwrap_err();

        assert!(matches!(err, SourceError::Status { status: 500, .. }));
        assert_eq!(source.customer_calls.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_error_display() {
        let err = SourceError::Status {
            status: 404,
            message: "missing".to_string(),
        };
        assert_eq!(err.to_string(), "Service returned 404: missing");
        assert_eq!(SourceError::Timeout.to_string(), "Request timeout");
    }

    #[test]
    fn test_json_error_conversion() {
        let json_err = serde_json::from_str::<Vec<Customer>>("not json").unwrap_err();
        let err: SourceError = json_err.into();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
