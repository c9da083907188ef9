//! In-memory Data Source
//!
//! Serves fixed collections. Can be loaded from a JSON file shaped like
//! `{ "customers": [...], "transactions": [...] }`.

use async_trait::async_trait;
use serde::Deserialize;
use std::path::Path;

use super::{DataSource, SourceResult};
use crate::model::{Customer, Transaction};

/// Fixed customers and transactions
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MemorySource {
    #[serde(default)]
    customers: Vec<Customer>,
    #[serde(default)]
    transactions: Vec<Transaction>,
    #[serde(skip)]
    label: Option<String>,
}

impl MemorySource {
    pub fn new(customers: Vec<Customer>, transactions: Vec<Transaction>) -> Self {
        Self {
            customers,
            transactions,
            label: None,
        }
    }

    /// Read both collections from a JSON file
    pub fn from_file(path: &Path) -> SourceResult<Self> {
        let content = std::fs::read_to_string(path)?;
        let mut source: MemorySource = serde_json::from_str(&content)?;
        source.label = Some(path.display().to_string());
        Ok(source)
    }
}

#[async_trait]
impl DataSource for MemorySource {
    fn describe(&self) -> String {
        self.label.clone().unwrap_or_else(|| "memory".to_string())
    }

    async fn fetch_customers(&self) -> SourceResult<Vec<Customer>> {
        Ok(self.customers.clone())
    }

    async fn fetch_transactions(&self) -> SourceResult<Vec<Transaction>> {
        Ok(self.transactions.clone())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::source::SourceError;
    use std::io::Write;

    #[tokio::test]
    async fn test_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{
                "customers": [{{"id": 1, "name": "Acme"}}],
                "transactions": [{{"id": 10, "customer_id": 1, "date": "2024-01-01", "amount": 5}}]
            }}"#
        )
        .unwrap();

        let source = MemorySource::from_file(file.path()).unwrap();
        assert_eq!(source.describe(), file.path().display().to_string());
        assert_eq!(source.fetch_customers().await.unwrap().len(), 1);
        assert_eq!(source.fetch_transactions().await.unwrap()[0].amount, 5.0);
    }

    #[test]
    fn test_from_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let err = MemorySource::from_file(&dir.path().join("absent.json")).unwrap_err();
        assert!(matches!(err, SourceError::Io(_)));
    }

    #[test]
    fn test_from_invalid_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "[1, 2, 3]").unwrap();
        let err = MemorySource::from_file(file.path()).unwrap_err();
        assert!(matches!(err, SourceError::Decode(_)));
    }
}
