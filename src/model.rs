//! Core data types for the Summit dashboard
//!
//! This module defines the records fetched from the remote service and the
//! values derived from them:
//! - `Customer` and `Transaction`: raw records, immutable once fetched
//! - `CustomerSummary`: one table row (customer plus transaction total)
//! - `DatePoint`: one entry of a per-customer date series
//! - `Snapshot`: both collections as loaded at one point in time

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A customer record
///
/// The service may send additional fields (e.g. an `amount`); they are ignored.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Customer {
    /// Unique identifier
    pub id: u64,
    /// Display name
    pub name: String,
}

impl Customer {
    pub fn new(id: u64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
        }
    }
}

/// A dated, amount-bearing record tied to one customer
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transaction {
    /// Unique identifier
    pub id: u64,
    /// Owning customer (not validated against the customer list)
    pub customer_id: u64,
    /// Calendar date exactly as the service sends it
    pub date: String,
    /// Transaction amount
    pub amount: f64,
}

impl Transaction {
    pub fn new(id: u64, customer_id: u64, date: impl Into<String>, amount: f64) -> Self {
        Self {
            id,
            customer_id,
            date: date.into(),
            amount,
        }
    }
}

/// A table row: a customer and the sum of its transaction amounts
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CustomerSummary {
    pub id: u64,
    pub name: String,
    pub amount: f64,
}

/// One point of a per-customer date series
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DatePoint {
    pub date: String,
    pub amount: f64,
}

/// Both collections as fetched from a data source
#[derive(Debug, Clone, Serialize)]
pub struct Snapshot {
    pub customers: Vec<Customer>,
    pub transactions: Vec<Transaction>,
    /// When the second fetch completed
    pub loaded_at: DateTime<Utc>,
}

impl Snapshot {
    pub fn new(customers: Vec<Customer>, transactions: Vec<Transaction>) -> Self {
        Self {
            customers,
            transactions,
            loaded_at: Utc::now(),
        }
    }
}

impl std::fmt::Display for Snapshot {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "{} customers, {} transactions (loaded {})",
            self.customers.len(),
            self.transactions.len(),
            self.loaded_at.format("%Y-%m-%dT%H:%M:%SZ")
        )
    }
}
