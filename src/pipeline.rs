//! Aggregation Pipeline
//!
//! Pure derivations over the fetched collections, recomputed on every render:
//! - Totals per customer, filtered by a case-insensitive name search
//! - Per-date series for one selected customer
//!
//! Transactions are joined to customers by `customer_id`. A transaction whose
//! `customer_id` matches no customer contributes to no total.

use std::collections::HashMap;

use crate::model::{Customer, CustomerSummary, DatePoint, Transaction};

/// Case-insensitive substring match of `search` against a customer name.
///
/// The empty string matches every name.
pub fn matches_search(name: &str, search: &str) -> bool {
    search.is_empty() || name.to_lowercase().contains(&search.to_lowercase())
}

/// Customers whose name matches `search`, in list order
pub fn filter_customers<'a>(customers: &'a [Customer], search: &str) -> Vec<&'a Customer> {
    customers
        .iter()
        .filter(|c| matches_search(&c.name, search))
        .collect()
}

/// Sum of the amounts of all transactions owned by `customer_id`
pub fn customer_total(transactions: &[Transaction], customer_id: u64) -> f64 {
    transactions
        .iter()
        .filter(|t| t.customer_id == customer_id)
        .fold(0.0, |acc, t| acc + t.amount)
}

/// One summary row per customer matching `search`, in customer-list order
pub fn customer_totals(
    customers: &[Customer],
    transactions: &[Transaction],
    search: &str,
) -> Vec<CustomerSummary> {
    filter_customers(customers, search)
        .into_iter()
        .map(|c| CustomerSummary {
            id: c.id,
            name: c.name.clone(),
            amount: customer_total(transactions, c.id),
        })
        .collect()
}

/// Amounts of one customer's transactions summed per date.
///
/// Dates appear in the order they are first encountered in `transactions`.
pub fn date_series(transactions: &[Transaction], customer_id: u64) -> Vec<DatePoint> {
    let mut series: Vec<DatePoint> = Vec::new();
    let mut positions: HashMap<&str, usize> = HashMap::new();

    for tx in transactions.iter().filter(|t| t.customer_id == customer_id) {
        match positions.get(tx.date.as_str()) {
            Some(&idx) => series[idx].amount += tx.amount,
            None => {
                positions.insert(tx.date.as_str(), series.len());
                series.push(DatePoint {
                    date: tx.date.clone(),
                    amount: tx.amount,
                });
            }
        }
    }

    series
}

/// Look up a customer by identifier
pub fn find_customer(customers: &[Customer], id: u64) -> Option<&Customer> {
    customers.iter().find(|c| c.id == id)
}

/// Resolve a 1-based position in the customer list.
///
/// Returns `None` for position 0 or a position past the end of the list.
pub fn customer_at_position(customers: &[Customer], position: usize) -> Option<&Customer> {
    position.checked_sub(1).and_then(|idx| customers.get(idx))
}

/// Transactions whose `customer_id` references no known customer
pub fn unmatched_transactions<'a>(
    customers: &[Customer],
    transactions: &'a [Transaction],
) -> Vec<&'a Transaction> {
    transactions
        .iter()
        .filter(|t| find_customer(customers, t.customer_id).is_none())
        .collect()
}
