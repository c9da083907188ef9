//! API Routes
//!
//! Route handlers organized by functionality.

pub mod customers;
pub mod dashboard;
pub mod health;
