//! Storage layer for historical market data
//!
//! This module provides pooled, read-only access to the `stock_data`
//! observation table: the distinct symbol catalog, the latest observation
//! per symbol, filtered history, and the cross-sectional market summary.
//! Schema provisioning for deploy and test setup lives here too; nothing
//! else writes to the table.

mod repository;
mod schema;
mod types;

pub use repository::*;
pub use schema::*;
pub use types::*;
