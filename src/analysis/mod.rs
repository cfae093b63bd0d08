//! Client for the external technical-analysis service
//!
//! Indicator math is computed out of process; this module only forwards
//! requests and normalizes every failure to a single unavailability
//! error, logging the underlying cause. Responses are opaque JSON passed
//! through unchanged.

mod client;
mod types;

pub use client::*;
pub use types::*;
