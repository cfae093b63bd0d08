//! # Market Store
//!
//! Read-side access layer over a historical equity price table, plus a
//! thin client for an external technical-analysis service.
//!
//! ## Features
//!
//! - **Symbol catalog**: distinct symbols present in the store
//! - **Latest snapshot**: most recent observation for every symbol
//! - **History queries**: typed filtering with parameterized SQL, newest first
//! - **Market summary**: cross-sectional aggregate over the latest trading date
//! - **Analysis pass-through**: indicator bundles fetched from an external
//!   service, with every failure collapsed to a single unavailability error
//!
//! ## Architecture
//!
//! All queries run against one `stock_data` table keyed by (symbol, date);
//! this crate never writes to it beyond optional schema provisioning.
//! Indicator math lives in a separate service reached over HTTP; its
//! responses are forwarded as opaque JSON.

pub mod analysis;
pub mod config;
pub mod logging;
pub mod storage;

// Re-export commonly used types
pub use analysis::{AnalysisClient, AnalysisError, AnalysisPeriod, AnalysisResult};
pub use config::Settings;
pub use storage::{
    HistoryFilter, MarketDataStore, MarketSummary, StockObservation, StoreError, StoreResult,
};
