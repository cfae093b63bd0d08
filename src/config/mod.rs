//! Configuration loading for the market store
//!
//! Settings are layered from `config/default.toml`, an optional
//! `RUN_MODE`-specific file, `config/local.toml`, and finally
//! `MARKET_STORE__*` environment variables.

mod settings;

pub use settings::{AnalysisSettings, DatabaseSettings, Settings};
