//! Standardized logging configuration for the market store.
//!
//! Provides consistent output across binaries and tests with support for
//! human-readable console output (default), a compact single-line
//! format, and JSON for log aggregation.
//!
//! # Environment Variables
//!
//! - `RUST_LOG`: Standard tracing filter (e.g., `info`, `market_store=debug`)
//! - `LOG_FORMAT`: Output format - `pretty` (default), `compact`, or `json`
//! - `LOG_TIMESTAMPS`: Timestamp format - `local` (default), `utc`, or `none`
//! - `LOG_LEVEL`: Default level when `RUST_LOG` is unset
//! - `LOG_LOCATION` / `LOG_THREAD_IDS`: toggle file:line and thread id fields
//!
//! # Usage
//!
//! ```rust,ignore
//! use market_store::logging::{init_logging, LogConfig};
//!
//! // Use defaults from environment
//! init_logging(LogConfig::from_env())?;
//!
//! // Or configure explicitly
//! init_logging(LogConfig {
//!     format: LogFormat::Json,
//!     default_level: "info".to_string(),
//!     ..Default::default()
//! })?;
//! ```

mod config;

pub use config::{init_logging, LogConfig, LogFormat, TimestampFormat};
