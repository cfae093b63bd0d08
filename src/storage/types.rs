//! Core data types for the market data store.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use thiserror::Error;

// =================================================================
// Observation Rows
// =================================================================

/// One priced observation of a symbol on a trading date.
///
/// Maps a single row of the `stock_data` table. The pair (symbol, date)
/// is unique in the table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockObservation {
    /// Ticker symbol
    pub symbol: String,
    /// Trading date (no intraday granularity)
    pub date: NaiveDate,
    /// Last trade price of the day
    pub last_trade_price: Decimal,
    /// Highest trade price of the day
    pub max_price: Decimal,
    /// Lowest trade price of the day
    pub min_price: Decimal,
    /// Average trade price of the day
    pub avg_price: Decimal,
    /// Percentage change against the previous close (signed)
    pub change_percentage: Decimal,
    /// Units traded
    pub volume: i64,
    /// Turnover in best-price trades
    pub turnover_best: Decimal,
    /// Total turnover across all trades
    pub total_turnover: Decimal,
}

/// Cross-sectional aggregate over the most recent trading date present
/// in the table. Computed fresh on every call, never persisted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MarketSummary {
    /// Distinct symbols observed on the latest date
    pub total_stocks: i64,
    /// Volume summed over those observations
    pub total_volume: i64,
    /// Mean change percentage over those observations
    pub avg_change: Decimal,
}

// =================================================================
// History Filtering
// =================================================================

/// Typed filter for history queries.
///
/// Fields combine conjunctively. The date range applies only when both
/// bounds are present; a single bound on its own is ignored, which is a
/// deliberate part of the query contract. Callers holding raw request
/// strings should build the filter through [`HistoryFilter::from_raw`]
/// so malformed dates are rejected before any query runs.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct HistoryFilter {
    /// Restrict to one symbol; `None` or empty means all symbols
    pub symbol: Option<String>,
    /// Inclusive lower date bound
    pub start_date: Option<NaiveDate>,
    /// Inclusive upper date bound
    pub end_date: Option<NaiveDate>,
}

impl HistoryFilter {
    /// Filter for a single symbol with no date bounds.
    pub fn for_symbol(symbol: impl Into<String>) -> Self {
        Self {
            symbol: Some(symbol.into()),
            ..Self::default()
        }
    }

    /// Build a filter from raw query-style strings.
    ///
    /// Dates must be `YYYY-MM-DD`; anything unparsable is rejected with
    /// [`StoreError::InvalidArgument`]. An empty or whitespace-only
    /// symbol is treated as absent. Raw values are never forwarded to
    /// the database.
    pub fn from_raw(
        symbol: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
    ) -> StoreResult<Self> {
        Ok(Self {
            symbol: symbol
                .map(str::trim)
                .filter(|s| !s.is_empty())
                .map(str::to_string),
            start_date: parse_date(start_date)?,
            end_date: parse_date(end_date)?,
        })
    }

    /// The date range predicate, present only when both bounds are set.
    pub fn date_range(&self) -> Option<(NaiveDate, NaiveDate)> {
        match (self.start_date, self.end_date) {
            (Some(start), Some(end)) => Some((start, end)),
            _ => None,
        }
    }
}

fn parse_date(raw: Option<&str>) -> StoreResult<Option<NaiveDate>> {
    match raw.map(str::trim).filter(|s| !s.is_empty()) {
        Some(s) => NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(Some)
            .map_err(|e| StoreError::InvalidArgument(format!("invalid date '{}': {}", s, e))),
        None => Ok(None),
    }
}

// =================================================================
// Errors
// =================================================================

/// Errors surfaced by the storage layer.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum StoreError {
    /// The backing store could not be reached or the query failed
    #[error("Storage unavailable: {0}")]
    Storage(#[from] sqlx::Error),

    /// Caller-supplied input was rejected before any query ran
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

/// Result type for storage operations.
pub type StoreResult<T> = Result<T, StoreError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_raw_parses_all_fields() {
        let filter =
            HistoryFilter::from_raw(Some("ALK"), Some("2024-01-01"), Some("2024-01-31")).unwrap();
        assert_eq!(filter.symbol.as_deref(), Some("ALK"));
        assert_eq!(
            filter.date_range(),
            Some((
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                NaiveDate::from_ymd_opt(2024, 1, 31).unwrap(),
            ))
        );
    }

    #[test]
    fn test_from_raw_rejects_malformed_date() {
        let err = HistoryFilter::from_raw(None, Some("01-01-2024"), None).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));

        let err = HistoryFilter::from_raw(None, None, Some("not-a-date")).unwrap_err();
        assert!(matches!(err, StoreError::InvalidArgument(_)));
    }

    #[test]
    fn test_from_raw_treats_blank_symbol_as_absent() {
        let filter = HistoryFilter::from_raw(Some("   "), None, None).unwrap();
        assert_eq!(filter.symbol, None);

        let filter = HistoryFilter::from_raw(Some(""), None, None).unwrap();
        assert_eq!(filter.symbol, None);
    }

    #[test]
    fn test_date_range_requires_both_bounds() {
        let filter = HistoryFilter::from_raw(None, Some("2024-01-01"), None).unwrap();
        assert_eq!(filter.date_range(), None);

        let filter = HistoryFilter::from_raw(None, None, Some("2024-01-31")).unwrap();
        assert_eq!(filter.date_range(), None);

        assert_eq!(HistoryFilter::for_symbol("ALK").date_range(), None);
    }
}
