//! Read-side repository over the `stock_data` table.

use std::time::Duration;

use sqlx::postgres::{PgPoolOptions, PgRow};
use sqlx::{PgPool, Postgres, QueryBuilder, Row};
use tracing::{debug, info};

use crate::config::DatabaseSettings;

use super::types::{HistoryFilter, MarketSummary, StockObservation, StoreResult};

/// Column list shared by every row-returning query.
const OBSERVATION_COLUMNS: &str = "symbol, date, last_trade_price, max_price, min_price, \
     avg_price, change_percentage, volume, turnover_best, total_turnover";

/// Pooled, read-only access to the market data table.
///
/// Every operation is an independent, stateless query; calls may run
/// concurrently without coordination. Empty results are valid outcomes,
/// never errors.
#[derive(Debug, Clone)]
pub struct MarketDataStore {
    pool: PgPool,
}

impl MarketDataStore {
    /// Wrap an existing connection pool.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }

    /// Connect a new pool from database settings.
    pub async fn from_settings(settings: &DatabaseSettings) -> StoreResult<Self> {
        info!("Connecting to market data store");
        let pool = PgPoolOptions::new()
            .max_connections(settings.max_connections)
            .min_connections(settings.min_connections)
            .acquire_timeout(Duration::from_secs(30))
            .connect(&settings.url)
            .await?;
        Ok(Self::new(pool))
    }

    /// Get the underlying connection pool.
    pub fn pool(&self) -> &PgPool {
        &self.pool
    }

    /// Get the distinct symbols present in the table.
    ///
    /// Each symbol appears exactly once; the order is unspecified and
    /// callers must not depend on it.
    pub async fn get_symbols(&self) -> StoreResult<Vec<String>> {
        debug!("Fetching distinct symbols");

        let rows = sqlx::query("SELECT DISTINCT symbol FROM stock_data")
            .fetch_all(&self.pool)
            .await?;

        Ok(rows.iter().map(|row| row.get("symbol")).collect())
    }

    /// Get the latest observation for every distinct symbol.
    ///
    /// Returns one row per symbol, carrying the maximum `date` recorded
    /// for it. The (symbol, date) primary key rules out ties; should the
    /// table ever hold a duplicate pair anyway, exactly one of the
    /// duplicates is returned and which one is unspecified.
    pub async fn get_latest_observations(&self) -> StoreResult<Vec<StockObservation>> {
        debug!("Fetching latest observation per symbol");

        let sql = format!(
            "SELECT DISTINCT ON (symbol) {} FROM stock_data ORDER BY symbol, date DESC",
            OBSERVATION_COLUMNS
        );
        let rows = sqlx::query(&sql).fetch_all(&self.pool).await?;

        Ok(rows.iter().map(map_observation).collect())
    }

    /// Get the observations matching `filter`, newest first.
    ///
    /// Rows are ordered by `date` descending, then `symbol` ascending;
    /// downstream consumers rely on that order. The date range applies
    /// only when both bounds are set (see [`HistoryFilter`]); a reversed
    /// range matches nothing and yields an empty result.
    pub async fn get_history(&self, filter: &HistoryFilter) -> StoreResult<Vec<StockObservation>> {
        debug!("Fetching history with filter: {:?}", filter);

        let mut query = history_query(filter);
        let rows = query.build().fetch_all(&self.pool).await?;

        Ok(rows.iter().map(map_observation).collect())
    }

    /// Get the cross-sectional summary over the most recent date in the
    /// table.
    ///
    /// An empty table yields the zero-valued summary rather than an
    /// error.
    pub async fn get_market_summary(&self) -> StoreResult<MarketSummary> {
        debug!("Fetching market summary");

        let row = sqlx::query(
            "SELECT COUNT(DISTINCT symbol) AS total_stocks, \
             COALESCE(SUM(volume), 0)::BIGINT AS total_volume, \
             COALESCE(AVG(change_percentage), 0) AS avg_change \
             FROM stock_data \
             WHERE date = (SELECT MAX(date) FROM stock_data)",
        )
        .fetch_one(&self.pool)
        .await?;

        Ok(MarketSummary {
            total_stocks: row.get("total_stocks"),
            total_volume: row.get("total_volume"),
            avg_change: row.get("avg_change"),
        })
    }
}

/// Build the history query for `filter`.
///
/// Predicates combine conjunctively and every value is bound, never
/// spliced into the SQL text.
fn history_query(filter: &HistoryFilter) -> QueryBuilder<'_, Postgres> {
    let mut query = QueryBuilder::new(format!("SELECT {} FROM stock_data", OBSERVATION_COLUMNS));
    let mut prefix = " WHERE ";

    if let Some(symbol) = filter
        .symbol
        .as_deref()
        .map(str::trim)
        .filter(|s| !s.is_empty())
    {
        query.push(prefix).push("symbol = ").push_bind(symbol);
        prefix = " AND ";
    }

    if let Some((start, end)) = filter.date_range() {
        query
            .push(prefix)
            .push("date BETWEEN ")
            .push_bind(start)
            .push(" AND ")
            .push_bind(end);
    }

    query.push(" ORDER BY date DESC, symbol ASC");
    query
}

fn map_observation(row: &PgRow) -> StockObservation {
    StockObservation {
        symbol: row.get("symbol"),
        date: row.get("date"),
        last_trade_price: row.get("last_trade_price"),
        max_price: row.get("max_price"),
        min_price: row.get("min_price"),
        avg_price: row.get("avg_price"),
        change_percentage: row.get("change_percentage"),
        volume: row.get("volume"),
        turnover_best: row.get("turnover_best"),
        total_turnover: row.get("total_turnover"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn day(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_history_query_without_filters() {
        let sql = history_query(&HistoryFilter::default()).into_sql();
        assert!(!sql.contains("WHERE"));
        assert!(sql.ends_with(" ORDER BY date DESC, symbol ASC"));
    }

    #[test]
    fn test_history_query_with_symbol() {
        let sql = history_query(&HistoryFilter::for_symbol("ALK")).into_sql();
        assert!(sql.contains(" WHERE symbol = $1"));
        assert!(!sql.contains("BETWEEN"));
        assert!(sql.ends_with(" ORDER BY date DESC, symbol ASC"));
    }

    #[test]
    fn test_history_query_with_date_range() {
        let filter = HistoryFilter {
            symbol: None,
            start_date: Some(day(2024, 1, 1)),
            end_date: Some(day(2024, 1, 31)),
        };
        let sql = history_query(&filter).into_sql();
        assert!(sql.contains(" WHERE date BETWEEN $1 AND $2"));
    }

    #[test]
    fn test_history_query_with_symbol_and_range() {
        let filter = HistoryFilter {
            symbol: Some("ALK".to_string()),
            start_date: Some(day(2024, 1, 1)),
            end_date: Some(day(2024, 1, 31)),
        };
        let sql = history_query(&filter).into_sql();
        assert!(sql.contains(" WHERE symbol = $1"));
        assert!(sql.contains(" AND date BETWEEN $2 AND $3"));
        assert!(sql.ends_with(" ORDER BY date DESC, symbol ASC"));
    }

    #[test]
    fn test_history_query_ignores_single_bound() {
        let filter = HistoryFilter {
            symbol: None,
            start_date: Some(day(2024, 1, 1)),
            end_date: None,
        };
        let sql = history_query(&filter).into_sql();
        assert!(!sql.contains("WHERE"));

        let filter = HistoryFilter {
            symbol: None,
            start_date: None,
            end_date: Some(day(2024, 1, 31)),
        };
        let sql = history_query(&filter).into_sql();
        assert!(!sql.contains("WHERE"));
    }

    #[test]
    fn test_history_query_treats_blank_symbol_as_absent() {
        let sql = history_query(&HistoryFilter::for_symbol("   ")).into_sql();
        assert!(!sql.contains("WHERE"));
    }
}
