//! Schema provisioning for the `stock_data` table.

use sqlx::PgPool;
use tracing::info;

use super::types::StoreResult;

/// DDL for the observation table and its supporting index.
///
/// The (symbol, date) primary key is what makes "latest observation per
/// symbol" well defined; the date index serves the summary and history
/// queries, which scan by date.
pub const SCHEMA_SQL: &str = r#"
CREATE TABLE IF NOT EXISTS stock_data (
    symbol TEXT NOT NULL,
    date DATE NOT NULL,
    last_trade_price NUMERIC(12,2) NOT NULL,
    max_price NUMERIC(12,2) NOT NULL,
    min_price NUMERIC(12,2) NOT NULL,
    avg_price NUMERIC(12,2) NOT NULL,
    change_percentage NUMERIC(6,2) NOT NULL,
    volume BIGINT NOT NULL,
    turnover_best NUMERIC(18,2) NOT NULL DEFAULT 0,
    total_turnover NUMERIC(18,2) NOT NULL DEFAULT 0,
    created_at TIMESTAMPTZ NOT NULL DEFAULT NOW(),
    PRIMARY KEY (symbol, date)
);

CREATE INDEX IF NOT EXISTS idx_stock_data_date ON stock_data (date DESC);
"#;

/// Create the observation table and index if they do not exist.
///
/// Idempotent; intended for deploy and test setup. The query API itself
/// never writes to the table.
pub async fn ensure_schema(pool: &PgPool) -> StoreResult<()> {
    info!("Ensuring stock_data schema");

    for statement in SCHEMA_SQL.split(';').map(str::trim).filter(|s| !s.is_empty()) {
        sqlx::query(statement).execute(pool).await?;
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_schema_sql_defines_table_and_key() {
        assert!(SCHEMA_SQL.contains("CREATE TABLE IF NOT EXISTS stock_data"));
        assert!(SCHEMA_SQL.contains("PRIMARY KEY (symbol, date)"));
        assert!(SCHEMA_SQL.contains("CREATE INDEX IF NOT EXISTS"));
    }

    #[test]
    fn test_schema_sql_splits_into_statements() {
        let statements: Vec<&str> = SCHEMA_SQL
            .split(';')
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .collect();
        assert_eq!(statements.len(), 2);
    }
}
