//! Types for the analysis service boundary.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors surfaced by the analysis client.
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum AnalysisError {
    /// The analysis service could not be reached, answered with a
    /// non-success status, or returned an unparsable body. The
    /// underlying cause is logged, not carried.
    #[error("Analysis service unavailable")]
    Unavailable,

    /// Client construction failed before any request was made
    #[error("Configuration error: {0}")]
    Configuration(String),
}

/// Result type for analysis operations.
pub type AnalysisResult<T> = Result<T, AnalysisError>;

/// Time period an analysis bundle is computed over.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AnalysisPeriod {
    /// Daily bars (default)
    #[default]
    Daily,
    /// Weekly bars
    Weekly,
    /// Monthly bars
    Monthly,
}

impl AnalysisPeriod {
    /// The wire value of the period, as the service expects it.
    pub fn as_str(&self) -> &'static str {
        match self {
            AnalysisPeriod::Daily => "daily",
            AnalysisPeriod::Weekly => "weekly",
            AnalysisPeriod::Monthly => "monthly",
        }
    }

    /// Parse a period from string, falling back to daily.
    pub fn from_str(s: &str) -> Self {
        match s.to_lowercase().as_str() {
            "weekly" => AnalysisPeriod::Weekly,
            "monthly" => AnalysisPeriod::Monthly,
            _ => AnalysisPeriod::Daily,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_period_round_trip() {
        for period in [
            AnalysisPeriod::Daily,
            AnalysisPeriod::Weekly,
            AnalysisPeriod::Monthly,
        ] {
            assert_eq!(AnalysisPeriod::from_str(period.as_str()), period);
        }
    }

    #[test]
    fn test_period_from_str_falls_back_to_daily() {
        assert_eq!(AnalysisPeriod::from_str("WEEKLY"), AnalysisPeriod::Weekly);
        assert_eq!(AnalysisPeriod::from_str("hourly"), AnalysisPeriod::Daily);
        assert_eq!(AnalysisPeriod::default(), AnalysisPeriod::Daily);
    }

    #[test]
    fn test_period_serde_matches_wire_value() {
        let json = serde_json::to_string(&AnalysisPeriod::Weekly).unwrap();
        assert_eq!(json, "\"weekly\"");

        let period: AnalysisPeriod = serde_json::from_str("\"monthly\"").unwrap();
        assert_eq!(period, AnalysisPeriod::Monthly);
    }
}
