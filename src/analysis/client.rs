//! HTTP client for the external technical-analysis service.

use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use crate::config::AnalysisSettings;

use super::types::{AnalysisError, AnalysisPeriod, AnalysisResult};

/// Pass-through client for the analysis service.
///
/// Each call is a single GET with no retry and no caching; every failure
/// mode collapses to [`AnalysisError::Unavailable`] with the cause logged.
/// Downstream consumers treat absent analysis as a legitimate state, not
/// a fault of the store.
#[derive(Debug, Clone)]
pub struct AnalysisClient {
    client: Client,
    base_url: String,
}

impl AnalysisClient {
    /// Build a client for `base_url` with the given request timeout.
    ///
    /// The timeout is the transport default for every request; there is
    /// no per-call policy on top of it.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> AnalysisResult<Self> {
        let client = Client::builder().timeout(timeout).build().map_err(|e| {
            AnalysisError::Configuration(format!("Failed to create HTTP client: {}", e))
        })?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    /// Build a client from settings.
    pub fn from_settings(settings: &AnalysisSettings) -> AnalysisResult<Self> {
        Self::new(
            settings.base_url.as_str(),
            Duration::from_secs(settings.timeout_secs),
        )
    }

    /// Fetch the indicator bundle for one symbol over one period.
    pub async fn fetch_analysis(
        &self,
        symbol: &str,
        period: AnalysisPeriod,
    ) -> AnalysisResult<Value> {
        let url = self.endpoint_url(&format!("analysis/{}", symbol));
        let request = self.client.get(&url).query(&[("period", period.as_str())]);
        self.get_json(&url, request).await
    }

    /// Fetch indicator bundles for one symbol over every supported period.
    pub async fn fetch_all_period_analysis(&self, symbol: &str) -> AnalysisResult<Value> {
        let url = self.endpoint_url(&format!("analysis/{}/all-periods", symbol));
        let request = self.client.get(&url);
        self.get_json(&url, request).await
    }

    /// Fetch the catalog of indicators and periods the service supports.
    pub async fn fetch_available_indicators(&self) -> AnalysisResult<Value> {
        let url = self.endpoint_url("indicators");
        let request = self.client.get(&url);
        self.get_json(&url, request).await
    }

    fn endpoint_url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path)
    }

    /// Execute a request and parse the JSON body.
    ///
    /// Transport errors, non-success statuses, and unparsable bodies all
    /// collapse to [`AnalysisError::Unavailable`]; only the log carries
    /// the distinction.
    async fn get_json(&self, url: &str, request: RequestBuilder) -> AnalysisResult<Value> {
        debug!("GET {}", url);

        let response = match request.send().await {
            Ok(response) => response,
            Err(e) => {
                warn!("Analysis request to {} failed: {}", url, e);
                return Err(AnalysisError::Unavailable);
            }
        };

        let status = response.status();
        if !status.is_success() {
            warn!("Analysis request to {} returned status {}", url, status);
            return Err(AnalysisError::Unavailable);
        }

        match response.json::<Value>().await {
            Ok(body) => Ok(body),
            Err(e) => {
                warn!("Analysis response from {} was unparsable: {}", url, e);
                Err(AnalysisError::Unavailable)
            }
        }
    }
}
