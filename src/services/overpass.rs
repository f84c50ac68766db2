use crate::models::CandidateFeature;
use crate::services::SpatialQueryClient;
use async_trait::async_trait;
use reqwest::Client;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Extra time the HTTP client waits beyond the query's own timeout
const TRANSPORT_GRACE_SECS: u64 = 5;

/// Errors that can occur when querying Overpass
#[derive(Debug, Error)]
pub enum QueryError {
    #[error("Overpass query timed out: {0}")]
    Timeout(String),

    #[error("HTTP request failed: {0}")]
    Transport(reqwest::Error),

    #[error("API returned error: {0}")]
    Api(reqwest::StatusCode),

    #[error("Invalid response format: {0}")]
    InvalidResponse(String),

    #[error("Overpass runtime error: {0}")]
    Runtime(String),
}

impl From<reqwest::Error> for QueryError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            QueryError::Timeout(e.to_string())
        } else {
            QueryError::Transport(e)
        }
    }
}

impl QueryError {
    pub fn is_timeout(&self) -> bool {
        matches!(self, QueryError::Timeout(_))
    }
}

/// Body of an Overpass `[out:json]` response
#[derive(Debug, Clone, Deserialize)]
pub struct OverpassResponse {
    #[serde(default)]
    pub elements: Vec<CandidateFeature>,
    /// Set by the server on runtime errors, including timeouts
    #[serde(default)]
    pub remark: Option<String>,
}

impl OverpassResponse {
    /// Convert into candidates, failing when the server reports a runtime error.
    ///
    /// A failed query returns whatever it found so far, which must not be
    /// mistaken for a complete answer. Timeouts get their own variant.
    pub fn into_candidates(self) -> Result<Vec<CandidateFeature>, QueryError> {
        match self.remark {
            Some(remark) if remark.to_lowercase().contains("timed out") => {
                Err(QueryError::Timeout(remark))
            }
            Some(remark) if remark.starts_with("runtime error") => Err(QueryError::Runtime(remark)),
            Some(remark) => {
                tracing::debug!("Overpass remark: {}", remark);
                Ok(self.elements)
            }
            None => Ok(self.elements),
        }
    }
}

/// Overpass API client
pub struct OverpassClient {
    url: String,
    client: Client,
}

impl OverpassClient {
    /// Create a client for the interpreter endpoint at `url`
    pub fn new(url: String, query_timeout_secs: u32) -> Result<Self, QueryError> {
        Self::with_transport_timeout(
            url,
            Duration::from_secs(u64::from(query_timeout_secs) + TRANSPORT_GRACE_SECS),
        )
    }

    /// Create a client whose whole request, body included, must finish within `timeout`
    pub fn with_transport_timeout(url: String, timeout: Duration) -> Result<Self, QueryError> {
        let client = Client::builder()
            .timeout(timeout)
            .user_agent(concat!("checkin-checker/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(QueryError::Transport)?;

        Ok(Self { url, client })
    }

    pub fn url(&self) -> &str {
        &self.url
    }
}

#[async_trait]
impl SpatialQueryClient for OverpassClient {
    async fn query(&self, query: &str) -> Result<Vec<CandidateFeature>, QueryError> {
        let response = self
            .client
            .post(&self.url)
            .body(query.to_string())
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_else(|_| "Unable to read body".to_string());
            tracing::error!("Overpass query failed: {} - {}", status, body);
            return Err(QueryError::Api(status));
        }

        // The body can still time out after the headers arrived
        let body = response.text().await?;
        let parsed: OverpassResponse = serde_json::from_str(&body)
            .map_err(|e| QueryError::InvalidResponse(format!("Failed to parse elements: {}", e)))?;

        parsed.into_candidates()
    }
}
