use std::time::Duration;

use serde::Serialize;
use thiserror::Error;

use crate::config;

#[derive(Debug, Error)]
pub enum GhostError {
    #[error("Ghost publisher request failed: {0}")]
    Request(#[from] reqwest::Error),
}

/// What the publisher said about a record
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GhostOutcome {
    Delivered,
    /// Non-200 reply, with the publisher's response body
    Rejected(String),
}

#[derive(Debug, Serialize)]
struct GhostPayload<'a> {
    table_name: &'a str,
    record_id: i64,
}

/// Client for the crawler's Ghost publishing endpoint
pub struct GhostClient {
    client: reqwest::Client,
    endpoint: String,
    timeout: Duration,
}

impl GhostClient {
    pub fn new(endpoint: impl Into<String>, timeout: Duration) -> Self {
        Self {
            client: reqwest::Client::new(),
            endpoint: endpoint.into(),
            timeout,
        }
    }

    pub fn from_config() -> Self {
        let settings = &config::config().ghost;
        Self::new(settings.endpoint.clone(), Duration::from_secs(settings.timeout_secs))
    }

    pub async fn publish(&self, table_name: &str, record_id: i64) -> Result<GhostOutcome, GhostError> {
        let response = self
            .client
            .post(&self.endpoint)
            .timeout(self.timeout)
            .json(&GhostPayload { table_name, record_id })
            .send()
            .await?;

        if response.status() == reqwest::StatusCode::OK {
            tracing::info!("Published {} #{} to Ghost", table_name, record_id);
            return Ok(GhostOutcome::Delivered);
        }

        let status = response.status();
        let body = response.text().await?;
        tracing::warn!("Ghost rejected {} #{} ({}): {}", table_name, record_id, status, body);
        Ok(GhostOutcome::Rejected(body))
    }
}

impl GhostOutcome {
    pub fn message(&self, table_name: &str, record_id: i64) -> String {
        match self {
            GhostOutcome::Delivered => format!("Ghost publish succeeded: {} - {}", table_name, record_id),
            GhostOutcome::Rejected(body) => format!("Ghost publish failed: {}", body),
        }
    }
}
