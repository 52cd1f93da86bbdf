//! TTL Predictor Module
//!
//! Asks an external service how long a key should live before it is cached.

use std::time::Duration;

use async_trait::async_trait;
use chrono::TimeDelta;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use thiserror::Error;
use tracing::debug;

// == Predictor Error ==
#[derive(Error, Debug)]
pub enum PredictorError {
    /// Transport failure, timeout or undecodable body
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Service answered with a non-success status
    #[error("predictor returned HTTP {0}: {1}")]
    Status(u16, String),

    /// Client could not be built
    #[error("client error: {0}")]
    Client(String),

    /// Service answered with a TTL that does not fit a duration
    #[error("predicted TTL out of range: {0}s")]
    InvalidTtl(i64),
}

// == TTL Predictor ==
/// Decides the TTL for a key about to be stored.
#[async_trait]
pub trait TtlPredictor: Send + Sync {
    async fn predict(&self, key: &str) -> Result<TimeDelta, PredictorError>;
}

#[derive(Debug, Serialize)]
struct PredictRequest<'a> {
    key: &'a str,
}

#[derive(Debug, Deserialize)]
struct PredictResponse {
    /// Seconds
    ttl: i64,
}

// == HTTP Predictor ==
/// Posts `{"key": ...}` to the prediction endpoint and reads `{"ttl": seconds}`.
#[derive(Debug, Clone)]
pub struct HttpTtlPredictor {
    client: Client,
    url: String,
}

impl HttpTtlPredictor {
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self, PredictorError> {
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| PredictorError::Client(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self {
            client,
            url: url.into(),
        })
    }
}

#[async_trait]
impl TtlPredictor for HttpTtlPredictor {
    async fn predict(&self, key: &str) -> Result<TimeDelta, PredictorError> {
        let response = self
            .client
            .post(&self.url)
            .json(&PredictRequest { key })
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status().as_u16();
            let body = response.text().await.unwrap_or_default();
            return Err(PredictorError::Status(status, body));
        }

        let body: PredictResponse = response.json().await?;
        debug!(key, ttl = body.ttl, "Predicted TTL");
        TimeDelta::try_seconds(body.ttl).ok_or(PredictorError::InvalidTtl(body.ttl))
    }
}

// == Fixed Predictor ==
/// Returns the same TTL for every key. Useful offline and in tests.
#[derive(Debug, Clone, Copy)]
pub struct FixedTtlPredictor(pub TimeDelta);

#[async_trait]
impl TtlPredictor for FixedTtlPredictor {
    async fn predict(&self, _key: &str) -> Result<TimeDelta, PredictorError> {
        Ok(self.0)
    }
}
