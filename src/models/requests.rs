//! Request DTOs for the cache server API
//!
//! Defines the structure of incoming HTTP request bodies and query strings.

use serde::Deserialize;

/// Request body for the SET operation (POST /set)
///
/// # Fields
/// - `key`: The cache key to store the value under
/// - `value`: The value to store
/// - `ttl`: Optional TTL in seconds; when absent the predictor decides
#[derive(Debug, Clone, Deserialize)]
pub struct SetRequest {
    /// The cache key
    pub key: String,
    /// The value to store
    pub value: String,
    /// Optional TTL in seconds, may be zero or negative
    #[serde(default)]
    pub ttl: Option<i64>,
}

/// Query string for DELETE /delete
///
/// A missing `key` deletes the empty key.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct DeleteParams {
    #[serde(default)]
    pub key: String,
}

/// Query string for GET /history
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryParams {
    #[serde(default = "default_history_limit")]
    pub limit: usize,
}

fn default_history_limit() -> usize {
    50
}
