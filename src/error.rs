//! Error types for the cache and its HTTP service
//!
//! Provides unified error handling using thiserror.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

use crate::history::HistoryError;
use crate::predictor::PredictorError;

// == Cache Error Enum ==
/// Errors raised by the cache core. Only construction can fail.
#[derive(Error, Debug)]
pub enum CacheError {
    /// Capacity was not a positive integer
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),
}

// == Api Error Enum ==
/// Errors surfaced by HTTP handlers.
#[derive(Error, Debug)]
pub enum ApiError {
    /// Key not found in cache (absent or expired)
    #[error("Key not found: {0}")]
    NotFound(String),

    /// Invalid request data
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    /// TTL prediction service failed
    #[error("Prediction failed: {0}")]
    Prediction(#[from] PredictorError),

    /// History log could not be read
    #[error("History unavailable: {0}")]
    History(#[from] HistoryError),
}

// == IntoResponse Implementation ==
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Prediction(_) | ApiError::History(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        let body = Json(json!({
            "error": self.to_string()
        }));

        (status, body).into_response()
    }
}

// == Result Type Aliases ==
/// Convenience Result type for the cache core.
pub type Result<T> = std::result::Result<T, CacheError>;

/// Convenience Result type for HTTP handlers.
pub type ApiResult<T> = std::result::Result<T, ApiError>;
