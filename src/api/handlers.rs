//! API Handlers
//!
//! HTTP request handlers for each cache server endpoint.

use std::sync::Arc;

use anyhow::Context;
use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::TimeDelta;
use tracing::{info, warn};

use crate::cache::ChronoCache;
use crate::config::Config;
use crate::error::{ApiError, ApiResult};
use crate::history::{HistoryRecord, HistoryStore};
use crate::models::{
    DeleteParams, DeleteResponse, EntryResponse, GetResponse, HealthResponse, HistoryParams,
    SetRequest, SetResponse,
};
use crate::predictor::{HttpTtlPredictor, TtlPredictor};

/// Application state shared across all handlers.
///
/// The cache does its own locking, so handlers share it through a plain `Arc`.
#[derive(Clone)]
pub struct AppState {
    pub cache: Arc<ChronoCache>,
    pub predictor: Arc<dyn TtlPredictor>,
    pub history: Arc<HistoryStore>,
}

impl AppState {
    /// Creates a new AppState from its parts.
    pub fn new(
        cache: ChronoCache,
        predictor: impl TtlPredictor + 'static,
        history: HistoryStore,
    ) -> Self {
        Self {
            cache: Arc::new(cache),
            predictor: Arc::new(predictor),
            history: Arc::new(history),
        }
    }

    /// Creates a new AppState from configuration.
    ///
    /// Fails when the capacity is not positive, the predictor client cannot be
    /// built, or the history database cannot be opened.
    pub fn from_config(config: &Config) -> anyhow::Result<Self> {
        let cache = ChronoCache::new(config.cache_capacity()?, config.default_ttl())?;
        let predictor = HttpTtlPredictor::new(&config.predictor_url, config.predictor_timeout())?;
        let history = HistoryStore::open(&config.history_db).with_context(|| {
            format!("opening history database {}", config.history_db.display())
        })?;
        Ok(Self::new(cache, predictor, history))
    }
}

/// Handler for POST /set
///
/// Stores a key-value pair. The TTL comes from the request when given,
/// otherwise from the prediction service.
pub async fn set_handler(
    State(state): State<AppState>,
    Json(req): Json<SetRequest>,
) -> ApiResult<Json<SetResponse>> {
    let ttl = match req.ttl {
        Some(secs) => TimeDelta::try_seconds(secs)
            .ok_or_else(|| ApiError::InvalidRequest(format!("TTL out of range: {}", secs)))?,
        None => state.predictor.predict(&req.key).await.map_err(|e| {
            warn!(key = %req.key, error = %e, "TTL prediction failed");
            ApiError::from(e)
        })?,
    };
    let ttl_secs = ttl.num_seconds();

    state.cache.set_with_ttl(req.key.clone(), req.value.clone(), ttl);

    // The entry is already cached; a lost history row is not worth failing for.
    if let Err(e) = state.history.record(&req.key, &req.value, ttl_secs) {
        warn!(key = %req.key, error = %e, "Failed to record history");
    }

    info!(key = %req.key, ttl = ttl_secs, "Key set");
    Ok(Json(SetResponse::new(req.key, ttl_secs)))
}

/// Handler for GET /get/:key
///
/// Retrieves a value and renews its TTL.
pub async fn get_handler(
    State(state): State<AppState>,
    Path(key): Path<String>,
) -> ApiResult<Json<GetResponse>> {
    match state.cache.get(&key) {
        Some(value) => Ok(Json(GetResponse::new(key, value))),
        None => Err(ApiError::NotFound(key)),
    }
}

/// Handler for GET /cache
///
/// Lists every held entry, least recently used first.
pub async fn cache_handler(State(state): State<AppState>) -> Json<Vec<EntryResponse>> {
    let entries = state
        .cache
        .snapshot()
        .into_iter()
        .map(EntryResponse::from)
        .collect();
    Json(entries)
}

/// Handler for DELETE /delete?key=
///
/// Deleting a missing key still succeeds.
pub async fn delete_handler(
    State(state): State<AppState>,
    Query(params): Query<DeleteParams>,
) -> Json<DeleteResponse> {
    state.cache.delete(&params.key);
    info!(key = %params.key, "Key deleted");
    Json(DeleteResponse::new(params.key))
}

/// Handler for GET /history?limit=
pub async fn history_handler(
    State(state): State<AppState>,
    Query(params): Query<HistoryParams>,
) -> ApiResult<Json<Vec<HistoryRecord>>> {
    Ok(Json(state.history.recent(params.limit)?))
}

/// Handler for GET /health
pub async fn health_handler() -> Json<HealthResponse> {
    Json(HealthResponse::healthy())
}
