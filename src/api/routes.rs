//! API Routes
//!
//! Configures the Axum router with all cache server endpoints.

use std::path::Path;

use axum::{
    routing::{get, post},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use super::handlers::{
    cache_handler, delete_handler, get_handler, health_handler, history_handler, set_handler,
    AppState,
};

/// Creates the API router.
///
/// # Endpoints
/// - `POST /set` - Store a key-value pair with a predicted or explicit TTL
/// - `GET /get/:key` - Retrieve a value by key (renews its TTL)
/// - `GET /cache` - List all held entries
/// - `GET|DELETE /delete?key=` - Delete a key
/// - `GET /history` - Recent writes
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin (configurable for production)
/// - Tracing: Logs all requests for debugging
pub fn create_router(state: AppState) -> Router {
    // Configure CORS middleware
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/set", post(set_handler))
        .route("/get/:key", get(get_handler))
        .route("/cache", get(cache_handler))
        .route("/delete", get(delete_handler).delete(delete_handler))
        .route("/history", get(history_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// API router plus static files served from `static_dir` for any other path.
pub fn create_app(state: AppState, static_dir: &Path) -> Router {
    create_router(state).fallback_service(ServeDir::new(static_dir))
}
