//! API Module
//!
//! HTTP handlers and routing for the cache server.
//!
//! # Endpoints
//! - `POST /set` - Store a key-value pair
//! - `GET /get/:key` - Retrieve a value by key
//! - `GET /cache` - List held entries with remaining TTL
//! - `GET|DELETE /delete?key=` - Delete a key
//! - `GET /history` - Recent writes
//! - `GET /health` - Health check endpoint
//! - anything else - Static files

pub mod handlers;
pub mod routes;

pub use handlers::*;
pub use routes::{create_app, create_router};
