//! ChronoCache - A bounded LRU cache with TTL renewal on read
//!
//! The `cache` module is the in-process core. The rest is a small HTTP
//! service that predicts TTLs, logs writes and serves a static dashboard.

pub mod api;
pub mod cache;
pub mod config;
pub mod error;
pub mod history;
pub mod models;
pub mod predictor;

pub use api::AppState;
pub use cache::ChronoCache;
pub use config::Config;
pub use error::CacheError;
