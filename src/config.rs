//! Configuration Module
//!
//! Handles loading and managing server configuration from environment variables.

use std::env;
use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::error::CacheError;

/// Server configuration parameters.
///
/// All values can be configured via environment variables with sensible defaults.
#[derive(Debug, Clone)]
pub struct Config {
    /// Maximum number of entries the cache can hold (must be positive)
    pub capacity: i64,
    /// TTL in seconds applied when an entry is read
    pub default_ttl: u64,
    /// HTTP server port
    pub server_port: u16,
    /// Endpoint of the TTL prediction service
    pub predictor_url: String,
    /// Timeout in seconds for a prediction request
    pub predictor_timeout: u64,
    /// SQLite file receiving the write history
    pub history_db: PathBuf,
    /// Directory served for paths not matched by the API
    pub static_dir: PathBuf,
}

impl Config {
    /// Creates a new Config by loading values from environment variables.
    ///
    /// # Environment Variables
    /// - `CACHE_CAPACITY` - Maximum cache entries (default: 100)
    /// - `DEFAULT_TTL` - Renewal TTL in seconds (default: 15)
    /// - `SERVER_PORT` - HTTP server port (default: 8080)
    /// - `PREDICTOR_URL` - TTL prediction endpoint (default: http://127.0.0.1:8000/predict)
    /// - `PREDICTOR_TIMEOUT` - Prediction timeout in seconds (default: 5)
    /// - `HISTORY_DB` - History database path (default: cache_history.db)
    /// - `STATIC_DIR` - Static files directory (default: static)
    pub fn from_env() -> Self {
        let defaults = Self::default();
        Self {
            capacity: parse_var("CACHE_CAPACITY").unwrap_or(defaults.capacity),
            default_ttl: parse_var("DEFAULT_TTL").unwrap_or(defaults.default_ttl),
            server_port: parse_var("SERVER_PORT").unwrap_or(defaults.server_port),
            predictor_url: env::var("PREDICTOR_URL").unwrap_or(defaults.predictor_url),
            predictor_timeout: parse_var("PREDICTOR_TIMEOUT")
                .unwrap_or(defaults.predictor_timeout),
            history_db: env::var("HISTORY_DB")
                .map(PathBuf::from)
                .unwrap_or(defaults.history_db),
            static_dir: env::var("STATIC_DIR")
                .map(PathBuf::from)
                .unwrap_or(defaults.static_dir),
        }
    }

    /// Cache capacity as a size, rejecting zero and negative values.
    pub fn cache_capacity(&self) -> Result<usize, CacheError> {
        match usize::try_from(self.capacity) {
            Ok(capacity) if capacity > 0 => Ok(capacity),
            _ => Err(CacheError::InvalidConfiguration(format!(
                "capacity must be a positive integer, got {}",
                self.capacity
            ))),
        }
    }

    pub fn default_ttl(&self) -> Duration {
        Duration::from_secs(self.default_ttl)
    }

    pub fn predictor_timeout(&self) -> Duration {
        Duration::from_secs(self.predictor_timeout)
    }
}

fn parse_var<T: FromStr>(name: &str) -> Option<T> {
    env::var(name).ok().and_then(|v| v.parse().ok())
}

impl Default for Config {
    fn default() -> Self {
        Self {
            capacity: 100,
            default_ttl: 15,
            server_port: 8080,
            predictor_url: "http://127.0.0.1:8000/predict".to_string(),
            predictor_timeout: 5,
            history_db: PathBuf::from("cache_history.db"),
            static_dir: PathBuf::from("static"),
        }
    }
}
