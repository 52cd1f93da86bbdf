//! History Module
//!
//! Append-only SQLite log of every write accepted by the service.
//! The log is never read back into the cache.

use std::path::Path;

use parking_lot::Mutex;
use rusqlite::{params, Connection};
use serde::Serialize;
use thiserror::Error;

const SCHEMA: &str = "CREATE TABLE IF NOT EXISTS history (
    key TEXT,
    value TEXT,
    ttl INT,
    created_at DATETIME DEFAULT CURRENT_TIMESTAMP
)";

// == History Error ==
#[derive(Error, Debug)]
pub enum HistoryError {
    #[error("Database error: {0}")]
    Database(#[from] rusqlite::Error),
}

/// One recorded write.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct HistoryRecord {
    pub key: String,
    pub value: String,
    /// TTL in seconds the entry was stored with
    pub ttl: i64,
    /// SQLite `CURRENT_TIMESTAMP` text (UTC)
    pub created_at: String,
}

// == History Store ==
/// Thread-safe via internal `Mutex<Connection>`.
#[derive(Debug)]
pub struct HistoryStore {
    conn: Mutex<Connection>,
}

impl HistoryStore {
    /// Open (or create) the database at `path`.
    pub fn open(path: &Path) -> Result<Self, HistoryError> {
        Self::init(Connection::open(path)?)
    }

    /// Open an in-memory database (for testing).
    pub fn open_in_memory() -> Result<Self, HistoryError> {
        Self::init(Connection::open_in_memory()?)
    }

    fn init(conn: Connection) -> Result<Self, HistoryError> {
        conn.execute_batch(SCHEMA)?;
        Ok(Self {
            conn: Mutex::new(conn),
        })
    }

    pub fn record(&self, key: &str, value: &str, ttl_secs: i64) -> Result<(), HistoryError> {
        self.conn.lock().execute(
            "INSERT INTO history (key, value, ttl) VALUES (?1, ?2, ?3)",
            params![key, value, ttl_secs],
        )?;
        Ok(())
    }

    /// Most recent writes first.
    pub fn recent(&self, limit: usize) -> Result<Vec<HistoryRecord>, HistoryError> {
        let conn = self.conn.lock();
        let mut stmt = conn.prepare(
            "SELECT key, value, ttl, created_at FROM history
             ORDER BY rowid DESC LIMIT ?1",
        )?;
        let rows = stmt.query_map(params![i64::try_from(limit).unwrap_or(i64::MAX)], |row| {
            Ok(HistoryRecord {
                key: row.get(0)?,
                value: row.get(1)?,
                ttl: row.get(2)?,
                created_at: row.get(3)?,
            })
        })?;

        let records = rows.collect::<Result<Vec<_>, _>>()?;
        Ok(records)
    }

    pub fn count(&self) -> Result<usize, HistoryError> {
        let count: i64 = self
            .conn
            .lock()
            .query_row("SELECT COUNT(*) FROM history", [], |row| row.get(0))?;
        Ok(count as usize)
    }
}
