//! Snapshot Module
//!
//! Point-in-time view of cache contents.

use chrono::TimeDelta;

// == Snapshot Item ==
/// One entry as seen by [`ChronoCache::snapshot`](crate::cache::ChronoCache::snapshot).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SnapshotItem {
    pub key: String,
    pub value: String,
    /// Time left before expiry. Negative for entries that have expired but
    /// have not been read since.
    pub ttl_remaining: TimeDelta,
}

impl SnapshotItem {
    /// Whole seconds left, with expired entries reported as zero.
    pub fn ttl_remaining_secs(&self) -> u64 {
        u64::try_from(self.ttl_remaining.num_seconds()).unwrap_or(0)
    }
}
