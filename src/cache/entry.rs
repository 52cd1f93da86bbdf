//! Cache Entry Module
//!
//! Defines a stored value together with its expiry instant, and the signed
//! arithmetic between instants and TTLs.

use std::time::{Duration, Instant};

use chrono::TimeDelta;

/// Offset used when `now + ttl` does not fit in an `Instant`.
const FAR_FUTURE: Duration = Duration::from_secs(100 * 365 * 24 * 60 * 60);

// == Cache Entry ==
/// Represents a single cache entry with value and expiry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CacheEntry {
    /// The stored value
    pub value: String,
    /// Last instant at which the entry is live
    pub expires_at: Instant,
}

impl CacheEntry {
    // == Constructor ==
    /// Creates an entry expiring `ttl` after `now`. `ttl` may be zero or negative.
    pub fn new(value: String, now: Instant, ttl: TimeDelta) -> Self {
        Self {
            value,
            expires_at: offset(now, ttl),
        }
    }

    // == Renew ==
    /// Pushes expiry to `ttl` after `now`.
    pub fn renew(&mut self, now: Instant, ttl: Duration) {
        self.expires_at = now.checked_add(ttl).unwrap_or(now + FAR_FUTURE);
    }

    // == Is Expired ==
    /// Checks if the entry has expired at `now`.
    ///
    /// Boundary condition: an entry is still live at exactly `expires_at` and
    /// expired strictly after it, so a zero TTL expires on any later read.
    pub fn is_expired(&self, now: Instant) -> bool {
        now > self.expires_at
    }

    // == Time To Live ==
    /// Returns `expires_at - now`, negative once the entry has expired.
    pub fn ttl_remaining(&self, now: Instant) -> TimeDelta {
        if self.expires_at >= now {
            TimeDelta::from_std(self.expires_at - now).unwrap_or(TimeDelta::MAX)
        } else {
            -TimeDelta::from_std(now - self.expires_at).unwrap_or(TimeDelta::MAX)
        }
    }
}

// == Utility Functions ==
/// Applies a signed TTL to an instant.
fn offset(now: Instant, ttl: TimeDelta) -> Instant {
    match ttl.to_std() {
        Ok(forward) => now.checked_add(forward).unwrap_or(now + FAR_FUTURE),
        // Negative: step backwards, or stay at `now` if that would underflow.
        Err(_) => (-ttl)
            .to_std()
            .ok()
            .and_then(|back| now.checked_sub(back))
            .unwrap_or(now),
    }
}
