//! Cache Module
//!
//! Provides a bounded in-memory cache with LRU eviction, per-entry TTL and
//! renewal on read.

mod clock;
mod entry;
mod linked;
mod lru;
mod recency;
mod snapshot;
mod store;


// Re-export public types
pub use clock::{Clock, ManualClock, SystemClock};
pub use entry::CacheEntry;
pub use linked::LinkedRecencyStore;
pub use lru::DequeRecencyStore;
pub use recency::RecencyStore;
pub use snapshot::SnapshotItem;
pub use store::ChronoCache;
