//! Chrono Cache Module
//!
//! Main cache engine: a recency store holding entries with expiry instants,
//! guarded by a single lock.

use std::fmt;
use std::sync::Arc;
use std::time::Duration;

use chrono::TimeDelta;
use parking_lot::Mutex;

use crate::cache::{
    CacheEntry, Clock, LinkedRecencyStore, RecencyStore, SnapshotItem, SystemClock,
};
use crate::error::{CacheError, Result};

// == Chrono Cache ==
/// Thread-safe LRU cache with per-entry TTL and renewal on read.
///
/// Every operation takes the same lock, so calls from different threads are
/// applied one at a time in some total order. Expiry is lazy: entries past
/// their deadline are dropped only when `get` finds them.
pub struct ChronoCache<S = LinkedRecencyStore<CacheEntry>> {
    store: Mutex<S>,
    default_ttl: Duration,
    clock: Arc<dyn Clock>,
}

impl ChronoCache {
    // == Constructor ==
    /// Creates a cache holding at most `capacity` entries.
    ///
    /// `default_ttl` is the expiry applied on every successful `get`. It does
    /// not bound the TTL given to `set_with_ttl`.
    ///
    /// # Errors
    /// `CacheError::InvalidConfiguration` when `capacity` is zero.
    pub fn new(capacity: usize, default_ttl: Duration) -> Result<Self> {
        Self::with_clock(capacity, default_ttl, Arc::new(SystemClock))
    }

    /// Same as [`ChronoCache::new`] with an explicit time source.
    pub fn with_clock(
        capacity: usize,
        default_ttl: Duration,
        clock: Arc<dyn Clock>,
    ) -> Result<Self> {
        Self::with_store(LinkedRecencyStore::new(capacity), default_ttl, clock)
    }
}

impl<S: RecencyStore<CacheEntry>> ChronoCache<S> {
    /// Builds a cache on top of any recency store.
    pub fn with_store(store: S, default_ttl: Duration, clock: Arc<dyn Clock>) -> Result<Self> {
        if store.capacity() == 0 {
            return Err(CacheError::InvalidConfiguration(
                "capacity must be a positive integer".to_string(),
            ));
        }

        Ok(Self {
            store: Mutex::new(store),
            default_ttl,
            clock,
        })
    }

    // == Set ==
    /// Stores `value` under `key`, expiring `ttl` from now.
    ///
    /// Overwrites any previous value and expiry. A zero or negative `ttl`
    /// stores an entry that any later `get` will discard. When a new key
    /// arrives at capacity, the least recently used entry is evicted.
    pub fn set_with_ttl(&self, key: impl Into<String>, value: impl Into<String>, ttl: TimeDelta) {
        let mut store = self.store.lock();
        let entry = CacheEntry::new(value.into(), self.clock.now(), ttl);
        store.put(key.into(), entry);
    }

    // == Get ==
    /// Returns a copy of the value for `key`.
    ///
    /// A hit renews the entry to `default_ttl` from now and marks it most
    /// recently used. An expired entry is removed and reported as missing.
    pub fn get(&self, key: &str) -> Option<String> {
        let mut store = self.store.lock();
        let now = self.clock.now();

        let entry = store.get(key)?;
        if entry.is_expired(now) {
            store.remove(key);
            return None;
        }

        entry.renew(now, self.default_ttl);
        Some(entry.value.clone())
    }

    // == Delete ==
    /// Removes `key` whether or not it has expired. Missing keys are ignored.
    pub fn delete(&self, key: &str) {
        self.store.lock().remove(key);
    }

    // == Snapshot ==
    /// Lists every held entry, least recently used first.
    ///
    /// Expired entries that no `get` has discarded yet are included, with a
    /// negative `ttl_remaining`. Nothing is renewed, reordered or evicted.
    pub fn snapshot(&self) -> Vec<SnapshotItem> {
        let store = self.store.lock();
        let now = self.clock.now();

        store
            .keys_in_recency_order()
            .into_iter()
            .filter_map(|key| {
                let entry = store.peek(&key)?;
                Some(SnapshotItem {
                    value: entry.value.clone(),
                    ttl_remaining: entry.ttl_remaining(now),
                    key,
                })
            })
            .collect()
    }

    // == Length ==
    /// Number of held entries, expired ones included.
    pub fn len(&self) -> usize {
        self.store.lock().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn capacity(&self) -> usize {
        self.store.lock().capacity()
    }
}

impl<S> fmt::Debug for ChronoCache<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ChronoCache")
            .field("default_ttl", &self.default_ttl)
            .finish_non_exhaustive()
    }
}

// == Unit Tests ==
#[cfg(test)]
mod tests {
    use super::*;
    use crate::cache::{DequeRecencyStore, ManualClock};
    use std::thread;

    fn manual_cache(capacity: usize, default_ttl: Duration) -> (ChronoCache, Arc<ManualClock>) {
        let clock = Arc::new(ManualClock::new());
        let cache = ChronoCache::with_clock(capacity, default_ttl, clock.clone()).unwrap();
        (cache, clock)
    }

    fn keys(cache: &ChronoCache) -> Vec<String> {
        cache.snapshot().into_iter().map(|item| item.key).collect()
    }

    #[test]
    fn test_new_rejects_zero_capacity() {
        let result = ChronoCache::new(0, Duration::from_secs(10));
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_with_store_rejects_zero_capacity() {
        let result = ChronoCache::with_store(
            DequeRecencyStore::new(0),
            Duration::from_secs(10),
            Arc::new(SystemClock),
        );
        assert!(matches!(result, Err(CacheError::InvalidConfiguration(_))));
    }

    #[test]
    fn test_set_and_get() {
        let (cache, _) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("key1", "value1", TimeDelta::seconds(5));

        assert_eq!(cache.get("key1"), Some("value1".to_string()));
        assert_eq!(cache.len(), 1);
        assert_eq!(cache.capacity(), 10);
    }

    #[test]
    fn test_get_nonexistent() {
        let (cache, _) = manual_cache(10, Duration::from_secs(10));
        assert_eq!(cache.get("nonexistent"), None);
    }

    #[test]
    fn test_empty_key_is_accepted() {
        let (cache, _) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("", "blank", TimeDelta::seconds(5));

        assert_eq!(cache.get(""), Some("blank".to_string()));
    }

    #[test]
    fn test_overwrite_replaces_value_and_expiry() {
        let (cache, clock) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("key1", "value1", TimeDelta::seconds(60));
        cache.set_with_ttl("key1", "value2", TimeDelta::seconds(1));
        clock.advance(Duration::from_secs(2));

        assert_eq!(cache.len(), 1);
        assert_eq!(cache.get("key1"), None);
    }

    #[test]
    fn test_lru_order_read_protects_entry() {
        let (cache, _) = manual_cache(2, Duration::from_secs(10));

        cache.set_with_ttl("A", "a", TimeDelta::seconds(10));
        cache.set_with_ttl("B", "b", TimeDelta::seconds(10));
        assert!(cache.get("A").is_some());
        cache.set_with_ttl("C", "c", TimeDelta::seconds(10));

        assert_eq!(keys(&cache), vec!["A", "C"]);
        assert_eq!(cache.get("B"), None);
    }

    #[test]
    fn test_lru_eviction_without_reads() {
        let (cache, _) = manual_cache(3, Duration::from_secs(10));

        for key in ["key1", "key2", "key3", "key4"] {
            cache.set_with_ttl(key, "v", TimeDelta::seconds(10));
        }

        assert_eq!(cache.len(), 3);
        assert_eq!(keys(&cache), vec!["key2", "key3", "key4"]);
    }

    #[test]
    fn test_overwrite_at_capacity_does_not_evict() {
        let (cache, _) = manual_cache(2, Duration::from_secs(10));

        cache.set_with_ttl("A", "a", TimeDelta::seconds(10));
        cache.set_with_ttl("B", "b", TimeDelta::seconds(10));
        cache.set_with_ttl("A", "a2", TimeDelta::seconds(10));

        assert_eq!(keys(&cache), vec!["B", "A"]);
    }

    #[test]
    fn test_lazy_expiry_on_read() {
        let (cache, clock) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("K", "v", TimeDelta::milliseconds(1));
        clock.advance(Duration::from_millis(5));

        assert_eq!(cache.get("K"), None);
        assert!(keys(&cache).is_empty());
    }

    #[test]
    fn test_zero_and_negative_ttl_expire_on_next_read() {
        let (cache, clock) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("zero", "v", TimeDelta::zero());
        cache.set_with_ttl("neg", "v", TimeDelta::seconds(-3));

        assert_eq!(cache.len(), 2);
        assert_eq!(cache.get("neg"), None);
        clock.advance(Duration::from_millis(1));
        assert_eq!(cache.get("zero"), None);
        assert!(cache.is_empty());
    }

    #[test]
    fn test_read_at_exact_expiry_hits_and_renews() {
        let (cache, clock) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("K", "v", TimeDelta::seconds(1));
        clock.advance(Duration::from_secs(1));

        assert_eq!(cache.get("K"), Some("v".to_string()));
        assert_eq!(cache.snapshot()[0].ttl_remaining, TimeDelta::seconds(10));
    }

    #[test]
    fn test_read_renews_to_default_ttl() {
        let (cache, clock) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("K", "v", TimeDelta::seconds(1));
        clock.advance(Duration::from_millis(500));
        assert!(cache.get("K").is_some());

        let snapshot = cache.snapshot();
        assert_eq!(snapshot[0].ttl_remaining, TimeDelta::seconds(10));

        // Outlives the original one-second TTL
        clock.advance(Duration::from_secs(5));
        assert_eq!(cache.get("K"), Some("v".to_string()));
    }

    #[test]
    fn test_renewal_ignores_longer_insert_ttl() {
        let (cache, _) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("K", "v", TimeDelta::seconds(3600));
        cache.get("K");

        assert_eq!(cache.snapshot()[0].ttl_remaining, TimeDelta::seconds(10));
    }

    #[test]
    fn test_snapshot_shows_expired_unevicted_entry() {
        let (cache, clock) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("K", "v", TimeDelta::milliseconds(1));
        clock.advance(Duration::from_millis(3));

        let snapshot = cache.snapshot();
        assert_eq!(snapshot.len(), 1);
        assert_eq!(snapshot[0].key, "K");
        assert_eq!(snapshot[0].value, "v");
        assert!(snapshot[0].ttl_remaining < TimeDelta::zero());

        // Still there until a read finds it
        assert_eq!(cache.snapshot().len(), 1);
    }

    #[test]
    fn test_snapshot_does_not_touch_recency_or_ttl() {
        let (cache, clock) = manual_cache(2, Duration::from_secs(10));

        cache.set_with_ttl("A", "a", TimeDelta::seconds(5));
        cache.set_with_ttl("B", "b", TimeDelta::seconds(5));
        clock.advance(Duration::from_secs(1));
        cache.snapshot();
        cache.set_with_ttl("C", "c", TimeDelta::seconds(5));

        let snapshot = cache.snapshot();
        assert_eq!(snapshot[0].key, "B");
        assert_eq!(snapshot[0].ttl_remaining, TimeDelta::seconds(4));
    }

    #[test]
    fn test_delete_bypasses_expiry() {
        let (cache, clock) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("live", "v", TimeDelta::seconds(60));
        cache.set_with_ttl("dead", "v", TimeDelta::milliseconds(1));
        clock.advance(Duration::from_millis(10));

        cache.delete("live");
        cache.delete("dead");

        assert!(cache.is_empty());
        assert_eq!(cache.get("live"), None);
        assert_eq!(cache.get("dead"), None);
    }

    #[test]
    fn test_delete_nonexistent_is_noop() {
        let (cache, _) = manual_cache(10, Duration::from_secs(10));

        cache.set_with_ttl("keep", "v", TimeDelta::seconds(60));
        cache.delete("nonexistent");
        cache.delete("nonexistent");

        assert_eq!(cache.get("keep"), Some("v".to_string()));
    }

    #[test]
    fn test_deque_store_behaves_the_same() {
        let clock = Arc::new(ManualClock::new());
        let cache = ChronoCache::with_store(
            DequeRecencyStore::new(2),
            Duration::from_secs(10),
            clock.clone(),
        )
        .unwrap();

        cache.set_with_ttl("A", "a", TimeDelta::seconds(10));
        cache.set_with_ttl("B", "b", TimeDelta::seconds(10));
        cache.get("A");
        cache.set_with_ttl("C", "c", TimeDelta::seconds(10));

        let keys: Vec<_> = cache.snapshot().into_iter().map(|i| i.key).collect();
        assert_eq!(keys, vec!["A", "C"]);
    }

    #[test]
    fn test_real_clock_expiry() {
        let cache = ChronoCache::new(10, Duration::from_secs(10)).unwrap();

        cache.set_with_ttl("K", "v", TimeDelta::milliseconds(1));
        thread::sleep(Duration::from_millis(20));

        assert_eq!(cache.snapshot().len(), 1);
        assert_eq!(cache.get("K"), None);
        assert!(cache.snapshot().is_empty());
    }

    #[test]
    fn test_concurrent_access_respects_capacity() {
        let cache = Arc::new(ChronoCache::new(16, Duration::from_secs(10)).unwrap());

        let handles: Vec<_> = (0..8)
            .map(|t| {
                let cache = Arc::clone(&cache);
                thread::spawn(move || {
                    for i in 0..500 {
                        let key = format!("k{}", (t * 31 + i) % 40);
                        match i % 4 {
                            0 | 1 => {
                                let value = format!("{}-{}", t, i);
                                cache.set_with_ttl(key, value, TimeDelta::seconds(10));
                            }
                            2 => {
                                cache.get(&key);
                            }
                            _ => cache.delete(&key),
                        }
                        assert!(cache.len() <= 16);
                    }
                })
            })
            .collect();

        for handle in handles {
            handle.join().unwrap();
        }

        let snapshot = cache.snapshot();
        assert!(snapshot.len() <= 16);
        let mut keys: Vec<_> = snapshot.iter().map(|i| i.key.clone()).collect();
        keys.sort();
        keys.dedup();
        assert_eq!(keys.len(), snapshot.len(), "keys must be unique");
    }

    #[test]
    fn test_cache_is_send_and_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ChronoCache>();
    }
}
