//! Recency Store Module
//!
//! The bounded, recency-ordered container the cache is built on.

// == Recency Store ==
/// A fixed-capacity map that remembers the order in which keys were last
/// inserted or accessed.
///
/// Implementations must keep at most `capacity()` entries. Inserting a new key
/// into a full store evicts the least recently used entry first.
pub trait RecencyStore<V> {
    /// Inserts or overwrites `key`, marking it most recently used.
    ///
    /// Returns the evicted pair when a new key arrives at capacity.
    fn put(&mut self, key: String, value: V) -> Option<(String, V)>;

    /// Looks up `key` and marks it most recently used.
    fn get(&mut self, key: &str) -> Option<&mut V>;

    /// Looks up `key` without touching recency.
    fn peek(&self, key: &str) -> Option<&V>;

    /// Removes `key`, returning its value if it was present.
    fn remove(&mut self, key: &str) -> Option<V>;

    /// Keys ordered from least to most recently used.
    fn keys_in_recency_order(&self) -> Vec<String>;

    /// Maximum number of entries.
    fn capacity(&self) -> usize;

    /// Current number of entries.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}
