//! Deque Recency Store
//!
//! HashMap storage with a VecDeque tracking access order.
//! Touching a key is O(n), which is fine for small capacities and
//! makes the ordering easy to inspect in tests.

use std::collections::{HashMap, VecDeque};

use crate::cache::RecencyStore;

// == Deque Recency Store ==
/// Keys are stored in a VecDeque where:
/// - Front = Most recently used
/// - Back = Least recently used
#[derive(Debug)]
pub struct DequeRecencyStore<V> {
    values: HashMap<String, V>,
    /// Order of keys by access time
    order: VecDeque<String>,
    capacity: usize,
}

impl<V> DequeRecencyStore<V> {
    // == Constructor ==
    pub fn new(capacity: usize) -> Self {
        Self {
            values: HashMap::with_capacity(capacity),
            order: VecDeque::with_capacity(capacity),
            capacity,
        }
    }

    // == Touch ==
    /// Marks a key as recently used (moves to front).
    fn touch(&mut self, key: &str) {
        self.forget(key);
        self.order.push_front(key.to_string());
    }

    fn forget(&mut self, key: &str) {
        if let Some(pos) = self.order.iter().position(|k| k == key) {
            self.order.remove(pos);
        }
    }
}

impl<V> RecencyStore<V> for DequeRecencyStore<V> {
    fn put(&mut self, key: String, value: V) -> Option<(String, V)> {
        let is_overwrite = self.values.contains_key(&key);

        // If not overwriting and at capacity, evict oldest entry
        let evicted = if !is_overwrite && self.values.len() >= self.capacity {
            self.order
                .pop_back()
                .and_then(|oldest| self.values.remove(&oldest).map(|v| (oldest, v)))
        } else {
            None
        };

        self.touch(&key);
        self.values.insert(key, value);
        evicted
    }

    fn get(&mut self, key: &str) -> Option<&mut V> {
        if !self.values.contains_key(key) {
            return None;
        }
        self.touch(key);
        self.values.get_mut(key)
    }

    fn peek(&self, key: &str) -> Option<&V> {
        self.values.get(key)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let value = self.values.remove(key)?;
        self.forget(key);
        Some(value)
    }

    fn keys_in_recency_order(&self) -> Vec<String> {
        self.order.iter().rev().cloned().collect()
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.values.len()
    }
}
