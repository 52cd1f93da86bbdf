//! Linked Recency Store
//!
//! Doubly-linked list over a slab of nodes, indexed by a HashMap.
//! Every operation except `keys_in_recency_order` is O(1).

use std::collections::HashMap;

use crate::cache::RecencyStore;

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    /// Neighbor towards the least recent end
    prev: Option<usize>,
    /// Neighbor towards the most recent end
    next: Option<usize>,
}

// == Linked Recency Store ==
/// Default `RecencyStore` used by the cache.
///
/// - `head` = least recently used
/// - `tail` = most recently used
#[derive(Debug)]
pub struct LinkedRecencyStore<V> {
    index: HashMap<String, usize>,
    slots: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
    capacity: usize,
}

impl<V> LinkedRecencyStore<V> {
    // == Constructor ==
    pub fn new(capacity: usize) -> Self {
        Self {
            index: HashMap::with_capacity(capacity),
            slots: Vec::with_capacity(capacity),
            free: Vec::new(),
            head: None,
            tail: None,
            capacity,
        }
    }

    fn node(&self, idx: usize) -> &Node<V> {
        self.slots[idx].as_ref().expect("linked slot is occupied")
    }

    fn node_mut(&mut self, idx: usize) -> &mut Node<V> {
        self.slots[idx].as_mut().expect("linked slot is occupied")
    }

    /// Unhooks a node from the list, leaving it in its slot.
    fn unlink(&mut self, idx: usize) {
        let (prev, next) = {
            let node = self.node(idx);
            (node.prev, node.next)
        };

        match prev {
            Some(p) => self.node_mut(p).next = next,
            None => self.head = next,
        }
        match next {
            Some(n) => self.node_mut(n).prev = prev,
            None => self.tail = prev,
        }

        let node = self.node_mut(idx);
        node.prev = None;
        node.next = None;
    }

    /// Hooks a node in as most recently used.
    fn link_tail(&mut self, idx: usize) {
        let old_tail = self.tail;
        {
            let node = self.node_mut(idx);
            node.prev = old_tail;
            node.next = None;
        }
        match old_tail {
            Some(t) => self.node_mut(t).next = Some(idx),
            None => self.head = Some(idx),
        }
        self.tail = Some(idx);
    }

    fn take(&mut self, idx: usize) -> Node<V> {
        self.unlink(idx);
        self.free.push(idx);
        self.slots[idx].take().expect("linked slot is occupied")
    }

    fn allocate(&mut self, node: Node<V>) -> usize {
        match self.free.pop() {
            Some(idx) => {
                self.slots[idx] = Some(node);
                idx
            }
            None => {
                self.slots.push(Some(node));
                self.slots.len() - 1
            }
        }
    }
}

impl<V> RecencyStore<V> for LinkedRecencyStore<V> {
    fn put(&mut self, key: String, value: V) -> Option<(String, V)> {
        if let Some(&idx) = self.index.get(&key) {
            self.node_mut(idx).value = value;
            self.unlink(idx);
            self.link_tail(idx);
            return None;
        }

        let evicted = if self.index.len() >= self.capacity {
            self.head.map(|lru| {
                let node = self.take(lru);
                self.index.remove(&node.key);
                (node.key, node.value)
            })
        } else {
            None
        };

        let idx = self.allocate(Node {
            key: key.clone(),
            value,
            prev: None,
            next: None,
        });
        self.link_tail(idx);
        self.index.insert(key, idx);

        evicted
    }

    fn get(&mut self, key: &str) -> Option<&mut V> {
        let idx = *self.index.get(key)?;
        self.unlink(idx);
        self.link_tail(idx);
        Some(&mut self.node_mut(idx).value)
    }

    fn peek(&self, key: &str) -> Option<&V> {
        self.index.get(key).map(|&idx| &self.node(idx).value)
    }

    fn remove(&mut self, key: &str) -> Option<V> {
        let idx = self.index.remove(key)?;
        Some(self.take(idx).value)
    }

    fn keys_in_recency_order(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.index.len());
        let mut cursor = self.head;
        while let Some(idx) = cursor {
            let node = self.node(idx);
            keys.push(node.key.clone());
            cursor = node.next;
        }
        keys
    }

    fn capacity(&self) -> usize {
        self.capacity
    }

    fn len(&self) -> usize {
        self.index.len()
    }
}
