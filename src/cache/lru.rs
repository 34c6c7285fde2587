//! Key/value map with an O(1) recency list.
//!
//! Nodes live in a slot vector and link to each other by index, so moving an
//! entry to the front or unlinking the tail never allocates or searches.

use std::collections::HashMap;
use std::num::NonZeroUsize;

#[derive(Debug)]
struct Node<V> {
    key: String,
    value: V,
    prev: Option<usize>,
    next: Option<usize>,
}

/// Capacity-bounded map that evicts the least recently used key on insert.
///
/// Only [`RecencyMap::insert`] and [`RecencyMap::touch`] change recency;
/// [`RecencyMap::peek`] does not.
#[derive(Debug)]
pub struct RecencyMap<V> {
    capacity: NonZeroUsize,
    index: HashMap<String, usize>,
    nodes: Vec<Option<Node<V>>>,
    free: Vec<usize>,
    head: Option<usize>,
    tail: Option<usize>,
}

impl<V> RecencyMap<V> {
    /// Creates an empty map holding at most `capacity` entries.
    #[must_use]
    pub fn new(capacity: NonZeroUsize) -> Self {
        Self {
            capacity,
            index: HashMap::with_capacity(capacity.get()),
            nodes: Vec::with_capacity(capacity.get()),
            free: Vec::new(),
            head: None,
            tail: None,
        }
    }

    /// Maximum number of entries.
    #[must_use]
    pub const fn capacity(&self) -> usize {
        self.capacity.get()
    }

    /// Current number of entries.
    #[must_use]
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Returns true when empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    /// Reads a value without changing recency.
    #[must_use]
    pub fn peek(&self, key: &str) -> Option<&V> {
        let &slot = self.index.get(key)?;
        self.nodes[slot].as_ref().map(|node| &node.value)
    }

    /// Marks `key` as most recently used. Returns false if absent.
    pub fn touch(&mut self, key: &str) -> bool {
        match self.index.get(key) {
            Some(&slot) => {
                self.promote(slot);
                true
            }
            None => false,
        }
    }

    /// Inserts or replaces `key` and makes it most recently used.
    ///
    /// When a new key arrives at capacity, the least recently used entry is
    /// evicted first and its key is returned.
    pub fn insert(&mut self, key: String, value: V) -> Option<String> {
        if let Some(&slot) = self.index.get(&key) {
            if let Some(node) = self.nodes[slot].as_mut() {
                node.value = value;
            }
            self.promote(slot);
            return None;
        }

        let evicted = if self.len() == self.capacity.get() {
            self.pop_lru().map(|(key, _)| key)
        } else {
            None
        };

        let slot = self.allocate(key.clone(), value);
        self.attach_front(slot);
        self.index.insert(key, slot);
        evicted
    }

    /// Removes `key`, returning its value.
    pub fn remove(&mut self, key: &str) -> Option<V> {
        let slot = self.index.remove(key)?;
        self.detach(slot);
        let node = self.nodes[slot].take()?;
        self.free.push(slot);
        Some(node.value)
    }

    /// Removes and returns the least recently used entry.
    pub fn pop_lru(&mut self) -> Option<(String, V)> {
        let slot = self.tail?;
        self.detach(slot);
        let node = self.nodes[slot].take()?;
        self.index.remove(&node.key);
        self.free.push(slot);
        Some((node.key, node.value))
    }

    /// Keys whose values satisfy `pred`, in no particular order.
    pub fn keys_where(&self, mut pred: impl FnMut(&V) -> bool) -> Vec<String> {
        self.nodes
            .iter()
            .flatten()
            .filter(|node| pred(&node.value))
            .map(|node| node.key.clone())
            .collect()
    }

    /// Keys from most to least recently used.
    #[must_use]
    pub fn keys_by_recency(&self) -> Vec<String> {
        let mut keys = Vec::with_capacity(self.len());
        let mut cursor = self.head;
        while let Some(slot) = cursor {
            let Some(node) = self.nodes[slot].as_ref() else {
                break;
            };
            keys.push(node.key.clone());
            cursor = node.next;
        }
        keys
    }

    fn allocate(&mut self, key: String, value: V) -> usize {
        let node = Node {
            key,
            value,
            prev: None,
            next: None,
        };
        if let Some(slot) = self.free.pop() {
            self.nodes[slot] = Some(node);
            slot
        } else {
            self.nodes.push(Some(node));
            self.nodes.len() - 1
        }
    }

    fn promote(&mut self, slot: usize) {
        if self.head == Some(slot) {
            return;
        }
        self.detach(slot);
        self.attach_front(slot);
    }

    fn detach(&mut self, slot: usize) {
        let Some((prev, next)) = self.nodes[slot].as_ref().map(|n| (n.prev, n.next)) else {
            return;
        };

        match prev {
            Some(p) => {
                if let Some(node) = self.nodes[p].as_mut() {
                    node.next = next;
                }
            }
            None => self.head = next,
        }

        match next {
            Some(n) => {
                if let Some(node) = self.nodes[n].as_mut() {
                    node.prev = prev;
                }
            }
            None => self.tail = prev,
        }

        if let Some(node) = self.nodes[slot].as_mut() {
            node.prev = None;
            node.next = None;
        }
    }

    fn attach_front(&mut self, slot: usize) {
        if let Some(node) = self.nodes[slot].as_mut() {
            node.prev = None;
            node.next = self.head;
        }

        match self.head {
            Some(old_head) => {
                if let Some(node) = self.nodes[old_head].as_mut() {
                    node.prev = Some(slot);
                }
            }
            None => self.tail = Some(slot),
        }

        self.head = Some(slot);
    }
}
