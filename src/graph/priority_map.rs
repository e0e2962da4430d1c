//! Min-priority map with decrease-key support.
//!
//! Updates never touch the heap in place. Each `set` appends a fresh heap
//! entry and records it in an authoritative side map; `pop_min` lazily drops
//! heap entries that no longer match the side map. Once stale entries
//! outnumber live ones two to one, the heap is rebuilt from the side map.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::hash::Hash;

use ahash::AHashMap;

use crate::error::{LexicaError, Result};

/// A heap entry. `seq` identifies the `set` call that produced it.
#[derive(Debug, Clone)]
struct HeapEntry<K, P> {
    priority: P,
    seq: u64,
    key: K,
}

impl<K, P: PartialOrd> PartialEq for HeapEntry<K, P> {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}

impl<K, P: PartialOrd> Eq for HeapEntry<K, P> {}

impl<K, P: PartialOrd> PartialOrd for HeapEntry<K, P> {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl<K, P: PartialOrd> Ord for HeapEntry<K, P> {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap: lower priorities first, earlier insertions win ties
        other
            .priority
            .partial_cmp(&self.priority)
            .unwrap_or(Ordering::Equal)
            .then_with(|| other.seq.cmp(&self.seq))
    }
}

/// A mapping from keys to priorities that pops the smallest live entry.
///
/// # Examples
///
/// ```
/// use lexica::graph::PriorityMap;
///
/// let mut queue = PriorityMap::new();
/// queue.set("a", 5.0);
/// queue.set("b", 3.0);
/// queue.set("a", 1.0); // decrease-key
///
/// assert_eq!(queue.pop_min().unwrap(), ("a", 1.0));
/// assert_eq!(queue.pop_min().unwrap(), ("b", 3.0));
/// assert!(queue.pop_min().is_err());
/// ```
#[derive(Debug, Clone)]
pub struct PriorityMap<K, P = f64> {
    heap: BinaryHeap<HeapEntry<K, P>>,
    /// Authoritative `key -> (priority, seq)` for every live key.
    live: AHashMap<K, (P, u64)>,
    next_seq: u64,
}

impl<K, P> PriorityMap<K, P>
where
    K: Eq + Hash + Clone,
    P: PartialOrd + Copy,
{
    /// Create an empty priority map.
    pub fn new() -> Self {
        PriorityMap {
            heap: BinaryHeap::new(),
            live: AHashMap::new(),
            next_seq: 0,
        }
    }

    /// Insert `key` or replace its priority.
    pub fn set(&mut self, key: K, priority: P) {
        let seq = self.next_seq;
        self.next_seq += 1;
        self.live.insert(key.clone(), (priority, seq));
        self.heap.push(HeapEntry { priority, seq, key });
    }

    /// Current priority of `key`, if it is live.
    pub fn get(&self, key: &K) -> Option<P> {
        self.live.get(key).map(|(priority, _)| *priority)
    }

    /// Whether `key` is live.
    pub fn contains_key(&self, key: &K) -> bool {
        self.live.contains_key(key)
    }

    /// Remove `key` without popping it. Its heap entries become stale.
    pub fn remove(&mut self, key: &K) -> Option<P> {
        let removed = self.live.remove(key).map(|(priority, _)| priority);
        if removed.is_some() {
            self.maybe_rebuild();
        }
        removed
    }

    /// Remove and return the live entry with the smallest priority.
    ///
    /// Returns [`LexicaError::EmptyQueue`] when no live entry remains.
    pub fn pop_min(&mut self) -> Result<(K, P)> {
        while let Some(entry) = self.heap.pop() {
            let is_live = matches!(self.live.get(&entry.key), Some((_, seq)) if *seq == entry.seq);
            if is_live {
                self.live.remove(&entry.key);
                self.maybe_rebuild();
                return Ok((entry.key, entry.priority));
            }
        }
        Err(LexicaError::EmptyQueue)
    }

    /// Number of live keys.
    pub fn len(&self) -> usize {
        self.live.len()
    }

    /// Whether no live key remains.
    pub fn is_empty(&self) -> bool {
        self.live.is_empty()
    }

    /// Number of entries held by the backing heap, stale ones included.
    pub fn heap_len(&self) -> usize {
        self.heap.len()
    }

    fn maybe_rebuild(&mut self) {
        let stale = self.heap.len() - self.live.len();
        if stale > 2 * self.live.len() {
            self.heap = self
                .live
                .iter()
                .map(|(key, (priority, seq))| HeapEntry {
                    priority: *priority,
                    seq: *seq,
                    key: key.clone(),
                })
                .collect();
        }
    }
}

impl<K, P> Default for PriorityMap<K, P>
where
    K: Eq + Hash + Clone,
    P: PartialOrd + Copy,
{
    fn default() -> Self {
        Self::new()
    }
}
