// Bucketed min-priority queue with membership tests, used as the A* open set.
//
// Values are grouped into FIFO buckets keyed by priority, and the buckets are
// kept in a `BTreeMap`. `enqueue` and `dequeue` cost O(log B) where B is the
// number of distinct priorities currently held, which in a grid search is far
// smaller than the number of queued nodes. Within one priority, values come
// out in insertion order, so ties are broken deterministically without
// needing a sequence counter.
//
// A side table counts how many times each value is queued, so
// `contains` answers "is this node on the frontier?" in O(1) average time.
//
// See also: `pathfinding.rs`, the only consumer.

use rustc_hash::FxHashMap;
use std::collections::{BTreeMap, VecDeque};
use std::hash::Hash;

#[derive(Clone, Debug)]
pub struct PriorityQueue<P, V> {
    /// Never holds an empty bucket.
    buckets: BTreeMap<P, VecDeque<V>>,
    /// Number of queued copies of each value.
    lookup: FxHashMap<V, u32>,
    len: usize,
}

impl<P, V> Default for PriorityQueue<P, V> {
    fn default() -> Self {
        Self {
            buckets: BTreeMap::new(),
            lookup: FxHashMap::default(),
            len: 0,
        }
    }
}

impl<P: Ord, V: Eq + Hash + Clone> PriorityQueue<P, V> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Append `value` to the bucket for `priority`.
    pub fn enqueue(&mut self, priority: P, value: V) {
        *self.lookup.entry(value.clone()).or_insert(0) += 1;
        self.buckets.entry(priority).or_default().push_back(value);
        self.len += 1;
    }

    /// Remove and return the oldest value in the lowest-priority bucket, or
    /// `None` if the queue is empty.
    pub fn dequeue(&mut self) -> Option<V> {
        let value = {
            let mut bucket = self.buckets.first_entry()?;
            let value = bucket.get_mut().pop_front()?;
            if bucket.get().is_empty() {
                bucket.remove();
            }
            value
        };
        self.forget(&value);
        self.len -= 1;
        Some(value)
    }

    /// Remove one copy of `value` from the bucket for `priority`. Returns
    /// `false` if it was not queued under that priority.
    pub fn remove(&mut self, priority: &P, value: &V) -> bool {
        let Some(bucket) = self.buckets.get_mut(priority) else {
            return false;
        };
        let Some(pos) = bucket.iter().position(|v| v == value) else {
            return false;
        };
        bucket.remove(pos);
        if bucket.is_empty() {
            self.buckets.remove(priority);
        }
        self.forget(value);
        self.len -= 1;
        true
    }

    pub fn contains(&self, value: &V) -> bool {
        self.lookup.contains_key(value)
    }

    /// Number of queued values (not buckets).
    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    pub fn clear(&mut self) {
        self.buckets.clear();
        self.lookup.clear();
        self.len = 0;
    }

    fn forget(&mut self, value: &V) {
        if let Some(count) = self.lookup.get_mut(value) {
            *count -= 1;
            if *count == 0 {
                self.lookup.remove(value);
            }
        }
    }
}
