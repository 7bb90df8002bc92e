//! Key lookup strategies
//!
//! A Fibonacci heap is normally driven through handles returned at insertion
//! time. When callers address elements by key instead (a task queue where the
//! priority doubles as the task's identity), the heap has to find the node
//! for a key. Two strategies are provided:
//!
//! - [`Search`]: no bookkeeping; `find` walks the whole forest depth-first,
//!   O(n) per lookup.
//! - [`Indexed`]: keeps an `FxHashMap` from key to handles, O(1) per lookup
//!   at the cost of a hash insert/remove on every key change.
//!
//! The strategy is a type parameter of
//! [`FibonacciHeap`](crate::fibonacci::FibonacciHeap), so `Search` costs
//! nothing at run time.

use std::fmt;
use std::hash::Hash;

use rustc_hash::FxHashMap;
use smallvec::SmallVec;

use crate::node::NodeKey;

/// Trait for key lookup backends
pub trait KeyLookup<K>: Default {
    /// Whether [`get`](KeyLookup::get) answers lookups. When `false` the heap
    /// falls back to a depth-first search of its forest.
    const INDEXED: bool;

    /// Called after `node` starts carrying `key`.
    fn record(&mut self, key: &K, node: NodeKey);

    /// Called before `node` stops carrying `key` (rekeyed or removed).
    fn forget(&mut self, key: &K, node: NodeKey);

    /// Any node carrying `key`.
    fn get(&self, key: &K) -> Option<NodeKey>;

    fn clear(&mut self);
}

/// Depth-first search of the forest on every lookup.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct Search;

impl<K> KeyLookup<K> for Search {
    const INDEXED: bool = false;

    #[inline]
    fn record(&mut self, _key: &K, _node: NodeKey) {}

    #[inline]
    fn forget(&mut self, _key: &K, _node: NodeKey) {}

    #[inline]
    fn get(&self, _key: &K) -> Option<NodeKey> {
        None
    }

    #[inline]
    fn clear(&mut self) {}
}

/// Hash index from key to the handles currently carrying it.
///
/// Duplicate keys are allowed; `get` returns the oldest surviving handle.
pub struct Indexed<K> {
    index: FxHashMap<K, SmallVec<[NodeKey; 1]>>,
}

impl<K> Default for Indexed<K> {
    fn default() -> Self {
        Self {
            index: FxHashMap::default(),
        }
    }
}

impl<K: fmt::Debug> fmt::Debug for Indexed<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Indexed")
            .field("keys", &self.index.len())
            .finish()
    }
}

impl<K: Hash + Eq + Clone> KeyLookup<K> for Indexed<K> {
    const INDEXED: bool = true;

    fn record(&mut self, key: &K, node: NodeKey) {
        self.index.entry(key.clone()).or_default().push(node);
    }

    fn forget(&mut self, key: &K, node: NodeKey) {
        if let Some(nodes) = self.index.get_mut(key) {
            nodes.retain(|n| *n != node);
            if nodes.is_empty() {
                self.index.remove(key);
            }
        }
    }

    fn get(&self, key: &K) -> Option<NodeKey> {
        self.index.get(key).and_then(|nodes| nodes.first().copied())
    }

    fn clear(&mut self) {
        self.index.clear();
    }
}
