//! Fibonacci Heap implementation
//!
//! A Fibonacci heap is a data structure for priority queue operations with:
//! - O(1) amortized insert and decrease_key
//! - O(log n) amortized extract_min and delete
//!
//! The structure is a forest of heap-ordered trees. Roots are linked in a
//! circular ring, every node's children form another ring, and the heap keeps
//! a cached handle to the minimum root.
//!
//! Nodes live in a `SlotMap` arena; rings, parent back-references and child
//! rings are all arena keys. A [`NodeKey`] returned by [`insert`] is a
//! generation-checked handle, so handle-based operations are O(1) amortized as
//! in the textbook. Key-based operations ([`find`], [`modify_key`],
//! [`delete`]) go through the heap's [`KeyLookup`] strategy first.
//!
//! [`insert`]: FibonacciHeap::insert
//! [`find`]: FibonacciHeap::find
//! [`modify_key`]: FibonacciHeap::modify_key
//! [`delete`]: FibonacciHeap::delete

use std::fmt;
use std::mem;

use circular_ring::{iter_from, CircularRing};
use slotmap::SlotMap;
use smallvec::{smallvec, SmallVec};

use crate::lookup::{KeyLookup, Search};
use crate::node::{Node, NodeKey};
use crate::traits::{DecreaseKeyHeap, Heap, HeapError};
use crate::traversal::{NodeView, Traverse};

const GOLDEN_RATIO: f64 = 1.618_033_988_749_895;

/// Upper bound on the degree of any node in a heap of `len` elements.
///
/// A tree whose root has degree `d` holds at least `F(d+2) >= φ^d` nodes, so
/// `⌈log_φ(len+1)⌉ + 1` slots (degrees `0..=⌈log_φ(len+1)⌉`) always suffice
/// for the consolidation table.
pub fn max_degree(len: usize) -> usize {
    ((len as f64 + 1.0).ln() / GOLDEN_RATIO.ln()).ceil() as usize + 1
}

/// How a cut node competes for the cached minimum.
#[derive(Clone, Copy, PartialEq, Eq)]
enum Promotion {
    /// Becomes the minimum only if its key is strictly smaller.
    IfSmaller,
    /// Becomes the minimum unconditionally; used to pull a node to the front
    /// before detaching it.
    Force,
    /// Leaves the cached minimum alone while a forced node waits at the front.
    Keep,
}

/// Fibonacci Heap
///
/// `L` selects how key-based operations find their node: [`Search`] (the
/// default) walks the forest, [`Indexed`](crate::lookup::Indexed) keeps a
/// hash index.
///
/// # Example
///
/// ```rust
/// use fibqueue::fibonacci::FibonacciHeap;
///
/// let mut heap = FibonacciHeap::new();
/// let handle = heap.insert(5, "item");
/// heap.insert(3, "other");
/// heap.decrease_key(handle, 1).unwrap();
/// assert_eq!(heap.minimum(), Some((&1, &"item")));
/// assert_eq!(heap.extract_min(), Ok((1, "item")));
/// ```
pub struct FibonacciHeap<K, V, L = Search> {
    nodes: SlotMap<NodeKey, Node<K, V>>,
    roots: CircularRing<NodeKey>,
    min: Option<NodeKey>,
    len: usize,
    lookup: L,
}

impl<K, V, L: Default> Default for FibonacciHeap<K, V, L> {
    fn default() -> Self {
        Self {
            nodes: SlotMap::with_key(),
            roots: CircularRing::new(),
            min: None,
            len: 0,
            lookup: L::default(),
        }
    }
}

impl<K, V, L> fmt::Debug for FibonacciHeap<K, V, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FibonacciHeap")
            .field("len", &self.len)
            .field("roots", &self.roots.len())
            .field("min", &self.min)
            .finish()
    }
}

/// Indented dump of the forest, one node per line.
impl<K: fmt::Display, V: fmt::Display, L> fmt::Display for FibonacciHeap<K, V, L> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.is_empty() {
            return writeln!(f, "The Fibonacci heap is empty.");
        }
        for view in self.iter() {
            writeln!(
                f,
                "{:indent$}Key: {}, Name: {}, Degree: {}",
                "",
                view.key,
                view.payload,
                view.degree,
                indent = view.depth * 2
            )?;
        }
        Ok(())
    }
}

// Read-only queries; no ordering needed.
impl<K, V, L> FibonacciHeap<K, V, L> {
    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The minimum key and its payload, or `None` on an empty heap. O(1).
    pub fn minimum(&self) -> Option<(&K, &V)> {
        self.min.map(|m| {
            let node = &self.nodes[m];
            (&node.key, &node.payload)
        })
    }

    /// Handle of the current minimum.
    #[inline]
    pub fn min_handle(&self) -> Option<NodeKey> {
        self.min
    }

    /// Key and payload of a live element.
    pub fn get(&self, handle: NodeKey) -> Option<(&K, &V)> {
        self.nodes
            .get(handle)
            .map(|node| (&node.key, &node.payload))
    }

    /// Mutable access to a payload. The key stays read-only; change it with
    /// [`decrease_key`](Self::decrease_key) or [`update_key`](Self::update_key).
    pub fn payload_mut(&mut self, handle: NodeKey) -> Option<&mut V> {
        self.nodes.get_mut(handle).map(|node| &mut node.payload)
    }

    #[inline]
    pub fn contains(&self, handle: NodeKey) -> bool {
        self.nodes.contains_key(handle)
    }

    /// Structural view of a live element.
    pub fn node(&self, handle: NodeKey) -> Option<NodeView<'_, K, V>> {
        let mut depth = 0;
        let mut parent = self.nodes.get(handle)?.parent;
        while let Some(p) = parent {
            depth += 1;
            parent = self.nodes[p].parent;
        }
        Some(NodeView::new(&self.nodes, handle, depth))
    }

    /// Number of trees in the root ring.
    #[inline]
    pub fn root_count(&self) -> usize {
        self.roots.len()
    }

    /// Depth-first walk over every element, roots first in ring order, each
    /// node's children before its next sibling.
    pub fn iter(&self) -> Traverse<'_, K, V> {
        Traverse::new(&self.nodes, &self.roots)
    }
}

impl<K: Ord, V> FibonacciHeap<K, V> {
    /// Empty heap with the [`Search`] lookup strategy. Use `default()` for
    /// other strategies.
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(capacity: usize) -> Self {
        Self::with_capacity_and_lookup(capacity)
    }
}

impl<K: Ord, V, L: KeyLookup<K>> FibonacciHeap<K, V, L> {
    pub fn with_capacity_and_lookup(capacity: usize) -> Self {
        Self {
            nodes: SlotMap::with_capacity_and_key(capacity),
            roots: CircularRing::new(),
            min: None,
            len: 0,
            lookup: L::default(),
        }
    }

    /// Adds an element as a new single-node tree in the root ring.
    ///
    /// # Time Complexity
    /// O(1)
    pub fn insert(&mut self, key: K, payload: V) -> NodeKey {
        let handle = self.nodes.insert(Node::new(key, payload));
        self.lookup.record(&self.nodes[handle].key, handle);
        self.attach_root(handle);
        self.len += 1;
        handle
    }

    /// Removes and returns the element with the smallest key.
    ///
    /// # Errors
    /// `HeapError::EmptyHeap` if there is nothing to extract.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn extract_min(&mut self) -> Result<(K, V), HeapError> {
        let handle = self.detach_min()?;
        let node = self
            .nodes
            .remove(handle)
            .expect("detached minimum is still in the arena");
        self.lookup.forget(&node.key, handle);
        Ok((node.key, node.payload))
    }

    /// Handle of some element carrying `key`.
    ///
    /// With the default [`Search`] strategy this is an exhaustive depth-first
    /// walk, O(n), and returns the first match in [`iter`](Self::iter) order.
    /// With [`Indexed`](crate::lookup::Indexed) it is a hash lookup returning
    /// the longest-held handle for the key. The two only differ when several
    /// elements share `key`.
    pub fn find(&self, key: &K) -> Option<NodeKey> {
        if L::INDEXED {
            self.lookup.get(key)
        } else {
            self.iter().find(|view| view.key == key).map(|view| view.handle)
        }
    }

    #[inline]
    pub fn contains_key(&self, key: &K) -> bool {
        self.find(key).is_some()
    }

    /// Changes the key of the element currently keyed `old_key`.
    ///
    /// A decrease (or an equal key) is the classical decrease-key. An
    /// increase is delegated to [`replace_key`](Self::replace_key).
    ///
    /// # Errors
    /// `HeapError::KeyNotFound` if no element carries `old_key`.
    pub fn modify_key(&mut self, old_key: &K, new_key: K) -> Result<(), HeapError> {
        let handle = self.find(old_key).ok_or(HeapError::KeyNotFound)?;
        self.update_key(handle, new_key)
    }

    /// Moves the element keyed `old_key` to `new_key`, whatever the direction.
    ///
    /// The element is forced to the front, detached as if extracted, rekeyed,
    /// and linked back in as a fresh root, keeping its handle.
    ///
    /// # Time Complexity
    /// One decrease-to-front plus one extract-min plus one insert: O(log n)
    /// amortized.
    pub fn replace_key(&mut self, old_key: &K, new_key: K) -> Result<NodeKey, HeapError> {
        let handle = self.find(old_key).ok_or(HeapError::KeyNotFound)?;
        self.rekey(handle, new_key)?;
        Ok(handle)
    }

    /// Removes the element keyed `key`.
    ///
    /// # Errors
    /// `HeapError::KeyNotFound` if no element carries `key`.
    pub fn delete(&mut self, key: &K) -> Result<(K, V), HeapError> {
        let handle = self.find(key).ok_or(HeapError::KeyNotFound)?;
        self.remove(handle)
    }

    /// Lowers the key of `handle`. An equal key is accepted.
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the element is gone
    /// - `HeapError::KeyIncreased` if `new_key` is larger than the current key
    ///
    /// # Time Complexity
    /// O(1) amortized
    pub fn decrease_key(&mut self, handle: NodeKey, new_key: K) -> Result<(), HeapError> {
        let node = self.nodes.get(handle).ok_or(HeapError::InvalidHandle)?;
        if new_key > node.key {
            return Err(HeapError::KeyIncreased);
        }
        self.lower_key(handle, new_key);
        Ok(())
    }

    /// Sets the key of `handle`, decreasing in place or replacing when the
    /// key grows.
    pub fn update_key(&mut self, handle: NodeKey, new_key: K) -> Result<(), HeapError> {
        let node = self.nodes.get(handle).ok_or(HeapError::InvalidHandle)?;
        if new_key > node.key {
            self.rekey(handle, new_key)
        } else {
            self.lower_key(handle, new_key);
            Ok(())
        }
    }

    /// Removes the element behind `handle`.
    ///
    /// # Time Complexity
    /// O(log n) amortized
    pub fn remove(&mut self, handle: NodeKey) -> Result<(K, V), HeapError> {
        if !self.nodes.contains_key(handle) {
            return Err(HeapError::InvalidHandle);
        }
        self.force_to_front(handle);
        self.extract_min()
    }

    /// Moves every element of `other` into `self`, keeping tree shapes,
    /// degrees and marks.
    ///
    /// Each heap owns its own arena, so this is O(m) in the size of `other`
    /// and hands out new handles for the moved elements.
    pub fn append(&mut self, mut other: Self) {
        let mut from = mem::take(&mut other.nodes);
        let mut pending: Vec<(NodeKey, Option<NodeKey>)> = other
            .roots
            .iter(&from)
            .map(|root| (root, None))
            .collect();
        pending.reverse();

        while let Some((old, new_parent)) = pending.pop() {
            let children: SmallVec<[NodeKey; 8]> = match &from[old].children {
                Some(ring) => ring.iter(&from).collect(),
                None => SmallVec::new(),
            };
            let moved = from.remove(old).expect("ring member is in the arena");
            let marked = moved.marked;
            let handle = self.nodes.insert(Node::new(moved.key, moved.payload));
            self.nodes[handle].marked = marked;
            self.lookup.record(&self.nodes[handle].key, handle);

            match new_parent {
                Some(parent) => self.adopt(parent, handle),
                None => self.attach_root(handle),
            }
            pending.extend(children.into_iter().rev().map(|c| (c, Some(handle))));
        }

        self.len += other.len;
    }

    /// Drops every element.
    pub fn clear(&mut self) {
        self.nodes.clear();
        self.roots.clear();
        self.lookup.clear();
        self.min = None;
        self.len = 0;
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    /// Adds a parentless node to the root ring and lets it compete for min.
    fn attach_root(&mut self, handle: NodeKey) {
        self.roots.insert(&mut self.nodes, handle);
        self.promote(handle, Promotion::IfSmaller);
    }

    fn promote(&mut self, handle: NodeKey, promotion: Promotion) {
        let wins = match (promotion, self.min) {
            (Promotion::Force, _) | (_, None) => true,
            (Promotion::Keep, Some(_)) => false,
            (Promotion::IfSmaller, Some(min)) => self.nodes[handle].key < self.nodes[min].key,
        };
        if wins {
            self.min = Some(handle);
        }
    }

    /// Makes `child` the newest child of `parent`.
    fn adopt(&mut self, parent: NodeKey, child: NodeKey) {
        let mut children = self.nodes[parent].children.take().unwrap_or_default();
        children.insert(&mut self.nodes, child);
        let node = &mut self.nodes[parent];
        node.children = Some(children);
        node.degree += 1;
        self.nodes[child].parent = Some(parent);
    }

    fn set_key(&mut self, handle: NodeKey, new_key: K) {
        let old_key = mem::replace(&mut self.nodes[handle].key, new_key);
        self.lookup.forget(&old_key, handle);
        self.lookup.record(&self.nodes[handle].key, handle);
    }

    /// Decrease-key proper; `new_key` is known not to exceed the current key.
    fn lower_key(&mut self, handle: NodeKey, new_key: K) {
        self.set_key(handle, new_key);
        match self.nodes[handle].parent {
            Some(parent) => {
                if self.nodes[handle].key < self.nodes[parent].key {
                    self.cut(handle, parent, Promotion::IfSmaller);
                    self.cascading_cut(parent, Promotion::IfSmaller);
                }
            }
            None => self.promote(handle, Promotion::IfSmaller),
        }
    }

    /// Makes `handle` the cached minimum regardless of its key, cutting it
    /// loose from its parent first. The next `detach_min` removes it.
    fn force_to_front(&mut self, handle: NodeKey) {
        match self.nodes[handle].parent {
            Some(parent) => {
                self.cut(handle, parent, Promotion::Force);
                self.cascading_cut(parent, Promotion::Keep);
            }
            None => self.promote(handle, Promotion::Force),
        }
    }

    /// Detaches the node and re-links it under `new_key` as a fresh root.
    fn rekey(&mut self, handle: NodeKey, new_key: K) -> Result<(), HeapError> {
        self.force_to_front(handle);
        let detached = self.detach_min()?;
        debug_assert!(detached == handle);
        self.set_key(handle, new_key);
        self.nodes[handle].reset();
        self.attach_root(handle);
        self.len += 1;
        Ok(())
    }

    /// Unlinks the minimum from the forest, promoting its children to roots
    /// and consolidating. The node stays in the arena.
    fn detach_min(&mut self) -> Result<NodeKey, HeapError> {
        let min = self.min.ok_or(HeapError::EmptyHeap)?;

        if let Some(mut children) = self.nodes[min].children.take() {
            // The child ring shrinks as we go; bound the loop up front.
            let count = children.len();
            for _ in 0..count {
                let Some(child) = children.head() else { break };
                children.remove(&mut self.nodes, child);
                self.roots.insert(&mut self.nodes, child);
                let node = &mut self.nodes[child];
                node.parent = None;
                node.marked = false;
            }
            self.nodes[min].degree = 0;
        }

        self.roots.remove(&mut self.nodes, min);
        self.len -= 1;

        if self.roots.is_empty() {
            self.min = None;
        } else {
            self.min = self.roots.head();
            self.consolidate();
        }
        Ok(min)
    }

    /// Links roots of equal degree until all root degrees are distinct, then
    /// rebuilds the root ring and recomputes the minimum.
    fn consolidate(&mut self) {
        let Some(start) = self.min else { return };
        let bound = max_degree(self.len);
        let mut table: SmallVec<[Option<NodeKey>; 64]> = smallvec![None; bound];

        // Linking shrinks the ring under us; walk a snapshot of the roots.
        let roots: SmallVec<[NodeKey; 16]> = iter_from(&self.nodes, start).collect();
        debug_assert_eq!(roots.len(), self.roots.len());

        for root in roots {
            let mut x = root;
            let mut d = self.nodes[x].degree;
            loop {
                if d >= table.len() {
                    table.resize(d + 1, None);
                }
                let Some(mut y) = table[d].take() else { break };
                if self.nodes[y].key < self.nodes[x].key {
                    mem::swap(&mut x, &mut y);
                }
                self.link(y, x);
                d += 1;
            }
            table[d] = Some(x);
        }
        debug_assert!(table.len() <= bound, "degree bound exceeded");

        self.roots.clear();
        self.min = None;
        for root in table.into_iter().flatten() {
            self.attach_root(root);
        }
    }

    /// Makes root `loser` a child of root `winner`; `winner.key <= loser.key`.
    fn link(&mut self, loser: NodeKey, winner: NodeKey) {
        self.roots.remove(&mut self.nodes, loser);
        self.adopt(winner, loser);
        self.nodes[loser].marked = false;
    }

    /// Moves child `x` of `y` to the root ring.
    fn cut(&mut self, x: NodeKey, y: NodeKey, promotion: Promotion) {
        let mut children = self.nodes[y].children.take().unwrap_or_default();
        children.remove(&mut self.nodes, x);
        let parent = &mut self.nodes[y];
        parent.degree -= 1;
        if !children.is_empty() {
            parent.children = Some(children);
        }

        self.roots.insert(&mut self.nodes, x);
        let node = &mut self.nodes[x];
        node.parent = None;
        node.marked = false;
        self.promote(x, promotion);
    }

    /// Walks up from `y`, cutting marked ancestors until an unmarked one
    /// (which gets marked) or a root is reached.
    fn cascading_cut(&mut self, mut y: NodeKey, promotion: Promotion) {
        while let Some(z) = self.nodes[y].parent {
            if !self.nodes[y].marked {
                self.nodes[y].marked = true;
                return;
            }
            self.cut(y, z, promotion);
            y = z;
        }
    }
}

impl<K: Ord, V, L: KeyLookup<K>> Heap<K, V> for FibonacciHeap<K, V, L> {
    fn new() -> Self {
        Self::default()
    }

    fn is_empty(&self) -> bool {
        self.len == 0
    }

    fn len(&self) -> usize {
        self.len
    }

    fn push(&mut self, key: K, item: V) {
        self.insert(key, item);
    }

    fn peek(&self) -> Option<(&K, &V)> {
        self.minimum()
    }

    fn pop(&mut self) -> Option<(K, V)> {
        self.extract_min().ok()
    }

    fn merge(&mut self, other: Self) {
        self.append(other);
    }
}

impl<K: Ord, V, L: KeyLookup<K>> DecreaseKeyHeap<K, V> for FibonacciHeap<K, V, L> {
    type Handle = NodeKey;

    fn push_with_handle(&mut self, key: K, item: V) -> NodeKey {
        self.insert(key, item)
    }

    fn decrease_key(&mut self, handle: &NodeKey, new_key: K) -> Result<(), HeapError> {
        FibonacciHeap::decrease_key(self, *handle, new_key)
    }
}
