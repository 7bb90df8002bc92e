//! Read-only depth-first traversal of a heap's forest.
//!
//! The walk starts at the head of the root ring, visits ring members in ring
//! order, and descends into a node's child ring before moving on to the
//! node's next sibling. Display and inspection code consumes this; nothing
//! here can mutate the heap.

use std::fmt;
use std::iter::FusedIterator;

use circular_ring::{CircularRing, Iter as RingIter};
use slotmap::SlotMap;
use smallvec::SmallVec;

use crate::node::{Node, NodeKey};

type Arena<K, V> = SlotMap<NodeKey, Node<K, V>>;

/// Snapshot of one node as seen by a traversal.
pub struct NodeView<'a, K, V> {
    pub handle: NodeKey,
    pub key: &'a K,
    pub payload: &'a V,
    pub degree: usize,
    pub marked: bool,
    /// Distance from the root ring; roots have depth 0.
    pub depth: usize,
    pub parent: Option<NodeKey>,
}

impl<K, V> Clone for NodeView<'_, K, V> {
    fn clone(&self) -> Self {
        *self
    }
}

impl<K, V> Copy for NodeView<'_, K, V> {}

impl<K: fmt::Debug, V: fmt::Debug> fmt::Debug for NodeView<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("NodeView")
            .field("key", self.key)
            .field("payload", self.payload)
            .field("degree", &self.degree)
            .field("marked", &self.marked)
            .field("depth", &self.depth)
            .finish()
    }
}

impl<'a, K, V> NodeView<'a, K, V> {
    pub(crate) fn new(nodes: &'a Arena<K, V>, handle: NodeKey, depth: usize) -> Self {
        let node = &nodes[handle];
        NodeView {
            handle,
            key: &node.key,
            payload: &node.payload,
            degree: node.degree,
            marked: node.marked,
            depth,
            parent: node.parent,
        }
    }

    pub fn is_root(&self) -> bool {
        self.parent.is_none()
    }
}

/// Pre-order iterator over every node of a heap.
///
/// Created by [`FibonacciHeap::iter`](crate::fibonacci::FibonacciHeap::iter).
pub struct Traverse<'a, K, V> {
    nodes: &'a Arena<K, V>,
    // One ring walk per level currently being visited.
    stack: SmallVec<[RingIter<'a, Arena<K, V>, NodeKey>; 8]>,
}

impl<'a, K, V> Traverse<'a, K, V> {
    pub(crate) fn new(nodes: &'a Arena<K, V>, roots: &CircularRing<NodeKey>) -> Self {
        let mut stack = SmallVec::new();
        if !roots.is_empty() {
            stack.push(roots.iter(nodes));
        }
        Traverse { nodes, stack }
    }
}

impl<'a, K, V> Iterator for Traverse<'a, K, V> {
    type Item = NodeView<'a, K, V>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let depth = self.stack.len().checked_sub(1)?;
            let level = self.stack.last_mut()?;
            match level.next() {
                Some(handle) => {
                    let view = NodeView::new(self.nodes, handle, depth);
                    if let Some(children) = &self.nodes[handle].children {
                        if !children.is_empty() {
                            self.stack.push(children.iter(self.nodes));
                        }
                    }
                    return Some(view);
                }
                None => {
                    self.stack.pop();
                }
            }
        }
    }
}

impl<K, V> FusedIterator for Traverse<'_, K, V> {}

impl<K, V> fmt::Debug for Traverse<'_, K, V> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Traverse")
            .field("depth", &self.stack.len())
            .finish()
    }
}
