//! Heap nodes and the handles that address them.
//!
//! Nodes live in a `SlotMap` arena owned by the heap. Sibling rings, parent
//! back-references and child rings are all expressed as [`NodeKey`]s, so a
//! node can move between the root ring and any child ring by rewiring keys.

use circular_ring::{CircularRing, Linked, RingLink};
use slotmap::new_key_type;

use crate::traits::Handle;

new_key_type! {
    /// Handle to an element of a [`FibonacciHeap`](crate::fibonacci::FibonacciHeap).
    ///
    /// Handles are generation-checked: once the element has been extracted or
    /// removed, operations given its handle fail with
    /// [`HeapError::InvalidHandle`](crate::traits::HeapError::InvalidHandle)
    /// instead of touching a reused slot.
    pub struct NodeKey;
}

impl Handle for NodeKey {}

pub(crate) struct Node<K, V> {
    pub(crate) key: K,
    pub(crate) payload: V,
    /// Number of direct children; always equal to the child ring's length.
    pub(crate) degree: usize,
    /// Lost a child since it last became a child itself.
    pub(crate) marked: bool,
    /// `None` iff the node sits in the root ring.
    pub(crate) parent: Option<NodeKey>,
    /// Created on first link, dropped again when the last child is cut.
    pub(crate) children: Option<CircularRing<NodeKey>>,
    link: RingLink<NodeKey>,
}

impl<K, V> Node<K, V> {
    pub(crate) fn new(key: K, payload: V) -> Self {
        Node {
            key,
            payload,
            degree: 0,
            marked: false,
            parent: None,
            children: None,
            link: RingLink::new(),
        }
    }

    /// Puts the node back into the state of a freshly inserted one.
    ///
    /// Only valid once its children have been moved elsewhere.
    pub(crate) fn reset(&mut self) {
        debug_assert!(self.children.as_ref().map_or(true, |c| c.is_empty()));
        self.degree = 0;
        self.marked = false;
        self.parent = None;
        self.children = None;
    }
}

impl<K, V> Linked<NodeKey> for Node<K, V> {
    #[inline]
    fn ring_link(&self) -> &RingLink<NodeKey> {
        &self.link
    }

    #[inline]
    fn ring_link_mut(&mut self) -> &mut RingLink<NodeKey> {
        &mut self.link
    }
}
