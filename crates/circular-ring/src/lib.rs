//! Circular doubly-linked sibling rings over arena-allocated nodes.
//!
//! A [`CircularRing`] is a descriptor (head + length) for a ring of nodes
//! whose `next`/`prev` links live inside the nodes themselves. The nodes are
//! owned by some store (a `SlotMap`, a slice, ...) and referenced by copyable
//! ids, so the ring never owns or frees anything: it only rewires links.
//!
//! # Circular vs Linear Lists
//!
//! In a circular list:
//! - A single node points to itself (both `next` and `prev`)
//! - Iteration wraps around, so it must remember where it started
//! - Insertion and removal are O(1) splices
//!
//! This is the shape Fibonacci heaps need: the roots form one ring and the
//! children of every node form another, and nodes migrate between rings as
//! trees are linked and cut.
//!
//! # Example
//!
//! ```rust
//! use circular_ring::{CircularRing, Linked, RingLink};
//! use slotmap::{DefaultKey, SlotMap};
//!
//! struct Node {
//!     link: RingLink<DefaultKey>,
//!     value: i32,
//! }
//!
//! impl Linked<DefaultKey> for Node {
//!     fn ring_link(&self) -> &RingLink<DefaultKey> {
//!         &self.link
//!     }
//!     fn ring_link_mut(&mut self) -> &mut RingLink<DefaultKey> {
//!         &mut self.link
//!     }
//! }
//!
//! let mut nodes = SlotMap::new();
//! let a = nodes.insert(Node { link: RingLink::new(), value: 1 });
//! let b = nodes.insert(Node { link: RingLink::new(), value: 2 });
//!
//! let mut ring = CircularRing::new();
//! ring.insert(&mut nodes, a);
//! ring.insert(&mut nodes, b);
//!
//! let values: Vec<i32> = ring.iter(&nodes).map(|id| nodes[id].value).collect();
//! assert_eq!(values, vec![1, 2]);
//! ```

#![cfg_attr(not(feature = "std"), no_std)]

use core::fmt;
use core::iter::FusedIterator;

use slotmap::{Key, SlotMap};

// =============================================================================
// RingLink
// =============================================================================

/// Sibling links embedded in a node.
///
/// A fresh link is unlinked (both sides `None`). Once a node has been through
/// a ring both sides always point at a node, possibly the node itself.
pub struct RingLink<Id> {
    next: Option<Id>,
    prev: Option<Id>,
}

impl<Id: Copy> RingLink<Id> {
    /// Creates a new unlinked `RingLink`.
    #[inline]
    pub const fn new() -> Self {
        RingLink {
            next: None,
            prev: None,
        }
    }

    /// Checks whether the link has ever been wired into a ring.
    #[inline]
    pub fn is_linked(&self) -> bool {
        self.next.is_some()
    }

    /// Gets the next (right) neighbour.
    #[inline]
    pub fn next(&self) -> Option<Id> {
        self.next
    }

    /// Gets the previous (left) neighbour.
    #[inline]
    pub fn prev(&self) -> Option<Id> {
        self.prev
    }

    #[inline]
    fn set(&mut self, prev: Id, next: Id) {
        self.prev = Some(prev);
        self.next = Some(next);
    }
}

impl<Id: Copy> Default for RingLink<Id> {
    #[inline]
    fn default() -> Self {
        RingLink::new()
    }
}

impl<Id: Copy> Clone for RingLink<Id> {
    /// Cloning a link creates a new unlinked link.
    #[inline]
    fn clone(&self) -> Self {
        RingLink::new()
    }
}

impl<Id> fmt::Debug for RingLink<Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.next.is_some() {
            write!(f, "RingLink(linked)")
        } else {
            write!(f, "RingLink(unlinked)")
        }
    }
}

// =============================================================================
// Stores
// =============================================================================

/// A node type that embeds a [`RingLink`].
pub trait Linked<Id> {
    fn ring_link(&self) -> &RingLink<Id>;
    fn ring_link_mut(&mut self) -> &mut RingLink<Id>;
}

/// Anything that can resolve a node id to the node's ring links.
///
/// Looking up an id that is not in the store is a logic error; the provided
/// impls panic on it the same way indexing does.
pub trait RingStore<Id> {
    fn link(&self, id: Id) -> &RingLink<Id>;
    fn link_mut(&mut self, id: Id) -> &mut RingLink<Id>;
}

impl<Id: Key, N: Linked<Id>> RingStore<Id> for SlotMap<Id, N> {
    #[inline]
    fn link(&self, id: Id) -> &RingLink<Id> {
        self[id].ring_link()
    }

    #[inline]
    fn link_mut(&mut self, id: Id) -> &mut RingLink<Id> {
        self[id].ring_link_mut()
    }
}

impl<N: Linked<usize>> RingStore<usize> for [N] {
    #[inline]
    fn link(&self, id: usize) -> &RingLink<usize> {
        self[id].ring_link()
    }

    #[inline]
    fn link_mut(&mut self, id: usize) -> &mut RingLink<usize> {
        self[id].ring_link_mut()
    }
}

// =============================================================================
// CircularRing
// =============================================================================

/// A ring of sibling nodes: head pointer plus member count.
///
/// Invariants:
/// - `len == 0` iff `head` is `None`
/// - a ring of one member is a self-loop
/// - every member's neighbours are members of this same ring
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CircularRing<Id> {
    head: Option<Id>,
    len: usize,
}

impl<Id> Default for CircularRing<Id> {
    #[inline]
    fn default() -> Self {
        CircularRing { head: None, len: 0 }
    }
}

impl<Id: Copy + Eq> CircularRing<Id> {
    /// Creates an empty ring.
    #[inline]
    pub const fn new() -> Self {
        CircularRing { head: None, len: 0 }
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.len
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    #[inline]
    pub fn head(&self) -> Option<Id> {
        self.head
    }

    /// Splices `id` in just before the head, i.e. as the new tail.
    ///
    /// If the ring is empty `id` becomes the head and a self-loop. The node
    /// must not currently be a member of any other ring; its old links are
    /// overwritten.
    pub fn insert<S>(&mut self, store: &mut S, id: Id)
    where
        S: RingStore<Id> + ?Sized,
    {
        match self.head {
            None => {
                store.link_mut(id).set(id, id);
                self.head = Some(id);
            }
            Some(head) => {
                let tail = prev_of(store, head);
                store.link_mut(id).set(tail, head);
                store.link_mut(tail).next = Some(id);
                store.link_mut(head).prev = Some(id);
            }
        }
        self.len += 1;
    }

    /// Splices `id` out of the ring and returns it.
    ///
    /// `id` must be a member of this ring. If it was the head, its right
    /// neighbour becomes the new head. Afterwards the removed node is an
    /// isolated self-loop.
    pub fn remove<S>(&mut self, store: &mut S, id: Id) -> Id
    where
        S: RingStore<Id> + ?Sized,
    {
        debug_assert!(self.len > 0, "remove from an empty ring");

        let next = next_of(store, id);
        let prev = prev_of(store, id);

        if next == id {
            self.head = None;
        } else {
            store.link_mut(prev).next = Some(next);
            store.link_mut(next).prev = Some(prev);
            if self.head == Some(id) {
                self.head = Some(next);
            }
        }

        store.link_mut(id).set(id, id);
        self.len -= 1;
        id
    }

    /// Forgets every member without touching their links.
    ///
    /// Only useful right before the members are re-inserted somewhere else,
    /// since `insert` overwrites links anyway.
    #[inline]
    pub fn clear(&mut self) {
        self.head = None;
        self.len = 0;
    }

    /// Walks the ring once starting at the head.
    pub fn iter<'a, S>(&self, store: &'a S) -> Iter<'a, S, Id>
    where
        S: RingStore<Id> + ?Sized,
    {
        Iter {
            store,
            start: self.head,
            next: self.head,
        }
    }

    /// Checks membership by walking the ring. O(n).
    pub fn contains<S>(&self, store: &S, id: Id) -> bool
    where
        S: RingStore<Id> + ?Sized,
    {
        self.iter(store).any(|member| member == id)
    }
}

/// Walks the ring that `start` belongs to, once, beginning at `start`.
///
/// Stops when the walk gets back to `start`.
pub fn iter_from<S, Id>(store: &S, start: Id) -> Iter<'_, S, Id>
where
    S: RingStore<Id> + ?Sized,
    Id: Copy + Eq,
{
    Iter {
        store,
        start: Some(start),
        next: Some(start),
    }
}

#[inline]
fn next_of<S, Id>(store: &S, id: Id) -> Id
where
    S: RingStore<Id> + ?Sized,
    Id: Copy,
{
    store.link(id).next().expect("ring member is not linked")
}

#[inline]
fn prev_of<S, Id>(store: &S, id: Id) -> Id
where
    S: RingStore<Id> + ?Sized,
    Id: Copy,
{
    store.link(id).prev().expect("ring member is not linked")
}

// =============================================================================
// Iteration
// =============================================================================

/// Iterator over ring members in `next` order.
///
/// Cloning the iterator restarts nothing; it forks the walk at its current
/// position. Call [`CircularRing::iter`] again to restart from the head.
pub struct Iter<'a, S: ?Sized, Id> {
    store: &'a S,
    start: Option<Id>,
    next: Option<Id>,
}

impl<S: ?Sized, Id: Copy> Clone for Iter<'_, S, Id> {
    fn clone(&self) -> Self {
        Iter {
            store: self.store,
            start: self.start,
            next: self.next,
        }
    }
}

impl<S: ?Sized, Id: fmt::Debug> fmt::Debug for Iter<'_, S, Id> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Iter")
            .field("start", &self.start)
            .field("next", &self.next)
            .finish()
    }
}

impl<S, Id> Iterator for Iter<'_, S, Id>
where
    S: RingStore<Id> + ?Sized,
    Id: Copy + Eq,
{
    type Item = Id;

    fn next(&mut self) -> Option<Id> {
        let current = self.next?;
        let following = self.store.link(current).next();
        self.next = match following {
            Some(id) if Some(id) != self.start => Some(id),
            _ => None,
        };
        Some(current)
    }
}

impl<S, Id> FusedIterator for Iter<'_, S, Id>
where
    S: RingStore<Id> + ?Sized,
    Id: Copy + Eq,
{
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use slotmap::DefaultKey;

    struct TestNode {
        link: RingLink<usize>,
        value: i32,
    }

    impl TestNode {
        fn new(value: i32) -> Self {
            TestNode {
                link: RingLink::new(),
                value,
            }
        }
    }

    impl Linked<usize> for TestNode {
        fn ring_link(&self) -> &RingLink<usize> {
            &self.link
        }
        fn ring_link_mut(&mut self) -> &mut RingLink<usize> {
            &mut self.link
        }
    }

    fn nodes(n: i32) -> Vec<TestNode> {
        (0..n).map(TestNode::new).collect()
    }

    fn members(ring: &CircularRing<usize>, store: &[TestNode]) -> Vec<i32> {
        ring.iter(store).map(|id| store[id].value).collect()
    }

    #[test]
    fn test_new_link_unlinked() {
        let link: RingLink<usize> = RingLink::new();
        assert!(!link.is_linked());
        assert!(!link.clone().is_linked());
    }

    #[test]
    fn test_empty_ring() {
        let store = nodes(0);
        let ring: CircularRing<usize> = CircularRing::new();
        assert!(ring.is_empty());
        assert_eq!(ring.len(), 0);
        assert_eq!(ring.head(), None);
        assert_eq!(ring.iter(store.as_slice()).count(), 0);
    }

    #[test]
    fn test_insert_single_is_self_loop() {
        let mut store = nodes(1);
        let mut ring = CircularRing::new();
        ring.insert(store.as_mut_slice(), 0);

        assert_eq!(ring.len(), 1);
        assert_eq!(ring.head(), Some(0));
        assert_eq!(store[0].link.next(), Some(0));
        assert_eq!(store[0].link.prev(), Some(0));
    }

    #[test]
    fn test_insert_goes_before_head() {
        let mut store = nodes(3);
        let mut ring = CircularRing::new();
        for id in 0..3 {
            ring.insert(store.as_mut_slice(), id);
        }

        // 0 <-> 1 <-> 2 <-> 0
        assert_eq!(ring.head(), Some(0));
        assert_eq!(members(&ring, &store), vec![0, 1, 2]);
        assert_eq!(store[0].link.prev(), Some(2));
        assert_eq!(store[2].link.next(), Some(0));
        assert_eq!(store[1].link.prev(), Some(0));
    }

    #[test]
    fn test_remove_only_member() {
        let mut store = nodes(1);
        let mut ring = CircularRing::new();
        ring.insert(store.as_mut_slice(), 0);

        assert_eq!(ring.remove(store.as_mut_slice(), 0), 0);
        assert!(ring.is_empty());
        assert_eq!(ring.head(), None);
        assert_eq!(store[0].link.next(), Some(0));
    }

    #[test]
    fn test_remove_head_moves_head_right() {
        let mut store = nodes(3);
        let mut ring = CircularRing::new();
        for id in 0..3 {
            ring.insert(store.as_mut_slice(), id);
        }

        ring.remove(store.as_mut_slice(), 0);
        assert_eq!(ring.head(), Some(1));
        assert_eq!(ring.len(), 2);
        assert_eq!(members(&ring, &store), vec![1, 2]);

        // Removed node is isolated.
        assert_eq!(store[0].link.next(), Some(0));
        assert_eq!(store[0].link.prev(), Some(0));
    }

    #[test]
    fn test_remove_middle() {
        let mut store = nodes(3);
        let mut ring = CircularRing::new();
        for id in 0..3 {
            ring.insert(store.as_mut_slice(), id);
        }

        ring.remove(store.as_mut_slice(), 1);
        assert_eq!(members(&ring, &store), vec![0, 2]);
        assert_eq!(store[0].link.next(), Some(2));
        assert_eq!(store[2].link.prev(), Some(0));
    }

    #[test]
    fn test_reinsert_after_remove() {
        let mut store = nodes(4);
        let mut a = CircularRing::new();
        let mut b = CircularRing::new();
        for id in 0..3 {
            a.insert(store.as_mut_slice(), id);
        }
        b.insert(store.as_mut_slice(), 3);

        let moved = a.remove(store.as_mut_slice(), 1);
        b.insert(store.as_mut_slice(), moved);

        assert_eq!(members(&a, &store), vec![0, 2]);
        assert_eq!(members(&b, &store), vec![3, 1]);
        assert!(b.contains(store.as_slice(), 1));
        assert!(!a.contains(store.as_slice(), 1));
    }

    #[test]
    fn test_iter_from_member_wraps_once() {
        let mut store = nodes(5);
        let mut ring = CircularRing::new();
        for id in 0..5 {
            ring.insert(store.as_mut_slice(), id);
        }

        let walk: Vec<usize> = iter_from(store.as_slice(), 3).collect();
        assert_eq!(walk, vec![3, 4, 0, 1, 2]);

        // Restartable: a second walk sees the same members.
        assert_eq!(ring.iter(store.as_slice()).count(), 5);
        assert_eq!(ring.iter(store.as_slice()).count(), 5);
    }

    #[test]
    fn test_clear_then_rebuild() {
        let mut store = nodes(3);
        let mut ring = CircularRing::new();
        for id in 0..3 {
            ring.insert(store.as_mut_slice(), id);
        }

        ring.clear();
        assert!(ring.is_empty());
        ring.insert(store.as_mut_slice(), 2);
        ring.insert(store.as_mut_slice(), 0);
        assert_eq!(members(&ring, &store), vec![2, 0]);
    }

    struct KeyedNode {
        link: RingLink<DefaultKey>,
        value: i32,
    }

    impl Linked<DefaultKey> for KeyedNode {
        fn ring_link(&self) -> &RingLink<DefaultKey> {
            &self.link
        }
        fn ring_link_mut(&mut self) -> &mut RingLink<DefaultKey> {
            &mut self.link
        }
    }

    #[test]
    fn test_slotmap_store() {
        let mut store: SlotMap<DefaultKey, KeyedNode> = SlotMap::new();
        let keys: Vec<_> = (0..4)
            .map(|value| {
                store.insert(KeyedNode {
                    link: RingLink::new(),
                    value,
                })
            })
            .collect();

        let mut ring = CircularRing::new();
        for &k in &keys {
            ring.insert(&mut store, k);
        }
        ring.remove(&mut store, keys[2]);

        let values: Vec<i32> = ring.iter(&store).map(|k| store[k].value).collect();
        assert_eq!(values, vec![0, 1, 3]);
    }
}
