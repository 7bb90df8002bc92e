//! Common traits for heap data structures
//!
//! This module provides a two-tier trait hierarchy for priority queues:
//!
//! - [`Heap`]: Base trait with the `BinaryHeap`-like surface (push/pop/peek)
//! - [`DecreaseKeyHeap`]: Extended trait adding handle-based `decrease_key`
//!
//! [`FibonacciHeap`](crate::fibonacci::FibonacciHeap) implements both, on top
//! of its richer inherent API (key lookup, modify/replace/delete by key).

use std::fmt;

/// Error type for heap operations
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HeapError {
    /// Extraction attempted on a heap with no elements
    EmptyHeap,
    /// No element carries the requested key
    KeyNotFound,
    /// The handle is no longer valid (element was removed)
    InvalidHandle,
    /// `decrease_key` was given a key larger than the current one
    KeyIncreased,
}

impl fmt::Display for HeapError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            HeapError::EmptyHeap => write!(f, "heap is empty"),
            HeapError::KeyNotFound => write!(f, "no element with the given key"),
            HeapError::InvalidHandle => {
                write!(f, "handle is no longer valid (element was removed)")
            }
            HeapError::KeyIncreased => {
                write!(f, "new key is greater than the current key")
            }
        }
    }
}

impl std::error::Error for HeapError {}

/// A handle to an element in the heap, used for decrease_key operations
///
/// This is an opaque type that identifies a specific element in the heap.
pub trait Handle: Clone + PartialEq + Eq {}

/// Base trait for heap/priority queue data structures
///
/// Unlike `BinaryHeap` which stores values directly (using `Ord`), these heaps
/// store (key, item) pairs to separate the ordering key from the data, and
/// they are min-heaps.
///
/// # Example
///
/// ```rust
/// use fibqueue::Heap;
/// use fibqueue::fibonacci::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<i32, &str> = Heap::new();
/// heap.push(3, "three");
/// heap.push(1, "one");
/// heap.push(2, "two");
///
/// assert_eq!(heap.peek(), Some((&1, &"one")));
/// assert_eq!(heap.pop(), Some((1, "one")));
/// ```
pub trait Heap<K: Ord, V> {
    /// Creates a new empty heap
    fn new() -> Self;

    /// Returns true if the heap is empty
    fn is_empty(&self) -> bool;

    /// Returns the number of elements in the heap
    fn len(&self) -> usize;

    /// Inserts an element with the given key
    fn push(&mut self, key: K, item: V);

    /// Returns the minimum key and associated item without removing it
    ///
    /// # Time Complexity
    /// O(1)
    fn peek(&self) -> Option<(&K, &V)>;

    /// Removes and returns the minimum key and associated item
    fn pop(&mut self) -> Option<(K, V)>;

    /// Merges another heap into this one, consuming the other heap
    fn merge(&mut self, other: Self);
}

/// Extended heap trait with `decrease_key` support
///
/// # Example
///
/// ```rust
/// use fibqueue::{DecreaseKeyHeap, Heap};
/// use fibqueue::fibonacci::FibonacciHeap;
///
/// let mut heap: FibonacciHeap<i32, &str> = Heap::new();
/// let handle = heap.push_with_handle(10, "item");
/// DecreaseKeyHeap::decrease_key(&mut heap, &handle, 5).unwrap();
/// assert_eq!(heap.peek(), Some((&5, &"item")));
/// ```
pub trait DecreaseKeyHeap<K: Ord, V>: Heap<K, V> {
    /// The handle type for this heap, used to reference elements for decrease_key
    type Handle: Handle;

    /// Inserts an element with the given key, returning a handle
    fn push_with_handle(&mut self, key: K, item: V) -> Self::Handle;

    /// Lowers the key of the element identified by the handle
    ///
    /// An equal key is accepted and leaves the heap unchanged.
    ///
    /// # Errors
    /// - `HeapError::InvalidHandle` if the element has already been removed
    /// - `HeapError::KeyIncreased` if the new key is greater than the current one
    fn decrease_key(&mut self, handle: &Self::Handle, new_key: K) -> Result<(), HeapError>;
}
