//! Fibonacci-heap priority queue engine
//!
//! This crate provides a Fibonacci heap backed by a node arena, with both
//! handle-based and key-based access, and a task queue built on top of it.
//!
//! # Features
//!
//! - **Fibonacci Heap**: O(1) amortized insert and decrease_key; O(log n)
//!   amortized extract_min and delete
//! - **Key lookup strategies**: exhaustive depth-first search or a hash index,
//!   chosen per heap type
//! - **Task queue**: unique priorities, validated descriptions, bounded size,
//!   `tracing` diagnostics
//!
//! # Crate Layout
//!
//! - [`fibonacci`]: the heap and its algorithms (link, consolidate, cut,
//!   cascading cut)
//! - [`node`]: arena nodes and [`NodeKey`] handles
//! - [`lookup`]: [`Search`] and [`Indexed`] key lookup
//! - [`traversal`]: read-only depth-first walk of the forest
//! - [`traits`]: [`Heap`] / [`DecreaseKeyHeap`] and [`HeapError`]
//! - [`task`], [`config`]: the task queue and its limits
//!
//! Sibling rings come from the `circular-ring` workspace crate.
//!
//! # Example
//!
//! ```rust
//! use fibqueue::fibonacci::FibonacciHeap;
//!
//! let mut heap = FibonacciHeap::new();
//! for key in [23, 7, 21, 3, 52, 18] {
//!     heap.insert(key, ());
//! }
//! heap.modify_key(&52, 1).unwrap();
//! heap.delete(&7).unwrap();
//!
//! let keys: Vec<i32> = std::iter::from_fn(|| heap.extract_min().ok())
//!     .map(|(k, _)| k)
//!     .collect();
//! assert_eq!(keys, vec![1, 3, 18, 21, 23]);
//! ```

pub mod config;
pub mod fibonacci;
pub mod lookup;
pub mod node;
pub mod task;
pub mod traits;
pub mod traversal;

// Re-export the main types for convenience
pub use fibonacci::FibonacciHeap;
pub use lookup::{Indexed, KeyLookup, Search};
pub use node::NodeKey;
pub use traits::{DecreaseKeyHeap, Handle, Heap, HeapError};
