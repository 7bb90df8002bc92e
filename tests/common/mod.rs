//! Shared structural checks for integration tests
//!
//! Everything here goes through the public traversal API, so it checks what
//! a caller can observe rather than the arena layout.

#![allow(dead_code)]

use std::collections::HashMap;
use std::fmt::Debug;

use fibqueue::fibonacci::FibonacciHeap;
use fibqueue::lookup::KeyLookup;

/// Panics unless the forest is heap-ordered, degrees match child counts, the
/// visible node count equals `len()`, and the cached minimum is a smallest
/// root.
pub fn check_forest<K, V, L>(heap: &FibonacciHeap<K, V, L>)
where
    K: Ord + Debug,
    L: KeyLookup<K>,
{
    let views: Vec<_> = heap.iter().collect();
    assert_eq!(views.len(), heap.len(), "traversal sees every element");

    let mut children_seen = HashMap::new();
    let mut roots = 0;
    for view in &views {
        match view.parent {
            None => {
                assert_eq!(view.depth, 0);
                roots += 1;
            }
            Some(parent) => {
                let parent_view = heap.node(parent).expect("parent is live");
                assert!(
                    parent_view.key <= view.key,
                    "heap order violated: {:?} above {:?}",
                    parent_view.key,
                    view.key
                );
                *children_seen.entry(parent).or_insert(0usize) += 1;
            }
        }
    }
    assert_eq!(roots, heap.root_count());

    for view in &views {
        let seen = children_seen.get(&view.handle).copied().unwrap_or(0);
        assert_eq!(view.degree, seen, "degree of {:?}", view.key);
    }

    match heap.minimum() {
        None => assert!(heap.is_empty()),
        Some((min, _)) => {
            let smallest = views.iter().map(|v| v.key).min().expect("non-empty");
            assert_eq!(min, smallest);
            let handle = heap.min_handle().expect("min handle with a minimum");
            assert!(heap.node(handle).expect("min is live").is_root());
        }
    }
}

/// Whether no two roots share a degree, as after a consolidation.
pub fn root_degrees_distinct<K, V, L>(heap: &FibonacciHeap<K, V, L>) -> bool {
    let mut degrees: Vec<usize> = heap
        .iter()
        .filter(|v| v.is_root())
        .map(|v| v.degree)
        .collect();
    let before = degrees.len();
    degrees.sort_unstable();
    degrees.dedup();
    degrees.len() == before
}

/// Drains the heap, returning keys in extraction order.
pub fn drain_keys<K, V, L>(heap: &mut FibonacciHeap<K, V, L>) -> Vec<K>
where
    K: Ord,
    L: KeyLookup<K>,
{
    let mut keys = Vec::with_capacity(heap.len());
    while let Ok((key, _)) = heap.extract_min() {
        keys.push(key);
    }
    keys
}
