//! Wall-clock benchmarks for the core heap operations
//!
//! ```bash
//! cargo bench --bench heap_ops
//! ```
//!
//! Groups:
//! - `insert_extract`: n inserts followed by n extractions
//! - `decrease_key`: handle-based decrease of every element after one
//!   consolidation
//! - `find`: key lookup through the `Search` and `Indexed` strategies

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, BatchSize, BenchmarkId, Criterion};
use fibqueue::{FibonacciHeap, Indexed, KeyLookup, Search};

const SIZES: [u32; 3] = [1_000, 10_000, 100_000];

/// Scrambled but reproducible keys so inserts are not already sorted.
fn keys(n: u32) -> Vec<u32> {
    (0..n).map(|i| i.wrapping_mul(2_654_435_761) % (n * 4)).collect()
}

fn filled<L: KeyLookup<u32>>(keys: &[u32]) -> FibonacciHeap<u32, u32, L> {
    let mut heap = FibonacciHeap::with_capacity_and_lookup(keys.len());
    for (i, k) in keys.iter().enumerate() {
        heap.insert(*k, i as u32);
    }
    heap
}

fn bench_insert_extract(c: &mut Criterion) {
    let mut group = c.benchmark_group("insert_extract");
    for &n in &SIZES {
        let input = keys(n);
        group.bench_with_input(BenchmarkId::new("search", n), &input, |b, ks| {
            b.iter(|| {
                let mut heap = filled::<Search>(ks);
                while let Ok(item) = heap.extract_min() {
                    black_box(item);
                }
            })
        });
        group.bench_with_input(BenchmarkId::new("indexed", n), &input, |b, ks| {
            b.iter(|| {
                let mut heap = filled::<Indexed<u32>>(ks);
                while let Ok(item) = heap.extract_min() {
                    black_box(item);
                }
            })
        });
    }
    group.finish();
}

fn bench_decrease_key(c: &mut Criterion) {
    let mut group = c.benchmark_group("decrease_key");
    for &n in &SIZES {
        let input: Vec<u32> = keys(n).into_iter().map(|k| k + n * 4).collect();
        group.bench_with_input(BenchmarkId::from_parameter(n), &input, |b, ks| {
            b.iter_batched(
                || {
                    let mut heap = FibonacciHeap::with_capacity(ks.len() + 1);
                    let handles: Vec<_> = ks.iter().map(|k| heap.insert(*k, ())).collect();
                    heap.insert(0, ());
                    heap.extract_min().ok();
                    (heap, handles)
                },
                |(mut heap, handles)| {
                    for (i, h) in handles.iter().enumerate() {
                        heap.decrease_key(*h, i as u32).ok();
                    }
                    black_box(heap.minimum().map(|(k, _)| *k));
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_find(c: &mut Criterion) {
    let mut group = c.benchmark_group("find");
    // Search is linear per lookup, so stay at the small sizes.
    for &n in &SIZES[..2] {
        let input = keys(n);
        let probes: Vec<u32> = input.iter().step_by(97).copied().collect();

        let mut search = filled::<Search>(&input);
        search.insert(0, 0);
        search.extract_min().ok();
        group.bench_with_input(BenchmarkId::new("search", n), &probes, |b, ps| {
            b.iter(|| ps.iter().filter(|k| search.contains_key(k)).count())
        });

        let mut indexed = filled::<Indexed<u32>>(&input);
        indexed.insert(0, 0);
        indexed.extract_min().ok();
        group.bench_with_input(BenchmarkId::new("indexed", n), &probes, |b, ps| {
            b.iter(|| ps.iter().filter(|k| indexed.contains_key(k)).count())
        });
    }
    group.finish();
}

criterion_group!(benches, bench_insert_extract, bench_decrease_key, bench_find);
criterion_main!(benches);
