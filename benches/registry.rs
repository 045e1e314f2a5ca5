//! Benchmarks for the thread registry.
//!
//! Measures the operations on the sampling path and on the thread lifecycle path:
//! - Walking the registry with a cursor
//! - Looking threads up by runtime id
//! - Creating and destroying threads

extern crate stackscope;

use criterion::{criterion_group, criterion_main, Criterion};
use stackscope::prelude::*;
use std::hint::black_box;

fn populated(count: usize) -> ThreadRegistry {
    let registry = ThreadRegistry::new();
    for id in 1..=count {
        registry.set_os_info(
            RuntimeThreadId::new(id),
            OsThreadId(id as u32),
            OsThreadHandle(id),
        );
    }
    registry
}

/// Benchmark one step of a round-robin walk over 200 threads.
fn bench_loop_next(c: &mut Criterion) {
    let registry = populated(200);
    let cursor = registry.create_cursor();

    c.bench_function("registry_loop_next_200", |b| {
        b.iter(|| black_box(registry.loop_next(cursor)));
    });
}

/// Benchmark a lookup by runtime id among 200 threads.
fn bench_find_by_runtime_id(c: &mut Criterion) {
    let registry = populated(200);

    c.bench_function("registry_find_by_runtime_id_200", |b| {
        b.iter(|| black_box(registry.find_by_runtime_id(black_box(RuntimeThreadId::new(150)))));
    });
}

/// Benchmark a thread created and destroyed while 200 others are alive and 4 cursors exist.
fn bench_create_destroy(c: &mut Criterion) {
    let registry = populated(200);
    for _ in 0..4 {
        registry.create_cursor();
    }
    let id = RuntimeThreadId::new(10_000);

    c.bench_function("registry_create_destroy_200", |b| {
        b.iter(|| {
            registry.get_or_create(id);
            black_box(registry.unregister(id))
        });
    });
}

criterion_group!(
    benches,
    bench_loop_next,
    bench_find_by_runtime_id,
    bench_create_destroy
);
criterion_main!(benches);
