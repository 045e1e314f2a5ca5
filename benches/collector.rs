//! Benchmarks for sample collection.
//!
//! Measures the two sides of a collector:
//! - Appending raw samples, the cost paid by samplers
//! - Draining and transforming a batch, sequentially and on the rayon pool

extern crate stackscope;

use criterion::{criterion_group, criterion_main, BatchSize, Criterion};
use stackscope::prelude::*;
use std::{hint::black_box, sync::Arc, time::Instant};

const APP_DOMAIN: AppDomainId = AppDomainId(1);

fn collector(config: SamplingConfig) -> Collector<WallTimeValues> {
    let frames = Arc::new(FrameCache::new());
    for ip in 0..64 {
        frames.insert(0x1000 + ip * 0x10, Frame::new("App.dll", format!("Method{ip}")));
    }

    let app_domains = Arc::new(AppDomainMap::new());
    app_domains.insert(APP_DOMAIN, 4242, "DefaultDomain");

    Collector::new(
        "WallTimeProvider",
        ValueType::WallTime.index(),
        frames,
        app_domains,
        Arc::new(RuntimeIdMap::new()),
        config,
    )
}

fn raw_sample(timestamp: u64, thread: &ThreadInfoRc) -> RawSample<WallTimeValues> {
    let mut raw = RawSample::new(timestamp, APP_DOMAIN, WallTimeValues { duration_ns: 10 });
    raw.stack = (0..32).map(|ip| 0x1000 + ip * 0x10).collect();
    raw.thread_info = Some(thread.clone());
    raw
}

/// Benchmark appending a single raw sample.
fn bench_add(c: &mut Criterion) {
    let collector = collector(SamplingConfig::default());
    let thread = Arc::new(ThreadInfo::new(RuntimeThreadId::new(1)));

    c.bench_function("collector_add", |b| {
        b.iter_custom(|iters| {
            let start = Instant::now();
            for i in 0..iters {
                collector.add(black_box(raw_sample(i, &thread)));
            }
            let elapsed = start.elapsed();
            // keep the buffer from growing across measurements
            drop(collector.samples());
            elapsed
        });
    });
}

/// Benchmark draining 10k samples on the calling thread.
fn bench_drain_sequential(c: &mut Criterion) {
    let collector = collector(SamplingConfig::sequential());
    let thread = Arc::new(ThreadInfo::new(RuntimeThreadId::new(1)));

    c.bench_function("collector_drain_sequential_10k", |b| {
        b.iter_batched(
            || {
                for i in 0..10_000 {
                    collector.add(raw_sample(i, &thread));
                }
            },
            |()| black_box(collector.samples()),
            BatchSize::LargeInput,
        );
    });
}

/// Benchmark draining 10k samples on the rayon pool.
fn bench_drain_parallel(c: &mut Criterion) {
    let collector = collector(SamplingConfig {
        parallel_transform_threshold: 1,
        ..SamplingConfig::default()
    });
    let thread = Arc::new(ThreadInfo::new(RuntimeThreadId::new(1)));

    c.bench_function("collector_drain_parallel_10k", |b| {
        b.iter_batched(
            || {
                for i in 0..10_000 {
                    collector.add(raw_sample(i, &thread));
                }
            },
            |()| black_box(collector.samples()),
            BatchSize::LargeInput,
        );
    });
}

criterion_group!(
    benches,
    bench_add,
    bench_drain_sequential,
    bench_drain_parallel
);
criterion_main!(benches);
