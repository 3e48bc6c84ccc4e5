//! Lanai Benchmarks
//!
//! Criterion benchmarks for the registry tree: insertion, glob lookups and
//! pattern matching over a synthetic event namespace.
//!
//! To run the benchmarks:
//! ```bash
//! cargo bench --features benchmarking
//! ```

use criterion::{
    black_box, criterion_group, criterion_main, measurement::WallTime, BenchmarkId, Criterion,
    SamplingMode, Throughput,
};
use lanai_lib::data_structures::lanai_glob_tree::{LanaiGlobTree, QueryOptions};
use std::time::Duration;

/// `service.entity.action` keys, `size` of them.
fn keys(size: usize) -> Vec<String> {
    (0..size)
        .map(|i| format!("svc{}.entity{}.action{}", i % 10, (i / 10) % 10, i / 100))
        .collect()
}

fn populated(size: usize) -> LanaiGlobTree<usize> {
    let mut tree = LanaiGlobTree::new();
    for (i, key) in keys(size).iter().enumerate() {
        tree.insert(key, i).unwrap();
    }
    for (i, pattern) in ["**", "svc1.**", "*.entity2.*", "**.action3", "svc4.*.action0"]
        .iter()
        .enumerate()
    {
        tree.insert(pattern, size + i).unwrap();
    }
    tree
}

fn bench_insert(c: &mut Criterion) {
    let mut group = c.benchmark_group("lanai_insert");
    group.sampling_mode(SamplingMode::Flat);
    group.measurement_time(Duration::from_secs(2));
    group.warm_up_time(Duration::from_secs(1));

    for size in [100, 1000, 10_000] {
        let keys = keys(size);
        group.throughput(Throughput::Elements(size as u64));
        group.bench_with_input(BenchmarkId::new("insert", size), &keys, |b, keys| {
            b.iter(|| {
                let mut tree = LanaiGlobTree::new();
                for (i, key) in keys.iter().enumerate() {
                    tree.insert(black_box(key), i).unwrap();
                }
                tree
            });
        });
    }

    group.finish();
}

fn bench_glob(c: &mut Criterion) {
    let tree = populated(10_000);
    let mut group = c.benchmark_group("lanai_glob");
    group.measurement_time(Duration::from_secs(2));

    for pattern in ["svc3.entity4.action5", "svc3.*", "svc3.*.action5", "svc3.**", "**.action5"] {
        group.bench_with_input(BenchmarkId::new("glob", pattern), pattern, |b, pattern| {
            let options = QueryOptions::new().with_matchers(false);
            b.iter(|| tree.query(black_box(pattern), options).drain_to_list(&tree).len());
        });
    }

    group.finish();
}

fn bench_matchers(c: &mut Criterion) {
    let tree = populated(10_000);
    let mut group = c.benchmark_group("lanai_matchers");
    group.measurement_time(Duration::from_secs(2));

    for key in ["svc1.entity2.action3", "svc4.entity0.action0", "svc9.entity9.action9"] {
        group.bench_with_input(BenchmarkId::new("matchers", key), key, |b, key| {
            b.iter(|| tree.matchers(black_box(key)).drain_to_list(&tree).len());
        });
    }

    group.bench_function("combined_query", |b| {
        b.iter(|| {
            tree.query(black_box("svc1.entity2.action3"), QueryOptions::new())
                .drain_to_list(&tree)
                .len()
        });
    });

    group.finish();
}

criterion_group! {
    name = benches;
    config = Criterion::default()
        .with_measurement(WallTime)
        .significance_level(0.01)
        .noise_threshold(0.02)
        .confidence_level(0.99);
    targets = bench_insert, bench_glob, bench_matchers
}

criterion_main!(benches);
