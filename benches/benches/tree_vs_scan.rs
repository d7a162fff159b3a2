// Copyright 2026 the Spanline Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Compare the static interval tree against a brute-force scan of the
//! backing collection, across collection sizes, plus the cost of a full
//! rebuild after a mutation.

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use spanline::{Interval, StaticIntervalTree};

const SIZES: &[usize] = &[100, 1_000, 10_000, 50_000];

fn gen_intervals(n: usize, seed: u64) -> Vec<Interval<i64>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let domain = (n as i64) * 10;
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let min = rng.gen_range(0..domain);
        let len = rng.gen_range(1..200);
        out.push(Interval::closed(min, min + len).unwrap());
    }
    out
}

fn gen_queries(n: usize, domain: i64, seed: u64) -> Vec<Interval<i64>> {
    let mut rng = SmallRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(n);
    for _ in 0..n {
        let min = rng.gen_range(0..domain);
        let len = rng.gen_range(1..500);
        out.push(Interval::closed(min, min + len).unwrap());
    }
    out
}

fn bench_interval_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_interval");
    for &n in SIZES {
        let intervals = gen_intervals(n, 0xA11CE);
        let queries = gen_queries(64, (n as i64) * 10, 0xB0B);

        group.throughput(Throughput::Elements(queries.len() as u64));
        group.bench_function(format!("tree/{n}"), |b| {
            let mut tree = StaticIntervalTree::from_intervals(intervals.clone());
            b.iter(|| {
                let mut hits = 0_usize;
                for query in &queries {
                    hits += tree.query_interval(black_box(query)).count();
                }
                black_box(hits)
            });
        });
        group.bench_function(format!("scan/{n}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for query in &queries {
                    hits += intervals
                        .iter()
                        .filter(|stored| stored.overlaps(black_box(query)))
                        .count();
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

fn bench_point_queries(c: &mut Criterion) {
    let mut group = c.benchmark_group("query_point");
    for &n in SIZES {
        let intervals = gen_intervals(n, 0xA11CE);
        let mut rng = SmallRng::seed_from_u64(0xCAB);
        let points: Vec<i64> = (0..64).map(|_| rng.gen_range(0..(n as i64) * 10)).collect();

        group.throughput(Throughput::Elements(points.len() as u64));
        group.bench_function(format!("tree/{n}"), |b| {
            let mut tree = StaticIntervalTree::from_intervals(intervals.clone());
            b.iter(|| {
                let mut hits = 0_usize;
                for point in &points {
                    hits += tree.query_point(black_box(point)).count();
                }
                black_box(hits)
            });
        });
        group.bench_function(format!("scan/{n}"), |b| {
            b.iter(|| {
                let mut hits = 0_usize;
                for point in &points {
                    hits += intervals
                        .iter()
                        .filter(|stored| stored.contains_point(black_box(point)))
                        .count();
                }
                black_box(hits)
            });
        });
    }
    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    for &n in SIZES {
        let intervals = gen_intervals(n, 0xA11CE);
        let probe = Interval::closed(0, 1).unwrap();

        group.throughput(Throughput::Elements(n as u64));
        group.bench_function(format!("{n}"), |b| {
            // Each iteration mutates and queries once, forcing a full build.
            b.iter_batched(
                || StaticIntervalTree::from_intervals(intervals.clone()),
                |mut tree| {
                    tree.add(Interval::closed(1, 2).unwrap());
                    black_box(tree.query_interval(&probe).count())
                },
                BatchSize::SmallInput,
            );
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_interval_queries,
    bench_point_queries,
    bench_rebuild
);
criterion_main!(benches);
