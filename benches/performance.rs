//! Performance benchmarks for the point ledger.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use point_ledger::{PointService, UserId};
use std::sync::Arc;
use std::thread;

/// Benchmark serialized mutation throughput on a single contended user.
fn bench_contended_charges(c: &mut Criterion) {
    let mut group = c.benchmark_group("contended_charges");

    for threads in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("threads", threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let service = Arc::new(PointService::new());
                    let handles: Vec<_> = (0..threads)
                        .map(|_| {
                            let service = Arc::clone(&service);
                            thread::spawn(move || {
                                for _ in 0..100 {
                                    service.charge(UserId(1), 1).unwrap();
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    black_box(service.balance(UserId(1)).unwrap());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark mutation throughput across disjoint users, which should scale
/// rather than serialize.
fn bench_disjoint_charges(c: &mut Criterion) {
    let mut group = c.benchmark_group("disjoint_charges");

    for threads in [1, 2, 4, 8] {
        group.bench_with_input(
            BenchmarkId::new("threads", threads),
            &threads,
            |b, &threads| {
                b.iter(|| {
                    let service = Arc::new(PointService::new());
                    let handles: Vec<_> = (0..threads)
                        .map(|i| {
                            let service = Arc::clone(&service);
                            thread::spawn(move || {
                                let user = UserId(i as u64 + 1);
                                for _ in 0..100 {
                                    service.charge(user, 1).unwrap();
                                }
                            })
                        })
                        .collect();
                    for handle in handles {
                        handle.join().unwrap();
                    }
                    black_box(service.stats());
                });
            },
        );
    }

    group.finish();
}

/// Benchmark lock-free query paths against a populated ledger.
fn bench_queries(c: &mut Criterion) {
    let service = PointService::new();
    for user in 1..=100u64 {
        for _ in 0..10 {
            service.charge(UserId(user), 5).unwrap();
        }
    }

    c.bench_function("balance_query", |b| {
        b.iter(|| black_box(service.balance(UserId(50)).unwrap()));
    });

    c.bench_function("history_query", |b| {
        b.iter(|| black_box(service.history(UserId(50)).unwrap()));
    });
}

criterion_group!(
    benches,
    bench_contended_charges,
    bench_disjoint_charges,
    bench_queries
);
criterion_main!(benches);
