//! Benchmark suite for tier transitions.
//!
//! Measures:
//! - Rule table lookups
//! - Accepted and rejected transitions without a tracing subscriber
//! - The same transitions with a JSON subscriber installed
//!
//! Run with: `cargo bench --bench transition_overhead`

#![allow(clippy::let_underscore_must_use, reason = "Criterion benchmarks ignore results")]
#![allow(missing_docs, reason = "Benchmark functions are self-documenting")]

use std::hint::black_box;

use criterion::{BenchmarkId, Criterion, criterion_group, criterion_main};
use membership_tiers::{TierKind, change_tier, new_free_tier, rules::is_valid};

/// Benchmark rule table lookups for every tier
fn bench_rule_lookup(c: &mut Criterion) {
    let mut group = c.benchmark_group("rule_lookup");

    for kind in TierKind::ALL {
        group.bench_with_input(BenchmarkId::from_parameter(kind), &kind, |b, &kind| {
            b.iter(|| {
                for target in 0..=5 {
                    black_box(is_valid(black_box(kind), black_box(target)));
                }
            });
        });
    }

    group.finish();
}

/// Benchmark transitions with logging disabled
fn bench_transition_no_logging(c: &mut Criterion) {
    let _ = tracing_subscriber::fmt().with_max_level(tracing::Level::ERROR).try_init();

    c.bench_function("transition_accepted_no_logging", |b| {
        b.iter(|| {
            let tier = new_free_tier("correo@prueba.cl", "123 456 789");
            black_box(change_tier(tier, black_box(4)))
        });
    });

    c.bench_function("transition_rejected_no_logging", |b| {
        b.iter(|| {
            let tier = new_free_tier("correo@prueba.cl", "123 456 789");
            black_box(change_tier(tier, black_box(0)))
        });
    });
}

/// Benchmark transitions with JSON logging at INFO
fn bench_transition_json_logging(c: &mut Criterion) {
    c.bench_function("transition_accepted_json_logging", |b| {
        let subscriber = tracing_subscriber::fmt()
            .json()
            .with_max_level(tracing::Level::INFO)
            .with_writer(std::io::sink)
            .finish();

        tracing::subscriber::with_default(subscriber, || {
            b.iter(|| {
                let tier = new_free_tier("correo@prueba.cl", "123 456 789");
                black_box(change_tier(tier, black_box(2)))
            });
        });
    });
}

criterion_group!(
    benches,
    bench_rule_lookup,
    bench_transition_no_logging,
    bench_transition_json_logging
);
criterion_main!(benches);
