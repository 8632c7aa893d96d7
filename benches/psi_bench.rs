//! Benchmarks for the PSI engine.
//!
//! Run with: cargo bench

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use psi_engine::{compute_psi, histogram::BinEdges, CategoricalEncoding, PsiConfig, ValueRange};
use std::hint::black_box;

fn generate_sample(n: usize, seed: u64, shift: f64) -> Vec<f64> {
    // Simple deterministic pseudo-random for reproducibility
    let mut sample = Vec::with_capacity(n);
    let mut x = seed;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        sample.push((x as f64) / (u64::MAX as f64) * 100.0 + shift);
    }
    sample
}

fn generate_labels(n: usize, seed: u64, n_categories: u64) -> Vec<String> {
    let mut labels = Vec::with_capacity(n);
    let mut x = seed;
    for _ in 0..n {
        x = x.wrapping_mul(6364136223846793005).wrapping_add(1);
        labels.push(format!("cat_{}", (x >> 33) % n_categories));
    }
    labels
}

fn bench_numeric_psi(c: &mut Criterion) {
    let mut group = c.benchmark_group("numeric_psi");

    for size in [100, 1_000, 10_000, 100_000].iter() {
        let baseline = generate_sample(*size, 42, 0.0);
        let comparison = generate_sample(*size, 123, 5.0);

        group.throughput(Throughput::Elements(*size as u64 * 2));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| compute_psi(black_box(&baseline), black_box(&comparison), 10))
        });
    }

    group.finish();
}

fn bench_bin_counts(c: &mut Criterion) {
    let mut group = c.benchmark_group("bin_count");
    let baseline = generate_sample(10_000, 42, 0.0);
    let comparison = generate_sample(10_000, 123, 5.0);

    for bins in [5, 10, 50, 200].iter() {
        group.bench_with_input(BenchmarkId::from_parameter(bins), bins, |b, &bins| {
            b.iter(|| {
                PsiConfig::with_bin_count(bins).compute(black_box(&baseline), black_box(&comparison))
            })
        });
    }

    group.finish();
}

fn bench_categorical(c: &mut Criterion) {
    let mut group = c.benchmark_group("categorical");

    for n_categories in [5, 50, 500].iter() {
        let baseline = generate_labels(10_000, 42, *n_categories);
        let comparison = generate_labels(10_000, 123, *n_categories);

        group.bench_with_input(
            BenchmarkId::new("encode", n_categories),
            n_categories,
            |b, _| b.iter(|| CategoricalEncoding::encode(black_box(&baseline), black_box(&comparison))),
        );

        group.bench_with_input(
            BenchmarkId::new("compute_psi", n_categories),
            n_categories,
            |b, _| {
                b.iter(|| {
                    compute_psi(
                        black_box(baseline.clone()),
                        black_box(comparison.clone()),
                        10,
                    )
                })
            },
        );
    }

    group.finish();
}

fn bench_histogram(c: &mut Criterion) {
    let mut group = c.benchmark_group("histogram");

    for size in [1_000, 100_000].iter() {
        let sample = generate_sample(*size, 7, 0.0);
        let edges = BinEdges::uniform(ValueRange::new(0.0, 100.0), 10).unwrap();

        group.throughput(Throughput::Elements(*size as u64));
        group.bench_with_input(BenchmarkId::from_parameter(size), size, |b, _| {
            b.iter(|| edges.histogram(black_box(&sample)))
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_numeric_psi,
    bench_bin_counts,
    bench_categorical,
    bench_histogram,
);

criterion_main!(benches);
