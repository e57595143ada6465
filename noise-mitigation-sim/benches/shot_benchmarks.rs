// benches/shot_benchmarks.rs

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use noise_mitigation_sim::prelude::*;
use rand::rngs::StdRng;
use rand::SeedableRng;

fn benchmark_shots(c: &mut Criterion) {
    let bell = Circuit::bell_pair();
    let noise = NoiseModel::depolarizing(0.05).unwrap();

    c.bench_function("bell_1024_shots_shared_rng", |b| {
        let mut rng = StdRng::seed_from_u64(42);
        b.iter(|| run(black_box(&bell), black_box(&noise), 1024, &mut rng).unwrap());
    });

    c.bench_function("bell_1024_shots_sample_counts", |b| {
        b.iter(|| sample_counts(black_box(&bell), black_box(&noise), 1024, 42).unwrap());
    });

    let ghz = Circuit::ghz(16).unwrap();
    c.bench_function("ghz16_1024_shots_sample_counts", |b| {
        b.iter(|| sample_counts(black_box(&ghz), black_box(&noise), 1024, 42).unwrap());
    });
}

fn benchmark_mitigation(c: &mut Criterion) {
    let noise = NoiseModel::depolarizing(0.5).unwrap();
    let counts = sample_counts(&Circuit::ghz(8).unwrap(), &noise, 4096, 7).unwrap();

    c.bench_function("mitigate_ghz8_table", |b| {
        b.iter(|| mitigate(black_box(&counts)).unwrap());
    });
}

criterion_group!(benches, benchmark_shots, benchmark_mitigation);
criterion_main!(benches);
