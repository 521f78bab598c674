//! Benchmarks for lumina kernels.
//!
//! Run with: `cargo bench`

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};

use std::hint::black_box;

use lumina_core::{ColorField, ScalarField, Vec3};
use lumina_ops::composite::seamless_clone;
use lumina_ops::range::min_max;
use lumina_ops::{bilateral_filter, tone_map, PoissonSolver, ToneMapParams};

fn test_field(size: usize) -> ScalarField {
    ScalarField::from_fn(size, size, |x, y| {
        ((x as f32 * 0.1).sin() + (y as f32 * 0.07).cos()) * 2.0
    })
}

/// Benchmark the bilateral filter across kernel sizes.
fn bench_bilateral(c: &mut Criterion) {
    let mut group = c.benchmark_group("bilateral");
    let field = test_field(256);
    group.throughput(Throughput::Elements(field.len() as u64));

    for size in [3usize, 9, 15].iter() {
        group.bench_with_input(BenchmarkId::new("filter", size), size, |b, &size| {
            b.iter(|| bilateral_filter(black_box(&field), size, 3.0, 0.4).unwrap())
        });
    }

    group.finish();
}

/// Benchmark the parallel min/max reduction.
fn bench_min_max(c: &mut Criterion) {
    let mut group = c.benchmark_group("min_max");

    for size in [256usize, 1024].iter() {
        let rgb = ColorField::from_fn(*size, *size, |x, y| {
            Vec3::new(x as f32, y as f32, (x ^ y) as f32)
        });
        group.throughput(Throughput::Elements(rgb.len() as u64));
        group.bench_with_input(BenchmarkId::new("rgb", size), &rgb, |b, rgb| {
            b.iter(|| min_max(black_box(rgb)))
        });
    }

    group.finish();
}

/// Benchmark Poisson seamless cloning.
fn bench_poisson(c: &mut Criterion) {
    let mut group = c.benchmark_group("poisson");
    group.sample_size(10);

    let source = test_field(128);
    let target = ScalarField::filled(128, 128, 0.5);
    let mask = ScalarField::from_fn(128, 128, |x, y| {
        if (32..96).contains(&x) && (32..96).contains(&y) { 1.0 } else { 0.0 }
    });
    let solver = PoissonSolver::new(200).with_report_interval(0);

    group.bench_function("seamless_clone_128_200it", |b| {
        b.iter(|| seamless_clone(black_box(&source), &target, &mask, &solver).unwrap())
    });

    group.finish();
}

/// Benchmark the full tone-mapping pipeline.
fn bench_tone_map(c: &mut Criterion) {
    let hdr = ColorField::from_fn(256, 256, |x, y| {
        Vec3::splat(0.01 * 1.03f32.powi((x + y) as i32))
    });
    let params = ToneMapParams::default();

    c.bench_function("tone_map_256", |b| {
        b.iter(|| tone_map(black_box(&hdr), &params).unwrap())
    });
}

criterion_group!(benches, bench_bilateral, bench_min_max, bench_poisson, bench_tone_map);
criterion_main!(benches);
