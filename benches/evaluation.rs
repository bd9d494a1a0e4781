//! Evaluation benchmarks.
//!
//! Compares compiled stack-program evaluation against hand-written Rust
//! closures for the preset surfaces, in scalar mode and in grid mode, and
//! measures the one-time cost of compiling a formula (parse, differentiate,
//! lower, optimise).
//!
//! Run with: `cargo bench --bench evaluation`

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};
use terrain_analyzer::{SamplingDomain, Surface};

fn benchmark_scalar(c: &mut Criterion) {
    let mut group = c.benchmark_group("scalar");

    let dome = Surface::new("100 - x^2 - y^2").unwrap();
    group.bench_function("dome_compiled", |b| {
        b.iter(|| dome.elevation().eval(black_box(1.5), black_box(-2.5)))
    });
    group.bench_function("dome_direct", |b| {
        b.iter(|| {
            let (x, y): (f64, f64) = (black_box(1.5), black_box(-2.5));
            100.0 - x * x - y * y
        })
    });

    let ripple = Surface::new("20 * exp(-(x^2 + y^2) / 8) + sin(x) * cos(y)").unwrap();
    group.bench_function("ripple_compiled", |b| {
        b.iter(|| ripple.elevation().eval(black_box(1.5), black_box(-2.5)))
    });
    group.bench_function("ripple_direct", |b| {
        b.iter(|| {
            let (x, y): (f64, f64) = (black_box(1.5), black_box(-2.5));
            20.0 * (-(x * x + y * y) / 8.0).exp() + x.sin() * y.cos()
        })
    });

    group.finish();
}

fn benchmark_grid(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid");
    group.sample_size(20);

    let domain = SamplingDomain::default();
    let dome = Surface::new("100 - x^2 - y^2").unwrap();

    group.bench_function("dome_100x100", |b| {
        b.iter(|| dome.elevation().eval_grid(black_box(&domain)).unwrap())
    });

    let ripple = Surface::new("20 * exp(-(x^2 + y^2) / 8) + sin(x) * cos(y)").unwrap();
    group.bench_function("ripple_100x100", |b| {
        b.iter(|| ripple.elevation().eval_grid(black_box(&domain)).unwrap())
    });

    group.finish();
}

fn benchmark_compilation(c: &mut Criterion) {
    let mut group = c.benchmark_group("compilation");

    for (name, formula) in [
        ("dome", "100 - x^2 - y^2"),
        ("saddle", "x^2 - y^2 + 50"),
        ("ripple", "20 * exp(-(x^2 + y^2) / 8) + sin(x) * cos(y)"),
    ] {
        group.bench_function(name, |b| {
            b.iter(|| Surface::new(black_box(formula)).unwrap())
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    benchmark_scalar,
    benchmark_grid,
    benchmark_compilation
);
criterion_main!(benches);
