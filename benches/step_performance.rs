//! Performance benchmarks for the backward stepper
//!
//! Measures the cost of one `parabolic_equation_step` across the knobs that
//! matter in production use:
//!
//! 1. **Scheme**: explicit Euler (one banded matvec) vs Crank–Nicolson
//!    (matvec + one tridiagonal solve per batch row). CN costs roughly 2-3×
//!    an explicit step; it earns that back by taking far larger steps.
//! 2. **Grid size**: assembly and solve are both O(batch × N), so time
//!    should scale linearly with N.
//! 3. **Batch width**: rows are independent; time should scale linearly
//!    with the batch (and sub-linearly with the `parallel` feature enabled,
//!    once above the dispatch threshold).
//!
//! # Running Benchmarks
//!
//! ```bash
//! # Everything
//! cargo bench --bench step_performance
//!
//! # Scheme comparison only
//! cargo bench --bench step_performance scheme
//!
//! # With rayon enabled
//! cargo bench --features parallel --bench step_performance batch
//! ```

use criterion::{criterion_group, criterion_main, BenchmarkId, Criterion};
use std::hint::black_box;

use nalgebra::DMatrix;
use parab_rs::models::HeatEquation;
use parab_rs::physics::{BoundaryConditions, Grid1D};
use parab_rs::solver::{ParabolicProblem, ThetaScheme};

// =================================================================================================
// Problem Setup
// =================================================================================================

/// Heat problem with a sine-mode final condition, the standard workload
fn setup(n: usize, batch: usize) -> (ParabolicProblem, DMatrix<f64>) {
    let model = HeatEquation::new(0.1);
    let grid = Grid1D::uniform(0.0, 1.0, n).unwrap();
    let mode = model.sine_mode(&grid, 1);
    let values = DMatrix::from_fn(batch, n, |k, j| mode[j] * (k + 1) as f64);
    let problem = model.problem(grid, BoundaryConditions::dirichlet(0.0, 0.0));
    (problem, values)
}

// =================================================================================================
// Benchmarks
// =================================================================================================

/// Explicit vs Crank–Nicolson on the same problem
fn bench_scheme_comparison(c: &mut Criterion) {
    let (problem, values) = setup(501, 1);
    let mut group = c.benchmark_group("scheme");

    group.bench_function("explicit", |b| {
        let scheme = ThetaScheme::explicit();
        b.iter(|| {
            black_box(problem.step(black_box(&values), 1.0, 0.999, &scheme).unwrap());
        })
    });

    group.bench_function("crank_nicolson", |b| {
        let scheme = ThetaScheme::crank_nicolson();
        b.iter(|| {
            black_box(problem.step(black_box(&values), 1.0, 0.999, &scheme).unwrap());
        })
    });

    group.finish();
}

/// Scaling with grid size
fn bench_grid_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("grid_size");
    let scheme = ThetaScheme::crank_nicolson();

    for n in [101usize, 501, 2001, 8001] {
        let (problem, values) = setup(n, 1);
        group.bench_with_input(BenchmarkId::from_parameter(n), &n, |b, _| {
            b.iter(|| {
                black_box(problem.step(black_box(&values), 1.0, 0.999, &scheme).unwrap());
            })
        });
    }

    group.finish();
}

/// Scaling with batch width
fn bench_batch_scaling(c: &mut Criterion) {
    let mut group = c.benchmark_group("batch");
    let scheme = ThetaScheme::crank_nicolson();

    for batch in [1usize, 8, 64, 256] {
        let (problem, values) = setup(501, batch);
        group.bench_with_input(BenchmarkId::from_parameter(batch), &batch, |b, _| {
            b.iter(|| {
                black_box(problem.step(black_box(&values), 1.0, 0.999, &scheme).unwrap());
            })
        });
    }

    group.finish();
}

criterion_group!(
    benches,
    bench_scheme_comparison,
    bench_grid_scaling,
    bench_batch_scaling
);
criterion_main!(benches);
