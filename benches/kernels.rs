//! Micro-benchmarks for the timed kernel set
//!
//! Covers the operation x format x backend matrix: matrix-vector and
//! matrix-matrix products, sparse-vector reductions, and the
//! three-argument dot, on the host backend and the reference accelerator
//! backend.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};

use sparr::backend::{Backend, HostBackend, RefBackend};
use sparr::prelude::*;

const N: usize = 512;
const NNZ: usize = 4096;

fn triplets(shape: [usize; 2], nnz: usize) -> (Vec<i64>, Vec<i64>, Vec<f64>) {
    // Deterministic pseudo-random pattern; no RNG needed for stable input.
    let rows: Vec<i64> = (0..nnz).map(|k| ((k * 7919) % shape[0]) as i64).collect();
    let cols: Vec<i64> = (0..nnz).map(|k| ((k * 104729) % shape[1]) as i64).collect();
    let values: Vec<f64> = (0..nnz).map(|k| (k % 13) as f64 * 0.25 + 0.1).collect();
    (rows, cols, values)
}

fn matrices<B: Backend>() -> Vec<(SparseFormat, SparseMatrix<B, f64>)> {
    let (rows, cols, values) = triplets([N, N], NNZ);
    [SparseFormat::Coo, SparseFormat::Csr, SparseFormat::Csc]
        .into_iter()
        .map(|f| {
            (
                f,
                SparseMatrix::from_triplets(f, &rows, &cols, &values, [N, N]).unwrap(),
            )
        })
        .collect()
}

fn bench_matvec_backend<B: Backend>(c: &mut Criterion, backend: &str) {
    let mut group = c.benchmark_group("Matrix-Vector Multiplication");
    let x = B::from_slice(&vec![1.0f64; N]);

    for (format, a) in matrices::<B>() {
        group.bench_with_input(
            BenchmarkId::new(format.name(), backend),
            &a,
            |bench, a| bench.iter(|| black_box(a.matvec(&x).unwrap())),
        );
    }
    group.finish();
}

fn bench_matmat_backend<B: Backend>(c: &mut Criterion, backend: &str) {
    let mut group = c.benchmark_group("Matrix-Matrix Multiplication");
    let n = 16;
    let b = B::from_slice(&vec![0.5f64; N * n]);

    for (format, a) in matrices::<B>() {
        group.bench_with_input(
            BenchmarkId::new(format.name(), backend),
            &a,
            |bench, a| bench.iter(|| black_box(a.matmat(&b, [N, n]).unwrap())),
        );
    }
    group.finish();
}

fn bench_dot3_backend<B: Backend>(c: &mut Criterion, backend: &str) {
    let mut group = c.benchmark_group("Three-argument dot");
    let x = B::from_slice(&vec![0.5f64; N]);
    let y = B::from_slice(&vec![2.0f64; N]);

    for (format, a) in matrices::<B>() {
        group.bench_with_input(
            BenchmarkId::new(format.name(), backend),
            &a,
            |bench, a| bench.iter(|| black_box(a.dot3(&x, &y).unwrap())),
        );
    }
    group.finish();
}

fn bench_sparse_vector_backend<B: Backend>(c: &mut Criterion, backend: &str) {
    let mut group = c.benchmark_group("Sparse Vector");
    let indices: Vec<i64> = (0..NNZ as i64).map(|k| k * 4).collect();
    let values: Vec<f64> = (0..NNZ).map(|k| (k % 7) as f64 - 3.0).collect();
    let v = SparseVector::<B, f64>::from_pairs(&indices, &values, NNZ * 4).unwrap();
    let dense = B::from_slice(&vec![1.5f64; NNZ * 4]);

    group.bench_function(BenchmarkId::new("Sum", backend), |bench| {
        bench.iter(|| black_box(v.sum()))
    });
    group.bench_function(BenchmarkId::new("Sparse-Dense dot", backend), |bench| {
        bench.iter(|| black_box(v.dot(&dense).unwrap()))
    });
    group.finish();
}

fn bench_all(c: &mut Criterion) {
    bench_matvec_backend::<HostBackend>(c, "host");
    bench_matvec_backend::<RefBackend>(c, "ref");
    bench_matmat_backend::<HostBackend>(c, "host");
    bench_matmat_backend::<RefBackend>(c, "ref");
    bench_dot3_backend::<HostBackend>(c, "host");
    bench_dot3_backend::<RefBackend>(c, "ref");
    bench_sparse_vector_backend::<HostBackend>(c, "host");
    bench_sparse_vector_backend::<RefBackend>(c, "ref");
}

criterion_group!(benches, bench_all);
criterion_main!(benches);
