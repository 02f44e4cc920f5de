//! Cross-backend identity tests
//!
//! For a fixed format, every kernel runs the same arithmetic in the same
//! order on every backend, so host and reference-accelerator results must
//! be bit-identical — not merely within tolerance.

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use sparr::backend::{Backend, DenseBuffer, HostBackend, RefBackend};
use sparr::prelude::*;

struct Problem {
    rows: Vec<i64>,
    cols: Vec<i64>,
    values: Vec<f64>,
    shape: [usize; 2],
    x: Vec<f64>, // length ncols
    w: Vec<f64>, // length nrows
    b: Vec<f64>, // dense [ncols, n]
    n: usize,
    d: Vec<f64>, // dense [nrows, ncols]
}

fn random_problem(rng: &mut StdRng) -> Problem {
    let shape = [rng.gen_range(1..15), rng.gen_range(1..15)];
    let nnz = rng.gen_range(0..shape[0] * shape[1] + 1);
    let n = rng.gen_range(1..6);
    Problem {
        rows: (0..nnz).map(|_| rng.gen_range(0..shape[0] as i64)).collect(),
        cols: (0..nnz).map(|_| rng.gen_range(0..shape[1] as i64)).collect(),
        values: (0..nnz).map(|_| rng.gen_range(-1.0..1.0)).collect(),
        shape,
        x: (0..shape[1]).map(|_| rng.gen_range(-1.0..1.0)).collect(),
        w: (0..shape[0]).map(|_| rng.gen_range(-1.0..1.0)).collect(),
        b: (0..shape[1] * n).map(|_| rng.gen_range(-1.0..1.0)).collect(),
        n,
        d: (0..shape[0] * shape[1])
            .map(|_| rng.gen_range(-1.0..1.0))
            .collect(),
    }
}

/// Run every operation for one format on one backend and collect the raw
/// results for comparison.
fn run_all<B: Backend>(p: &Problem, format: SparseFormat) -> Vec<Vec<f64>> {
    let a =
        SparseMatrix::<B, f64>::from_triplets(format, &p.rows, &p.cols, &p.values, p.shape)
            .unwrap();
    let x = B::from_slice(&p.x);
    let w = B::from_slice(&p.w);
    let b = B::from_slice(&p.b);
    let d = B::from_slice(&p.d);

    let matvec = a.matvec(&x).unwrap().to_vec();
    let matmat = a.matmat(&b, [p.shape[1], p.n]).unwrap().to_vec();
    let dot3 = vec![a.dot3(&w, &x).unwrap()];
    let added = a.add_dense(&d).unwrap().to_vec();

    vec![matvec, matmat, dot3, added]
}

#[test]
fn test_host_and_ref_backends_agree_exactly() {
    let mut rng = StdRng::seed_from_u64(2024);

    for _ in 0..8 {
        let p = random_problem(&mut rng);
        for format in [SparseFormat::Coo, SparseFormat::Csr, SparseFormat::Csc] {
            let host = run_all::<HostBackend>(&p, format);
            let device = run_all::<RefBackend>(&p, format);
            // Same kernel body, same order: exact equality, no tolerance.
            assert_eq!(host, device, "backend divergence for {format}");
        }
    }
}

#[test]
fn test_sparse_vector_ops_across_backends() {
    let indices = [1i64, 3, 8];
    let values = [0.5f64, -2.0, 4.25];
    let dense: Vec<f64> = (0..10).map(|i| i as f64 * 0.5).collect();

    let vh = SparseVector::<HostBackend, f64>::from_pairs(&indices, &values, 10).unwrap();
    let vr = SparseVector::<RefBackend, f64>::from_pairs(&indices, &values, 10).unwrap();

    assert_eq!(vh.sum(), vr.sum());
    assert_eq!(
        vh.dot(&HostBackend::from_slice(&dense)).unwrap(),
        vr.dot(&RefBackend::from_slice(&dense)).unwrap()
    );
}

#[test]
fn test_add_dense_never_aliases_input_on_ref_backend() {
    // Ref-backend handles share storage on clone, so a careless copy
    // would alias. The kernel must allocate fresh storage.
    let a = CooMatrix::<RefBackend, f64>::from_triplets(&[0], &[0], &[5.0], [2, 2]).unwrap();
    let d = RefBackend::from_slice(&[1.0, 2.0, 3.0, 4.0]);

    let out = sparr::ops::add_dense_coo(&a, &d).unwrap();
    assert_eq!(out.to_vec(), vec![6.0, 2.0, 3.0, 4.0]);
    assert_eq!(d.to_vec(), vec![1.0, 2.0, 3.0, 4.0]);
}

#[test]
fn test_inplace_variants_on_ref_backend() {
    let a = CsrMatrix::<RefBackend, f64>::from_parts(
        &[0, 1, 2],
        &[1, 0],
        &[2.0, 3.0],
        [2, 2],
    )
    .unwrap();
    let x = RefBackend::from_slice(&[1.0, 10.0]);
    let mut y = RefBackend::alloc_zeros::<f64>(2).unwrap();

    sparr::ops::spmv_csr_into(&a, &x, &mut y).unwrap();
    assert_eq!(y.to_vec(), vec![20.0, 3.0]);
}
