//! Sparse vector reductions

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::{Error, Result};

/// Sum of a sparse value buffer
///
/// Single pass over the values, O(nnz); index structure is never read.
/// Returns exactly zero for an empty or all-zero buffer.
pub fn sum_values<B: Backend, T: Element>(values: &B::Buffer<T>) -> T {
    let mut sum = 0.0f64;
    for i in 0..values.len() {
        sum += values.get(i).to_f64();
    }
    T::from_f64(sum)
}

/// Sparse-dense dot product
///
/// Gathers the dense entry at each stored index and multiply-accumulates,
/// O(nnz).
///
/// # Errors
///
/// Returns `ShapeMismatch` if `dense.len() != len` (the sparse vector's
/// logical length).
pub fn dot_sparse_dense<B: Backend, T: Element>(
    indices: &B::Buffer<i64>,
    values: &B::Buffer<T>,
    dense: &B::Buffer<T>,
    len: usize,
) -> Result<T> {
    if dense.len() != len {
        return Err(Error::shape_mismatch(&[len], &[dense.len()]));
    }

    let mut sum = 0.0f64;
    for k in 0..values.len() {
        let i = indices.get(k) as usize;
        sum += values.get(k).to_f64() * dense.get(i).to_f64();
    }
    Ok(T::from_f64(sum))
}
