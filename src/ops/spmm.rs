//! Sparse matrix-dense matrix product kernels
//!
//! C = A * B with A sparse [m, k] and B a dense row-major [k, n] buffer.
//! Work is bounded by nnz(A) * n; accumulation order varies only by
//! commutative-sum reordering across formats.

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::sparse::{CooMatrix, CscMatrix, CsrMatrix, SparseStorage};
use num_traits::Zero;

use super::require_inplace;

fn check_operands<B: Backend, T: Element>(
    shape: [usize; 2],
    b: &B::Buffer<T>,
    b_shape: [usize; 2],
) -> Result<()> {
    if b_shape[0] != shape[1] {
        return Err(Error::shape_mismatch(&[shape[1]], &[b_shape[0]]));
    }
    if b.len() != b_shape[0] * b_shape[1] {
        return Err(Error::shape_mismatch(
            &[b_shape[0] * b_shape[1]],
            &[b.len()],
        ));
    }
    Ok(())
}

fn check_output<B: Backend, T: Element>(
    shape: [usize; 2],
    b_shape: [usize; 2],
    c: &B::Buffer<T>,
) -> Result<()> {
    let expected = shape[0] * b_shape[1];
    if c.len() != expected {
        return Err(Error::shape_mismatch(&[expected], &[c.len()]));
    }
    Ok(())
}

/// CSR sparse-dense matrix product: C = A * B
///
/// Accumulates one output row at a time from A's row nonzeros and the
/// matching rows of B.
pub fn spmm_csr<B: Backend, T: Element>(
    a: &CsrMatrix<B, T>,
    b: &B::Buffer<T>,
    b_shape: [usize; 2],
) -> Result<B::Buffer<T>> {
    check_operands::<B, T>(a.shape(), b, b_shape)?;
    let mut c = B::alloc_zeros::<T>(a.nrows() * b_shape[1])?;
    spmm_csr_body(a, b, b_shape[1], &mut c, false);
    Ok(c)
}

/// CSR sparse-dense matrix product into a caller-supplied output
pub fn spmm_csr_into<B: Backend, T: Element>(
    a: &CsrMatrix<B, T>,
    b: &B::Buffer<T>,
    b_shape: [usize; 2],
    c: &mut B::Buffer<T>,
) -> Result<()> {
    require_inplace::<B>()?;
    check_operands::<B, T>(a.shape(), b, b_shape)?;
    check_output::<B, T>(a.shape(), b_shape, c)?;
    spmm_csr_body(a, b, b_shape[1], c, true);
    Ok(())
}

fn spmm_csr_body<B: Backend, T: Element>(
    a: &CsrMatrix<B, T>,
    b: &B::Buffer<T>,
    n: usize,
    c: &mut B::Buffer<T>,
    clear: bool,
) {
    if clear {
        for i in 0..c.len() {
            c.set(i, T::zero());
        }
    }

    for row in 0..a.nrows() {
        let start = a.row_ptrs.get(row) as usize;
        let end = a.row_ptrs.get(row + 1) as usize;
        for j in start..end {
            let col = a.col_indices.get(j) as usize;
            let av = a.values.get(j).to_f64();
            for col_b in 0..n {
                let c_idx = row * n + col_b;
                let acc = c.get(c_idx).to_f64() + av * b.get(col * n + col_b).to_f64();
                c.set(c_idx, T::from_f64(acc));
            }
        }
    }
}

/// CSC sparse-dense matrix product: C = A * B
///
/// Walks A column by column, scattering each column's contribution across
/// the output rows it touches.
pub fn spmm_csc<B: Backend, T: Element>(
    a: &CscMatrix<B, T>,
    b: &B::Buffer<T>,
    b_shape: [usize; 2],
) -> Result<B::Buffer<T>> {
    check_operands::<B, T>(a.shape(), b, b_shape)?;
    let mut c = B::alloc_zeros::<T>(a.nrows() * b_shape[1])?;
    spmm_csc_body(a, b, b_shape[1], &mut c, false);
    Ok(c)
}

/// CSC sparse-dense matrix product into a caller-supplied output
pub fn spmm_csc_into<B: Backend, T: Element>(
    a: &CscMatrix<B, T>,
    b: &B::Buffer<T>,
    b_shape: [usize; 2],
    c: &mut B::Buffer<T>,
) -> Result<()> {
    require_inplace::<B>()?;
    check_operands::<B, T>(a.shape(), b, b_shape)?;
    check_output::<B, T>(a.shape(), b_shape, c)?;
    spmm_csc_body(a, b, b_shape[1], c, true);
    Ok(())
}

fn spmm_csc_body<B: Backend, T: Element>(
    a: &CscMatrix<B, T>,
    b: &B::Buffer<T>,
    n: usize,
    c: &mut B::Buffer<T>,
    clear: bool,
) {
    if clear {
        for i in 0..c.len() {
            c.set(i, T::zero());
        }
    }

    for col in 0..a.ncols() {
        let start = a.col_ptrs.get(col) as usize;
        let end = a.col_ptrs.get(col + 1) as usize;
        for j in start..end {
            let row = a.row_indices.get(j) as usize;
            let av = a.values.get(j).to_f64();
            for col_b in 0..n {
                let c_idx = row * n + col_b;
                let acc = c.get(c_idx).to_f64() + av * b.get(col * n + col_b).to_f64();
                c.set(c_idx, T::from_f64(acc));
            }
        }
    }
}

/// COO sparse-dense matrix product: C = A * B
///
/// Unordered scatter-accumulate over the stored entries; commutative, so
/// independent of entry order.
pub fn spmm_coo<B: Backend, T: Element>(
    a: &CooMatrix<B, T>,
    b: &B::Buffer<T>,
    b_shape: [usize; 2],
) -> Result<B::Buffer<T>> {
    check_operands::<B, T>(a.shape(), b, b_shape)?;
    let mut c = B::alloc_zeros::<T>(a.nrows() * b_shape[1])?;
    spmm_coo_body(a, b, b_shape[1], &mut c, false);
    Ok(c)
}

/// COO sparse-dense matrix product into a caller-supplied output
pub fn spmm_coo_into<B: Backend, T: Element>(
    a: &CooMatrix<B, T>,
    b: &B::Buffer<T>,
    b_shape: [usize; 2],
    c: &mut B::Buffer<T>,
) -> Result<()> {
    require_inplace::<B>()?;
    check_operands::<B, T>(a.shape(), b, b_shape)?;
    check_output::<B, T>(a.shape(), b_shape, c)?;
    spmm_coo_body(a, b, b_shape[1], c, true);
    Ok(())
}

fn spmm_coo_body<B: Backend, T: Element>(
    a: &CooMatrix<B, T>,
    b: &B::Buffer<T>,
    n: usize,
    c: &mut B::Buffer<T>,
    clear: bool,
) {
    if clear {
        for i in 0..c.len() {
            c.set(i, T::zero());
        }
    }

    for k in 0..a.nnz() {
        let row = a.row_indices.get(k) as usize;
        let col = a.col_indices.get(k) as usize;
        let av = a.values.get(k).to_f64();
        for col_b in 0..n {
            let c_idx = row * n + col_b;
            let acc = c.get(c_idx).to_f64() + av * b.get(col * n + col_b).to_f64();
            c.set(c_idx, T::from_f64(acc));
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostBackend;

    // A = [1, 0]    B = [1, 2]
    //     [0, 3]        [4, 5]
    // C = [1, 2]
    //     [12, 15]
    #[test]
    fn test_spmm_csr() {
        let a = CsrMatrix::<HostBackend, f64>::from_parts(&[0, 1, 2], &[0, 1], &[1.0, 3.0], [2, 2])
            .unwrap();
        let b = HostBackend::from_slice(&[1.0, 2.0, 4.0, 5.0]);

        let c = spmm_csr(&a, &b, [2, 2]).unwrap();
        assert_eq!(c.to_vec(), vec![1.0, 2.0, 12.0, 15.0]);
    }

    #[test]
    fn test_spmm_formats_agree() {
        let rows = [0i64, 0, 1, 2, 2];
        let cols = [0i64, 2, 2, 0, 1];
        let vals = [1.0f64, 2.0, 3.0, 4.0, 5.0];

        let coo = CooMatrix::<HostBackend, f64>::from_triplets(&rows, &cols, &vals, [3, 3]).unwrap();
        let csr = CsrMatrix::<HostBackend, f64>::from_triplets(&rows, &cols, &vals, [3, 3]).unwrap();
        let csc = CscMatrix::<HostBackend, f64>::from_triplets(&rows, &cols, &vals, [3, 3]).unwrap();

        let b = HostBackend::from_slice(&[1.0, 2.0, 3.0, 4.0, 5.0, 6.0]);

        let c_coo = spmm_coo(&coo, &b, [3, 2]).unwrap().to_vec();
        let c_csr = spmm_csr(&csr, &b, [3, 2]).unwrap().to_vec();
        let c_csc = spmm_csc(&csc, &b, [3, 2]).unwrap().to_vec();

        for i in 0..6 {
            assert!((c_coo[i] - c_csr[i]).abs() < 1e-12);
            assert!((c_csc[i] - c_csr[i]).abs() < 1e-12);
        }
    }

    #[test]
    fn test_spmm_inner_dim_mismatch() {
        let a = CsrMatrix::<HostBackend, f64>::from_parts(&[0, 1, 2], &[0, 1], &[1.0, 3.0], [2, 2])
            .unwrap();
        let b = HostBackend::from_slice(&[1.0, 2.0, 3.0]);

        let err = spmm_csr(&a, &b, [3, 1]).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
    }
}
