//! Sparse matrix-vector product kernels
//!
//! Relative latency CSR <= CSC ~= COO is a design invariant, not a
//! benchmark accident: CSR does one contiguous dot per output row, CSC
//! must scatter each column's contribution, and COO scatters every
//! nonzero independently.

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::sparse::{CooMatrix, CscMatrix, CsrMatrix, SparseStorage};
use num_traits::Zero;

use super::require_inplace;

fn check_operands<B: Backend, T: Element>(
    shape: [usize; 2],
    x: &B::Buffer<T>,
) -> Result<()> {
    if x.len() != shape[1] {
        return Err(Error::shape_mismatch(&[shape[1]], &[x.len()]));
    }
    Ok(())
}

fn check_output<B: Backend, T: Element>(shape: [usize; 2], y: &B::Buffer<T>) -> Result<()> {
    if y.len() != shape[0] {
        return Err(Error::shape_mismatch(&[shape[0]], &[y.len()]));
    }
    Ok(())
}

/// CSR matrix-vector product: y = A * x
///
/// One dot product per output row via a contiguous index scan.
pub fn spmv_csr<B: Backend, T: Element>(
    a: &CsrMatrix<B, T>,
    x: &B::Buffer<T>,
) -> Result<B::Buffer<T>> {
    check_operands::<B, T>(a.shape(), x)?;
    let mut y = B::alloc_zeros::<T>(a.nrows())?;
    spmv_csr_body(a, x, &mut y);
    Ok(y)
}

/// CSR matrix-vector product into a caller-supplied output
pub fn spmv_csr_into<B: Backend, T: Element>(
    a: &CsrMatrix<B, T>,
    x: &B::Buffer<T>,
    y: &mut B::Buffer<T>,
) -> Result<()> {
    require_inplace::<B>()?;
    check_operands::<B, T>(a.shape(), x)?;
    check_output::<B, T>(a.shape(), y)?;
    spmv_csr_body(a, x, y);
    Ok(())
}

fn spmv_csr_body<B: Backend, T: Element>(
    a: &CsrMatrix<B, T>,
    x: &B::Buffer<T>,
    y: &mut B::Buffer<T>,
) {
    let row_ptrs = &a.row_ptrs;
    let col_indices = &a.col_indices;
    let values = &a.values;

    for row in 0..a.nrows() {
        let start = row_ptrs.get(row) as usize;
        let end = row_ptrs.get(row + 1) as usize;
        let mut sum = 0.0f64;
        for j in start..end {
            let col = col_indices.get(j) as usize;
            sum += values.get(j).to_f64() * x.get(col).to_f64();
        }
        y.set(row, T::from_f64(sum));
    }
}

/// CSC matrix-vector product: y = A * x
///
/// Scatters each column's contribution across the output vector; the
/// dense accumulator makes the scatter accumulate-safe.
pub fn spmv_csc<B: Backend, T: Element>(
    a: &CscMatrix<B, T>,
    x: &B::Buffer<T>,
) -> Result<B::Buffer<T>> {
    check_operands::<B, T>(a.shape(), x)?;
    let mut y = B::alloc_zeros::<T>(a.nrows())?;
    spmv_csc_body(a, x, &mut y, false);
    Ok(y)
}

/// CSC matrix-vector product into a caller-supplied output
pub fn spmv_csc_into<B: Backend, T: Element>(
    a: &CscMatrix<B, T>,
    x: &B::Buffer<T>,
    y: &mut B::Buffer<T>,
) -> Result<()> {
    require_inplace::<B>()?;
    check_operands::<B, T>(a.shape(), x)?;
    check_output::<B, T>(a.shape(), y)?;
    spmv_csc_body(a, x, y, true);
    Ok(())
}

fn spmv_csc_body<B: Backend, T: Element>(
    a: &CscMatrix<B, T>,
    x: &B::Buffer<T>,
    y: &mut B::Buffer<T>,
    clear: bool,
) {
    if clear {
        for i in 0..y.len() {
            y.set(i, T::zero());
        }
    }

    let col_ptrs = &a.col_ptrs;
    let row_indices = &a.row_indices;
    let values = &a.values;

    for col in 0..a.ncols() {
        let start = col_ptrs.get(col) as usize;
        let end = col_ptrs.get(col + 1) as usize;
        let xv = x.get(col).to_f64();
        for j in start..end {
            let row = row_indices.get(j) as usize;
            let acc = y.get(row).to_f64() + values.get(j).to_f64() * xv;
            y.set(row, T::from_f64(acc));
        }
    }
}

/// COO matrix-vector product: y = A * x
///
/// No structural locality: every nonzero is scattered independently. The
/// accumulation is commutative, so the result does not depend on entry
/// order.
pub fn spmv_coo<B: Backend, T: Element>(
    a: &CooMatrix<B, T>,
    x: &B::Buffer<T>,
) -> Result<B::Buffer<T>> {
    check_operands::<B, T>(a.shape(), x)?;
    let mut y = B::alloc_zeros::<T>(a.nrows())?;
    spmv_coo_body(a, x, &mut y, false);
    Ok(y)
}

/// COO matrix-vector product into a caller-supplied output
pub fn spmv_coo_into<B: Backend, T: Element>(
    a: &CooMatrix<B, T>,
    x: &B::Buffer<T>,
    y: &mut B::Buffer<T>,
) -> Result<()> {
    require_inplace::<B>()?;
    check_operands::<B, T>(a.shape(), x)?;
    check_output::<B, T>(a.shape(), y)?;
    spmv_coo_body(a, x, y, true);
    Ok(())
}

fn spmv_coo_body<B: Backend, T: Element>(
    a: &CooMatrix<B, T>,
    x: &B::Buffer<T>,
    y: &mut B::Buffer<T>,
    clear: bool,
) {
    if clear {
        for i in 0..y.len() {
            y.set(i, T::zero());
        }
    }

    let rows = &a.row_indices;
    let cols = &a.col_indices;
    let values = &a.values;

    for k in 0..a.nnz() {
        let row = rows.get(k) as usize;
        let col = cols.get(k) as usize;
        let acc = y.get(row).to_f64() + values.get(k).to_f64() * x.get(col).to_f64();
        y.set(row, T::from_f64(acc));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostBackend;

    #[test]
    fn test_spmv_csr_diagonal() {
        // diag(2, 3, 4) * [1, 1, 1] = [2, 3, 4]
        let a = CsrMatrix::<HostBackend, f64>::from_parts(
            &[0, 1, 2, 3],
            &[0, 1, 2],
            &[2.0, 3.0, 4.0],
            [3, 3],
        )
        .unwrap();
        let x = HostBackend::from_slice(&[1.0, 1.0, 1.0]);

        let y = spmv_csr(&a, &x).unwrap();
        assert_eq!(y.to_vec(), vec![2.0, 3.0, 4.0]);
    }

    #[test]
    fn test_spmv_shape_mismatch_before_write() {
        let a = CsrMatrix::<HostBackend, f64>::from_parts(
            &[0, 1, 2, 3],
            &[0, 1, 2],
            &[2.0, 3.0, 4.0],
            [3, 3],
        )
        .unwrap();
        let x = HostBackend::from_slice(&[1.0, 1.0, 1.0, 1.0]);
        let mut y = HostBackend::from_slice(&[9.0, 9.0, 9.0]);

        let err = spmv_csr_into(&a, &x, &mut y).unwrap_err();
        assert!(matches!(err, Error::ShapeMismatch { .. }));
        // Output untouched on failure.
        assert_eq!(y.to_vec(), vec![9.0, 9.0, 9.0]);
    }

    #[test]
    fn test_spmv_csc_matches_csr() {
        // [1, 0, 2]
        // [0, 0, 3]
        // [4, 5, 0]
        let csr = CsrMatrix::<HostBackend, f64>::from_parts(
            &[0, 2, 3, 5],
            &[0, 2, 2, 0, 1],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            [3, 3],
        )
        .unwrap();
        let csc = CscMatrix::<HostBackend, f64>::from_parts(
            &[0, 2, 3, 5],
            &[0, 2, 2, 0, 1],
            &[1.0, 4.0, 5.0, 2.0, 3.0],
            [3, 3],
        )
        .unwrap();
        let x = HostBackend::from_slice(&[1.0, 2.0, 3.0]);

        let y_csr = spmv_csr(&csr, &x).unwrap().to_vec();
        let y_csc = spmv_csc(&csc, &x).unwrap().to_vec();
        for (a, b) in y_csr.iter().zip(&y_csc) {
            assert!((a - b).abs() < 1e-12);
        }
    }

    #[test]
    fn test_spmv_coo_overwrites_stale_output() {
        let a = CooMatrix::<HostBackend, f64>::from_triplets(&[0], &[0], &[2.0], [2, 2]).unwrap();
        let x = HostBackend::from_slice(&[3.0, 1.0]);
        let mut y = HostBackend::from_slice(&[7.0, 7.0]);

        spmv_coo_into(&a, &x, &mut y).unwrap();
        assert_eq!(y.to_vec(), vec![6.0, 0.0]);
    }
}
