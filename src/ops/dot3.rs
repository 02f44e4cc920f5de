//! Three-argument dot: the bilinear form x' * A * y
//!
//! CSR and CSC run fused traversals that fold the per-row (or per-column)
//! partial directly into the scalar accumulator, so the intermediate
//! matrix-vector product is never materialized. COO takes the unfused
//! two-step path: materialize A * y with the COO matvec kernel, then dot
//! against x. Fused and unfused results agree within floating-point
//! tolerance.

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::sparse::{CooMatrix, CscMatrix, CsrMatrix, SparseStorage};

use super::spmv::spmv_coo;

fn check_operands<B: Backend, T: Element>(
    shape: [usize; 2],
    x: &B::Buffer<T>,
    y: &B::Buffer<T>,
) -> Result<()> {
    if x.len() != shape[0] {
        return Err(Error::shape_mismatch(&[shape[0]], &[x.len()]));
    }
    if y.len() != shape[1] {
        return Err(Error::shape_mismatch(&[shape[1]], &[y.len()]));
    }
    Ok(())
}

/// Fused bilinear form over a CSR matrix: x' * A * y
///
/// For each row i, the inner product of the row with y is folded into the
/// accumulator scaled by x[i]; no length-m intermediate is allocated.
pub fn dot3_csr<B: Backend, T: Element>(
    x: &B::Buffer<T>,
    a: &CsrMatrix<B, T>,
    y: &B::Buffer<T>,
) -> Result<T> {
    check_operands::<B, T>(a.shape(), x, y)?;

    let mut acc = 0.0f64;
    for row in 0..a.nrows() {
        let start = a.row_ptrs.get(row) as usize;
        let end = a.row_ptrs.get(row + 1) as usize;
        if start == end {
            continue;
        }
        let mut inner = 0.0f64;
        for j in start..end {
            let col = a.col_indices.get(j) as usize;
            inner += a.values.get(j).to_f64() * y.get(col).to_f64();
        }
        acc += x.get(row).to_f64() * inner;
    }
    Ok(T::from_f64(acc))
}

/// Fused bilinear form over a CSC matrix: x' * A * y
///
/// Column-symmetric to the CSR path: for each column j, the inner product
/// of x with the column is folded into the accumulator scaled by y[j].
pub fn dot3_csc<B: Backend, T: Element>(
    x: &B::Buffer<T>,
    a: &CscMatrix<B, T>,
    y: &B::Buffer<T>,
) -> Result<T> {
    check_operands::<B, T>(a.shape(), x, y)?;

    let mut acc = 0.0f64;
    for col in 0..a.ncols() {
        let start = a.col_ptrs.get(col) as usize;
        let end = a.col_ptrs.get(col + 1) as usize;
        if start == end {
            continue;
        }
        let mut inner = 0.0f64;
        for j in start..end {
            let row = a.row_indices.get(j) as usize;
            inner += x.get(row).to_f64() * a.values.get(j).to_f64();
        }
        acc += inner * y.get(col).to_f64();
    }
    Ok(T::from_f64(acc))
}

/// Bilinear form over a COO matrix: x' * A * y
///
/// Unfused two-step computation: A * y is materialized with the COO
/// matvec kernel, then reduced against x. The safe default for a format
/// with no traversal structure to fuse over.
pub fn dot3_coo<B: Backend, T: Element>(
    x: &B::Buffer<T>,
    a: &CooMatrix<B, T>,
    y: &B::Buffer<T>,
) -> Result<T> {
    check_operands::<B, T>(a.shape(), x, y)?;

    let t = spmv_coo(a, y)?;
    let mut acc = 0.0f64;
    for i in 0..t.len() {
        acc += x.get(i).to_f64() * t.get(i).to_f64();
    }
    Ok(T::from_f64(acc))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostBackend;
    use crate::sparse::convert;

    fn sample() -> CsrMatrix<HostBackend, f64> {
        // [1, 0, 2]
        // [0, 0, 3]
        // [4, 5, 0]
        CsrMatrix::from_parts(
            &[0, 2, 3, 5],
            &[0, 2, 2, 0, 1],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            [3, 3],
        )
        .unwrap()
    }

    #[test]
    fn test_dot3_csr_known_value() {
        let a = sample();
        let x = HostBackend::from_slice(&[1.0, 2.0, 3.0]);
        let y = HostBackend::from_slice(&[1.0, 1.0, 1.0]);

        // A*y = [3, 3, 9]; x'(A*y) = 3 + 6 + 27 = 36
        assert_eq!(dot3_csr(&x, &a, &y).unwrap(), 36.0);
    }

    #[test]
    fn test_fused_paths_agree_with_unfused() {
        let csr = sample();
        let csc = convert::csr_to_csc(&csr).unwrap();
        let coo = convert::csr_to_coo(&csr).unwrap();

        let x = HostBackend::from_slice(&[0.5, -1.0, 2.0]);
        let y = HostBackend::from_slice(&[3.0, 0.25, -2.0]);

        let fused_r = dot3_csr(&x, &csr, &y).unwrap();
        let fused_c = dot3_csc(&x, &csc, &y).unwrap();
        let unfused = dot3_coo(&x, &coo, &y).unwrap();

        assert!((fused_r - unfused).abs() < 1e-10);
        assert!((fused_c - unfused).abs() < 1e-10);
    }

    #[test]
    fn test_dot3_rectangular_shapes() {
        // 2x3 matrix: x has length 2, y has length 3.
        let a = CsrMatrix::<HostBackend, f64>::from_parts(
            &[0, 1, 2],
            &[2, 0],
            &[1.0, 2.0],
            [2, 3],
        )
        .unwrap();
        let x = HostBackend::from_slice(&[1.0, 1.0]);
        let y = HostBackend::from_slice(&[1.0, 1.0, 1.0]);

        assert_eq!(dot3_csr(&x, &a, &y).unwrap(), 3.0);

        let bad_x = HostBackend::from_slice(&[1.0, 1.0, 1.0]);
        assert!(dot3_csr(&bad_x, &a, &y).is_err());
    }
}
