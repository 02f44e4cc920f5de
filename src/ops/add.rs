//! Sparse + dense addition kernels
//!
//! Produces a dense result where each entry equals the dense entry plus
//! the sparse entry if one is stored. Construction-time duplicate merging
//! guarantees every stored nonzero is visited exactly once, so a plain
//! `+=` per entry is sufficient.
//!
//! Non-in-place variants allocate a fresh copy of the dense input through
//! the capability seam and never alias it; `_assign` variants mutate the
//! caller's buffer and require the in-place capability.

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::{Error, Result};
use crate::sparse::{CooMatrix, CscMatrix, CsrMatrix, SparseStorage};

use super::require_inplace;

fn check_dense<B: Backend, T: Element>(shape: [usize; 2], dense: &B::Buffer<T>) -> Result<()> {
    let expected = shape[0] * shape[1];
    if dense.len() != expected {
        return Err(Error::shape_mismatch(&[expected], &[dense.len()]));
    }
    Ok(())
}

fn copy_dense<B: Backend, T: Element>(dense: &B::Buffer<T>) -> Result<B::Buffer<T>> {
    let mut out = B::alloc_zeros::<T>(dense.len())?;
    for i in 0..dense.len() {
        out.set(i, dense.get(i));
    }
    Ok(out)
}

/// CSR + dense: returns a fresh dense [m, n] buffer
pub fn add_dense_csr<B: Backend, T: Element>(
    a: &CsrMatrix<B, T>,
    dense: &B::Buffer<T>,
) -> Result<B::Buffer<T>> {
    check_dense::<B, T>(a.shape(), dense)?;
    let mut out = copy_dense::<B, T>(dense)?;
    add_csr_entries(a, &mut out);
    Ok(out)
}

/// CSR + dense, accumulated into the caller's dense buffer
pub fn add_dense_csr_assign<B: Backend, T: Element>(
    a: &CsrMatrix<B, T>,
    dense: &mut B::Buffer<T>,
) -> Result<()> {
    require_inplace::<B>()?;
    check_dense::<B, T>(a.shape(), dense)?;
    add_csr_entries(a, dense);
    Ok(())
}

fn add_csr_entries<B: Backend, T: Element>(a: &CsrMatrix<B, T>, out: &mut B::Buffer<T>) {
    let ncols = a.ncols();
    for row in 0..a.nrows() {
        let start = a.row_ptrs.get(row) as usize;
        let end = a.row_ptrs.get(row + 1) as usize;
        for j in start..end {
            let col = a.col_indices.get(j) as usize;
            let idx = row * ncols + col;
            let acc = out.get(idx).to_f64() + a.values.get(j).to_f64();
            out.set(idx, T::from_f64(acc));
        }
    }
}

/// CSC + dense: returns a fresh dense [m, n] buffer
pub fn add_dense_csc<B: Backend, T: Element>(
    a: &CscMatrix<B, T>,
    dense: &B::Buffer<T>,
) -> Result<B::Buffer<T>> {
    check_dense::<B, T>(a.shape(), dense)?;
    let mut out = copy_dense::<B, T>(dense)?;
    add_csc_entries(a, &mut out);
    Ok(out)
}

/// CSC + dense, accumulated into the caller's dense buffer
pub fn add_dense_csc_assign<B: Backend, T: Element>(
    a: &CscMatrix<B, T>,
    dense: &mut B::Buffer<T>,
) -> Result<()> {
    require_inplace::<B>()?;
    check_dense::<B, T>(a.shape(), dense)?;
    add_csc_entries(a, dense);
    Ok(())
}

fn add_csc_entries<B: Backend, T: Element>(a: &CscMatrix<B, T>, out: &mut B::Buffer<T>) {
    let ncols = a.ncols();
    for col in 0..a.ncols() {
        let start = a.col_ptrs.get(col) as usize;
        let end = a.col_ptrs.get(col + 1) as usize;
        for j in start..end {
            let row = a.row_indices.get(j) as usize;
            let idx = row * ncols + col;
            let acc = out.get(idx).to_f64() + a.values.get(j).to_f64();
            out.set(idx, T::from_f64(acc));
        }
    }
}

/// COO + dense: returns a fresh dense [m, n] buffer
pub fn add_dense_coo<B: Backend, T: Element>(
    a: &CooMatrix<B, T>,
    dense: &B::Buffer<T>,
) -> Result<B::Buffer<T>> {
    check_dense::<B, T>(a.shape(), dense)?;
    let mut out = copy_dense::<B, T>(dense)?;
    add_coo_entries(a, &mut out);
    Ok(out)
}

/// COO + dense, accumulated into the caller's dense buffer
pub fn add_dense_coo_assign<B: Backend, T: Element>(
    a: &CooMatrix<B, T>,
    dense: &mut B::Buffer<T>,
) -> Result<()> {
    require_inplace::<B>()?;
    check_dense::<B, T>(a.shape(), dense)?;
    add_coo_entries(a, dense);
    Ok(())
}

fn add_coo_entries<B: Backend, T: Element>(a: &CooMatrix<B, T>, out: &mut B::Buffer<T>) {
    let ncols = a.ncols();
    for k in 0..a.nnz() {
        let row = a.row_indices.get(k) as usize;
        let col = a.col_indices.get(k) as usize;
        let idx = row * ncols + col;
        let acc = out.get(idx).to_f64() + a.values.get(k).to_f64();
        out.set(idx, T::from_f64(acc));
    }
}
