//! Sparse format conversions (COO <-> CSR <-> CSC)
//!
//! Deterministic and lossless: total nnz and the merged value at each
//! (row, col) are preserved by every path. Conversions are a full
//! structural pass staged through host memory — when the dispatch layer
//! invokes one implicitly it logs the cost; callers on a hot path should
//! convert once up front.

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::Result;
use num_traits::Zero;

use super::coo::CooMatrix;
use super::csc::CscMatrix;
use super::csr::CsrMatrix;
use super::format::SparseStorage;

/// Convert COO to CSR
pub fn coo_to_csr<B: Backend, T: Element>(coo: &CooMatrix<B, T>) -> Result<CsrMatrix<B, T>> {
    let [nrows, _ncols] = coo.shape();
    let nnz = coo.nnz();

    let row_idx = coo.row_indices.to_vec();
    let col_idx = coo.col_indices.to_vec();
    let vals = coo.values.to_vec();

    let mut perm: Vec<usize> = (0..nnz).collect();
    perm.sort_by_key(|&i| (row_idx[i], col_idx[i]));

    let mut sorted_cols = Vec::with_capacity(nnz);
    let mut sorted_values = Vec::with_capacity(nnz);
    for &i in &perm {
        sorted_cols.push(col_idx[i]);
        sorted_values.push(vals[i]);
    }

    let mut row_ptrs = vec![0i64; nrows + 1];
    for &r in &row_idx {
        row_ptrs[r as usize + 1] += 1;
    }
    for i in 1..=nrows {
        row_ptrs[i] += row_ptrs[i - 1];
    }

    CsrMatrix::from_buffers(
        B::from_slice(&row_ptrs),
        B::from_slice(&sorted_cols),
        B::from_slice(&sorted_values),
        coo.shape(),
    )
}

/// Convert COO to CSC
pub fn coo_to_csc<B: Backend, T: Element>(coo: &CooMatrix<B, T>) -> Result<CscMatrix<B, T>> {
    let [_nrows, ncols] = coo.shape();
    let nnz = coo.nnz();

    let row_idx = coo.row_indices.to_vec();
    let col_idx = coo.col_indices.to_vec();
    let vals = coo.values.to_vec();

    let mut perm: Vec<usize> = (0..nnz).collect();
    perm.sort_by_key(|&i| (col_idx[i], row_idx[i]));

    let mut sorted_rows = Vec::with_capacity(nnz);
    let mut sorted_values = Vec::with_capacity(nnz);
    for &i in &perm {
        sorted_rows.push(row_idx[i]);
        sorted_values.push(vals[i]);
    }

    let mut col_ptrs = vec![0i64; ncols + 1];
    for &c in &col_idx {
        col_ptrs[c as usize + 1] += 1;
    }
    for j in 1..=ncols {
        col_ptrs[j] += col_ptrs[j - 1];
    }

    CscMatrix::from_buffers(
        B::from_slice(&col_ptrs),
        B::from_slice(&sorted_rows),
        B::from_slice(&sorted_values),
        coo.shape(),
    )
}

/// Convert CSR to COO
///
/// Expands the row pointers into explicit row indices; the column-index
/// and value buffers are reused unchanged (entries come out row-major).
pub fn csr_to_coo<B: Backend, T: Element>(csr: &CsrMatrix<B, T>) -> Result<CooMatrix<B, T>> {
    let [nrows, _ncols] = csr.shape();
    let nnz = csr.nnz();

    let ptrs = csr.row_ptrs.to_vec();

    let mut row_indices = Vec::with_capacity(nnz);
    for row in 0..nrows {
        let start = ptrs[row] as usize;
        let end = ptrs[row + 1] as usize;
        for _ in start..end {
            row_indices.push(row as i64);
        }
    }

    CooMatrix::from_buffers(
        B::from_slice(&row_indices),
        csr.col_indices.clone(),
        csr.values.clone(),
        csr.shape(),
    )
}

/// Convert CSC to COO
///
/// Expands the column pointers into explicit column indices; entries come
/// out column-major, which consumers of COO must tolerate.
pub fn csc_to_coo<B: Backend, T: Element>(csc: &CscMatrix<B, T>) -> Result<CooMatrix<B, T>> {
    let [_nrows, ncols] = csc.shape();
    let nnz = csc.nnz();

    let ptrs = csc.col_ptrs.to_vec();

    let mut col_indices = Vec::with_capacity(nnz);
    for col in 0..ncols {
        let start = ptrs[col] as usize;
        let end = ptrs[col + 1] as usize;
        for _ in start..end {
            col_indices.push(col as i64);
        }
    }

    CooMatrix::from_buffers(
        csc.row_indices.clone(),
        B::from_slice(&col_indices),
        csc.values.clone(),
        csc.shape(),
    )
}

/// Convert CSR to CSC
///
/// Counting sort on columns: one pass builds the column pointers, a second
/// scatters each entry to its final position, preserving row order within
/// each column.
pub fn csr_to_csc<B: Backend, T: Element>(csr: &CsrMatrix<B, T>) -> Result<CscMatrix<B, T>> {
    let [nrows, ncols] = csr.shape();
    let nnz = csr.nnz();

    let row_ptr = csr.row_ptrs.to_vec();
    let col_idx = csr.col_indices.to_vec();
    let vals = csr.values.to_vec();

    let mut col_ptrs = vec![0i64; ncols + 1];
    for &col in &col_idx {
        col_ptrs[col as usize + 1] += 1;
    }
    for j in 1..=ncols {
        col_ptrs[j] += col_ptrs[j - 1];
    }

    let mut new_row_indices = vec![0i64; nnz];
    let mut new_values = vec![T::zero(); nnz];
    let mut col_positions = col_ptrs[..ncols].to_vec();

    for row in 0..nrows {
        let start = row_ptr[row] as usize;
        let end = row_ptr[row + 1] as usize;
        for idx in start..end {
            let col = col_idx[idx] as usize;
            let pos = col_positions[col] as usize;
            new_row_indices[pos] = row as i64;
            new_values[pos] = vals[idx];
            col_positions[col] += 1;
        }
    }

    CscMatrix::from_buffers(
        B::from_slice(&col_ptrs),
        B::from_slice(&new_row_indices),
        B::from_slice(&new_values),
        csr.shape(),
    )
}

/// Convert CSC to CSR
pub fn csc_to_csr<B: Backend, T: Element>(csc: &CscMatrix<B, T>) -> Result<CsrMatrix<B, T>> {
    let [nrows, ncols] = csc.shape();
    let nnz = csc.nnz();

    let col_ptr = csc.col_ptrs.to_vec();
    let row_idx = csc.row_indices.to_vec();
    let vals = csc.values.to_vec();

    let mut row_ptrs = vec![0i64; nrows + 1];
    for &row in &row_idx {
        row_ptrs[row as usize + 1] += 1;
    }
    for i in 1..=nrows {
        row_ptrs[i] += row_ptrs[i - 1];
    }

    let mut new_col_indices = vec![0i64; nnz];
    let mut new_values = vec![T::zero(); nnz];
    let mut row_positions = row_ptrs[..nrows].to_vec();

    for col in 0..ncols {
        let start = col_ptr[col] as usize;
        let end = col_ptr[col + 1] as usize;
        for idx in start..end {
            let row = row_idx[idx] as usize;
            let pos = row_positions[row] as usize;
            new_col_indices[pos] = col as i64;
            new_values[pos] = vals[idx];
            row_positions[row] += 1;
        }
    }

    CsrMatrix::from_buffers(
        B::from_slice(&row_ptrs),
        B::from_slice(&new_col_indices),
        B::from_slice(&new_values),
        csc.shape(),
    )
}
