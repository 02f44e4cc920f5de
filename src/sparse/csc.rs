//! CSC (compressed sparse column) matrix

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::{Error, Result};

use super::format::{SparseFormat, SparseStorage};
use super::merge;

/// CSC (Compressed Sparse Column) sparse matrix
///
/// Column-symmetric to [`CsrMatrix`](super::CsrMatrix): column j occupies
/// the index range [col_ptrs[j], col_ptrs[j+1]) of the row-index and value
/// buffers.
#[derive(Debug, Clone)]
pub struct CscMatrix<B: Backend, T: Element> {
    pub(crate) col_ptrs: B::Buffer<i64>,
    pub(crate) row_indices: B::Buffer<i64>,
    pub(crate) values: B::Buffer<T>,
    pub(crate) shape: [usize; 2],
}

impl<B: Backend, T: Element> CscMatrix<B, T> {
    /// Create a CSC matrix from already-compressed host arrays
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `col_ptrs` length != ncols + 1
    /// - `row_indices` and `values` have different lengths
    /// - `col_ptrs` does not start at 0, end at nnz, or is decreasing
    /// - Any row index falls outside [0, nrows)
    pub fn from_parts(
        col_ptrs: &[i64],
        row_indices: &[i64],
        values: &[T],
        shape: [usize; 2],
    ) -> Result<Self> {
        let [nrows, ncols] = shape;
        let nnz = values.len();

        if col_ptrs.len() != ncols + 1 {
            return Err(Error::shape_mismatch(&[ncols + 1], &[col_ptrs.len()]));
        }
        if row_indices.len() != nnz {
            return Err(Error::shape_mismatch(&[nnz], &[row_indices.len()]));
        }
        if col_ptrs[0] != 0 || col_ptrs[ncols] as usize != nnz {
            return Err(Error::Internal(format!(
                "invalid col_ptrs: expected [0]=0 and [{}]={}, got [0]={} and [{}]={}",
                ncols, nnz, col_ptrs[0], ncols, col_ptrs[ncols]
            )));
        }
        for w in col_ptrs.windows(2) {
            if w[1] < w[0] {
                return Err(Error::Internal(format!(
                    "invalid col_ptrs: decreasing pair ({}, {})",
                    w[0], w[1]
                )));
            }
        }
        for &r in row_indices {
            if r < 0 || r as usize >= nrows {
                return Err(Error::index_out_of_bounds(r.max(0) as usize, nrows));
            }
        }

        Ok(Self {
            col_ptrs: B::from_slice(col_ptrs),
            row_indices: B::from_slice(row_indices),
            values: B::from_slice(values),
            shape,
        })
    }

    /// Create a CSC matrix from raw triplets
    ///
    /// Duplicate (row, col) entries are merged by summation; within each
    /// column the stored rows are strictly increasing.
    pub fn from_triplets(
        rows: &[i64],
        cols: &[i64],
        values: &[T],
        shape: [usize; 2],
    ) -> Result<Self> {
        if rows.len() != values.len() || cols.len() != values.len() {
            return Err(Error::shape_mismatch(&[values.len()], &[rows.len()]));
        }
        merge::validate_triplets(rows, cols, shape)?;

        // Merge on (row, col), then re-sort column-major. Both passes are
        // deterministic so the merged value at each position is fixed.
        let (m_rows, m_cols, m_values) = merge::merge_triplets(rows, cols, values);

        let nnz = m_values.len();
        let mut perm: Vec<usize> = (0..nnz).collect();
        perm.sort_unstable_by_key(|&i| (m_cols[i], m_rows[i]));

        let [_nrows, ncols] = shape;
        let mut col_ptrs = vec![0i64; ncols + 1];
        let mut sorted_rows = Vec::with_capacity(nnz);
        let mut sorted_values = Vec::with_capacity(nnz);
        for &i in &perm {
            col_ptrs[m_cols[i] as usize + 1] += 1;
            sorted_rows.push(m_rows[i]);
            sorted_values.push(m_values[i]);
        }
        for j in 1..=ncols {
            col_ptrs[j] += col_ptrs[j - 1];
        }

        Ok(Self {
            col_ptrs: B::from_slice(&col_ptrs),
            row_indices: B::from_slice(&sorted_rows),
            values: B::from_slice(&sorted_values),
            shape,
        })
    }

    /// Create a CSC matrix from backend-resident buffers
    pub(crate) fn from_buffers(
        col_ptrs: B::Buffer<i64>,
        row_indices: B::Buffer<i64>,
        values: B::Buffer<T>,
        shape: [usize; 2],
    ) -> Result<Self> {
        if col_ptrs.len() != shape[1] + 1 {
            return Err(Error::shape_mismatch(&[shape[1] + 1], &[col_ptrs.len()]));
        }
        if row_indices.len() != values.len() {
            return Err(Error::shape_mismatch(&[values.len()], &[row_indices.len()]));
        }
        Ok(Self {
            col_ptrs,
            row_indices,
            values,
            shape,
        })
    }

    /// Create an empty CSC matrix
    pub fn empty(shape: [usize; 2]) -> Self {
        let col_ptrs = vec![0i64; shape[1] + 1];
        Self {
            col_ptrs: B::from_slice(&col_ptrs),
            row_indices: B::from_slice(&[]),
            values: B::from_slice(&[]),
            shape,
        }
    }

    /// Returns the column pointer buffer (length ncols + 1)
    pub fn col_ptrs(&self) -> &B::Buffer<i64> {
        &self.col_ptrs
    }

    /// Returns the row index buffer
    pub fn row_indices(&self) -> &B::Buffer<i64> {
        &self.row_indices
    }

    /// Returns the value buffer
    pub fn values(&self) -> &B::Buffer<T> {
        &self.values
    }
}

impl<B: Backend, T: Element> SparseStorage for CscMatrix<B, T> {
    fn format(&self) -> SparseFormat {
        SparseFormat::Csc
    }

    fn shape(&self) -> [usize; 2] {
        self.shape
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn memory_usage(&self) -> usize {
        (self.ncols() + 1 + self.nnz()) * std::mem::size_of::<i64>()
            + self.nnz() * std::mem::size_of::<T>()
    }
}
