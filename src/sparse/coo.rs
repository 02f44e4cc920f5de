//! COO (coordinate) sparse matrix

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::{Error, Result};

use super::format::{SparseFormat, SparseStorage};
use super::merge;

/// COO (Coordinate) sparse matrix
///
/// Parallel row/col/value buffers of length nnz. Construction merges
/// duplicate (row, col) entries by summation and stores entries in
/// row-major order, but consumers must not rely on storage order:
/// conversion out of CSC yields column-major order, and every COO kernel
/// accumulates commutatively so results are order-independent.
#[derive(Debug, Clone)]
pub struct CooMatrix<B: Backend, T: Element> {
    pub(crate) row_indices: B::Buffer<i64>,
    pub(crate) col_indices: B::Buffer<i64>,
    pub(crate) values: B::Buffer<T>,
    pub(crate) shape: [usize; 2],
}

impl<B: Backend, T: Element> CooMatrix<B, T> {
    /// Create a COO matrix from raw triplets
    ///
    /// Indices are validated against `shape` and duplicate (row, col)
    /// entries are merged by summation before upload.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `rows`, `cols`, and `values` have different lengths
    /// - Any index falls outside [0, nrows) x [0, ncols)
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

        let (m_rows, m_cols, m_values) = merge::merge_triplets(rows, cols, values);

        Ok(Self {
            row_indices: B::from_slice(&m_rows),
            col_indices: B::from_slice(&m_cols),
            values: B::from_slice(&m_values),
            shape,
        })
    }

    /// Create a COO matrix from already-canonical buffers
    ///
    /// Used by format conversion; asserts parallel lengths but trusts the
    /// caller for bounds (the buffers originate from validated matrices).
    pub(crate) fn from_buffers(
        row_indices: B::Buffer<i64>,
        col_indices: B::Buffer<i64>,
        values: B::Buffer<T>,
        shape: [usize; 2],
    ) -> Result<Self> {
        let nnz = values.len();
        if row_indices.len() != nnz || col_indices.len() != nnz {
            return Err(Error::shape_mismatch(&[nnz], &[row_indices.len()]));
        }
        Ok(Self {
            row_indices,
            col_indices,
            values,
            shape,
        })
    }

    /// Create an empty COO matrix
    pub fn empty(shape: [usize; 2]) -> Self {
        Self {
            row_indices: B::from_slice(&[]),
            col_indices: B::from_slice(&[]),
            values: B::from_slice(&[]),
            shape,
        }
    }

    /// Returns the row index buffer
    pub fn row_indices(&self) -> &B::Buffer<i64> {
        &self.row_indices
    }

    /// Returns the column index buffer
    pub fn col_indices(&self) -> &B::Buffer<i64> {
        &self.col_indices
    }

    /// Returns the value buffer
    pub fn values(&self) -> &B::Buffer<T> {
        &self.values
    }

    /// Download the stored entries as (row, col, value) triplets
    pub fn to_triplets(&self) -> Vec<(i64, i64, T)> {
        let rows = self.row_indices.to_vec();
        let cols = self.col_indices.to_vec();
        let values = self.values.to_vec();
        rows.into_iter()
            .zip(cols)
            .zip(values)
            .map(|((r, c), v)| (r, c, v))
            .collect()
    }
}

impl<B: Backend, T: Element> SparseStorage for CooMatrix<B, T> {
    fn format(&self) -> SparseFormat {
        SparseFormat::Coo
    }

    fn shape(&self) -> [usize; 2] {
        self.shape
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn memory_usage(&self) -> usize {
        self.nnz() * (2 * std::mem::size_of::<i64>() + std::mem::size_of::<T>())
    }
}
