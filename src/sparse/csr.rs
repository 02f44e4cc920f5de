//! CSR (compressed sparse row) matrix

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::{Error, Result};

use super::format::{SparseFormat, SparseStorage};
use super::merge;

/// CSR (Compressed Sparse Row) sparse matrix
///
/// Row i occupies the index range [row_ptrs[i], row_ptrs[i+1]) of the
/// column-index and value buffers. The row-pointer buffer has length
/// nrows + 1, starts at 0, ends at nnz, and is non-decreasing.
#[derive(Debug, Clone)]
pub struct CsrMatrix<B: Backend, T: Element> {
    pub(crate) row_ptrs: B::Buffer<i64>,
    pub(crate) col_indices: B::Buffer<i64>,
    pub(crate) values: B::Buffer<T>,
    pub(crate) shape: [usize; 2],
}

impl<B: Backend, T: Element> CsrMatrix<B, T> {
    /// Create a CSR matrix from already-compressed host arrays
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `row_ptrs` length != nrows + 1
    /// - `col_indices` and `values` have different lengths
    /// - `row_ptrs` does not start at 0, end at nnz, or is decreasing
    /// - Any column index falls outside [0, ncols)
    pub fn from_parts(
        row_ptrs: &[i64],
        col_indices: &[i64],
        values: &[T],
        shape: [usize; 2],
    ) -> Result<Self> {
        let [nrows, ncols] = shape;
        let nnz = values.len();

        if row_ptrs.len() != nrows + 1 {
            return Err(Error::shape_mismatch(&[nrows + 1], &[row_ptrs.len()]));
        }
        if col_indices.len() != nnz {
            return Err(Error::shape_mismatch(&[nnz], &[col_indices.len()]));
        }
        if row_ptrs[0] != 0 || row_ptrs[nrows] as usize != nnz {
            return Err(Error::Internal(format!(
                "invalid row_ptrs: expected [0]=0 and [{}]={}, got [0]={} and [{}]={}",
                nrows, nnz, row_ptrs[0], nrows, row_ptrs[nrows]
            )));
        }
        for w in row_ptrs.windows(2) {
            if w[1] < w[0] {
                return Err(Error::Internal(format!(
                    "invalid row_ptrs: decreasing pair ({}, {})",
                    w[0], w[1]
                )));
            }
        }
        for &c in col_indices {
            if c < 0 || c as usize >= ncols {
                return Err(Error::index_out_of_bounds(c.max(0) as usize, ncols));
            }
        }

        Ok(Self {
            row_ptrs: B::from_slice(row_ptrs),
            col_indices: B::from_slice(col_indices),
            values: B::from_slice(values),
            shape,
        })
    }

    /// Create a CSR matrix from raw triplets
    ///
    /// Duplicate (row, col) entries are merged by summation; within each
    /// row the stored columns are strictly increasing.
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

        let [nrows, _ncols] = shape;
        let mut row_ptrs = vec![0i64; nrows + 1];
        for &r in &m_rows {
            row_ptrs[r as usize + 1] += 1;
        }
        for i in 1..=nrows {
            row_ptrs[i] += row_ptrs[i - 1];
        }

        Ok(Self {
            row_ptrs: B::from_slice(&row_ptrs),
            col_indices: B::from_slice(&m_cols),
            values: B::from_slice(&m_values),
            shape,
        })
    }

    /// Create a CSR matrix from backend-resident buffers
    ///
    /// Used by format conversion; trusts structure built from validated
    /// matrices but still checks the pointer/value length pairing.
    pub(crate) fn from_buffers(
        row_ptrs: B::Buffer<i64>,
        col_indices: B::Buffer<i64>,
        values: B::Buffer<T>,
        shape: [usize; 2],
    ) -> Result<Self> {
        if row_ptrs.len() != shape[0] + 1 {
            return Err(Error::shape_mismatch(&[shape[0] + 1], &[row_ptrs.len()]));
        }
        if col_indices.len() != values.len() {
            return Err(Error::shape_mismatch(&[values.len()], &[col_indices.len()]));
        }
        Ok(Self {
            row_ptrs,
            col_indices,
            values,
            shape,
        })
    }

    /// Create an empty CSR matrix
    pub fn empty(shape: [usize; 2]) -> Self {
        let row_ptrs = vec![0i64; shape[0] + 1];
        Self {
            row_ptrs: B::from_slice(&row_ptrs),
            col_indices: B::from_slice(&[]),
            values: B::from_slice(&[]),
            shape,
        }
    }

    /// Returns the row pointer buffer (length nrows + 1)
    pub fn row_ptrs(&self) -> &B::Buffer<i64> {
        &self.row_ptrs
    }

    /// Returns the column index buffer
    pub fn col_indices(&self) -> &B::Buffer<i64> {
        &self.col_indices
    }

    /// Returns the value buffer
    pub fn values(&self) -> &B::Buffer<T> {
        &self.values
    }
}

impl<B: Backend, T: Element> SparseStorage for CsrMatrix<B, T> {
    fn format(&self) -> SparseFormat {
        SparseFormat::Csr
    }

    fn shape(&self) -> [usize; 2] {
        self.shape
    }

    fn nnz(&self) -> usize {
        self.values.len()
    }

    fn memory_usage(&self) -> usize {
        (self.nrows() + 1 + self.nnz()) * std::mem::size_of::<i64>()
            + self.nnz() * std::mem::size_of::<T>()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostBackend;

    #[test]
    fn test_csr_creation() {
        // Matrix:
        // [1, 0, 2]
        // [0, 0, 3]
        // [4, 5, 0]
        let csr = CsrMatrix::<HostBackend, f32>::from_parts(
            &[0, 2, 3, 5],
            &[0, 2, 2, 0, 1],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            [3, 3],
        )
        .unwrap();

        assert_eq!(csr.nnz(), 5);
        assert_eq!(csr.shape(), [3, 3]);
        assert_eq!(csr.nrows(), 3);
        assert_eq!(csr.ncols(), 3);
    }

    #[test]
    fn test_csr_empty() {
        let csr = CsrMatrix::<HostBackend, f64>::empty([100, 200]);
        assert_eq!(csr.nnz(), 0);
        assert!(csr.is_empty());
        assert_eq!(csr.row_ptrs().len(), 101);
    }

    #[test]
    fn test_csr_invalid_row_ptrs_length() {
        let result = CsrMatrix::<HostBackend, f32>::from_parts(
            &[0, 2, 3], // should be 4 entries for 3 rows
            &[0, 2, 2, 0, 1],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            [3, 3],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_csr_decreasing_row_ptrs() {
        let result = CsrMatrix::<HostBackend, f32>::from_parts(
            &[0, 3, 2, 5],
            &[0, 2, 2, 0, 1],
            &[1.0, 2.0, 3.0, 4.0, 5.0],
            [3, 3],
        );
        assert!(result.is_err());
    }

    #[test]
    fn test_csr_column_out_of_bounds() {
        let result = CsrMatrix::<HostBackend, f32>::from_parts(
            &[0, 1, 1, 1],
            &[7],
            &[1.0],
            [3, 3],
        );
        assert!(matches!(result, Err(Error::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_csr_from_triplets_merges() {
        let csr = CsrMatrix::<HostBackend, f64>::from_triplets(
            &[0, 0, 1],
            &[1, 1, 0],
            &[2.0, 3.0, 4.0],
            [2, 2],
        )
        .unwrap();

        assert_eq!(csr.nnz(), 2);
        assert_eq!(csr.row_ptrs().to_vec(), vec![0, 1, 2]);
        assert_eq!(csr.col_indices().to_vec(), vec![1, 0]);
        assert_eq!(csr.values().to_vec(), vec![5.0, 4.0]);
    }
}
