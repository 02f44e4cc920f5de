//! Sparse vector

use crate::backend::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::{Error, Result};

use super::merge;

/// Sparse vector with strictly increasing unique indices
///
/// Construction sorts the entries and merges duplicate indices by
/// summation, so the stored index buffer is always strictly increasing.
#[derive(Debug, Clone)]
pub struct SparseVector<B: Backend, T: Element> {
    pub(crate) indices: B::Buffer<i64>,
    pub(crate) values: B::Buffer<T>,
    pub(crate) len: usize,
}

impl<B: Backend, T: Element> SparseVector<B, T> {
    /// Create a sparse vector from raw (index, value) pairs
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - `indices` and `values` have different lengths
    /// - Any index falls outside [0, len)
    pub fn from_pairs(indices: &[i64], values: &[T], len: usize) -> Result<Self> {
        if indices.len() != values.len() {
            return Err(Error::shape_mismatch(&[values.len()], &[indices.len()]));
        }
        for &i in indices {
            if i < 0 || i as usize >= len {
                return Err(Error::index_out_of_bounds(i.max(0) as usize, len));
            }
        }

        let (m_indices, m_values) = merge::merge_vector_entries(indices, values);

        Ok(Self {
            indices: B::from_slice(&m_indices),
            values: B::from_slice(&m_values),
            len,
        })
    }

    /// Create an empty sparse vector of logical length `len`
    pub fn empty(len: usize) -> Self {
        Self {
            indices: B::from_slice(&[]),
            values: B::from_slice(&[]),
            len,
        }
    }

    /// Logical length of the vector
    pub fn len(&self) -> usize {
        self.len
    }

    /// Returns true if the logical length is zero
    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Number of stored entries
    pub fn nnz(&self) -> usize {
        self.values.len()
    }

    /// Returns the index buffer (strictly increasing)
    pub fn indices(&self) -> &B::Buffer<i64> {
        &self.indices
    }

    /// Returns the value buffer
    pub fn values(&self) -> &B::Buffer<T> {
        &self.values
    }

    /// Sum of stored values
    ///
    /// Single pass over the value buffer, O(nnz); the index buffer is
    /// never touched.
    pub fn sum(&self) -> T {
        crate::ops::sum_values::<B, T>(&self.values)
    }

    /// Dot product with a dense vector
    ///
    /// Gathers the matching dense entries and multiply-accumulates,
    /// O(nnz).
    ///
    /// # Errors
    ///
    /// Returns `ShapeMismatch` if the dense length differs from the
    /// logical length.
    pub fn dot(&self, dense: &B::Buffer<T>) -> Result<T> {
        crate::ops::dot_sparse_dense::<B, T>(&self.indices, &self.values, dense, self.len)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::backend::HostBackend;

    #[test]
    fn test_vector_creation_sorts_and_merges() {
        let v =
            SparseVector::<HostBackend, f64>::from_pairs(&[4, 1, 4], &[1.0, 2.0, 0.5], 10).unwrap();
        assert_eq!(v.nnz(), 2);
        assert_eq!(v.indices().to_vec(), vec![1, 4]);
        assert_eq!(v.values().to_vec(), vec![2.0, 1.5]);
        assert_eq!(v.len(), 10);
    }

    #[test]
    fn test_vector_index_out_of_bounds() {
        let result = SparseVector::<HostBackend, f64>::from_pairs(&[10], &[1.0], 10);
        assert!(matches!(result, Err(Error::IndexOutOfBounds { .. })));
    }

    #[test]
    fn test_vector_empty() {
        let v = SparseVector::<HostBackend, f32>::empty(5);
        assert_eq!(v.nnz(), 0);
        assert_eq!(v.len(), 5);
        assert_eq!(v.sum(), 0.0);
    }
}
