//! Error types for sparr

use crate::sparse::SparseFormat;
use thiserror::Error;

/// Result type alias using sparr's Error
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur in sparr operations
#[derive(Error, Debug)]
pub enum Error {
    /// Shape mismatch between operands
    ///
    /// Detected before any output write; a failed call never produces a
    /// partial result.
    #[error("Shape mismatch: expected {expected:?}, got {got:?}")]
    ShapeMismatch {
        /// Expected shape
        expected: Vec<usize>,
        /// Actual shape
        got: Vec<usize>,
    },

    /// Index out of bounds in sparse structure
    ///
    /// Reported at construction time for malformed index arrays.
    #[error("Index {index} out of bounds for dimension of size {size}")]
    IndexOutOfBounds {
        /// The invalid index
        index: usize,
        /// Size of the dimension
        size: usize,
    },

    /// No direct or convertible kernel path for a (format, operation) pair
    #[error("Unsupported format pair: no {op} kernel for {format} and no conversion path")]
    UnsupportedFormatPair {
        /// The sparse storage format of the operand
        format: SparseFormat,
        /// The operation name
        op: &'static str,
    },

    /// Dense operand's backend lacks a capability a kernel requires
    #[error("Backend '{backend}' lacks required capability: {capability}")]
    BackendCapabilityMissing {
        /// The backend name
        backend: &'static str,
        /// The missing capability
        capability: &'static str,
    },

    /// Backend-specific execution error
    #[error("Backend error: {0}")]
    Backend(String),

    /// Generic internal error
    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Create a shape mismatch error
    pub fn shape_mismatch(expected: &[usize], got: &[usize]) -> Self {
        Self::ShapeMismatch {
            expected: expected.to_vec(),
            got: got.to_vec(),
        }
    }

    /// Create an index-out-of-bounds error
    pub fn index_out_of_bounds(index: usize, size: usize) -> Self {
        Self::IndexOutOfBounds { index, size }
    }

    /// Create an unsupported-format-pair error
    pub fn unsupported_pair(format: SparseFormat, op: &'static str) -> Self {
        Self::UnsupportedFormatPair { format, op }
    }

    /// Create a backend-capability error
    pub fn capability_missing(backend: &'static str, capability: &'static str) -> Self {
        Self::BackendCapabilityMissing {
            backend,
            capability,
        }
    }
}
