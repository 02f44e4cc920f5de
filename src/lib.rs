//! # sparr
//!
//! **Device-portable sparse linear algebra for Rust.**
//!
//! sparr provides three sparse matrix storage formats (COO, CSR, CSC), a
//! sparse vector, and a fixed set of numerically critical kernels -
//! matrix-vector product, matrix-matrix product, sparse-vector sum,
//! sparse-dense dot, a fused three-argument dot, and sparse-plus-dense
//! addition - that produce identical results whether dense operands live
//! in host memory or behind an accelerator-resident array abstraction.
//!
//! ## Why sparr?
//!
//! - **One kernel body per (format, operation)**: each kernel is written
//!   once against a minimal dense-array capability and monomorphized per
//!   backend - no per-backend kernel forks, no backend branching
//! - **Deterministic semantics**: construction merges duplicate entries by
//!   summation; every operation is reproducible for a fixed input
//! - **No hidden conversions**: a (format, operation) pair without a
//!   direct kernel is resolved through an explicit dispatch table, and any
//!   implicit format conversion is logged as the performance cliff it is
//!
//! ## Quick Start
//!
//! ```
//! use sparr::prelude::*;
//!
//! // 3x3 diagonal matrix in CSR form.
//! let a = CsrMatrix::<HostBackend, f64>::from_parts(
//!     &[0, 1, 2, 3],
//!     &[0, 1, 2],
//!     &[2.0, 3.0, 4.0],
//!     [3, 3],
//! )?;
//!
//! let x = HostBackend::from_slice(&[1.0, 1.0, 1.0]);
//! let y = sparr::ops::spmv_csr(&a, &x)?;
//! assert_eq!(y.to_vec(), vec![2.0, 3.0, 4.0]);
//! # Ok::<(), sparr::error::Error>(())
//! ```
//!
//! ## Feature Flags
//!
//! - `rayon` (default): parallel host-side sort during construction and
//!   format conversion

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod backend;
pub mod dispatch;
pub mod element;
pub mod error;
pub mod ops;
pub mod sparse;

/// Prelude module for convenient imports
pub mod prelude {
    pub use crate::backend::{Backend, DenseBuffer, HostBackend, HostBuffer, RefBackend, RefBuffer};
    pub use crate::element::Element;
    pub use crate::error::{Error, Result};
    pub use crate::sparse::{
        CooMatrix, CscMatrix, CsrMatrix, SparseFormat, SparseMatrix, SparseStorage, SparseVector,
    };
}
