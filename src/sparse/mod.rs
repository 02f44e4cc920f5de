//! Sparse storage formats
//!
//! Three standard formats, each a passive record with a fixed traversal
//! order:
//!
//! - **COO** (Coordinate): (row, col, value) triplets. Best for
//!   construction and format conversion. O(nnz) storage.
//! - **CSR** (Compressed Sparse Row): row-major compressed format. Best
//!   for row traversal and matrix-vector products. O(nnz + nrows) storage.
//! - **CSC** (Compressed Sparse Column): column-major, symmetric to CSR.
//!   Best for column traversal. O(nnz + ncols) storage.
//!
//! Construction always validates indices against the shape and merges
//! duplicate (row, col) entries by summation — never by overwrite — so a
//! stored entry is visited exactly once by any kernel.
//!
//! # Usage
//!
//! ```
//! use sparr::prelude::*;
//!
//! // Construction merges the duplicate (0,0) entries: 5 + 7 = 12.
//! let coo = CooMatrix::<HostBackend, f64>::from_triplets(
//!     &[0, 0, 2],
//!     &[0, 0, 1],
//!     &[5.0, 7.0, 1.0],
//!     [3, 3],
//! )?;
//! assert_eq!(coo.nnz(), 2);
//!
//! // Convert once up front for row-traversal workloads.
//! let csr = sparr::sparse::convert::coo_to_csr(&coo)?;
//! let x = HostBackend::from_slice(&[1.0, 1.0, 1.0]);
//! let y = sparr::ops::spmv_csr(&csr, &x)?;
//! assert_eq!(y.to_vec(), vec![12.0, 0.0, 1.0]);
//! # Ok::<(), sparr::error::Error>(())
//! ```

mod coo;
mod csc;
mod csr;
mod format;
mod matrix;
mod merge;
mod vector;

pub mod convert;

pub use coo::CooMatrix;
pub use csc::CscMatrix;
pub use csr::CsrMatrix;
pub use format::{SparseFormat, SparseStorage};
pub use matrix::SparseMatrix;
pub use vector::SparseVector;
