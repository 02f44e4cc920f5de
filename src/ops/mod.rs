//! Sparse kernel library
//!
//! One algorithm per (format, operation) pair, because optimal traversal
//! differs by layout. Every kernel is written once against the backend
//! capability traits and monomorphized per backend; kernel bodies never
//! branch on backend identity and never stage dense data through host
//! memory.
//!
//! All kernels validate operand shapes before the first output write, so
//! a failed call leaves caller-supplied buffers untouched. Accumulation
//! widens through `f64` and narrows once on store.

mod add;
mod dot3;
mod reduce;
mod spmm;
mod spmv;

pub use add::{
    add_dense_coo, add_dense_coo_assign, add_dense_csc, add_dense_csc_assign, add_dense_csr,
    add_dense_csr_assign,
};
pub use dot3::{dot3_coo, dot3_csc, dot3_csr};
pub use reduce::{dot_sparse_dense, sum_values};
pub use spmm::{spmm_coo, spmm_coo_into, spmm_csc, spmm_csc_into, spmm_csr, spmm_csr_into};
pub use spmv::{spmv_coo, spmv_coo_into, spmv_csc, spmv_csc_into, spmv_csr, spmv_csr_into};

use crate::backend::Backend;
use crate::error::{Error, Result};

/// Refuse in-place entry points on backends without mutable-output support.
///
/// A capability probe, not a backend-identity branch: the kernel body that
/// follows is the same for every backend that passes.
#[inline]
pub(crate) fn require_inplace<B: Backend>() -> Result<()> {
    if B::SUPPORTS_INPLACE {
        Ok(())
    } else {
        Err(Error::capability_missing(B::name(), "in-place output"))
    }
}
