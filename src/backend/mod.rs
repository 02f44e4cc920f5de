//! Backend abstraction for dense array storage
//!
//! This module defines the capability seam between kernels and dense
//! storage. A kernel is written once against [`Backend`] and
//! [`DenseBuffer`] and monomorphized per concrete backend; kernel bodies
//! never branch on backend identity.
//!
//! # Architecture
//!
//! ```text
//! Backend (backend identity, allocation, host transfer)
//! └── Buffer<T> (element get/set, length query)
//! ```
//!
//! Two backends ship with the crate:
//! - [`HostBackend`]: plain host memory (`Vec<T>`)
//! - [`RefBackend`]: emulated accelerator-resident memory, used to validate
//!   that kernels only touch dense data through this seam

mod host;
mod reference;

pub use host::{HostBackend, HostBuffer};
pub use reference::{RefBackend, RefBuffer};

use crate::element::Element;
use crate::error::Result;

/// Core trait for dense-array backends
///
/// `Backend` abstracts over where dense buffers live (host memory,
/// accelerator memory). It uses static dispatch via generics: resolution
/// of which buffer implementation a kernel touches happens at
/// monomorphization time, never through runtime tag branching.
pub trait Backend: Clone + Send + Sync + 'static {
    /// Dense buffer type for a given element type
    type Buffer<T: Element>: DenseBuffer<T>;

    /// Whether buffers on this backend can be mutated in place
    ///
    /// In-place entry points (`_into` / `_assign` variants) refuse
    /// backends without this capability before touching the output.
    const SUPPORTS_INPLACE: bool;

    /// Human-readable name of this backend
    fn name() -> &'static str;

    /// Allocate a zero-filled buffer of `len` elements on this backend
    fn alloc_zeros<T: Element>(len: usize) -> Result<Self::Buffer<T>>;

    /// Upload a host slice into a new buffer on this backend
    fn from_slice<T: Element>(data: &[T]) -> Self::Buffer<T>;
}

/// Minimal capability a dense buffer exposes to kernels
///
/// Element get/set by index plus a length query. Together with
/// [`Backend::alloc_zeros`] this is the only interface through which a
/// kernel interacts with dense data.
///
/// Cloning a buffer clones the backend handle; whether the underlying
/// storage is shared is backend-specific (host buffers copy, reference
/// device buffers share, matching accelerator handle semantics). Sparse
/// operands are immutable after construction, so shared storage is safe.
pub trait DenseBuffer<T: Element>: Clone + Send + Sync + std::fmt::Debug + 'static {
    /// Number of elements in the buffer
    fn len(&self) -> usize;

    /// Returns true if the buffer holds no elements
    fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Read the element at `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    fn get(&self, i: usize) -> T;

    /// Write `v` to the element at `i`
    ///
    /// # Panics
    ///
    /// Panics if `i >= len()`.
    fn set(&mut self, i: usize, v: T);

    /// Download the buffer contents to host memory
    ///
    /// An explicit transfer point. Used by construction and conversion
    /// staging and by tests; kernels never call it.
    fn to_vec(&self) -> Vec<T>;
}

#[cfg(test)]
mod tests {
    use super::*;

    fn exercise<B: Backend>() {
        let mut buf = B::alloc_zeros::<f64>(4).unwrap();
        assert_eq!(buf.len(), 4);
        assert_eq!(buf.get(2), 0.0);

        buf.set(2, 7.5);
        assert_eq!(buf.get(2), 7.5);
        assert_eq!(buf.to_vec(), vec![0.0, 0.0, 7.5, 0.0]);

        let uploaded = B::from_slice(&[1.0f64, 2.0, 3.0]);
        assert_eq!(uploaded.to_vec(), vec![1.0, 2.0, 3.0]);
    }

    #[test]
    fn test_host_capability() {
        exercise::<HostBackend>();
    }

    #[test]
    fn test_ref_capability() {
        exercise::<RefBackend>();
    }

    #[test]
    fn test_inplace_supported() {
        assert!(HostBackend::SUPPORTS_INPLACE);
        assert!(RefBackend::SUPPORTS_INPLACE);
    }
}
