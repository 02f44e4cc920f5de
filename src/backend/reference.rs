//! Reference accelerator backend
//!
//! `RefBackend` emulates accelerator-resident memory on the host: a buffer
//! is an opaque handle to storage that can only be touched through the
//! [`DenseBuffer`] capability or the explicit upload/download transfer
//! points. Cloning a buffer clones the handle, not the storage, matching
//! device-pointer semantics.
//!
//! The backend exists so every kernel can be validated against a second
//! backend without hardware: a kernel that produces identical results on
//! [`HostBackend`](super::HostBackend) and `RefBackend` provably reads and
//! writes dense data only through the capability seam.

use super::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::Result;
use num_traits::Zero;
use parking_lot::RwLock;
use std::sync::Arc;

/// Emulated accelerator backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RefBackend;

/// Handle to an emulated accelerator-resident buffer
///
/// Reads take a shared lock, writes an exclusive lock. The single-writer
/// contract on output buffers means kernels never contend on the write
/// path.
#[derive(Debug, Clone)]
pub struct RefBuffer<T: Element> {
    data: Arc<RwLock<Vec<T>>>,
}

impl Backend for RefBackend {
    type Buffer<T: Element> = RefBuffer<T>;

    const SUPPORTS_INPLACE: bool = true;

    fn name() -> &'static str {
        "ref"
    }

    fn alloc_zeros<T: Element>(len: usize) -> Result<RefBuffer<T>> {
        log::debug!("ref backend: allocating {} x {}", len, T::NAME);
        Ok(RefBuffer {
            data: Arc::new(RwLock::new(vec![T::zero(); len])),
        })
    }

    fn from_slice<T: Element>(data: &[T]) -> RefBuffer<T> {
        RefBuffer {
            data: Arc::new(RwLock::new(data.to_vec())),
        }
    }
}

impl<T: Element> DenseBuffer<T> for RefBuffer<T> {
    fn len(&self) -> usize {
        self.data.read().len()
    }

    fn get(&self, i: usize) -> T {
        self.data.read()[i]
    }

    fn set(&mut self, i: usize, v: T) {
        self.data.write()[i] = v;
    }

    fn to_vec(&self) -> Vec<T> {
        self.data.read().clone()
    }
}
