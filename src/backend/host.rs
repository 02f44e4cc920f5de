//! Host memory backend
//!
//! The host backend stores dense buffers in plain `Vec<T>` and serves as
//! the reference implementation every other backend must agree with.

use super::{Backend, DenseBuffer};
use crate::element::Element;
use crate::error::Result;
use num_traits::Zero;

/// Host (CPU) memory backend
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct HostBackend;

/// Dense buffer in host memory
#[derive(Debug, Clone, PartialEq)]
pub struct HostBuffer<T: Element> {
    data: Vec<T>,
}

impl<T: Element> HostBuffer<T> {
    /// Borrow the underlying storage
    ///
    /// Host-only escape hatch; generic kernel code goes through
    /// [`DenseBuffer`] instead.
    pub fn as_slice(&self) -> &[T] {
        &self.data
    }
}

impl Backend for HostBackend {
    type Buffer<T: Element> = HostBuffer<T>;

    const SUPPORTS_INPLACE: bool = true;

    fn name() -> &'static str {
        "host"
    }

    fn alloc_zeros<T: Element>(len: usize) -> Result<HostBuffer<T>> {
        Ok(HostBuffer {
            data: vec![T::zero(); len],
        })
    }

    fn from_slice<T: Element>(data: &[T]) -> HostBuffer<T> {
        HostBuffer {
            data: data.to_vec(),
        }
    }
}

impl<T: Element> DenseBuffer<T> for HostBuffer<T> {
    #[inline]
    fn len(&self) -> usize {
        self.data.len()
    }

    #[inline]
    fn get(&self, i: usize) -> T {
        self.data[i]
    }

    #[inline]
    fn set(&mut self, i: usize, v: T) {
        self.data[i] = v;
    }

    fn to_vec(&self) -> Vec<T> {
        self.data.clone()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_host_clone_is_copy() {
        // Host buffers copy on clone: writes to the clone do not leak back.
        let a = HostBackend::from_slice(&[1.0f64, 2.0]);
        let mut b = a.clone();
        b.set(0, 9.0);
        assert_eq!(a.get(0), 1.0);
        assert_eq!(b.get(0), 9.0);
    }

    #[test]
    fn test_host_as_slice() {
        let a = HostBackend::from_slice(&[1.0f32, 2.0, 3.0]);
        assert_eq!(a.as_slice(), &[1.0, 2.0, 3.0]);
    }
}
