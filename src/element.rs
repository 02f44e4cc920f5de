//! Element trait for types storable in dense and sparse buffers

use bytemuck::{Pod, Zeroable};
use num_traits::NumAssign;
use std::fmt::Debug;

/// Trait for types that can be elements of a sparse matrix or dense buffer
///
/// # Bounds
/// - `Copy + Debug + Send + Sync + 'static` - Basic trait requirements
/// - `Pod + Zeroable` - Safe memory transmutation (bytemuck), required so
///   buffers can move between host and backend storage
/// - `NumAssign` - Arithmetic with assignment operators (num-traits)
/// - `PartialOrd` - Comparison for validation
///
/// Kernels widen through [`Element::to_f64`] for accumulation and narrow
/// once on store, so integer element types get the same accumulator
/// behavior as floats.
pub trait Element:
    Copy + Debug + Send + Sync + Pod + Zeroable + NumAssign + PartialOrd + 'static
{
    /// Human-readable name of this element type
    const NAME: &'static str;

    /// Convert to f64 for generic accumulation
    fn to_f64(self) -> f64;

    /// Convert from f64 to this type
    fn from_f64(v: f64) -> Self;
}

impl Element for f64 {
    const NAME: &'static str = "f64";

    #[inline]
    fn to_f64(self) -> f64 {
        self
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v
    }
}

impl Element for f32 {
    const NAME: &'static str = "f32";

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as f32
    }
}

impl Element for i64 {
    const NAME: &'static str = "i64";

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as i64
    }
}

impl Element for i32 {
    const NAME: &'static str = "i32";

    #[inline]
    fn to_f64(self) -> f64 {
        self as f64
    }

    #[inline]
    fn from_f64(v: f64) -> Self {
        v as i32
    }
}
