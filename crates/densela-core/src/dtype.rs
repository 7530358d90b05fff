//! Numeric element types for generic matrix code.
//!
//! The trait hierarchy is:
//! ```text
//! Scalar          (f32, f64, Complex<f64>)
//!   └── Float     (f32, f64)
//! ```
//!
//! Real-valued algorithms are generic over [`Float`]. The general
//! eigendecomposition produces complex eigenvectors, which live in a
//! `Matrix<Complex<f64>>`; that is the reason `Scalar` does not require an
//! ordering.

use core::fmt;
use core::iter::Sum;
use core::ops::{Add, AddAssign, Div, DivAssign, Mul, MulAssign, Neg, Sub, SubAssign};

use num_complex::Complex;

// ---------------------------------------------------------------------------
// Scalar: the root trait for every element type
// ---------------------------------------------------------------------------

/// Base trait for all element types storable in a [`Matrix`](crate::Matrix).
pub trait Scalar:
    Copy
    + Clone
    + fmt::Debug
    + fmt::Display
    + PartialEq
    + Send
    + Sync
    + Add<Output = Self>
    + Sub<Output = Self>
    + Mul<Output = Self>
    + Div<Output = Self>
    + Neg<Output = Self>
    + AddAssign
    + SubAssign
    + MulAssign
    + DivAssign
    + Sum
    + Default
    + 'static
{
    /// The additive identity (`0`).
    fn zero() -> Self;

    /// The multiplicative identity (`1`).
    fn one() -> Self;

    /// Convert from `usize` (used for counts and means).
    fn from_usize(v: usize) -> Self;
}

// ---------------------------------------------------------------------------
// Float: real floating-point element types
// ---------------------------------------------------------------------------

/// Trait for real floating-point scalar types (`f32`, `f64`).
pub trait Float: Scalar + PartialOrd {
    /// Machine epsilon.
    fn epsilon() -> Self;

    fn abs(self) -> Self;
    fn sqrt(self) -> Self;
    fn is_finite(self) -> bool;
    fn max(self, other: Self) -> Self;

    /// Convert from an `f64` literal (used for constants and tolerances).
    fn from_f64(v: f64) -> Self;
}

// ===========================================================================
// Implementations
// ===========================================================================

macro_rules! impl_scalar_float {
    ($ty:ty) => {
        impl Scalar for $ty {
            #[inline]
            fn zero() -> Self {
                0.0
            }
            #[inline]
            fn one() -> Self {
                1.0
            }
            #[inline]
            fn from_usize(v: usize) -> Self {
                v as Self
            }
        }

        impl Float for $ty {
            #[inline]
            fn epsilon() -> Self {
                <$ty>::EPSILON
            }
            #[inline]
            fn abs(self) -> Self {
                <$ty>::abs(self)
            }
            #[inline]
            fn sqrt(self) -> Self {
                <$ty>::sqrt(self)
            }
            #[inline]
            fn is_finite(self) -> bool {
                <$ty>::is_finite(self)
            }
            #[inline]
            fn max(self, other: Self) -> Self {
                <$ty>::max(self, other)
            }
            #[inline]
            #[allow(clippy::cast_possible_truncation)]
            fn from_f64(v: f64) -> Self {
                v as Self
            }
        }
    };
}

impl_scalar_float!(f32);
impl_scalar_float!(f64);

impl Scalar for Complex<f64> {
    #[inline]
    fn zero() -> Self {
        Complex::new(0.0, 0.0)
    }
    #[inline]
    fn one() -> Self {
        Complex::new(1.0, 0.0)
    }
    #[inline]
    fn from_usize(v: usize) -> Self {
        Complex::new(v as f64, 0.0)
    }
}
