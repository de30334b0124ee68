//! Scalar and vector helpers shared by the curve and alignment code.

use std::fmt::Debug;
use std::ops::{Add, Rem, Sub};

use castle_core::{Result, SceneError, Tolerance};
use num_traits::{CheckedSub, Zero};

use crate::Vector3;

/// Scalars accepted by [`cyclic_clamp`].
///
/// `checked_diff` is `self - other` when the difference is representable.
pub trait CyclicScalar:
    Copy + Debug + PartialOrd + Zero + Add<Output = Self> + Sub<Output = Self> + Rem<Output = Self>
{
    fn checked_diff(self, other: Self) -> Option<Self>;
}

macro_rules! impl_cyclic_int {
    ($($t:ty),*) => {$(
        impl CyclicScalar for $t {
            fn checked_diff(self, other: Self) -> Option<Self> {
                CheckedSub::checked_sub(&self, &other)
            }
        }
    )*};
}

macro_rules! impl_cyclic_float {
    ($($t:ty),*) => {$(
        impl CyclicScalar for $t {
            fn checked_diff(self, other: Self) -> Option<Self> {
                Some(self - other)
            }
        }
    )*};
}

impl_cyclic_int!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
impl_cyclic_float!(f32, f64);

/// `(hi - lo) mod amp` for `hi >= lo` and a positive `amp`, without
/// overflowing when `hi - lo` itself does not fit in `T`.
fn offset_in_period<T: CyclicScalar>(hi: T, lo: T, amp: T) -> T {
    match hi.checked_diff(lo) {
        Some(d) => d % amp,
        None => {
            // only signed types get here: hi > 0 > lo, so both terms lie in (-amp, amp)
            let d = (hi % amp - amp) - lo % amp;
            if d < T::zero() {
                d + amp
            } else {
                d
            }
        }
    }
}

/// Cyclic clamping of a value.
///
/// Maps `value` into `[min_bound, max_bound)` treating it as periodic with
/// period `max_bound - min_bound`. The remainder is always taken as
/// non-negative, so values below `min_bound` wrap from the top. Works for
/// unsigned integers and for values anywhere in the range of `T`.
///
/// An empty period (`min_bound == max_bound`) yields `min_bound`.
///
/// # Errors
/// `InvalidArgument` when `min_bound > max_bound`, or when the period
/// `max_bound - min_bound` does not fit in `T`.
pub fn cyclic_clamp<T: CyclicScalar>(value: T, min_bound: T, max_bound: T) -> Result<T> {
    if min_bound > max_bound {
        return Err(SceneError::InvalidArgument(format!(
            "cyclic_clamp: min bound {:?} is greater than max bound {:?}",
            min_bound, max_bound
        )));
    }

    let amp = max_bound.checked_diff(min_bound).ok_or_else(|| {
        SceneError::InvalidArgument(format!(
            "cyclic_clamp: period from {:?} to {:?} overflows",
            min_bound, max_bound
        ))
    })?;
    if amp == T::zero() {
        return Ok(min_bound);
    }

    let clamped = if value >= min_bound {
        min_bound + offset_in_period(value, min_bound, amp)
    } else {
        let below = offset_in_period(min_bound, value, amp);
        if below == T::zero() {
            min_bound
        } else {
            min_bound + (amp - below)
        }
    };

    // Float rounding can push the result up to `max_bound` itself.
    if clamped >= max_bound {
        return Ok(min_bound);
    }

    Ok(clamped)
}

/// True when every component of `v` is exactly zero.
pub fn is_vector_null(v: Vector3) -> bool {
    v.x == 0.0 && v.y == 0.0 && v.z == 0.0
}

/// True when the length of `v` is zero within `tolerance` (or not finite).
pub fn is_vector_near_null(v: Vector3, tolerance: Tolerance) -> bool {
    let len = v.length();
    !len.is_finite() || tolerance.is_zero(len)
}
