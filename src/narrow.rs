//! Narrowing/clamping layer.
//!
//! Maps a canonical carrier (`i64`, `u64`, `f64`) down to a narrower
//! requested width with saturating clamp semantics: above the target's
//! maximum yields the maximum, below the minimum yields the minimum,
//! otherwise the value truncates to the width. Conversions never fail
//! merely because of magnitude.
//!
//! Saturation happens only here, for the final requested width; the
//! cross-carrier conversions in [`crate::convert::numeric`] deliberately
//! use native cast semantics with no pre-check.

use crate::bounds;

/// Clamp a signed carrier value into `[min, max]`.
#[inline]
pub fn clamp_i64(v: i64, min: i64, max: i64) -> i64 {
    v.clamp(min, max)
}

/// Clamp an unsigned carrier value into `[0, max]`.
#[inline]
pub fn clamp_u64(v: u64, max: u64) -> u64 {
    v.min(max)
}

macro_rules! impl_narrow_signed {
    ($($fn_name:ident => $ty:ty),* $(,)?) => {
        $(
            /// Saturating narrow of the signed carrier to the target width.
            #[inline]
            pub fn $fn_name(v: i64) -> $ty {
                clamp_i64(v, <$ty>::MIN as i64, <$ty>::MAX as i64) as $ty
            }
        )*
    };
}

macro_rules! impl_narrow_unsigned {
    ($($fn_name:ident => $ty:ty),* $(,)?) => {
        $(
            /// Saturating narrow of the unsigned carrier to the target width.
            #[inline]
            pub fn $fn_name(v: u64) -> $ty {
                clamp_u64(v, <$ty>::MAX as u64) as $ty
            }
        )*
    };
}

impl_narrow_signed! {
    to_i8 => i8,
    to_i16 => i16,
    to_i32 => i32,
}

impl_narrow_unsigned! {
    to_u8 => u8,
    to_u16 => u16,
    to_u32 => u32,
}

/// Saturating narrow of the signed carrier to the platform `int` width.
#[inline]
pub fn to_int(v: i64) -> isize {
    clamp_i64(v, bounds::PLATFORM.int_min, bounds::PLATFORM.int_max) as isize
}

/// Saturating narrow of the unsigned carrier to the platform `uint` width.
#[inline]
pub fn to_uint(v: u64) -> usize {
    clamp_u64(v, bounds::PLATFORM.uint_max) as usize
}

/// Narrow the float carrier to f32.
///
/// Finite values beyond the f32 range clamp to the f32 magnitude limits
/// instead of rounding to infinity. NaN and genuine infinities propagate.
#[inline]
pub fn to_f32(v: f64) -> f32 {
    if v.is_nan() || v.is_infinite() {
        return v as f32;
    }
    v.clamp(-(f32::MAX as f64), f32::MAX as f64) as f32
}
