//! Conversion entry points.
//!
//! One fallible function per target kind, a kind-indexed [`convert`]
//! primitive that the typed entries specialize, and `*_lossy` companions
//! that hand back the target's zero value instead of an error.
//!
//! Every entry follows the same flow: probe the original, non-indirected
//! value for a capability hook, then resolve indirection, then dispatch
//! exhaustively on the resolved kind, finally narrowing numeric carriers
//! to the requested width.

mod numeric;
mod special;

pub use numeric::{
    to_f32, to_f64, to_i8, to_i16, to_i32, to_i64, to_int, to_u8, to_u16, to_u32, to_u64, to_uint,
};
pub use special::{to_bool, to_duration, to_str, to_time};

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::Cast;
use crate::target::{TargetKind, ZERO_TIME};
use crate::value::Value;

/// Convert `value` to the requested target kind.
///
/// This is the kind-indexed form of the typed entries; the result is the
/// converted value re-wrapped as a [`Value`] of exactly the target kind.
pub fn convert(value: &Value, target: TargetKind) -> Cast<Value> {
    match target {
        TargetKind::Bool => to_bool(value).map(Value::Bool),
        TargetKind::Str => to_str(value).map(Value::Str),
        TargetKind::I8 => to_i8(value).map(Value::I8),
        TargetKind::I16 => to_i16(value).map(Value::I16),
        TargetKind::I32 => to_i32(value).map(Value::I32),
        TargetKind::I64 => to_i64(value).map(Value::I64),
        TargetKind::Int => to_int(value).map(Value::Int),
        TargetKind::U8 => to_u8(value).map(Value::U8),
        TargetKind::U16 => to_u16(value).map(Value::U16),
        TargetKind::U32 => to_u32(value).map(Value::U32),
        TargetKind::U64 => to_u64(value).map(Value::U64),
        TargetKind::Uint => to_uint(value).map(Value::Uint),
        TargetKind::F32 => to_f32(value).map(Value::F32),
        TargetKind::F64 => to_f64(value).map(Value::F64),
        TargetKind::Duration => to_duration(value).map(Value::Duration),
        TargetKind::Time => to_time(value).map(Value::Time),
    }
}

/// Convert `value`, returning the target's zero value on failure.
pub fn convert_lossy(value: &Value, target: TargetKind) -> Value {
    convert(value, target).unwrap_or_else(|_| target.zero())
}

macro_rules! impl_lossy {
    ($($(#[$meta:meta])* $name:ident => $inner:ident : $ty:ty),* $(,)?) => {
        $(
            $(#[$meta])*
            pub fn $name(value: &Value) -> $ty {
                $inner(value).unwrap_or_default()
            }
        )*
    };
}

impl_lossy! {
    /// Lossy [`to_bool`]: `false` on failure.
    to_bool_lossy => to_bool : bool,
    /// Lossy [`to_str`]: `""` on failure.
    to_str_lossy => to_str : String,
    /// Lossy [`to_i8`]: `0` on failure.
    to_i8_lossy => to_i8 : i8,
    /// Lossy [`to_i16`]: `0` on failure.
    to_i16_lossy => to_i16 : i16,
    /// Lossy [`to_i32`]: `0` on failure.
    to_i32_lossy => to_i32 : i32,
    /// Lossy [`to_i64`]: `0` on failure.
    to_i64_lossy => to_i64 : i64,
    /// Lossy [`to_int`]: `0` on failure.
    to_int_lossy => to_int : isize,
    /// Lossy [`to_u8`]: `0` on failure.
    to_u8_lossy => to_u8 : u8,
    /// Lossy [`to_u16`]: `0` on failure.
    to_u16_lossy => to_u16 : u16,
    /// Lossy [`to_u32`]: `0` on failure.
    to_u32_lossy => to_u32 : u32,
    /// Lossy [`to_u64`]: `0` on failure.
    to_u64_lossy => to_u64 : u64,
    /// Lossy [`to_uint`]: `0` on failure.
    to_uint_lossy => to_uint : usize,
    /// Lossy [`to_f32`]: `0.0` on failure.
    to_f32_lossy => to_f32 : f32,
    /// Lossy [`to_f64`]: `0.0` on failure.
    to_f64_lossy => to_f64 : f64,
}

/// Lossy [`to_duration`]: the zero duration on failure.
pub fn to_duration_lossy(value: &Value) -> TimeDelta {
    to_duration(value).unwrap_or_else(|_| TimeDelta::zero())
}

/// Lossy [`to_time`]: the zero time sentinel on failure.
pub fn to_time_lossy(value: &Value) -> DateTime<Utc> {
    to_time(value).unwrap_or(ZERO_TIME)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn convert_wraps_in_target_kind() {
        assert_eq!(convert(&Value::from("42"), TargetKind::U8), Ok(Value::U8(42)));
        assert_eq!(
            convert(&Value::I64(1), TargetKind::Bool),
            Ok(Value::Bool(true))
        );
        assert_eq!(
            convert(&Value::Bool(true), TargetKind::Str),
            Ok(Value::Str("true".to_string()))
        );
    }

    #[test]
    fn convert_result_kind_always_matches_target() {
        let inputs = [
            Value::Bool(true),
            Value::I64(7),
            Value::from("1"),
            Value::F64(1.0),
        ];
        for input in &inputs {
            for target in TargetKind::ALL {
                if let Ok(out) = convert(input, target) {
                    assert_eq!(out.type_name(), target.name());
                }
            }
        }
    }

    #[test]
    fn convert_lossy_returns_zero_on_failure() {
        for target in TargetKind::ALL {
            assert_eq!(convert_lossy(&Value::Nil, target), target.zero());
            assert_eq!(
                convert_lossy(&Value::Seq(vec![]), TargetKind::Time),
                TargetKind::Time.zero()
            );
        }
    }

    #[test]
    fn lossy_wrappers_zero_on_failure() {
        assert_eq!(to_bool_lossy(&Value::from("maybe")), false);
        assert_eq!(to_i64_lossy(&Value::Nil), 0);
        assert_eq!(to_str_lossy(&Value::Seq(vec![])), "");
        assert_eq!(to_duration_lossy(&Value::Nil), TimeDelta::zero());
        assert_eq!(to_time_lossy(&Value::Nil), ZERO_TIME);
    }

    #[test]
    fn lossy_wrappers_pass_successes_through() {
        assert_eq!(to_bool_lossy(&Value::from("yes")), true);
        assert_eq!(to_u8_lossy(&Value::I64(300)), u8::MAX);
        assert_eq!(to_str_lossy(&Value::I8(-1)), "-1");
    }
}
