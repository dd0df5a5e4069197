//! Canonical numeric conversions.
//!
//! Every numeric target routes through one of three canonical carriers:
//! `i64`, `u64` or `f64`, chosen by the source kind (signed/bool/length/
//! duration/time go through i64, unsigned through u64, floating and
//! complex through f64). Crossing between carriers uses native cast
//! semantics with no pre-check; the single exception is a negative float
//! converting to the unsigned carrier, which clamps to 0 instead of
//! wrapping. Saturation to the final width happens in [`crate::narrow`].

use crate::error::{Cast, CastError};
use crate::hooks;
use crate::narrow;
use crate::parse;
use crate::parse::duration::saturating_nanos;
use crate::resolve::resolve;
use crate::value::Value;

/// Signed carrier for `value`, with `target` naming the requested kind
/// in diagnostics.
fn signed_carrier(value: &Value, target: &'static str) -> Cast<i64> {
    if let Some(hit) = hooks::invoke(value, target, |h| h.cast_i64()) {
        return hit;
    }
    let resolved = resolve(value);
    match &resolved {
        Value::Bool(b) => Ok(i64::from(*b)),
        Value::I8(v) => Ok(i64::from(*v)),
        Value::I16(v) => Ok(i64::from(*v)),
        Value::I32(v) => Ok(i64::from(*v)),
        Value::I64(v) => Ok(*v),
        Value::Int(v) => Ok(*v as i64),
        Value::U8(v) => Ok(i64::from(*v)),
        Value::U16(v) => Ok(i64::from(*v)),
        Value::U32(v) => Ok(i64::from(*v)),
        // Two's-complement crossing: no pre-check, values above
        // i64::MAX wrap negative.
        Value::U64(v) => Ok(*v as i64),
        Value::Uint(v) => Ok(*v as i64),
        // Native float-to-int cast: truncation toward zero, NaN to 0.
        Value::F32(v) => Ok(*v as i64),
        Value::F64(v) => Ok(*v as i64),
        Value::Complex { re, .. } => Ok(*re as i64),
        Value::Str(s) => parse::parse_signed(s).ok_or_else(|| CastError::parse(s, target)),
        Value::Seq(items) => Ok(items.len() as i64),
        Value::Map(entries) => Ok(entries.len() as i64),
        Value::Duration(d) => Ok(saturating_nanos(*d)),
        Value::Time(t) => Ok(t.timestamp()),
        Value::Nil => Err(CastError::nil(target)),
        Value::Custom(_) => match hooks::invoke(&resolved, target, |h| h.cast_i64()) {
            Some(hit) => hit,
            None => Err(CastError::unsupported(&resolved, target)),
        },
        Value::Ref(_) => Err(CastError::unsupported(&resolved, target)),
    }
}

/// Unsigned carrier for `value`.
fn unsigned_carrier(value: &Value, target: &'static str) -> Cast<u64> {
    if let Some(hit) = hooks::invoke(value, target, |h| h.cast_u64()) {
        return hit;
    }
    let resolved = resolve(value);
    match &resolved {
        Value::Bool(b) => Ok(u64::from(*b)),
        // Two's-complement crossing from the signed carrier: negative
        // integers wrap. The float path below deliberately does not.
        Value::I8(v) => Ok(*v as u64),
        Value::I16(v) => Ok(*v as u64),
        Value::I32(v) => Ok(*v as u64),
        Value::I64(v) => Ok(*v as u64),
        Value::Int(v) => Ok(*v as u64),
        Value::U8(v) => Ok(u64::from(*v)),
        Value::U16(v) => Ok(u64::from(*v)),
        Value::U32(v) => Ok(u64::from(*v)),
        Value::U64(v) => Ok(*v),
        Value::Uint(v) => Ok(*v as u64),
        Value::F32(v) => Ok(float_to_unsigned(f64::from(*v))),
        Value::F64(v) => Ok(float_to_unsigned(*v)),
        Value::Complex { re, .. } => Ok(float_to_unsigned(*re)),
        Value::Str(s) => parse::parse_unsigned(s).ok_or_else(|| CastError::parse(s, target)),
        Value::Seq(items) => Ok(items.len() as u64),
        Value::Map(entries) => Ok(entries.len() as u64),
        Value::Duration(d) => Ok(saturating_nanos(*d) as u64),
        Value::Time(t) => Ok(t.timestamp() as u64),
        Value::Nil => Err(CastError::nil(target)),
        Value::Custom(_) => match hooks::invoke(&resolved, target, |h| h.cast_u64()) {
            Some(hit) => hit,
            None => Err(CastError::unsupported(&resolved, target)),
        },
        Value::Ref(_) => Err(CastError::unsupported(&resolved, target)),
    }
}

/// A negative float clamps to 0 before the unsigned cast, so small
/// negative values never wrap into enormous unsigned ones.
#[inline]
fn float_to_unsigned(v: f64) -> u64 {
    if v < 0.0 { 0 } else { v as u64 }
}

/// Float carrier for `value`. NaN and infinities propagate unchanged.
fn float_carrier(value: &Value, target: &'static str) -> Cast<f64> {
    if let Some(hit) = hooks::invoke(value, target, |h| h.cast_f64()) {
        return hit;
    }
    let resolved = resolve(value);
    match &resolved {
        Value::Bool(b) => Ok(if *b { 1.0 } else { 0.0 }),
        Value::I8(v) => Ok(f64::from(*v)),
        Value::I16(v) => Ok(f64::from(*v)),
        Value::I32(v) => Ok(f64::from(*v)),
        Value::I64(v) => Ok(*v as f64),
        Value::Int(v) => Ok(*v as f64),
        Value::U8(v) => Ok(f64::from(*v)),
        Value::U16(v) => Ok(f64::from(*v)),
        Value::U32(v) => Ok(f64::from(*v)),
        Value::U64(v) => Ok(*v as f64),
        Value::Uint(v) => Ok(*v as f64),
        Value::F32(v) => Ok(f64::from(*v)),
        Value::F64(v) => Ok(*v),
        Value::Complex { re, .. } => Ok(*re),
        Value::Str(s) => parse::parse_float(s).ok_or_else(|| CastError::parse(s, target)),
        Value::Seq(items) => Ok(items.len() as f64),
        Value::Map(entries) => Ok(entries.len() as f64),
        Value::Duration(d) => Ok(saturating_nanos(*d) as f64),
        Value::Time(t) => Ok(t.timestamp() as f64),
        Value::Nil => Err(CastError::nil(target)),
        Value::Custom(_) => match hooks::invoke(&resolved, target, |h| h.cast_f64()) {
            Some(hit) => hit,
            None => Err(CastError::unsupported(&resolved, target)),
        },
        Value::Ref(_) => Err(CastError::unsupported(&resolved, target)),
    }
}

// === Public entry points ===

/// Convert to i64, the signed canonical carrier.
pub fn to_i64(value: &Value) -> Cast<i64> {
    signed_carrier(value, "i64")
}

/// Convert to i32 with saturating narrowing.
pub fn to_i32(value: &Value) -> Cast<i32> {
    signed_carrier(value, "i32").map(narrow::to_i32)
}

/// Convert to i16 with saturating narrowing.
pub fn to_i16(value: &Value) -> Cast<i16> {
    signed_carrier(value, "i16").map(narrow::to_i16)
}

/// Convert to i8 with saturating narrowing.
pub fn to_i8(value: &Value) -> Cast<i8> {
    signed_carrier(value, "i8").map(narrow::to_i8)
}

/// Convert to the platform-width signed integer with saturating narrowing.
pub fn to_int(value: &Value) -> Cast<isize> {
    signed_carrier(value, "int").map(narrow::to_int)
}

/// Convert to u64, the unsigned canonical carrier.
pub fn to_u64(value: &Value) -> Cast<u64> {
    unsigned_carrier(value, "u64")
}

/// Convert to u32 with saturating narrowing.
pub fn to_u32(value: &Value) -> Cast<u32> {
    unsigned_carrier(value, "u32").map(narrow::to_u32)
}

/// Convert to u16 with saturating narrowing.
pub fn to_u16(value: &Value) -> Cast<u16> {
    unsigned_carrier(value, "u16").map(narrow::to_u16)
}

/// Convert to u8 with saturating narrowing.
pub fn to_u8(value: &Value) -> Cast<u8> {
    unsigned_carrier(value, "u8").map(narrow::to_u8)
}

/// Convert to the platform-width unsigned integer with saturating narrowing.
pub fn to_uint(value: &Value) -> Cast<usize> {
    unsigned_carrier(value, "uint").map(narrow::to_uint)
}

/// Convert to f64, the floating canonical carrier.
pub fn to_f64(value: &Value) -> Cast<f64> {
    float_carrier(value, "f64")
}

/// Convert to f32; finite overflow clamps to the f32 magnitude limits.
pub fn to_f32(value: &Value) -> Cast<f32> {
    float_carrier(value, "f32").map(narrow::to_f32)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{CastHook, Hook};
    use crate::target::ZERO_TIME;
    use chrono::TimeDelta;

    #[test]
    fn identity_for_exact_width() {
        assert_eq!(to_i8(&Value::I8(-5)), Ok(-5));
        assert_eq!(to_u16(&Value::U16(9)), Ok(9));
        assert_eq!(to_i64(&Value::I64(i64::MIN)), Ok(i64::MIN));
        assert_eq!(to_f64(&Value::F64(2.5)), Ok(2.5));
    }

    #[test]
    fn bool_routes_through_signed_carrier() {
        assert_eq!(to_i64(&Value::Bool(true)), Ok(1));
        assert_eq!(to_u8(&Value::Bool(false)), Ok(0));
        assert_eq!(to_f64(&Value::Bool(true)), Ok(1.0));
    }

    #[test]
    fn overflow_clamps_instead_of_failing() {
        assert_eq!(to_i8(&Value::I64(1 << 62)), Ok(i8::MAX));
        assert_eq!(to_i8(&Value::I64(-(1 << 62))), Ok(i8::MIN));
        assert_eq!(to_u8(&Value::U64(u64::MAX)), Ok(u8::MAX));
    }

    #[test]
    fn signed_to_unsigned_carrier_wraps() {
        assert_eq!(to_u64(&Value::I64(-1)), Ok(u64::MAX));
        assert_eq!(to_i64(&Value::U64(u64::MAX)), Ok(-1));
    }

    #[test]
    fn negative_float_to_unsigned_clamps_to_zero() {
        assert_eq!(to_u64(&Value::F64(-0.5)), Ok(0));
        assert_eq!(to_u64(&Value::F64(-1e18)), Ok(0));
        assert_eq!(to_u8(&Value::F32(-3.7)), Ok(0));
    }

    #[test]
    fn float_truncates_toward_zero() {
        assert_eq!(to_i64(&Value::F64(9.99)), Ok(9));
        assert_eq!(to_i64(&Value::F64(-9.99)), Ok(-9));
        assert_eq!(to_u64(&Value::F64(3.999)), Ok(3));
    }

    #[test]
    fn nan_and_infinity_propagate_through_f64() {
        assert!(to_f64(&Value::F64(f64::NAN)).unwrap().is_nan());
        assert_eq!(to_f64(&Value::F64(f64::INFINITY)), Ok(f64::INFINITY));
        assert_eq!(to_f32(&Value::F64(1e300)), Ok(f32::MAX));
    }

    #[test]
    fn complex_takes_real_component() {
        assert_eq!(to_i64(&Value::Complex { re: 4.9, im: 100.0 }), Ok(4));
        assert_eq!(to_f64(&Value::Complex { re: -2.5, im: 7.0 }), Ok(-2.5));
    }

    #[test]
    fn string_parse_chains() {
        assert_eq!(to_i64(&Value::from("-123.456")), Ok(-123));
        assert_eq!(to_u64(&Value::from("-1.23")), Ok(0));
        assert_eq!(to_f64(&Value::from("2.5")), Ok(2.5));
        assert_eq!(to_i32(&Value::from("true")), Ok(1));
        assert!(to_i64(&Value::from("pony")).is_err());
    }

    #[test]
    fn composites_convert_by_length() {
        let seq = Value::Seq(vec![Value::Nil, Value::Nil, Value::Nil]);
        assert_eq!(to_i64(&seq), Ok(3));
        assert_eq!(to_u8(&seq), Ok(3));
        let map = Value::Map(vec![(Value::from("k"), Value::Nil)]);
        assert_eq!(to_f64(&map), Ok(1.0));
    }

    #[test]
    fn duration_is_nanoseconds() {
        let d = Value::Duration(TimeDelta::nanoseconds(1_500));
        assert_eq!(to_i64(&d), Ok(1_500));
        assert_eq!(to_f64(&d), Ok(1_500.0));
    }

    #[test]
    fn time_is_epoch_seconds() {
        let t = Value::Time(ZERO_TIME + TimeDelta::seconds(120));
        assert_eq!(to_i64(&t), Ok(120));
        assert_eq!(to_u64(&t), Ok(120));
    }

    #[test]
    fn nil_fails() {
        assert!(to_i64(&Value::Nil).unwrap_err().is_nil());
        assert!(to_f64(&Value::Nil).unwrap_err().is_nil());
    }

    #[test]
    fn reference_values_resolve_first() {
        let v = Value::reference(Value::reference(Value::I64(7)));
        assert_eq!(to_i64(&v), Ok(7));
    }

    #[derive(Debug)]
    struct FortyTwo;

    impl CastHook for FortyTwo {
        fn cast_u64(&self) -> Hook<u64> {
            Some(Ok(42))
        }
    }

    #[test]
    fn hook_overrides_builtin_rules() {
        let v = Value::custom(FortyTwo);
        assert_eq!(to_u8(&v), Ok(42));
        assert_eq!(to_u64(&v), Ok(42));
        // No signed capability: the custom value has no other path.
        assert!(to_i64(&v).is_err());
    }

    #[test]
    fn hook_reached_through_reference() {
        let v = Value::reference(Value::custom(FortyTwo));
        assert_eq!(to_u8(&v), Ok(42));
    }
}
