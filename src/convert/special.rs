//! Bool, string, duration and time conversions.
//!
//! These targets have their own short-circuits instead of routing through
//! the numeric carriers: truthiness rules for bool, identity plus
//! rendering for string, nanosecond interpretation for duration, and
//! epoch-second interpretation plus the layout table for time.

use chrono::{DateTime, TimeDelta, Utc};

use crate::error::{Cast, CastError};
use crate::hooks;
use crate::parse;
use crate::parse::duration::{format_duration, parse_duration, saturating_nanos};
use crate::parse::time::parse_time;
use crate::resolve::resolve;
use crate::target::ZERO_TIME;
use crate::value::Value;

/// Convert to bool.
///
/// Numbers are false iff exactly zero, with NaN defined as false rather
/// than an error; complex numbers use the real component only; composites
/// are true iff non-empty; a time value is true iff it differs from the
/// zero sentinel; strings go through the fixed truthy/falsy sets.
pub fn to_bool(value: &Value) -> Cast<bool> {
    if let Some(hit) = hooks::invoke(value, "bool", |h| h.cast_bool()) {
        return hit;
    }
    let resolved = resolve(value);
    match &resolved {
        Value::Bool(b) => Ok(*b),
        Value::I8(v) => Ok(*v != 0),
        Value::I16(v) => Ok(*v != 0),
        Value::I32(v) => Ok(*v != 0),
        Value::I64(v) => Ok(*v != 0),
        Value::Int(v) => Ok(*v != 0),
        Value::U8(v) => Ok(*v != 0),
        Value::U16(v) => Ok(*v != 0),
        Value::U32(v) => Ok(*v != 0),
        Value::U64(v) => Ok(*v != 0),
        Value::Uint(v) => Ok(*v != 0),
        Value::F32(v) => Ok(nonzero_finite_truth(f64::from(*v))),
        Value::F64(v) => Ok(nonzero_finite_truth(*v)),
        Value::Complex { re, .. } => Ok(nonzero_finite_truth(*re)),
        Value::Str(s) => parse::parse_bool(s).ok_or_else(|| CastError::parse(s, "bool")),
        Value::Seq(items) => Ok(!items.is_empty()),
        Value::Map(entries) => Ok(!entries.is_empty()),
        Value::Duration(d) => Ok(saturating_nanos(*d) != 0),
        Value::Time(t) => Ok(*t != ZERO_TIME),
        Value::Nil => Err(CastError::nil("bool")),
        Value::Custom(_) => match hooks::invoke(&resolved, "bool", |h| h.cast_bool()) {
            Some(hit) => hit,
            None => Err(CastError::unsupported(&resolved, "bool")),
        },
        Value::Ref(_) => Err(CastError::unsupported(&resolved, "bool")),
    }
}

/// False for zero and for NaN; true for any other number.
#[inline]
fn nonzero_finite_truth(v: f64) -> bool {
    v != 0.0 && !v.is_nan()
}

/// Convert to string.
///
/// String input is identity; other supported kinds render in their
/// canonical textual form. Composites and references do not convert.
pub fn to_str(value: &Value) -> Cast<String> {
    if let Some(hit) = hooks::invoke(value, "string", |h| h.cast_str()) {
        return hit;
    }
    let resolved = resolve(value);
    match &resolved {
        Value::Str(s) => Ok(s.clone()),
        Value::Bool(b) => Ok(b.to_string()),
        Value::I8(v) => Ok(v.to_string()),
        Value::I16(v) => Ok(v.to_string()),
        Value::I32(v) => Ok(v.to_string()),
        Value::I64(v) => Ok(v.to_string()),
        Value::Int(v) => Ok(v.to_string()),
        Value::U8(v) => Ok(v.to_string()),
        Value::U16(v) => Ok(v.to_string()),
        Value::U32(v) => Ok(v.to_string()),
        Value::U64(v) => Ok(v.to_string()),
        Value::Uint(v) => Ok(v.to_string()),
        Value::F32(v) => Ok(v.to_string()),
        Value::F64(v) => Ok(v.to_string()),
        Value::Complex { .. } => Ok(resolved.to_string()),
        Value::Duration(d) => Ok(format_duration(*d)),
        Value::Time(t) => Ok(t.to_rfc3339()),
        Value::Nil => Err(CastError::nil("string")),
        Value::Custom(_) => match hooks::invoke(&resolved, "string", |h| h.cast_str()) {
            Some(hit) => hit,
            None => Err(CastError::unsupported(&resolved, "string")),
        },
        Value::Seq(_) | Value::Map(_) | Value::Ref(_) => {
            Err(CastError::unsupported(&resolved, "string"))
        }
    }
}

/// Convert to duration.
///
/// Numbers are read as nanoseconds. Strings try the compound grammar,
/// then a plain float as nanoseconds, then a plain integer as
/// nanoseconds. A time value yields the elapsed nanoseconds since the
/// epoch origin; note this is not the inverse of [`to_time`]'s
/// duration rule.
pub fn to_duration(value: &Value) -> Cast<TimeDelta> {
    if let Some(hit) = hooks::invoke(value, "duration", |h| h.cast_duration()) {
        return hit;
    }
    let resolved = resolve(value);
    match &resolved {
        Value::Duration(d) => Ok(*d),
        Value::I8(v) => Ok(TimeDelta::nanoseconds(i64::from(*v))),
        Value::I16(v) => Ok(TimeDelta::nanoseconds(i64::from(*v))),
        Value::I32(v) => Ok(TimeDelta::nanoseconds(i64::from(*v))),
        Value::I64(v) => Ok(TimeDelta::nanoseconds(*v)),
        Value::Int(v) => Ok(TimeDelta::nanoseconds(*v as i64)),
        Value::U8(v) => Ok(TimeDelta::nanoseconds(i64::from(*v))),
        Value::U16(v) => Ok(TimeDelta::nanoseconds(i64::from(*v))),
        Value::U32(v) => Ok(TimeDelta::nanoseconds(i64::from(*v))),
        Value::U64(v) => Ok(TimeDelta::nanoseconds(*v as i64)),
        Value::Uint(v) => Ok(TimeDelta::nanoseconds(*v as i64)),
        Value::F32(v) => Ok(TimeDelta::nanoseconds(f64::from(*v) as i64)),
        Value::F64(v) => Ok(TimeDelta::nanoseconds(*v as i64)),
        Value::Str(s) => parse_duration_chain(s).ok_or_else(|| CastError::parse(s, "duration")),
        Value::Time(t) => Ok(TimeDelta::nanoseconds(epoch_nanos(t))),
        Value::Nil => Err(CastError::nil("duration")),
        Value::Custom(_) => match hooks::invoke(&resolved, "duration", |h| h.cast_duration()) {
            Some(hit) => hit,
            None => Err(CastError::unsupported(&resolved, "duration")),
        },
        Value::Bool(_) | Value::Complex { .. } | Value::Seq(_) | Value::Map(_) | Value::Ref(_) => {
            Err(CastError::unsupported(&resolved, "duration"))
        }
    }
}

/// Ordered duration parse chain: grammar, float nanoseconds, integer
/// nanoseconds.
fn parse_duration_chain(s: &str) -> Option<TimeDelta> {
    if let Some(d) = parse_duration(s) {
        return Some(d);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Some(TimeDelta::nanoseconds(f as i64));
    }
    s.parse::<i64>().ok().map(TimeDelta::nanoseconds)
}

/// Whole nanoseconds from the epoch to `t`, saturating at the i64 range.
fn epoch_nanos(t: &DateTime<Utc>) -> i64 {
    t.timestamp_nanos_opt()
        .unwrap_or(if *t < ZERO_TIME { i64::MIN } else { i64::MAX })
}

/// Convert to time.
///
/// Integers are read as whole seconds since the epoch; strings go
/// through the layout table. A duration yields the current wall-clock
/// moment plus the duration - deliberately time-dependent, and
/// deliberately not the inverse of [`to_duration`]'s time rule.
pub fn to_time(value: &Value) -> Cast<DateTime<Utc>> {
    if let Some(hit) = hooks::invoke(value, "time", |h| h.cast_time()) {
        return hit;
    }
    let resolved = resolve(value);
    match &resolved {
        Value::Time(t) => Ok(*t),
        Value::Str(s) => parse_time(s).ok_or_else(|| CastError::parse(s, "time")),
        Value::I8(v) => epoch_seconds(i64::from(*v), &resolved),
        Value::I16(v) => epoch_seconds(i64::from(*v), &resolved),
        Value::I32(v) => epoch_seconds(i64::from(*v), &resolved),
        Value::I64(v) => epoch_seconds(*v, &resolved),
        Value::Int(v) => epoch_seconds(*v as i64, &resolved),
        Value::U8(v) => epoch_seconds(i64::from(*v), &resolved),
        Value::U16(v) => epoch_seconds(i64::from(*v), &resolved),
        Value::U32(v) => epoch_seconds(i64::from(*v), &resolved),
        Value::U64(v) => epoch_seconds(*v as i64, &resolved),
        Value::Uint(v) => epoch_seconds(*v as i64, &resolved),
        Value::Duration(d) => Utc::now()
            .checked_add_signed(*d)
            .ok_or_else(|| CastError::unsupported(&resolved, "time")),
        Value::Nil => Err(CastError::nil("time")),
        Value::Custom(_) => match hooks::invoke(&resolved, "time", |h| h.cast_time()) {
            Some(hit) => hit,
            None => Err(CastError::unsupported(&resolved, "time")),
        },
        Value::Bool(_)
        | Value::F32(_)
        | Value::F64(_)
        | Value::Complex { .. }
        | Value::Seq(_)
        | Value::Map(_)
        | Value::Ref(_) => Err(CastError::unsupported(&resolved, "time")),
    }
}

/// Seconds-since-epoch to a timestamp; seconds outside the representable
/// range fail rather than wrap.
fn epoch_seconds(secs: i64, source: &Value) -> Cast<DateTime<Utc>> {
    DateTime::from_timestamp(secs, 0).ok_or_else(|| CastError::unsupported(source, "time"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::hooks::{CastHook, Hook, HookError};
    use chrono::TimeZone;

    #[test]
    fn bool_truth_table_for_strings() {
        assert_eq!(to_bool(&Value::from("yes")), Ok(true));
        assert_eq!(to_bool(&Value::from("NO")), Ok(false));
        assert!(to_bool(&Value::from("maybe")).unwrap_err().is_parse());
    }

    #[test]
    fn bool_from_numbers() {
        assert_eq!(to_bool(&Value::I64(0)), Ok(false));
        assert_eq!(to_bool(&Value::I64(-3)), Ok(true));
        assert_eq!(to_bool(&Value::U8(0)), Ok(false));
        assert_eq!(to_bool(&Value::F64(0.0)), Ok(false));
        assert_eq!(to_bool(&Value::F64(0.0001)), Ok(true));
        // NaN is defined as false, not an error.
        assert_eq!(to_bool(&Value::F64(f64::NAN)), Ok(false));
        assert_eq!(to_bool(&Value::Complex { re: f64::NAN, im: 1.0 }), Ok(false));
        assert_eq!(to_bool(&Value::Complex { re: 0.0, im: 5.0 }), Ok(false));
        assert_eq!(to_bool(&Value::Complex { re: 1.0, im: 0.0 }), Ok(true));
    }

    #[test]
    fn bool_from_composites_and_time() {
        assert_eq!(to_bool(&Value::Seq(vec![])), Ok(false));
        assert_eq!(to_bool(&Value::Seq(vec![Value::Nil])), Ok(true));
        assert_eq!(to_bool(&Value::Map(vec![])), Ok(false));
        assert_eq!(to_bool(&Value::Time(ZERO_TIME)), Ok(false));
        let later = ZERO_TIME + TimeDelta::seconds(1);
        assert_eq!(to_bool(&Value::Time(later)), Ok(true));
        assert_eq!(to_bool(&Value::Duration(TimeDelta::zero())), Ok(false));
        assert_eq!(
            to_bool(&Value::Duration(TimeDelta::nanoseconds(1))),
            Ok(true)
        );
    }

    #[test]
    fn string_identity_and_rendering() {
        assert_eq!(to_str(&Value::from("as-is")), Ok("as-is".to_string()));
        assert_eq!(to_str(&Value::Bool(true)), Ok("true".to_string()));
        assert_eq!(to_str(&Value::I64(-7)), Ok("-7".to_string()));
        assert_eq!(to_str(&Value::F64(2.5)), Ok("2.5".to_string()));
        assert_eq!(
            to_str(&Value::Duration(TimeDelta::nanoseconds(154_567_000_000))),
            Ok("2m34.567s".to_string())
        );
        assert!(to_str(&Value::Seq(vec![])).is_err());
    }

    #[test]
    fn duration_from_numbers_and_strings() {
        assert_eq!(
            to_duration(&Value::I64(1_500)),
            Ok(TimeDelta::nanoseconds(1_500))
        );
        assert_eq!(
            to_duration(&Value::F64(2.9)),
            Ok(TimeDelta::nanoseconds(2))
        );
        assert_eq!(
            to_duration(&Value::from("2m34.567s")),
            Ok(TimeDelta::nanoseconds(154_567_000_000))
        );
        // Plain numerals read as nanoseconds.
        assert_eq!(
            to_duration(&Value::from("1500")),
            Ok(TimeDelta::nanoseconds(1_500))
        );
        assert_eq!(
            to_duration(&Value::from("1.5e3")),
            Ok(TimeDelta::nanoseconds(1_500))
        );
        assert!(to_duration(&Value::from("pony")).unwrap_err().is_parse());
        assert!(to_duration(&Value::Bool(true)).is_err());
    }

    #[test]
    fn duration_from_time_measures_from_epoch() {
        let t = ZERO_TIME + TimeDelta::seconds(2);
        assert_eq!(to_duration(&Value::Time(t)), Ok(TimeDelta::seconds(2)));
    }

    #[test]
    fn time_from_integers_and_strings() {
        let expected = Utc.with_ymd_and_hms(2017, 7, 14, 2, 40, 0).unwrap();
        assert_eq!(to_time(&Value::I64(1_500_000_000)), Ok(expected));
        assert_eq!(to_time(&Value::from("2017-07-14T02:40:00Z")), Ok(expected));
        assert!(to_time(&Value::from("not a time")).unwrap_err().is_parse());
        assert!(to_time(&Value::F64(1.0)).is_err());
        assert!(to_time(&Value::Bool(true)).is_err());
    }

    #[test]
    fn time_from_duration_uses_now() {
        let before = Utc::now();
        let got = to_time(&Value::Duration(TimeDelta::hours(1))).unwrap();
        let after = Utc::now();
        assert!(got >= before + TimeDelta::hours(1));
        assert!(got <= after + TimeDelta::hours(1));
    }

    #[test]
    fn nil_always_fails() {
        assert!(to_bool(&Value::Nil).unwrap_err().is_nil());
        assert!(to_str(&Value::Nil).unwrap_err().is_nil());
        assert!(to_duration(&Value::Nil).unwrap_err().is_nil());
        assert!(to_time(&Value::Nil).unwrap_err().is_nil());
    }

    #[derive(Debug)]
    struct Flag;

    impl CastHook for Flag {
        fn cast_bool(&self) -> Hook<bool> {
            Some(Ok(true))
        }

        fn cast_str(&self) -> Hook<String> {
            Some(Err(HookError::new("unrenderable")))
        }
    }

    #[test]
    fn hooks_override_and_their_failures_stick() {
        let v = Value::custom(Flag);
        assert_eq!(to_bool(&v), Ok(true));
        // A present-but-failing hook fails the conversion; no fallback.
        assert!(matches!(
            to_str(&v).unwrap_err(),
            CastError::Hook { target: "string", .. }
        ));
    }
}
