//! Element-wise container conversion.
//!
//! A thin consumer of [`convert`]: sequences convert element by element
//! into a destination buffer of one target kind, maps convert values the
//! same way with keys rendered through the string entry point. Any
//! element failure fails the whole call and leaves the destination
//! untouched beyond what was already pushed by an earlier call.

use crate::convert::{convert, to_str};
use crate::error::{Cast, CastError};
use crate::resolve::resolve;
use crate::target::TargetKind;
use crate::value::Value;

/// Convert every element of a sequence `source` into `dest`.
///
/// The source must resolve to a sequence; elements are appended in order,
/// each converted to `target`. The first failing element aborts the call.
pub fn convert_slice_into(
    dest: &mut Vec<Value>,
    target: TargetKind,
    source: &Value,
) -> Cast<()> {
    let resolved = resolve(source);
    let items = match &resolved {
        Value::Seq(items) => items,
        Value::Nil => return Err(CastError::nil(target.name())),
        other => return Err(CastError::unsupported(other, target.name())),
    };
    dest.reserve(items.len());
    for item in items {
        dest.push(convert(item, target)?);
    }
    Ok(())
}

/// Allocating form of [`convert_slice_into`].
pub fn convert_slice(target: TargetKind, source: &Value) -> Cast<Vec<Value>> {
    let mut dest = Vec::new();
    convert_slice_into(&mut dest, target, source)?;
    Ok(dest)
}

/// Convert every entry of a map `source` into `dest`.
///
/// The source must resolve to a map; keys render through the string
/// entry point, values convert to `target`. Entry order is preserved.
pub fn convert_entries_into(
    dest: &mut Vec<(String, Value)>,
    target: TargetKind,
    source: &Value,
) -> Cast<()> {
    let resolved = resolve(source);
    let entries = match &resolved {
        Value::Map(entries) => entries,
        Value::Nil => return Err(CastError::nil(target.name())),
        other => return Err(CastError::unsupported(other, target.name())),
    };
    dest.reserve(entries.len());
    for (key, value) in entries {
        dest.push((to_str(key)?, convert(value, target)?));
    }
    Ok(())
}

/// Allocating form of [`convert_entries_into`].
pub fn convert_entries(target: TargetKind, source: &Value) -> Cast<Vec<(String, Value)>> {
    let mut dest = Vec::new();
    convert_entries_into(&mut dest, target, source)?;
    Ok(dest)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn slice_of_strings_to_i64() {
        let source = Value::Seq(vec![Value::from("1"), Value::from("2"), Value::from("3")]);
        assert_eq!(
            convert_slice(TargetKind::I64, &source),
            Ok(vec![Value::I64(1), Value::I64(2), Value::I64(3)])
        );
    }

    #[test]
    fn slice_elements_follow_scalar_rules() {
        // Negative signed integers wrap through the unsigned carrier;
        // negative floats clamp to zero.
        let source = Value::Seq(vec![Value::I64(300), Value::I64(-5), Value::F64(-5.0)]);
        assert_eq!(
            convert_slice(TargetKind::U8, &source),
            Ok(vec![Value::U8(255), Value::U8(255), Value::U8(0)])
        );
    }

    #[test]
    fn slice_failure_aborts() {
        let source = Value::Seq(vec![Value::from("1"), Value::Nil]);
        assert!(convert_slice(TargetKind::I64, &source).is_err());
    }

    #[test]
    fn slice_rejects_non_sequence() {
        assert!(convert_slice(TargetKind::I64, &Value::I64(1)).is_err());
        assert!(convert_slice(TargetKind::I64, &Value::Nil).is_err());
        assert!(convert_slice(TargetKind::I64, &Value::Map(vec![])).is_err());
    }

    #[test]
    fn slice_through_reference() {
        let source = Value::reference(Value::Seq(vec![Value::Bool(true)]));
        assert_eq!(
            convert_slice(TargetKind::U8, &source),
            Ok(vec![Value::U8(1)])
        );
    }

    #[test]
    fn entries_render_keys_as_strings() {
        let source = Value::Map(vec![
            (Value::from("a"), Value::from("10")),
            (Value::I64(2), Value::from("20")),
        ]);
        assert_eq!(
            convert_entries(TargetKind::U32, &source),
            Ok(vec![
                ("a".to_string(), Value::U32(10)),
                ("2".to_string(), Value::U32(20)),
            ])
        );
    }

    #[test]
    fn entries_reject_non_map() {
        assert!(convert_entries(TargetKind::Bool, &Value::Seq(vec![])).is_err());
        assert!(convert_entries(TargetKind::Bool, &Value::Nil).is_err());
    }

    #[test]
    fn entries_failure_aborts() {
        let source = Value::Map(vec![(Value::from("k"), Value::from("maybe"))]);
        assert!(convert_entries(TargetKind::Bool, &source).is_err());
    }

    #[test]
    fn into_forms_append() {
        let mut dest = vec![Value::I64(0)];
        let source = Value::Seq(vec![Value::from("7")]);
        convert_slice_into(&mut dest, TargetKind::I64, &source).unwrap();
        assert_eq!(dest, vec![Value::I64(0), Value::I64(7)]);
    }
}
