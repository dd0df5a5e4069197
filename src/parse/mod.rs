//! String parse chains.
//!
//! Each target family gets an ordered list of parse strategies; the first
//! one that succeeds wins. The chains here cover bool and the numeric
//! carriers; [`duration`] and [`time`] hold the grammar- and table-driven
//! parsers for their kinds.

pub mod duration;
pub mod time;

/// Strings recognized as `true`. Exact, case-sensitive matches only.
const TRUTHY: [&str; 11] = [
    "1", "t", "T", "true", "True", "TRUE", "y", "Y", "yes", "Yes", "YES",
];

/// Strings recognized as `false`. Exact, case-sensitive matches only.
const FALSY: [&str; 11] = [
    "0", "f", "F", "false", "False", "FALSE", "n", "N", "no", "No", "NO",
];

/// Parse a boolean literal from the fixed truthy/falsy sets.
///
/// Empty strings and strings longer than the longest set member fail
/// before any lookup, so arbitrary text is never accidentally truthy.
pub fn parse_bool(s: &str) -> Option<bool> {
    if s.is_empty() || s.len() > 5 {
        return None;
    }
    if TRUTHY.contains(&s) {
        return Some(true);
    }
    if FALSY.contains(&s) {
        return Some(false);
    }
    None
}

/// Parse chain for the signed carrier: integer literal, then float
/// literal truncated toward zero, then boolean mapped to 1/0.
pub fn parse_signed(s: &str) -> Option<i64> {
    if let Ok(v) = s.parse::<i64>() {
        return Some(v);
    }
    if let Ok(f) = s.parse::<f64>() {
        // Native float-to-int cast: truncation toward zero, NaN to 0.
        return Some(f as i64);
    }
    parse_bool(s).map(i64::from)
}

/// Parse chain for the unsigned carrier: integer literal, then float
/// literal (negatives clamp to 0 instead of wrapping), then boolean.
pub fn parse_unsigned(s: &str) -> Option<u64> {
    if let Ok(v) = s.parse::<u64>() {
        return Some(v);
    }
    if let Ok(f) = s.parse::<f64>() {
        if f < 0.0 {
            return Some(0);
        }
        return Some(f as u64);
    }
    parse_bool(s).map(u64::from)
}

/// Parse chain for the float carrier: float literal, then boolean mapped
/// to 1.0/0.0.
pub fn parse_float(s: &str) -> Option<f64> {
    if let Ok(f) = s.parse::<f64>() {
        return Some(f);
    }
    parse_bool(s).map(|b| if b { 1.0 } else { 0.0 })
}
