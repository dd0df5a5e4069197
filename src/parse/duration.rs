//! Compound duration grammar.
//!
//! Parses durations written as a signed sequence of value+unit pairs,
//! e.g. `2m34.567s`, `-1.5h`, `300ms`. Units are `ns`, `us`/`µs`/`μs`,
//! `ms`, `s`, `m`, `h`. A bare `0` is allowed; any other number requires
//! a unit. Also provides the matching formatter used when rendering a
//! duration value.

use chrono::TimeDelta;

/// Nanoseconds per unit, or `None` for an unknown unit.
fn unit_nanos(unit: &str) -> Option<i128> {
    match unit {
        "ns" => Some(1),
        "us" | "µs" | "μs" => Some(1_000),
        "ms" => Some(1_000_000),
        "s" => Some(1_000_000_000),
        "m" => Some(60_000_000_000),
        "h" => Some(3_600_000_000_000),
        _ => None,
    }
}

/// Split a leading run of ASCII digits off `s`.
fn take_digits(s: &str) -> (&str, &str) {
    let end = s
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(s.len());
    s.split_at(end)
}

/// Parse a compound duration literal.
///
/// Returns `None` for an empty string, a missing or unknown unit, or a
/// value whose nanosecond total overflows the signed 64-bit range.
pub fn parse_duration(s: &str) -> Option<TimeDelta> {
    let mut rest = s;
    let mut neg = false;
    if let Some(r) = rest.strip_prefix('-') {
        neg = true;
        rest = r;
    } else if let Some(r) = rest.strip_prefix('+') {
        rest = r;
    }

    // Special case: a bare zero needs no unit.
    if rest == "0" {
        return Some(TimeDelta::zero());
    }
    if rest.is_empty() {
        return None;
    }

    let mut total: i128 = 0;
    while !rest.is_empty() {
        let (int_part, after_int) = take_digits(rest);
        let (frac_part, after_num) = match after_int.strip_prefix('.') {
            Some(r) => take_digits(r),
            None => ("", after_int),
        };
        if int_part.is_empty() && frac_part.is_empty() {
            return None;
        }

        // The unit runs to the next digit or decimal point.
        let unit_end = after_num
            .find(|c: char| c.is_ascii_digit() || c == '.')
            .unwrap_or(after_num.len());
        let scale = unit_nanos(&after_num[..unit_end])?;
        rest = &after_num[unit_end..];

        let whole: i128 = if int_part.is_empty() {
            0
        } else {
            int_part.parse().ok()?
        };
        let mut nanos = whole.checked_mul(scale)?;
        if !frac_part.is_empty() {
            let frac: f64 = format!("0.{frac_part}").parse().ok()?;
            nanos = nanos.checked_add((frac * scale as f64) as i128)?;
        }
        total = total.checked_add(nanos)?;
    }

    if neg {
        total = -total;
    }
    i64::try_from(total).ok().map(TimeDelta::nanoseconds)
}

/// Whole nanoseconds of a delta, saturating at the i64 range.
pub(crate) fn saturating_nanos(d: TimeDelta) -> i64 {
    d.num_nanoseconds().unwrap_or(if d < TimeDelta::zero() {
        i64::MIN
    } else {
        i64::MAX
    })
}

/// Append `whole` with a fractional part of `frac` (out of `scale`),
/// trailing zeros trimmed.
fn push_decimal(out: &mut String, whole: u64, frac: u64, scale: u64) {
    out.push_str(&whole.to_string());
    if frac == 0 {
        return;
    }
    let mut digits = String::new();
    let mut rem = frac;
    let mut div = scale / 10;
    while div > 0 {
        digits.push(char::from(b'0' + (rem / div) as u8));
        rem %= div;
        div /= 10;
    }
    let trimmed = digits.trim_end_matches('0');
    if !trimmed.is_empty() {
        out.push('.');
        out.push_str(trimmed);
    }
}

/// Render a duration in the same compound grammar the parser accepts.
///
/// Sub-second magnitudes pick the largest unit that keeps a non-zero
/// integer part (`500ns`, `1.2µs`, `34.5ms`); larger magnitudes use
/// `h`/`m`/`s` components (`2m34.567s`, `1h0m30s`). Zero is `0s`.
pub fn format_duration(d: TimeDelta) -> String {
    let ns = saturating_nanos(d);
    if ns == 0 {
        return "0s".to_owned();
    }

    let mut out = String::new();
    if ns < 0 {
        out.push('-');
    }
    let mag = ns.unsigned_abs();

    if mag < 1_000_000_000 {
        let (scale, unit) = if mag < 1_000 {
            (1, "ns")
        } else if mag < 1_000_000 {
            (1_000, "µs")
        } else {
            (1_000_000, "ms")
        };
        push_decimal(&mut out, mag / scale, mag % scale, scale);
        out.push_str(unit);
        return out;
    }

    let secs = mag / 1_000_000_000;
    let frac = mag % 1_000_000_000;
    let hours = secs / 3600;
    let minutes = (secs / 60) % 60;
    let seconds = secs % 60;
    if hours > 0 {
        out.push_str(&hours.to_string());
        out.push('h');
    }
    if hours > 0 || minutes > 0 {
        out.push_str(&minutes.to_string());
        out.push('m');
    }
    push_decimal(&mut out, seconds, frac, 1_000_000_000);
    out.push('s');
    out
}
