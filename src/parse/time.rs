//! Timestamp layout table.
//!
//! A fixed-priority table of known timestamp layouts; the first layout
//! that parses the input wins. Layouts without zone information are read
//! as UTC; layouts without a year resolve to year 0; date-only layouts
//! resolve to midnight.

use chrono::format::{Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};

/// How a layout's fields map onto a full timestamp.
#[derive(Debug, Clone, Copy)]
enum Layout {
    /// RFC 3339, fractional seconds and `Z`/`±hh:mm` offsets.
    Rfc3339,
    /// RFC 2822 (RFC 1123 with a numeric zone).
    Rfc2822,
    /// Full date and time with a numeric zone offset.
    Offset(&'static str),
    /// Full date and time, no zone; read as UTC.
    Naive(&'static str),
    /// Date only; midnight UTC.
    Date(&'static str),
    /// Clock time only; year 0, January 1st.
    Clock(&'static str),
    /// Month, day and clock time without a year; year 0.
    NoYear(&'static str),
}

/// Known layouts, tried in order. ANSI/RFC variants come first, then the
/// common human-readable date and clock forms. A numeric-offset (`%z`)
/// layout always precedes its named-zone (`%Z`) sibling: `%Z` skips any
/// non-whitespace token, so the other order would swallow a numeric
/// offset and silently drop it.
const LAYOUTS: [Layout; 30] = [
    Layout::Rfc3339,
    Layout::Naive("%Y-%m-%dT%H:%M:%S%.f"),
    Layout::Offset("%Y-%m-%dT%H:%M:%S%.f%z"),
    // asctime and friends.
    Layout::Naive("%a %b %e %H:%M:%S %Y"),
    Layout::Offset("%a %b %d %H:%M:%S %z %Y"),
    Layout::Naive("%a %b %e %H:%M:%S %Z %Y"),
    // RFC 822/850/1123 with numeric or named zones.
    Layout::Offset("%d %b %y %H:%M %z"),
    Layout::Naive("%d %b %y %H:%M %Z"),
    Layout::Naive("%A, %d-%b-%y %H:%M:%S %Z"),
    Layout::Offset("%a, %d %b %Y %H:%M:%S %z"),
    Layout::Naive("%a, %d %b %Y %H:%M:%S %Z"),
    Layout::Rfc2822,
    // Space-separated date-times, with and without zones.
    Layout::Offset("%Y-%m-%d %H:%M:%S%.f %z %Z"),
    Layout::Offset("%Y-%m-%d %H:%M:%S%.f %z"),
    Layout::Naive("%Y-%m-%d %H:%M:%S%.f"),
    Layout::Naive("%Y-%m-%d %H:%M:%S"),
    Layout::Naive("%Y-%m-%d %H:%M"),
    // Dates.
    Layout::Date("%Y-%m-%d"),
    Layout::Date("%d %b %Y"),
    Layout::Date("%d %b %y"),
    Layout::Date("%m/%d/%Y"),
    Layout::Date("%m/%d/%y"),
    Layout::Date("%Y/%m/%d"),
    Layout::Date("%Y%m%d"),
    // Clocks.
    Layout::Clock("%I:%M%p"),
    Layout::Clock("%I:%M %p"),
    Layout::Clock("%H:%M:%S"),
    Layout::Clock("%H:%M"),
    // Month-day stamps without a year.
    Layout::NoYear("%b %e %H:%M:%S%.f"),
    Layout::NoYear("%b %e %H:%M:%S"),
];

/// Apply one layout to the input.
fn apply(layout: Layout, s: &str) -> Option<DateTime<Utc>> {
    match layout {
        Layout::Rfc3339 => DateTime::parse_from_rfc3339(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Layout::Rfc2822 => DateTime::parse_from_rfc2822(s)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Layout::Offset(fmt) => DateTime::parse_from_str(s, fmt)
            .ok()
            .map(|t| t.with_timezone(&Utc)),
        Layout::Naive(fmt) => NaiveDateTime::parse_from_str(s, fmt)
            .ok()
            .map(|t| DateTime::from_naive_utc_and_offset(t, Utc)),
        Layout::Date(fmt) => NaiveDate::parse_from_str(s, fmt)
            .ok()
            .and_then(|d| d.and_hms_opt(0, 0, 0))
            .map(|t| DateTime::from_naive_utc_and_offset(t, Utc)),
        Layout::Clock(fmt) => {
            let t = NaiveTime::parse_from_str(s, fmt).ok()?;
            let d = NaiveDate::from_ymd_opt(0, 1, 1)?;
            Some(DateTime::from_naive_utc_and_offset(d.and_time(t), Utc))
        }
        Layout::NoYear(fmt) => {
            let mut parsed = Parsed::new();
            chrono::format::parse(&mut parsed, s, StrftimeItems::new(fmt)).ok()?;
            parsed.set_year(0).ok()?;
            let date = parsed.to_naive_date().ok()?;
            let time = parsed.to_naive_time().ok()?;
            Some(DateTime::from_naive_utc_and_offset(date.and_time(time), Utc))
        }
    }
}

/// Parse a timestamp against the layout table; first success wins.
pub fn parse_time(s: &str) -> Option<DateTime<Utc>> {
    LAYOUTS.iter().find_map(|&layout| apply(layout, s))
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn utc(y: i32, mo: u32, d: u32, h: u32, mi: u32, s: u32) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(y, mo, d, h, mi, s).unwrap()
    }

    #[test]
    fn rfc3339() {
        assert_eq!(
            parse_time("2017-07-14T02:40:00Z"),
            Some(utc(2017, 7, 14, 2, 40, 0))
        );
        assert_eq!(
            parse_time("2017-07-14T02:40:00+02:00"),
            Some(utc(2017, 7, 14, 0, 40, 0))
        );
    }

    #[test]
    fn naive_datetime_is_utc() {
        assert_eq!(
            parse_time("2017-07-14 02:40:00"),
            Some(utc(2017, 7, 14, 2, 40, 0))
        );
        assert_eq!(
            parse_time("2017-07-14T02:40:00"),
            Some(utc(2017, 7, 14, 2, 40, 0))
        );
    }

    #[test]
    fn asctime() {
        assert_eq!(
            parse_time("Mon Jan  2 15:04:05 2006"),
            Some(utc(2006, 1, 2, 15, 4, 5))
        );
    }

    #[test]
    fn rfc1123_named_zone_reads_as_utc() {
        assert_eq!(
            parse_time("Mon, 02 Jan 2006 15:04:05 MST"),
            Some(utc(2006, 1, 2, 15, 4, 5))
        );
    }

    #[test]
    fn rfc2822_numeric_zone() {
        assert_eq!(
            parse_time("Mon, 02 Jan 2006 15:04:05 -0700"),
            Some(utc(2006, 1, 2, 22, 4, 5))
        );
    }

    #[test]
    fn numeric_zones_are_never_dropped() {
        // Each of these has a named-zone sibling layout whose %Z would
        // otherwise swallow the offset and read the time as UTC.
        assert_eq!(
            parse_time("02 Jan 06 15:04 -0700"),
            Some(utc(2006, 1, 2, 22, 4, 0))
        );
        assert_eq!(
            parse_time("Mon Jan 02 15:04:05 -0700 2006"),
            Some(utc(2006, 1, 2, 22, 4, 5))
        );
    }

    #[test]
    fn date_only_forms() {
        assert_eq!(parse_time("2006-01-02"), Some(utc(2006, 1, 2, 0, 0, 0)));
        assert_eq!(parse_time("02 Jan 2006"), Some(utc(2006, 1, 2, 0, 0, 0)));
        assert_eq!(parse_time("03/28/1986"), Some(utc(1986, 3, 28, 0, 0, 0)));
        assert_eq!(parse_time("2006/01/02"), Some(utc(2006, 1, 2, 0, 0, 0)));
        assert_eq!(parse_time("20060102"), Some(utc(2006, 1, 2, 0, 0, 0)));
    }

    #[test]
    fn clock_only_resolves_to_year_zero() {
        assert_eq!(parse_time("3:04PM"), Some(utc(0, 1, 1, 15, 4, 0)));
        assert_eq!(parse_time("15:04:05"), Some(utc(0, 1, 1, 15, 4, 5)));
    }

    #[test]
    fn stamp_without_year() {
        assert_eq!(parse_time("Jan  2 15:04:05"), Some(utc(0, 1, 2, 15, 4, 5)));
        assert_eq!(parse_time("Jan 2 15:04:05"), Some(utc(0, 1, 2, 15, 4, 5)));
    }

    #[test]
    fn rejects_non_timestamps() {
        assert_eq!(parse_time(""), None);
        assert_eq!(parse_time("not a time"), None);
        assert_eq!(parse_time("2006-13-40"), None);
    }
}
