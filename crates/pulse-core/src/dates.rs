//! Day-first invoice date parsing.
//!
//! Point-of-sale exports write dates as `DD/MM/YYYY`. Every ambiguous date
//! is read day-before-month; values that do not fit that reading are
//! rejected rather than reinterpreted.

use std::sync::OnceLock;

use chrono::{NaiveDate, NaiveDateTime};
use regex::Regex;

/// Two-digit years from this value up are read as `19yy`, below it as `20yy`.
pub const TWO_DIGIT_YEAR_PIVOT: i32 = 69;

/// Format used when writing dates back out (demo data, CSV exports).
pub const DAY_FIRST_FORMAT: &str = "%d/%m/%Y";

fn day_first_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^(\d{1,2})[/.\-](\d{1,2})[/.\-](\d{4}|\d{2})(?:[ T](\d{1,2}):(\d{2})(?::(\d{2}))?)?$",
        )
        .expect("regex is valid")
    })
}

fn iso_re() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(r"^(\d{4})-(\d{1,2})-(\d{1,2})(?:[ T](\d{1,2}):(\d{2})(?::(\d{2}))?)?$")
            .expect("regex is valid")
    })
}

/// Parse an invoice date under the day-first convention.
///
/// Accepts:
/// * `D/M/YYYY`, `D-M-YYYY`, `D.M.YYYY` with one- or two-digit day and
///   month; a two-digit year `yy` is read as `19yy` from
///   [`TWO_DIGIT_YEAR_PIVOT`] up and as `20yy` below it.
/// * ISO `YYYY-MM-DD`, which is unambiguous.
///
/// Either form may carry a trailing `HH:MM` or `HH:MM:SS` time separated by a
/// space or `T`. Date-only values resolve to midnight.
///
/// Returns `None` for anything else, including impossible dates such as
/// `31/02/2024` and month-first values such as `12/31/2024`.
///
/// ```
/// use pulse_core::dates::parse_day_first;
/// use chrono::NaiveDate;
///
/// let ts = parse_day_first("05/03/2025").unwrap();
/// assert_eq!(ts.date(), NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
/// assert!(parse_day_first("12/31/2024").is_none());
/// ```
pub fn parse_day_first(value: &str) -> Option<NaiveDateTime> {
    let s = value.trim();
    if s.is_empty() {
        return None;
    }

    if let Some(caps) = iso_re().captures(s) {
        let year: i32 = caps[1].parse().ok()?;
        let month: u32 = caps[2].parse().ok()?;
        let day: u32 = caps[3].parse().ok()?;
        return build(year, month, day, &caps);
    }

    let caps = day_first_re().captures(s)?;
    let day: u32 = caps[1].parse().ok()?;
    let month: u32 = caps[2].parse().ok()?;
    let year_str = &caps[3];
    let mut year: i32 = year_str.parse().ok()?;
    if year_str.len() == 2 {
        year += if year >= TWO_DIGIT_YEAR_PIVOT { 1900 } else { 2000 };
    }
    build(year, month, day, &caps)
}

/// Format a date the way the demo generator and exports write it.
pub fn format_day_first(date: NaiveDate) -> String {
    date.format(DAY_FIRST_FORMAT).to_string()
}

/// Assemble the timestamp from captured parts; time groups sit at 4..=6 in
/// both patterns.
fn build(year: i32, month: u32, day: u32, caps: &regex::Captures<'_>) -> Option<NaiveDateTime> {
    let date = NaiveDate::from_ymd_opt(year, month, day)?;
    let hour: u32 = caps.get(4).map_or(Some(0), |m| m.as_str().parse().ok())?;
    let minute: u32 = caps.get(5).map_or(Some(0), |m| m.as_str().parse().ok())?;
    let second: u32 = caps.get(6).map_or(Some(0), |m| m.as_str().parse().ok())?;
    date.and_hms_opt(hour, minute, second)
}
