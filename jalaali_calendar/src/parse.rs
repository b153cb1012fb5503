use chrono::{DateTime, NaiveDate};
use tracing::debug;

use crate::error::DateError;
use crate::jalaali::{JalaaliDate, JalaaliMonth};

// --- digits ---

/// Replaces Persian (U+06F0..U+06F9) and Arabic-Indic (U+0660..U+0669) digits
/// with their ASCII counterparts. Everything else is kept as is.
pub fn normalize_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c {
            '\u{06F0}'..='\u{06F9}' => ascii_digit(c as u32 - 0x06F0),
            '\u{0660}'..='\u{0669}' => ascii_digit(c as u32 - 0x0660),
            _ => c,
        })
        .collect()
}

fn ascii_digit(value: u32) -> char {
    char::from_digit(value, 10).unwrap_or('?')
}

/// Renders ASCII digits with Persian digits, the way dates are shown to users.
pub fn to_persian_digits(input: &str) -> String {
    input
        .chars()
        .map(|c| match c.to_digit(10) {
            Some(value) => char::from_u32(0x06F0 + value).unwrap_or(c),
            None => c,
        })
        .collect()
}

// --- segments ---

/// Splits `input` into exactly `N` parts. Empty parts are kept, so leading,
/// trailing or doubled separators show up as a wrong count or an empty segment.
fn split_exact<const N: usize>(input: &str, separator: char) -> Option<[&str; N]> {
    let mut parts = input.split(separator);
    let mut out = [""; N];
    for slot in out.iter_mut() {
        *slot = parts.next()?;
    }
    if parts.next().is_some() {
        return None;
    }
    Some(out)
}

/// Parses a run of ASCII digits whose length is within `widths`.
fn numeric_segment(segment: &str, widths: std::ops::RangeInclusive<usize>) -> Option<u32> {
    if !widths.contains(&segment.len()) || !segment.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    segment.parse().ok()
}

fn year_segment(segment: &str) -> Option<i32> {
    numeric_segment(segment, 4..=4).and_then(|year| i32::try_from(year).ok())
}

fn reject(input: &str, reason: &'static str) -> DateError {
    debug!(input, reason, "rejected date input");
    DateError::invalid(input)
}

// --- Jalaali input ---

/// Parses a `jYYYY/jMM/jDD` day as typed by a user.
///
/// Month and day may be written with one or two digits; the year must have
/// exactly four.
pub fn parse_jalaali_day(input: &str) -> Result<JalaaliDate, DateError> {
    let normalized = normalize_digits(input.trim());

    let [year, month, day] =
        split_exact::<3>(&normalized, '/').ok_or_else(|| reject(input, "expected 3 segments"))?;

    let year = year_segment(year).ok_or_else(|| reject(input, "year is not four digits"))?;
    let month = numeric_segment(month, 1..=2).ok_or_else(|| reject(input, "month is not numeric"))?;
    let day = numeric_segment(day, 1..=2).ok_or_else(|| reject(input, "day is not numeric"))?;

    JalaaliDate::new(year, month, day).map_err(|_| reject(input, "outside the calendar"))
}

/// Parses a `jYYYY/jMM` period.
pub fn parse_jalaali_month(input: &str) -> Result<JalaaliMonth, DateError> {
    let normalized = normalize_digits(input.trim());

    let [year, month] =
        split_exact::<2>(&normalized, '/').ok_or_else(|| reject(input, "expected 2 segments"))?;

    let year = year_segment(year).ok_or_else(|| reject(input, "year is not four digits"))?;
    let month = numeric_segment(month, 1..=2).ok_or_else(|| reject(input, "month is not numeric"))?;

    JalaaliMonth::new(year, month).map_err(|_| reject(input, "outside the calendar"))
}

// --- Gregorian input ---

/// Parses a stored Gregorian date.
///
/// Accepts `YYYY-MM-DD` and RFC 3339 timestamps such as
/// `2024-04-03T00:00:00.000Z`; for timestamps the date is taken as written,
/// without shifting to another time zone.
pub fn parse_gregorian_date(input: &str) -> Result<NaiveDate, DateError> {
    let trimmed = input.trim();

    if let Some([year, month, day]) = split_exact::<3>(trimmed, '-') {
        let year = year_segment(year);
        let month = numeric_segment(month, 2..=2);
        let day = numeric_segment(day, 2..=2);
        if let (Some(year), Some(month), Some(day)) = (year, month, day) {
            return NaiveDate::from_ymd_opt(year, month, day)
                .ok_or_else(|| reject(input, "no such Gregorian day"));
        }
    }

    DateTime::parse_from_rfc3339(trimmed)
        .map(|timestamp| timestamp.date_naive())
        .map_err(|_| reject(input, "not an ISO date"))
}

/// Parses a `YYYY-MM` Gregorian period.
pub fn parse_gregorian_year_month(input: &str) -> Result<(i32, u32), DateError> {
    let [year, month] =
        split_exact::<2>(input.trim(), '-').ok_or_else(|| reject(input, "expected 2 segments"))?;

    let year = year_segment(year).ok_or_else(|| reject(input, "year is not four digits"))?;
    let month = numeric_segment(month, 2..=2)
        .filter(|month| (1..=12).contains(month))
        .ok_or_else(|| reject(input, "month out of range"))?;

    Ok((year, month))
}
