//! String level conversions used at form and report boundaries.
//!
//! Entry points (`to_gregorian_*`) reject bad input with
//! [`DateError::InvalidDateFormat`] so the caller can stop before anything is
//! stored. Display paths (`to_jalaali_*`) never fail: when the stored value
//! cannot be read they hand back the raw string.

use chrono::{Datelike, NaiveDate};
use tracing::debug;

use crate::error::DateError;
use crate::jalaali::{JalaaliDate, JalaaliMonth, PINNED_DAY};
use crate::parse::{parse_gregorian_date, parse_gregorian_year_month};

/// Jalaali day to a zero-padded `YYYY-MM-DD`.
pub fn to_gregorian_iso_date(year: i32, month: u32, day: u32) -> Result<String, DateError> {
    let date = JalaaliDate::new(year, month, day)?.to_gregorian()?;
    Ok(date.format("%Y-%m-%d").to_string())
}

/// Jalaali period to a zero-padded `YYYY-MM`.
///
/// The period is pinned to its 15th day before conversion; the Gregorian
/// year and month of that day are the result.
pub fn to_gregorian_year_month(year: i32, month: u32) -> Result<String, DateError> {
    let pinned = JalaaliMonth::new(year, month)?.pinned_day().to_gregorian()?;
    Ok(gregorian_year_month_of(pinned))
}

/// Stored Gregorian date to `jYYYY/jMM/jDD`, or the raw input if it cannot be
/// converted.
pub fn to_jalaali_display(iso_date: &str) -> String {
    match parse_gregorian_date(iso_date).and_then(JalaaliDate::from_gregorian) {
        Ok(date) => date.to_string(),
        Err(err) => {
            debug!(input = iso_date, %err, "showing raw date");
            iso_date.to_string()
        }
    }
}

/// Gregorian `YYYY-MM` to `jYYYY/jMM`, or the raw input if it cannot be
/// converted. Uses the same day-15 pinning as [`to_gregorian_year_month`].
pub fn to_jalaali_period_display(gregorian_year_month: &str) -> String {
    let converted = parse_gregorian_year_month(gregorian_year_month).and_then(|(year, month)| {
        let pinned = NaiveDate::from_ymd_opt(year, month, PINNED_DAY)
            .ok_or_else(|| DateError::invalid(gregorian_year_month))?;
        JalaaliDate::from_gregorian(pinned).map(JalaaliMonth::from)
    });

    match converted {
        Ok(period) => period.to_string(),
        Err(err) => {
            debug!(input = gregorian_year_month, %err, "showing raw period");
            gregorian_year_month.to_string()
        }
    }
}

/// First and last Gregorian day of a Jalaali month, both inclusive.
///
/// Period filters query stored Gregorian dates with this pair.
pub fn jalaali_month_range(year: i32, month: u32) -> Result<(NaiveDate, NaiveDate), DateError> {
    let period = JalaaliMonth::new(year, month)?;
    Ok((
        period.first_day().to_gregorian()?,
        period.last_day().to_gregorian()?,
    ))
}

/// Gregorian period of a date; zero-padded `YYYY-MM`.
pub fn gregorian_year_month_of(date: NaiveDate) -> String {
    format!("{:04}-{:02}", date.year(), date.month())
}

#[cfg(test)]
mod convert_tests {
    use super::*;

    #[test]
    fn farvardin_fifteenth_1403() {
        assert_eq!(to_gregorian_iso_date(1403, 1, 15).unwrap(), "2024-04-03");
        assert_eq!(to_jalaali_display("2024-04-03"), "1403/01/15");
    }

    #[test]
    fn zero_padding() {
        assert_eq!(to_gregorian_iso_date(1402, 10, 15).unwrap(), "2024-01-05");
        assert_eq!(to_gregorian_year_month(1403, 10).unwrap(), "2025-01");
        // 1000/01/15 is 1621-04-03
        assert_eq!(to_gregorian_year_month(1000, 1).unwrap(), "1621-04");
    }

    #[test]
    fn invalid_triples_are_errors() {
        assert!(to_gregorian_iso_date(1403, 13, 1).is_err());
        assert!(to_gregorian_iso_date(1402, 12, 30).is_err());
        assert!(to_gregorian_iso_date(14, 1, 1).is_err());
        assert!(to_gregorian_year_month(1403, 0).is_err());
    }

    #[test]
    fn display_falls_back_to_raw_value() {
        assert_eq!(to_jalaali_display("not a date"), "not a date");
        assert_eq!(to_jalaali_display("2023-02-29"), "2023-02-29");
        assert_eq!(to_jalaali_display("1500-01-01"), "1500-01-01");
        assert_eq!(to_jalaali_period_display("2024/04"), "2024/04");
        assert_eq!(to_jalaali_period_display(""), "");
    }

    #[test]
    fn period_display_pins_mid_month() {
        // 2024-04-15 is 1403/01/27
        assert_eq!(to_jalaali_period_display("2024-04"), "1403/01");
        // 2025-03-15 is 1403/12/25, still before Nowruz
        assert_eq!(to_jalaali_period_display("2025-03"), "1403/12");
    }

    #[test]
    fn month_range_of_esfand() {
        let (first, last) = jalaali_month_range(1403, 12).unwrap();
        assert_eq!(first, NaiveDate::from_ymd_opt(2025, 2, 19).unwrap());
        assert_eq!(last, NaiveDate::from_ymd_opt(2025, 3, 20).unwrap());
        assert_eq!(gregorian_year_month_of(last), "2025-03");
    }
}
