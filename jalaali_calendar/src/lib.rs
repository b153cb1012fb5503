//! Conversion between the Jalaali (Persian solar Hijri) calendar and the
//! Gregorian calendar.
//!
//! Users type and read dates as `jYYYY/jMM/jDD`; only Gregorian `YYYY-MM-DD`
//! strings are stored. Everything here is pure and synchronous, so it can be
//! called from any number of threads without coordination.
//!
//! ```
//! use jalaali_calendar::{parse_jalaali_day, to_gregorian_iso_date, to_jalaali_display};
//!
//! let date = parse_jalaali_day("1403/1/15").unwrap();
//! let iso = to_gregorian_iso_date(date.year(), date.month(), date.day()).unwrap();
//! assert_eq!(iso, "2024-04-03");
//! assert_eq!(to_jalaali_display(&iso), "1403/01/15");
//! ```

pub mod calendar_date;
pub mod convert;
pub mod error;
pub mod jalaali;
pub mod parse;

pub use calendar_date::{Calendar, CalendarDate};
pub use convert::{
    gregorian_year_month_of, jalaali_month_range, to_gregorian_iso_date, to_gregorian_year_month,
    to_jalaali_display, to_jalaali_period_display,
};
pub use error::DateError;
pub use jalaali::{
    is_leap_year, month_length, nowruz, year_length, JalaaliDate, JalaaliMonth, MAX_YEAR,
    MIN_YEAR, PINNED_DAY,
};
pub use parse::{
    normalize_digits, parse_gregorian_date, parse_gregorian_year_month, parse_jalaali_day,
    parse_jalaali_month, to_persian_digits,
};
