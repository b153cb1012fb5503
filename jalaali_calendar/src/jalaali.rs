use std::fmt;

use chrono::{Datelike, Days, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DateError;

// Four-digit years only. 3177 is the last year covered by the break table.
pub const MIN_YEAR: i32 = 1000;
pub const MAX_YEAR: i32 = 3177;

/// Day of the month used when a year-month has to be turned into a concrete day.
pub const PINNED_DAY: u32 = 15;

/// Jalaali years at which the 33-year leap cycle is re-aligned to the
/// vernal equinox.
const BREAKS: [i32; 20] = [
    -61, 9, 38, 199, 426, 686, 756, 818, 1111, 1181, 1210, 1635, 2060, 2097, 2192, 2262, 2324,
    2394, 2456, 3178,
];

// Months 1-6 have 31 days, so month 7 starts at day-of-year 186 (0-based).
const FIRST_HALF_DAYS: u32 = 6 * 31;

/// Where a Jalaali year sits in its leap cycle, and when it starts.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct YearInfo {
    /// 0 for a leap year, otherwise the number of years since the last one
    leap: i32,
    gregorian_year: i32,
    /// day of March (in `gregorian_year`) on which Nowruz falls
    march: u32,
}

fn year_info(year: i32) -> Option<YearInfo> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }

    let gregorian_year = year + 621;
    let mut leap_j = -14;
    let mut previous_break = BREAKS[0];
    let mut jump = 0;

    for &next_break in &BREAKS[1..] {
        jump = next_break - previous_break;
        if year < next_break {
            break;
        }
        leap_j += jump / 33 * 8 + jump % 33 / 4;
        previous_break = next_break;
    }

    // years elapsed since the break that opens this segment
    let mut n = year - previous_break;
    leap_j += n / 33 * 8 + (n % 33 + 3) / 4;
    if jump % 33 == 4 && jump - n == 4 {
        leap_j += 1;
    }

    let leap_g = gregorian_year / 4 - (gregorian_year / 100 + 1) * 3 / 4 - 150;
    let march = 20 + leap_j - leap_g;

    if jump - n < 6 {
        n = n - jump + (jump + 4) / 33 * 33;
    }
    let mut leap = ((n + 1) % 33 - 1) % 4;
    if leap == -1 {
        leap = 4;
    }

    Some(YearInfo {
        leap,
        gregorian_year,
        march: u32::try_from(march).ok()?,
    })
}

/// Gregorian date of 1 Farvardin of the given Jalaali year.
pub fn nowruz(year: i32) -> Option<NaiveDate> {
    let info = year_info(year)?;
    NaiveDate::from_ymd_opt(info.gregorian_year, 3, info.march)
}

/// Returns `false` for years outside the supported range.
pub fn is_leap_year(year: i32) -> bool {
    year_info(year).is_some_and(|info| info.leap == 0)
}

pub fn year_length(year: i32) -> u32 {
    if is_leap_year(year) {
        366
    } else {
        365
    }
}

/// Number of days in a Jalaali month, or `None` when the year or month is
/// outside the calendar.
pub fn month_length(year: i32, month: u32) -> Option<u32> {
    if !(MIN_YEAR..=MAX_YEAR).contains(&year) {
        return None;
    }
    match month {
        1..=6 => Some(31),
        7..=11 => Some(30),
        12 if is_leap_year(year) => Some(30),
        12 => Some(29),
        _ => None,
    }
}

/// A validated day of the Jalaali calendar.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawJalaaliDate")]
pub struct JalaaliDate {
    year: i32,
    month: u32,
    day: u32,
}

impl JalaaliDate {
    pub fn new(year: i32, month: u32, day: u32) -> Result<Self, DateError> {
        match month_length(year, month) {
            Some(days) if (1..=days).contains(&day) => Ok(Self { year, month, day }),
            _ => Err(DateError::invalid(format!("{year}/{month}/{day}"))),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn day(&self) -> u32 {
        self.day
    }

    /// Days elapsed since Nowruz of the same year (0 on 1 Farvardin).
    pub fn ordinal0(&self) -> u32 {
        if self.month <= 6 {
            (self.month - 1) * 31 + self.day - 1
        } else {
            FIRST_HALF_DAYS + (self.month - 7) * 30 + self.day - 1
        }
    }

    fn from_ordinal0(year: i32, ordinal0: u32) -> Self {
        if ordinal0 < FIRST_HALF_DAYS {
            Self {
                year,
                month: 1 + ordinal0 / 31,
                day: ordinal0 % 31 + 1,
            }
        } else {
            let rest = ordinal0 - FIRST_HALF_DAYS;
            Self {
                year,
                month: 7 + rest / 30,
                day: rest % 30 + 1,
            }
        }
    }

    pub fn to_gregorian(&self) -> Result<NaiveDate, DateError> {
        nowruz(self.year)
            .and_then(|start| start.checked_add_days(Days::new(u64::from(self.ordinal0()))))
            .ok_or_else(|| DateError::invalid(self.to_string()))
    }

    pub fn from_gregorian(date: NaiveDate) -> Result<Self, DateError> {
        let out_of_range = || DateError::invalid(date.format("%Y-%m-%d").to_string());

        // Nowruz falls in March, so the Jalaali year is either gy - 621 or the one before.
        let mut year = (date.year() - 621).min(MAX_YEAR);
        let start = nowruz(year).ok_or_else(out_of_range)?;
        let mut offset = date.signed_duration_since(start).num_days();

        if offset < 0 {
            year -= 1;
            if year < MIN_YEAR {
                return Err(out_of_range());
            }
            offset += i64::from(year_length(year));
        }

        match u32::try_from(offset) {
            Ok(ordinal0) if ordinal0 < year_length(year) => Ok(Self::from_ordinal0(year, ordinal0)),
            _ => Err(out_of_range()),
        }
    }
}

// Deserialized fields go through `new` like every other constructor.
#[derive(Deserialize)]
struct RawJalaaliDate {
    year: i32,
    month: u32,
    day: u32,
}

impl TryFrom<RawJalaaliDate> for JalaaliDate {
    type Error = DateError;

    fn try_from(raw: RawJalaaliDate) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month, raw.day)
    }
}

impl fmt::Display for JalaaliDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day)
    }
}

/// A validated Jalaali year-month (a reporting period).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(try_from = "RawJalaaliMonth")]
pub struct JalaaliMonth {
    year: i32,
    month: u32,
}

impl JalaaliMonth {
    pub fn new(year: i32, month: u32) -> Result<Self, DateError> {
        match month_length(year, month) {
            Some(_) => Ok(Self { year, month }),
            None => Err(DateError::invalid(format!("{year}/{month}"))),
        }
    }

    pub fn year(&self) -> i32 {
        self.year
    }

    pub fn month(&self) -> u32 {
        self.month
    }

    pub fn days(&self) -> u32 {
        month_length(self.year, self.month).unwrap_or(0)
    }

    /// The day a period is pinned to before it crosses calendars.
    ///
    /// The middle of the month keeps the result away from the Gregorian
    /// month boundary, which falls around the 10th of every Jalaali month.
    pub fn pinned_day(&self) -> JalaaliDate {
        JalaaliDate {
            year: self.year,
            month: self.month,
            day: PINNED_DAY,
        }
    }

    pub fn first_day(&self) -> JalaaliDate {
        JalaaliDate {
            year: self.year,
            month: self.month,
            day: 1,
        }
    }

    pub fn last_day(&self) -> JalaaliDate {
        JalaaliDate {
            year: self.year,
            month: self.month,
            day: self.days(),
        }
    }
}

#[derive(Deserialize)]
struct RawJalaaliMonth {
    year: i32,
    month: u32,
}

impl TryFrom<RawJalaaliMonth> for JalaaliMonth {
    type Error = DateError;

    fn try_from(raw: RawJalaaliMonth) -> Result<Self, Self::Error> {
        Self::new(raw.year, raw.month)
    }
}

impl From<JalaaliDate> for JalaaliMonth {
    fn from(date: JalaaliDate) -> Self {
        Self {
            year: date.year,
            month: date.month,
        }
    }
}

impl fmt::Display for JalaaliMonth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:04}/{:02}", self.year, self.month)
    }
}
