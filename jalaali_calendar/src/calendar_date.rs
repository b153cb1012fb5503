use std::fmt;

use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::error::DateError;
use crate::jalaali::JalaaliDate;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Calendar {
    Jalaali,
    Gregorian,
}

/// A day tagged with the calendar its fields are expressed in.
///
/// Fields are public so the value can be built from a form or a JSON body;
/// the conversions validate before they switch calendars.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CalendarDate {
    pub calendar: Calendar,
    pub year: i32,
    pub month: u32,
    pub day: u32,
}

impl CalendarDate {
    fn as_jalaali(&self) -> Result<JalaaliDate, DateError> {
        JalaaliDate::new(self.year, self.month, self.day)
    }

    fn as_gregorian(&self) -> Result<NaiveDate, DateError> {
        NaiveDate::from_ymd_opt(self.year, self.month, self.day)
            .ok_or_else(|| DateError::invalid(self.to_string()))
    }

    pub fn is_valid(&self) -> bool {
        match self.calendar {
            Calendar::Jalaali => self.as_jalaali().is_ok(),
            Calendar::Gregorian => self.as_gregorian().is_ok(),
        }
    }

    /// The same day in the Gregorian calendar. A Gregorian date is only validated.
    pub fn to_gregorian(&self) -> Result<Self, DateError> {
        let date = match self.calendar {
            Calendar::Jalaali => self.as_jalaali()?.to_gregorian()?,
            Calendar::Gregorian => self.as_gregorian()?,
        };
        Ok(date.into())
    }

    /// The same day in the Jalaali calendar. A Jalaali date is only validated.
    pub fn to_jalaali(&self) -> Result<Self, DateError> {
        let date = match self.calendar {
            Calendar::Jalaali => self.as_jalaali()?,
            Calendar::Gregorian => JalaaliDate::from_gregorian(self.as_gregorian()?)?,
        };
        Ok(date.into())
    }
}

impl From<JalaaliDate> for CalendarDate {
    fn from(date: JalaaliDate) -> Self {
        Self {
            calendar: Calendar::Jalaali,
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl From<NaiveDate> for CalendarDate {
    fn from(date: NaiveDate) -> Self {
        Self {
            calendar: Calendar::Gregorian,
            year: date.year(),
            month: date.month(),
            day: date.day(),
        }
    }
}

impl fmt::Display for CalendarDate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.calendar {
            Calendar::Jalaali => write!(f, "{:04}/{:02}/{:02}", self.year, self.month, self.day),
            Calendar::Gregorian => write!(f, "{:04}-{:02}-{:02}", self.year, self.month, self.day),
        }
    }
}
