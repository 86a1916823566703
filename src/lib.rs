mod consts;
mod prelude;
mod range;
#[cfg(test)]
mod test_utils;
mod types;

pub use consts::*;
pub use range::{DateRange, DateRangeIter, RangeError};
pub use types::{Day, Month, Year};

use crate::prelude::*;
use chrono::{DateTime, Datelike, NaiveDate, NaiveTime, Utc};
use std::cmp::Ordering;
use std::str::FromStr;

/// An immutable calendar date.
///
/// Months are zero-based (`0` is January), days are one-based. Every value
/// denotes a real day of the Gregorian calendar; invalid triples are rejected
/// at construction instead of being normalized.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{:04}-{:02}-{:02}", "year.get()", "month.number()", "day.get()")]
pub struct CalendarDate {
    year:  types::Year,
    month: types::Month,
    day:   types::Day,
}

#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum DateError {
    #[display(fmt = "Invalid date format: {_0}")]
    InvalidFormat(String),
    #[display(fmt = "Invalid year: {} (must be {}-{})", "_0", MIN_YEAR, MAX_YEAR)]
    InvalidYear(i32),
    #[display(fmt = "Invalid month index: {} (must be {}-{})", "_0", MIN_MONTH, MAX_MONTH)]
    InvalidMonth(u8),
    #[display(fmt = "Invalid day {day} for month index {month} of {year}")]
    InvalidDate { year: i32, month: u8, day: u8 },
    #[display(fmt = "Empty date string")]
    EmptyInput,
}

impl std::error::Error for DateError {}

impl CalendarDate {
    /// Creates a date from a year, a zero-based month and a one-based day.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear`, `DateError::InvalidMonth` or
    /// `DateError::InvalidDate` when the triple is not a real calendar date.
    pub fn new(year: i32, month: u8, day: u8) -> Result<Self, DateError> {
        let year = types::Year::new(year)?;
        let month = types::Month::new(month)?;
        let day = types::Day::new(day, year, month)?;
        Ok(Self { year, month, day })
    }

    /// Creates a date from already validated components.
    ///
    /// The day is checked again against the year and month, since a `Day` on
    /// its own does not know which month it belongs to.
    ///
    /// # Errors
    /// Returns `DateError::InvalidDate` if the day does not exist in that month.
    pub fn from_typed(year: types::Year, month: types::Month, day: types::Day) -> Result<Self, DateError> {
        let day = types::Day::new(day.get(), year, month)?;
        Ok(Self { year, month, day })
    }

    /// Returns the year
    pub fn year(&self) -> i32 {
        self.year.get()
    }

    /// Returns the zero-based month (0 = January)
    pub const fn month(&self) -> u8 {
        self.month.get()
    }

    /// Returns the one-based day of month
    pub const fn day(&self) -> u8 {
        self.day.get()
    }

    /// Returns the Year type
    pub const fn year_typed(&self) -> types::Year {
        self.year
    }

    /// Returns the Month type
    pub const fn month_typed(&self) -> types::Month {
        self.month
    }

    /// Returns the Day type
    pub const fn day_typed(&self) -> types::Day {
        self.day
    }

    /// Converts to the (year, zero-based month, day) triple.
    pub fn to_parts(&self) -> (i32, u8, u8) {
        (self.year(), self.month(), self.day())
    }

    /// Compares by year, then month, then day.
    ///
    /// The result is the plain difference of the first component that
    /// differs, so only its sign is meaningful.
    pub fn compare_to(&self, other: &Self) -> i32 {
        if self.year != other.year {
            self.year() - other.year()
        } else if self.month != other.month {
            i32::from(self.month()) - i32::from(other.month())
        } else {
            i32::from(self.day()) - i32::from(other.day())
        }
    }

    /// Returns the date one day later.
    ///
    /// The date is taken to an epoch instant at UTC midnight, moved forward by
    /// `MILLIS_PER_DAY` and brought back, so month lengths and leap years come
    /// from chrono's calendar.
    ///
    /// # Errors
    /// Returns `DateError::InvalidYear` for the last supported day, whose
    /// successor falls past `MAX_YEAR`.
    pub fn next_day(&self) -> Result<Self, DateError> {
        let instant = NaiveDate::try_from(*self)?.and_time(NaiveTime::MIN).and_utc();
        let following = instant
            .timestamp_millis()
            .checked_add(MILLIS_PER_DAY)
            .and_then(DateTime::<Utc>::from_timestamp_millis)
            .ok_or(DateError::InvalidYear(self.year() + 1))?;
        Self::try_from(following.date_naive())
    }

    /// Checks if this date lies in the closed range `[first, last]`.
    pub fn is_in_range(&self, first: &Self, last: &Self) -> bool {
        self.compare_to(first) >= 0 && self.compare_to(last) <= 0
    }

    /// Creates the closed range from this date to `end`.
    pub const fn range_to(self, end: Self) -> DateRange {
        DateRange::new(self, end)
    }
}

/// Compares two dates; only the sign of the result is meaningful.
pub fn compare_dates(a: &CalendarDate, b: &CalendarDate) -> i32 {
    a.compare_to(b)
}

/// Returns the date one day after `date`.
///
/// # Errors
/// See [`CalendarDate::next_day`].
pub fn next_day(date: &CalendarDate) -> Result<CalendarDate, DateError> {
    date.next_day()
}

/// Checks if `date` lies in the closed range `[first, last]`.
pub fn is_in_range(date: &CalendarDate, first: &CalendarDate, last: &CalendarDate) -> bool {
    date.is_in_range(first, last)
}

/// Lazily enumerates every date from `first` to `last`, both included.
pub fn enumerate_range(first: CalendarDate, last: CalendarDate) -> DateRangeIter {
    DateRange::new(first, last).iter()
}

/// Calls `handler` once for every date from `first` to `last`, in order.
pub fn for_each_in_range<F>(first: CalendarDate, last: CalendarDate, handler: F)
where
    F: FnMut(CalendarDate),
{
    enumerate_range(first, last).for_each(handler);
}

impl FromStr for CalendarDate {
    type Err = DateError;

    /// Parses `YYYY-MM-DD`, where the month is written one-based as usual.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(DateError::EmptyInput);
        }

        let parts: Vec<&str> = trimmed.split(DATE_SEPARATOR).map(str::trim).collect();
        let [year, month, day] = parts.as_slice() else {
            return Err(DateError::InvalidFormat(format!(
                "Expected YYYY{DATE_SEPARATOR}MM{DATE_SEPARATOR}DD, found {} components in {trimmed}",
                parts.len()
            )));
        };

        let year = Self::parse_component::<i32>(year)?;
        let month_number = Self::parse_component::<u8>(month)?;
        let day = Self::parse_component::<u8>(day)?;

        let month = month_number
            .checked_sub(1)
            .ok_or_else(|| DateError::InvalidFormat(format!("Month 00 in {trimmed}")))?;
        Self::new(year, month, day)
    }
}

impl CalendarDate {
    /// Helper to parse a numeric component with better error messages
    fn parse_component<T: FromStr>(s: &str) -> Result<T, DateError> {
        if s.is_empty() || !s.bytes().all(|b| b.is_ascii_digit()) {
            return Err(DateError::InvalidFormat(s.to_owned()));
        }
        s.parse::<T>().map_err(|_| DateError::InvalidFormat(s.to_owned()))
    }
}

impl PartialOrd for CalendarDate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for CalendarDate {
    fn cmp(&self, other: &Self) -> Ordering {
        self.compare_to(other).cmp(&0)
    }
}

impl TryFrom<(i32, u8, u8)> for CalendarDate {
    type Error = DateError;

    fn try_from(value: (i32, u8, u8)) -> Result<Self, Self::Error> {
        Self::new(value.0, value.1, value.2)
    }
}

impl TryFrom<NaiveDate> for CalendarDate {
    type Error = DateError;

    fn try_from(date: NaiveDate) -> Result<Self, Self::Error> {
        let invalid = || DateError::InvalidFormat(date.to_string());
        let month = u8::try_from(date.month0()).map_err(|_| invalid())?;
        let day = u8::try_from(date.day()).map_err(|_| invalid())?;
        Self::new(date.year(), month, day)
    }
}

impl TryFrom<CalendarDate> for NaiveDate {
    type Error = DateError;

    fn try_from(date: CalendarDate) -> Result<Self, Self::Error> {
        Self::from_ymd_opt(
            date.year(),
            u32::from(date.month.number()),
            u32::from(date.day()),
        )
        .ok_or(DateError::InvalidDate {
            year:  date.year(),
            month: date.month(),
            day:   date.day(),
        })
    }
}

impl serde::Serialize for CalendarDate {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> serde::Deserialize<'de> for CalendarDate {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
