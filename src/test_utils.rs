//! Shorthand constructors for tests.

use crate::{CalendarDate, DateRange};

/// Builds a date from a year, zero-based month and day, panicking on invalid input.
pub fn date(year: i32, month: u8, day: u8) -> CalendarDate {
    CalendarDate::new(year, month, day)
        .unwrap_or_else(|err| panic!("invalid test date {year}/{month}/{day}: {err}"))
}

/// Builds the closed range between two dates given as (year, zero-based month, day).
pub fn range(start: (i32, u8, u8), end: (i32, u8, u8)) -> DateRange {
    DateRange::new(date(start.0, start.1, start.2), date(end.0, end.1, end.2))
}
