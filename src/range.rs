use std::{cmp::Ordering, iter::FusedIterator, str::FromStr};

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::{CalendarDate, DateError, RANGE_SEPARATOR, prelude::*};

/// Represents the closed range between two calendar dates.
///
/// No ordering is required between the bounds: a range whose start is after
/// its end is empty.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display)]
#[display(fmt = "{start}/{end}")]
pub struct DateRange {
    start: CalendarDate,
    end:   CalendarDate,
}

/// Error type for date range operations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RangeError {
    /// A cursor was advanced after yielding its last date.
    #[error("Date range exhausted: no more dates")]
    ExhaustedSequence,

    /// Error parsing date component.
    #[error(transparent)]
    DateError(#[from] DateError),

    /// Invalid range format.
    #[error("Invalid range format: {0}")]
    InvalidFormat(String),
}

impl DateRange {
    /// Creates a new date range. An inverted range is accepted and is empty.
    pub const fn new(start: CalendarDate, end: CalendarDate) -> Self {
        Self { start, end }
    }

    /// Returns the start date of the range
    pub const fn start(&self) -> CalendarDate {
        self.start
    }

    /// Returns the end date of the range
    pub const fn end(&self) -> CalendarDate {
        self.end
    }

    /// Returns both start and end dates as a tuple
    pub const fn dates(&self) -> (CalendarDate, CalendarDate) {
        (self.start, self.end)
    }

    /// Checks if the range contains a given date (both bounds included)
    pub fn contains(&self, date: &CalendarDate) -> bool {
        date.is_in_range(&self.start, &self.end)
    }

    /// Whether the range yields no dates at all
    pub fn is_empty(&self) -> bool {
        self.start > self.end
    }

    /// Number of dates the range yields
    pub fn days(&self) -> usize {
        self.iter().size_hint().0
    }

    /// Returns a fresh cursor positioned on the start date.
    ///
    /// Every call starts over; cursors never share their position.
    pub fn iter(&self) -> DateRangeIter {
        DateRangeIter::new(self.start, self.end)
    }
}

/// Lazy cursor over the dates of a [`DateRange`], one day at a time.
#[derive(Debug, Clone)]
pub struct DateRangeIter {
    next: Option<CalendarDate>,
    end:  CalendarDate,
}

impl DateRangeIter {
    fn new(start: CalendarDate, end: CalendarDate) -> Self {
        #[cfg(feature = "log")]
        log::trace!("Enumerating dates from {start} to {end}");

        Self {
            next: (start <= end).then_some(start),
            end,
        }
    }

    /// Whether another date remains
    pub const fn has_next(&self) -> bool {
        self.next.is_some()
    }

    /// Yields the current date and moves the cursor one day forward.
    ///
    /// # Errors
    /// Returns `RangeError::ExhaustedSequence` once every date was yielded.
    pub fn try_next(&mut self) -> Result<CalendarDate, RangeError> {
        let current = self.next.ok_or(RangeError::ExhaustedSequence)?;

        self.next = if current < self.end {
            match current.next_day() {
                Ok(following) => Some(following),
                Err(_err) => {
                    #[cfg(feature = "log")]
                    log::warn!("Stopping date range at {current}: {_err}");
                    None
                },
            }
        } else {
            None
        };

        Ok(current)
    }

    fn remaining(&self) -> Option<usize> {
        let Some(next) = self.next else {
            return Some(0);
        };
        let from = NaiveDate::try_from(next).ok()?;
        let to = NaiveDate::try_from(self.end).ok()?;
        let days = to.signed_duration_since(from).num_days();
        usize::try_from(days).ok().map(|days| days + 1)
    }
}

impl Iterator for DateRangeIter {
    type Item = CalendarDate;

    fn next(&mut self) -> Option<Self::Item> {
        self.try_next().ok()
    }

    fn size_hint(&self) -> (usize, Option<usize>) {
        match self.remaining() {
            Some(days) => (days, Some(days)),
            None => (0, None),
        }
    }
}

impl FusedIterator for DateRangeIter {}

impl IntoIterator for DateRange {
    type Item = CalendarDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl IntoIterator for &DateRange {
    type Item = CalendarDate;
    type IntoIter = DateRangeIter;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

impl FromStr for DateRange {
    type Err = RangeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();

        // ISO 8601 extended format: use RANGE_SEPARATOR to separate start/end
        let separator_count = trimmed.matches(RANGE_SEPARATOR).count();

        match separator_count {
            0 => Err(RangeError::InvalidFormat(format!(
                "No range separator found (expected '{RANGE_SEPARATOR}'): {s}"
            ))),
            1 => {
                let (start_str, end_str) = trimmed.split_once(RANGE_SEPARATOR).ok_or_else(|| {
                    RangeError::InvalidFormat(format!("Separator '{RANGE_SEPARATOR}' not found despite count == 1"))
                })?;

                let start = start_str.trim().parse::<CalendarDate>()?;
                let end = end_str.trim().parse::<CalendarDate>()?;

                Ok(Self::new(start, end))
            },
            _ => Err(RangeError::InvalidFormat(format!(
                "Too many '{RANGE_SEPARATOR}' separators: expected 1, found {separator_count}"
            ))),
        }
    }
}

impl PartialOrd for DateRange {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

impl Ord for DateRange {
    fn cmp(&self, other: &Self) -> Ordering {
        // Compare start dates first, then end dates
        match self.start.cmp(&other.start) {
            Ordering::Equal => self.end.cmp(&other.end),
            ord => ord,
        }
    }
}

impl Serialize for DateRange {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for DateRange {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: serde::Deserializer<'de>,
    {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{date, range};
    use crate::{DECEMBER, MAX_YEAR};

    #[test]
    fn test_accessors() {
        let start = date(2023, 0, 1);
        let end = date(2023, 11, 31);
        let range = DateRange::new(start, end);

        assert_eq!(range.start(), start);
        assert_eq!(range.end(), end);
        assert_eq!(range.dates(), (start, end));
        assert_eq!(start.range_to(end), range);
    }

    #[test]
    fn test_enumerates_across_year_boundary() {
        let dates: Vec<_> = range((2023, 11, 30), (2024, 0, 2)).iter().collect();
        assert_eq!(
            dates,
            vec![date(2023, 11, 30), date(2023, 11, 31), date(2024, 0, 1), date(2024, 0, 2)]
        );
    }

    #[test]
    fn test_enumerates_leap_february() {
        let leap: Vec<_> = range((2024, 1, 27), (2024, 2, 1)).into_iter().collect();
        assert_eq!(
            leap,
            vec![date(2024, 1, 27), date(2024, 1, 28), date(2024, 1, 29), date(2024, 2, 1)]
        );

        let common: Vec<_> = range((2023, 1, 27), (2023, 2, 1)).into_iter().collect();
        assert_eq!(common, vec![date(2023, 1, 27), date(2023, 1, 28), date(2023, 2, 1)]);
    }

    #[test]
    fn test_empty_when_start_after_end() {
        let cases = [
            ((2023, 5, 2), (2023, 5, 1)),
            ((2024, 0, 1), (2023, 11, 31)),
            ((2023, 6, 1), (2023, 5, 30)),
        ];

        for (start, end) in cases {
            let range = range(start, end);
            assert!(range.is_empty(), "{range} should be empty");
            assert_eq!(range.iter().count(), 0, "{range} should yield nothing");
            assert_eq!(range.days(), 0);
        }
    }

    #[test]
    fn test_single_day_range() {
        let d = date(2024, 1, 29);
        let dates: Vec<_> = DateRange::new(d, d).iter().collect();
        assert_eq!(dates, vec![d]);
        assert!(!DateRange::new(d, d).is_empty());
    }

    #[test]
    fn test_days_and_size_hint() {
        let year = range((2024, 0, 1), (2024, 11, 31));
        assert_eq!(year.days(), 366);
        assert_eq!(year.iter().count(), 366);

        let mut iter = range((2023, 0, 1), (2023, 0, 3)).iter();
        assert_eq!(iter.size_hint(), (3, Some(3)));
        iter.next();
        assert_eq!(iter.size_hint(), (2, Some(2)));
        iter.next();
        iter.next();
        assert_eq!(iter.size_hint(), (0, Some(0)));
    }

    #[test]
    fn test_contains_matches_enumeration() {
        let range = range((2023, 1, 20), (2023, 2, 5));
        let enumerated: Vec<_> = range.iter().collect();

        let mut probe = date(2023, 1, 10);
        let stop = date(2023, 2, 15);
        while probe <= stop {
            assert_eq!(
                range.contains(&probe),
                enumerated.contains(&probe),
                "membership of {probe} in {range}"
            );
            probe = probe.next_day().unwrap();
        }
    }

    #[test]
    fn test_traversals_are_independent() {
        let range = range((2023, 11, 28), (2024, 0, 3));
        let expected: Vec<_> = range.iter().collect();

        let mut first = range.iter();
        let mut second = range.iter();
        let mut from_first = Vec::new();
        let mut from_second = Vec::new();

        // Advance the first cursor twice as fast as the second
        from_first.extend(first.next());
        from_first.extend(first.next());
        from_second.extend(second.next());
        from_first.extend(first.by_ref());
        from_second.extend(second.by_ref());

        assert_eq!(from_first, expected);
        assert_eq!(from_second, expected);

        // A third traversal starts over from the beginning
        assert_eq!(range.iter().collect::<Vec<_>>(), expected);
        assert_eq!((&range).into_iter().next(), Some(date(2023, 11, 28)));
    }

    #[test]
    fn test_try_next_past_end() {
        let mut iter = range((2023, 0, 30), (2023, 0, 31)).iter();
        assert_eq!(iter.try_next(), Ok(date(2023, 0, 30)));
        assert!(iter.has_next());
        assert_eq!(iter.try_next(), Ok(date(2023, 0, 31)));
        assert!(!iter.has_next());
        assert_eq!(iter.try_next(), Err(RangeError::ExhaustedSequence));
        assert_eq!(iter.next(), None);
        assert_eq!(iter.next(), None);
    }

    #[test]
    fn test_range_ending_on_last_supported_day() {
        let last = date(MAX_YEAR, DECEMBER, 30);
        let end = date(MAX_YEAR, DECEMBER, 31);
        let dates: Vec<_> = DateRange::new(last, end).iter().collect();
        assert_eq!(dates, vec![last, end]);
    }

    #[test]
    fn test_display() {
        let range = range((1990, 5, 15), (2000, 11, 31));
        assert_eq!(range.to_string(), "1990-06-15/2000-12-31");
    }

    #[test]
    fn test_from_str() {
        let range = " 1990-06-15 / 2000-12-31 "
            .parse::<DateRange>()
            .expect("failed to parse day range");
        assert_eq!(range.start(), date(1990, 5, 15));
        assert_eq!(range.end(), date(2000, 11, 31));
    }

    #[test]
    fn test_from_str_inverted_is_empty() {
        let range = "2000-01-01/1990-01-01"
            .parse::<DateRange>()
            .expect("inverted ranges should parse");
        assert!(range.is_empty());
    }

    #[test]
    fn test_from_str_errors() {
        let err = "2000-01-01".parse::<DateRange>().expect_err("expected missing separator error");
        assert!(err.to_string().contains("No range separator found"));

        let err = "2000-01-01/2001-01-01/2002-01-01"
            .parse::<DateRange>()
            .expect_err("expected too many separators error");
        assert!(err.to_string().contains("expected 1, found 2"));

        let err = "2000-01-01/2001-02-30"
            .parse::<DateRange>()
            .expect_err("expected invalid end date");
        assert!(matches!(err, RangeError::DateError(DateError::InvalidDate { .. })));

        assert!("2000-01-01..2001-01-01".parse::<DateRange>().is_err());
    }

    #[test]
    fn test_ordering() {
        let a = range((1990, 0, 1), (2000, 0, 1));
        let b = range((1995, 0, 1), (1996, 0, 1));
        let c = range((1990, 0, 1), (2005, 0, 1));

        assert!(a < b);
        assert!(a < c);
        assert!(c < b);
    }

    #[test]
    fn test_serde_string_format() {
        let range = range((1990, 0, 1), (1990, 0, 31));

        let json = serde_json::to_string(&range).expect("failed to serialize range to JSON");
        assert_eq!(json, r#""1990-01-01/1990-01-31""#);

        let parsed: DateRange = serde_json::from_str(&json).expect("failed to deserialize range from JSON");
        assert_eq!(range, parsed);
    }
}
