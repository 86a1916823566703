/// Minimum valid year (inclusive)
pub const MIN_YEAR: i32 = 1;
/// Maximum valid year (inclusive)
pub const MAX_YEAR: i32 = 9999;

/// Month number for January (months are zero-based)
pub const MIN_MONTH: u8 = 0;
/// Month number for December (months are zero-based)
pub const MAX_MONTH: u8 = 11;

/// Month number for January
pub const JANUARY: u8 = MIN_MONTH;
/// Month number for February
pub const FEBRUARY: u8 = 1;
/// Month number for March
pub const MARCH: u8 = 2;
/// Month number for December
pub const DECEMBER: u8 = MAX_MONTH;

/// Length of one civil day in epoch milliseconds
pub const MILLIS_PER_DAY: i64 = 24 * 60 * 60 * 1000;

/// Date component separator (ISO 8601 format)
pub const DATE_SEPARATOR: char = '-';
/// Range separator (ISO 8601 extended format)
pub const RANGE_SEPARATOR: char = '/';
