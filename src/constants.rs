//! Application-wide defaults and limits.
//!
//! Everything the configuration layer falls back to lives here so that the
//! validation code, the CLI help text and the tests agree on the same numbers.

// # Picker defaults

/// Default spacing between selectable time slots, in minutes.
pub const DEFAULT_TIME_INTERVAL: u32 = 30;
/// Placeholder shown by the date-only variant when no value is committed.
pub const DEFAULT_DATE_PLACEHOLDER: &str = "Select date";
/// Placeholder shown by the date-time variant when no value is committed.
pub const DEFAULT_DATE_TIME_PLACEHOLDER: &str = "Select date and time";
/// Years offered before the current year in the year dropdown.
pub const DEFAULT_YEARS_BEFORE: u32 = 10;
/// Years offered after the current year in the year dropdown.
pub const DEFAULT_YEARS_AFTER: u32 = 10;

// # Validation limits

pub const MINIMUM_TIME_INTERVAL: u32 = 1;
pub const MAXIMUM_TIME_INTERVAL: u32 = 720;
pub const MAXIMUM_YEAR_SPAN: u32 = 200;

// # Calendar

pub const MINUTES_PER_HOUR: u32 = 60;
pub const MINUTES_PER_DAY: u32 = 24 * MINUTES_PER_HOUR;
pub const MONTHS_PER_YEAR: u32 = 12;

// # Files

pub const CONFIG_DIR_NAME: &str = "datedrop";
pub const CONFIG_FILE_NAME: &str = "datedrop.toml";

// # Exit codes

pub const EXIT_FAILURE: i32 = 1;

#[cfg(test)]
pub mod test_constants {
    pub const TEST_LEAP_YEAR: i32 = 2024;
    pub const TEST_COMMON_YEAR: i32 = 2023;
    pub const TEST_FEBRUARY: u32 = 1;
    pub const TEST_MARCH: u32 = 2;
    pub const TEST_APRIL: u32 = 3;
}
