//! Calendar arithmetic behind the dropdowns.
//!
//! Months are zero-based throughout (`0` = January) because that is what the
//! month dropdown and the selection state carry. Time slots are `"HH:MM"`
//! strings so they can be compared directly against a selection.

use chrono::{Datelike, NaiveDate};

use crate::constants::{MINUTES_PER_DAY, MINUTES_PER_HOUR, MONTHS_PER_YEAR};

const MONTH_NAMES: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

/// Gregorian leap-year rule.
pub fn is_leap_year(year: i32) -> bool {
    (year % 4 == 0 && year % 100 != 0) || year % 400 == 0
}

/// Whether every date of `year` can be represented.
pub fn is_representable_year(year: i32) -> bool {
    NaiveDate::from_ymd_opt(year, 1, 1).is_some() && NaiveDate::from_ymd_opt(year, 12, 31).is_some()
}

/// Number of days in zero-based `month` of `year`.
///
/// Computed as the last day of the month ("day zero" of the following month).
/// A month outside `0..=11` rolls over into the neighbouring years, so
/// `days_in_month(2023, 13)` is February 2024.
pub fn days_in_month(year: i32, month: i32) -> u32 {
    let (year, month) = normalize_month(year, month);

    let (next_year, next_month) = if month == MONTHS_PER_YEAR - 1 {
        (year.saturating_add(1), 0)
    } else {
        (year, month + 1)
    };

    NaiveDate::from_ymd_opt(next_year, next_month + 1, 1)
        .and_then(|first| first.pred_opt())
        .map(|last| last.day())
        .unwrap_or_else(|| days_in_month_by_table(year, month))
}

/// Table lookup for years chrono cannot represent.
fn days_in_month_by_table(year: i32, month: u32) -> u32 {
    match month {
        1 if is_leap_year(year) => 29,
        1 => 28,
        3 | 5 | 8 | 10 => 30,
        _ => 31,
    }
}

/// Fold any integer month into `(year, 0..=11)`.
pub fn normalize_month(year: i32, month: i32) -> (i32, u32) {
    let months = MONTHS_PER_YEAR as i32;
    let year = year.saturating_add(month.div_euclid(months));
    (year, month.rem_euclid(months) as u32)
}

/// Every `"HH:MM"` slot from `00:00` up to but not including `24:00`.
///
/// Intervals that do not divide 60 still work; they just leave an irregular
/// gap before midnight. An interval of zero is treated as one minute.
pub fn time_slots(interval_minutes: u32) -> Vec<String> {
    let step = interval_minutes.max(1) as usize;
    (0..MINUTES_PER_DAY)
        .step_by(step)
        .map(|minute| format_slot(minute / MINUTES_PER_HOUR, minute % MINUTES_PER_HOUR))
        .collect()
}

pub fn format_slot(hours: u32, minutes: u32) -> String {
    format!("{hours:02}:{minutes:02}")
}

/// Parse a `"HH:MM"` slot into `(hours, minutes)`.
pub fn parse_time_slot(slot: &str) -> Option<(u32, u32)> {
    let (hours, minutes) = slot.trim().split_once(':')?;
    if hours.is_empty() || hours.len() > 2 || minutes.len() != 2 {
        return None;
    }
    if !hours.chars().chain(minutes.chars()).all(|c| c.is_ascii_digit()) {
        return None;
    }
    let hours = hours.parse::<u32>().ok()?;
    let minutes = minutes.parse::<u32>().ok()?;
    (hours < 24 && minutes < MINUTES_PER_HOUR).then_some((hours, minutes))
}

/// English name of a zero-based month.
pub fn month_name(month: u32) -> Option<&'static str> {
    MONTH_NAMES.get(month as usize).copied()
}

/// Three-letter English abbreviation of a zero-based month.
pub fn month_short_name(month: u32) -> Option<&'static str> {
    month_name(month).map(|name| &name[..3])
}

/// Ascending list of selectable years around `center`.
pub fn year_range(center: i32, before: u32, after: u32) -> Vec<i32> {
    let first = center.saturating_sub_unsigned(before);
    let last = center.saturating_add_unsigned(after);
    (first..=last).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::*;

    #[test]
    fn test_february_lengths() {
        assert_eq!(days_in_month(TEST_LEAP_YEAR, TEST_FEBRUARY as i32), 29);
        assert_eq!(days_in_month(TEST_COMMON_YEAR, TEST_FEBRUARY as i32), 28);
        assert_eq!(days_in_month(2000, 1), 29);
        assert_eq!(days_in_month(1900, 1), 28);
    }

    #[test]
    fn test_month_lengths_for_common_year() {
        let lengths: Vec<u32> = (0..12).map(|m| days_in_month(2023, m)).collect();
        assert_eq!(lengths, vec![31, 28, 31, 30, 31, 30, 31, 31, 30, 31, 30, 31]);
    }

    #[test]
    fn test_december_rolls_into_next_year() {
        assert_eq!(days_in_month(2023, 11), 31);
    }

    #[test]
    fn test_out_of_range_months_roll_over() {
        assert_eq!(days_in_month(2023, 13), 29);
        assert_eq!(days_in_month(2024, -1), 31);
        assert_eq!(normalize_month(2024, -1), (2023, 11));
        assert_eq!(normalize_month(2024, 24), (2026, 0));
    }

    #[test]
    fn test_table_fallback_agrees_with_rule() {
        assert_eq!(days_in_month_by_table(2024, 1), 29);
        assert_eq!(days_in_month_by_table(2100, 1), 28);
        assert_eq!(days_in_month_by_table(2023, 3), 30);
        assert_eq!(days_in_month(i32::MAX, 1), 28);
    }

    #[test]
    fn test_representable_years() {
        assert!(is_representable_year(2024));
        assert!(is_representable_year(-4000));
        assert!(!is_representable_year(300_000));
        assert!(!is_representable_year(i32::MIN));
    }

    #[test]
    fn test_half_hour_slots() {
        let slots = time_slots(30);
        assert_eq!(slots.len(), 48);
        assert_eq!(slots.first().map(String::as_str), Some("00:00"));
        assert_eq!(slots.last().map(String::as_str), Some("23:30"));
        assert_eq!(slots[3], "01:30");
    }

    #[test]
    fn test_slots_with_non_divisor_interval() {
        let slots = time_slots(45);
        assert_eq!(slots.len(), 32);
        assert_eq!(slots[1], "00:45");
        assert_eq!(slots[2], "01:30");
        assert_eq!(slots.last().map(String::as_str), Some("23:15"));
    }

    #[test]
    fn test_zero_interval_is_one_minute() {
        assert_eq!(time_slots(0).len(), 1440);
    }

    #[test]
    fn test_parse_time_slot() {
        assert_eq!(parse_time_slot("14:30"), Some((14, 30)));
        assert_eq!(parse_time_slot("9:05"), Some((9, 5)));
        assert_eq!(parse_time_slot("24:00"), None);
        assert_eq!(parse_time_slot("12:60"), None);
        assert_eq!(parse_time_slot("12:5"), None);
        assert_eq!(parse_time_slot("noon"), None);
        assert_eq!(parse_time_slot("12:+5"), None);
        assert_eq!(parse_time_slot("+9:05"), None);
        assert_eq!(parse_time_slot(""), None);
    }

    #[test]
    fn test_month_names() {
        assert_eq!(month_name(0), Some("January"));
        assert_eq!(month_short_name(8), Some("Sep"));
        assert_eq!(month_name(12), None);
    }

    #[test]
    fn test_year_range() {
        assert_eq!(year_range(2024, 2, 1), vec![2022, 2023, 2024, 2025]);
        assert_eq!(year_range(2024, 0, 0), vec![2024]);
        assert_eq!(year_range(i32::MAX - 1, 0, u32::MAX), vec![i32::MAX - 1, i32::MAX]);
    }
}
