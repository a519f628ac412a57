//! Parsing and serializing the committed value string.
//!
//! The committed value is an ISO-8601 string or the empty string. Accepted
//! inputs, in order of preference:
//!
//! - an RFC 3339 instant (`2024-03-05T14:30:00.000Z`, `2024-03-05T15:30:00+01:00`),
//!   converted into the picker's zone;
//! - a civil date-time without offset (`2024-03-05T14:30`, `2024-03-05 14:30:00`),
//!   taken as wall-clock time in the picker's zone;
//! - a bare calendar date (`2024-03-05`), taken as midnight of that date.
//!
//! Anything else is treated as if no value were set.
//!
//! Emission differs per variant: the date-only picker emits `YYYY-MM-DD`, the
//! date-time picker emits the full UTC instant with millisecond precision.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};

use crate::selection::PickerVariant;
use crate::zone::Zone;

const CIVIL_FORMATS: [&str; 4] = [
    "%Y-%m-%dT%H:%M:%S%.f",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S%.f",
    "%Y-%m-%d %H:%M",
];

pub const DATE_FORMAT: &str = "%Y-%m-%d";
pub const INSTANT_FORMAT: &str = "%Y-%m-%dT%H:%M:%S%.3fZ";

/// Parse a committed value into wall-clock time in `zone`.
///
/// Returns `None` for the empty string and for anything unparseable.
pub fn parse_value(value: &str, zone: Zone) -> Option<NaiveDateTime> {
    let value = value.trim();
    if value.is_empty() {
        return None;
    }

    if let Ok(instant) = DateTime::parse_from_rfc3339(value) {
        return Some(zone.to_civil(instant.with_timezone(&Utc)));
    }

    if let Some(civil) = CIVIL_FORMATS
        .iter()
        .find_map(|format| NaiveDateTime::parse_from_str(value, format).ok())
    {
        return Some(civil);
    }

    NaiveDate::parse_from_str(value, DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
}

/// Serialize a complete selection for the given variant.
///
/// Returns `None` only when the wall-clock time cannot be placed in `zone`.
pub fn encode_value(civil: NaiveDateTime, variant: PickerVariant, zone: Zone) -> Option<String> {
    match variant {
        PickerVariant::Date => Some(civil.date().format(DATE_FORMAT).to_string()),
        PickerVariant::DateTime => zone
            .to_utc(civil)
            .map(|instant| instant.format(INSTANT_FORMAT).to_string()),
    }
}

/// Whether `value` would be accepted by [`parse_value`]. The empty string is
/// valid (it means "unset").
pub fn is_valid_value(value: &str) -> bool {
    value.trim().is_empty() || parse_value(value, Zone::Named(chrono_tz::UTC)).is_some()
}
