//! Time zone used to interpret civil date-times.
//!
//! The picker builds a civil (wall-clock) date-time from the user's selections.
//! Turning that into an instant, and turning a committed instant back into
//! dropdown fields, needs a zone: either the system's local zone or a named
//! IANA zone from the configuration.

use anyhow::Result;
use chrono::{DateTime, Duration, Local, LocalResult, NaiveDateTime, TimeZone, Utc};
use chrono_tz::Tz;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Zone {
    /// The zone of the machine running the picker.
    #[default]
    Local,
    /// A fixed IANA zone such as `Europe/Berlin`.
    Named(Tz),
}

impl Zone {
    /// Parse a zone name. `"local"` (any case) selects the system zone.
    pub fn parse(name: &str) -> Result<Self> {
        let trimmed = name.trim();
        if trimmed.eq_ignore_ascii_case("local") {
            return Ok(Zone::Local);
        }
        trimmed
            .parse::<Tz>()
            .map(Zone::Named)
            .map_err(|e| anyhow::anyhow!("Unknown timezone '{trimmed}': {e}"))
    }

    /// Resolve a wall-clock time in this zone to an instant.
    ///
    /// Ambiguous times (clocks going back) resolve to the earlier instant.
    /// Times inside a spring-forward gap are pushed forward by one hour, which
    /// lands on the first valid wall-clock time after the gap for the usual
    /// one-hour shifts.
    pub fn to_utc(&self, civil: NaiveDateTime) -> Option<DateTime<Utc>> {
        match self.resolve(civil) {
            LocalResult::None => self.resolve(civil + Duration::hours(1)).earliest(),
            resolved => resolved.earliest(),
        }
    }

    /// Wall-clock time of `instant` in this zone.
    pub fn to_civil(&self, instant: DateTime<Utc>) -> NaiveDateTime {
        match self {
            Zone::Local => instant.with_timezone(&Local).naive_local(),
            Zone::Named(tz) => instant.with_timezone(tz).naive_local(),
        }
    }

    /// Current wall-clock time in this zone, taken from the global clock.
    pub fn now(&self) -> NaiveDateTime {
        self.to_civil(crate::clock::now())
    }

    fn resolve(&self, civil: NaiveDateTime) -> LocalResult<DateTime<Utc>> {
        match self {
            Zone::Local => Local
                .from_local_datetime(&civil)
                .map(|dt| dt.with_timezone(&Utc)),
            Zone::Named(tz) => tz
                .from_local_datetime(&civil)
                .map(|dt| dt.with_timezone(&Utc)),
        }
    }
}

impl fmt::Display for Zone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Zone::Local => write!(f, "local"),
            Zone::Named(tz) => write!(f, "{}", tz.name()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn civil(y: i32, m: u32, d: u32, h: u32, min: u32) -> NaiveDateTime {
        NaiveDate::from_ymd_opt(y, m, d)
            .unwrap()
            .and_hms_opt(h, min, 0)
            .unwrap()
    }

    #[test]
    fn test_parse_names() {
        assert_eq!(Zone::parse("local").unwrap(), Zone::Local);
        assert_eq!(Zone::parse(" LOCAL ").unwrap(), Zone::Local);
        assert_eq!(
            Zone::parse("Asia/Tokyo").unwrap(),
            Zone::Named(chrono_tz::Asia::Tokyo)
        );
        assert!(Zone::parse("Mars/Olympus_Mons").is_err());
    }

    #[test]
    fn test_named_zone_round_trip() {
        let zone = Zone::Named(chrono_tz::America::New_York);
        let wall = civil(2024, 7, 4, 9, 30);
        let instant = zone.to_utc(wall).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-07-04T13:30:00+00:00");
        assert_eq!(zone.to_civil(instant), wall);
    }

    #[test]
    fn test_spring_forward_gap_moves_forward() {
        let zone = Zone::Named(chrono_tz::America::New_York);
        // 02:30 does not exist on 2024-03-10 in New York
        let instant = zone.to_utc(civil(2024, 3, 10, 2, 30)).unwrap();
        assert_eq!(zone.to_civil(instant), civil(2024, 3, 10, 3, 30));
    }

    #[test]
    fn test_fall_back_picks_earlier_instant() {
        let zone = Zone::Named(chrono_tz::America::New_York);
        let instant = zone.to_utc(civil(2024, 11, 3, 1, 30)).unwrap();
        assert_eq!(instant.to_rfc3339(), "2024-11-03T05:30:00+00:00");
    }

    #[test]
    fn test_display() {
        assert_eq!(Zone::Local.to_string(), "local");
        assert_eq!(Zone::Named(chrono_tz::UTC).to_string(), "UTC");
    }
}
