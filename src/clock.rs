//! Clock abstraction for "now".
//!
//! The picker core never reads the clock. The clock only feeds the edges: the
//! default span of selectable years, the today marker in the day grid and log
//! timestamps. Swapping in a [`FixedClock`] makes those edges reproducible.

use chrono::{DateTime, Utc};
use once_cell::sync::OnceCell;
use std::sync::Arc;

static CLOCK: OnceCell<Arc<dyn Clock>> = OnceCell::new();

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

/// System time.
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> DateTime<Utc> {
        Utc::now()
    }
}

/// A clock frozen at one instant.
#[derive(Debug)]
pub struct FixedClock {
    instant: DateTime<Utc>,
}

impl FixedClock {
    pub fn new(instant: DateTime<Utc>) -> Self {
        Self { instant }
    }

    /// Parse an RFC 3339 instant such as `2024-03-05T12:00:00Z`.
    pub fn parse(s: &str) -> Result<Self, String> {
        DateTime::parse_from_rfc3339(s.trim())
            .map(|dt| Self::new(dt.with_timezone(&Utc)))
            .map_err(|e| format!("Invalid instant '{s}': {e}. Use RFC 3339, e.g. 2024-03-05T12:00:00Z"))
    }
}

impl Clock for FixedClock {
    fn now(&self) -> DateTime<Utc> {
        self.instant
    }
}

/// Install the process-wide clock. Only the first call wins.
pub fn init_clock(clock: Arc<dyn Clock>) {
    CLOCK.set(clock).ok();
}

pub fn now() -> DateTime<Utc> {
    CLOCK.get_or_init(|| Arc::new(SystemClock)).now()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fixed_clock_parse() {
        let clock = FixedClock::parse("2024-03-05T12:00:00Z").unwrap();
        assert_eq!(clock.now().to_rfc3339(), "2024-03-05T12:00:00+00:00");
    }

    #[test]
    fn test_fixed_clock_parse_error() {
        let err = FixedClock::parse("yesterday").unwrap_err();
        assert!(err.contains("Invalid instant"));
    }

    #[test]
    fn test_fixed_clock_does_not_advance() {
        let clock = FixedClock::parse("2024-03-05T12:00:00+02:00").unwrap();
        assert_eq!(clock.now(), clock.now());
        assert_eq!(clock.now().to_rfc3339(), "2024-03-05T10:00:00+00:00");
    }
}
