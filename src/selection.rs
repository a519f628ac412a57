//! Selection state machine for the dropdown pickers.
//!
//! A picker collects a date field by field (year, month, day and, for the
//! date-time variant, a time slot). The fields live in a [`PartialSelection`]
//! that is private to the picker and may be incomplete at any point. Each user
//! gesture becomes a [`SelectionEvent`], and [`transition`] is the single pure
//! function that applies it:
//!
//! ```text
//! Empty ──select──▶ PartialSelecting ──last field──▶ Complete
//!   ▲                      │                            │
//!   └────────── clear ─────┴────────────────────────────┘
//! ```
//!
//! ## Policies
//!
//! - Selecting a month always clears the day, even when the day would still
//!   fit the new month.
//! - Selecting a day requires year and month; selecting a time requires a day.
//!   Out-of-order events are ignored rather than rejected with an error.
//! - Every accepted event that leaves the selection complete emits a value,
//!   so changing the year of a complete selection re-emits.
//! - `Clear` always emits the empty string.

use chrono::{NaiveDate, NaiveDateTime};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::calendar::{days_in_month, format_slot, is_representable_year, parse_time_slot};
use crate::constants::MONTHS_PER_YEAR;
use crate::value::{encode_value, parse_value};
use crate::zone::Zone;

/// Which fields a picker collects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PickerVariant {
    /// Year, month and day; emits `YYYY-MM-DD`.
    #[default]
    Date,
    /// Year, month, day and time slot; emits a full UTC instant.
    #[serde(alias = "date_time", alias = "date-time")]
    DateTime,
}

impl PickerVariant {
    pub fn as_str(&self) -> &'static str {
        match self {
            PickerVariant::Date => "date",
            PickerVariant::DateTime => "datetime",
        }
    }

    pub fn has_time(&self) -> bool {
        matches!(self, PickerVariant::DateTime)
    }
}

/// Coarse state derived from a selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionPhase {
    /// No field is set.
    Empty,
    /// Some, but not all, required fields are set.
    PartialSelecting,
    /// Every field the variant requires is set.
    Complete,
}

impl fmt::Display for SelectionPhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SelectionPhase::Empty => write!(f, "Empty"),
            SelectionPhase::PartialSelecting => write!(f, "Selecting"),
            SelectionPhase::Complete => write!(f, "Complete"),
        }
    }
}

/// The picker's in-progress selection. Months are zero-based.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct PartialSelection {
    pub year: Option<i32>,
    pub month: Option<u32>,
    pub day: Option<u32>,
    pub time: Option<String>,
}

impl PartialSelection {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a selection from a committed value.
    ///
    /// Returns `None` for empty or unparseable values. The date-only variant
    /// never carries a time.
    pub fn from_value(value: &str, variant: PickerVariant, zone: Zone) -> Option<Self> {
        use chrono::{Datelike, Timelike};

        let civil = parse_value(value, zone)?;
        Some(Self {
            year: Some(civil.year()),
            month: Some(civil.month0()),
            day: Some(civil.day()),
            time: variant
                .has_time()
                .then(|| format_slot(civil.hour(), civil.minute())),
        })
    }

    pub fn is_empty(&self) -> bool {
        self.year.is_none() && self.month.is_none() && self.day.is_none() && self.time.is_none()
    }

    pub fn is_complete(&self, variant: PickerVariant) -> bool {
        let date_set = self.year.is_some() && self.month.is_some() && self.day.is_some();
        match variant {
            PickerVariant::Date => date_set,
            PickerVariant::DateTime => date_set && self.time.is_some(),
        }
    }

    pub fn phase(&self, variant: PickerVariant) -> SelectionPhase {
        if self.is_complete(variant) {
            SelectionPhase::Complete
        } else if self.is_empty() {
            SelectionPhase::Empty
        } else {
            SelectionPhase::PartialSelecting
        }
    }

    /// Civil date-time of a complete selection; date-only uses midnight.
    pub fn civil(&self, variant: PickerVariant) -> Option<NaiveDateTime> {
        if !self.is_complete(variant) {
            return None;
        }
        let date = NaiveDate::from_ymd_opt(self.year?, self.month? + 1, self.day?)?;
        let (hours, minutes) = match variant {
            PickerVariant::Date => (0, 0),
            PickerVariant::DateTime => parse_time_slot(self.time.as_deref()?)?,
        };
        date.and_hms_opt(hours, minutes, 0)
    }

    /// Number of days offered for the current year and month, if both are set.
    pub fn days_available(&self) -> Option<u32> {
        Some(days_in_month(self.year?, self.month? as i32))
    }
}

/// One user gesture against the selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "event", content = "value", rename_all = "snake_case")]
pub enum SelectionEvent {
    /// Keeps month, day and time, except that a day the new year lacks
    /// (29 February) is cleared. Years chrono cannot represent are ignored.
    SelectYear(i32),
    /// Zero-based month.
    SelectMonth(u32),
    SelectDay(u32),
    /// `"HH:MM"` slot.
    SelectTime(String),
    Clear,
}

/// Result of applying one event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub selection: PartialSelection,
    /// New committed value to hand to the caller, if any.
    pub emitted: Option<String>,
    /// Whether the event changed anything or was ignored.
    pub accepted: bool,
}

impl Transition {
    fn ignored(selection: &PartialSelection) -> Self {
        Self {
            selection: selection.clone(),
            emitted: None,
            accepted: false,
        }
    }
}

/// Apply `event` to `selection`.
///
/// Pure: the input is not modified and the outcome depends only on the
/// arguments. Ignored events return an unchanged selection and no emission.
pub fn transition(
    selection: &PartialSelection,
    variant: PickerVariant,
    zone: Zone,
    event: SelectionEvent,
) -> Transition {
    let mut next = selection.clone();

    match event {
        SelectionEvent::Clear => {
            return Transition {
                selection: PartialSelection::new(),
                emitted: Some(String::new()),
                accepted: true,
            };
        }
        SelectionEvent::SelectYear(year) => {
            if !is_representable_year(year) {
                return Transition::ignored(selection);
            }
            next.year = Some(year);
        }
        SelectionEvent::SelectMonth(month) => {
            if month >= MONTHS_PER_YEAR {
                return Transition::ignored(selection);
            }
            next.month = Some(month);
            next.day = None;
        }
        SelectionEvent::SelectDay(day) => {
            let Some(available) = selection.days_available() else {
                return Transition::ignored(selection);
            };
            if day == 0 || day > available {
                return Transition::ignored(selection);
            }
            next.day = Some(day);
        }
        SelectionEvent::SelectTime(time) => {
            if !variant.has_time() || selection.day.is_none() {
                return Transition::ignored(selection);
            }
            let Some((hours, minutes)) = parse_time_slot(&time) else {
                return Transition::ignored(selection);
            };
            next.time = Some(format_slot(hours, minutes));
        }
    }

    // A changed year can shorten February under an already chosen day.
    if let (Some(day), Some(available)) = (next.day, next.days_available())
        && day > available
    {
        next.day = None;
    }

    let emitted = next
        .civil(variant)
        .and_then(|civil| encode_value(civil, variant, zone));
    // A complete selection must emit, so refuse results that cannot be encoded
    if next.is_complete(variant) && emitted.is_none() {
        return Transition::ignored(selection);
    }

    Transition {
        selection: next,
        emitted,
        accepted: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::test_constants::*;

    const UTC: Zone = Zone::Named(chrono_tz::UTC);

    fn apply(
        selection: &PartialSelection,
        variant: PickerVariant,
        events: Vec<SelectionEvent>,
    ) -> (PartialSelection, Vec<String>) {
        let mut current = selection.clone();
        let mut emitted = Vec::new();
        for event in events {
            let step = transition(&current, variant, UTC, event);
            emitted.extend(step.emitted);
            current = step.selection;
        }
        (current, emitted)
    }

    #[test]
    fn test_date_selection_completes_once() {
        let start = PartialSelection::new();
        assert_eq!(start.phase(PickerVariant::Date), SelectionPhase::Empty);

        let step = transition(&start, PickerVariant::Date, UTC, SelectionEvent::SelectYear(2024));
        assert_eq!(step.selection.phase(PickerVariant::Date), SelectionPhase::PartialSelecting);
        assert_eq!(step.emitted, None);

        let (selection, emitted) = apply(
            &step.selection,
            PickerVariant::Date,
            vec![SelectionEvent::SelectMonth(TEST_MARCH), SelectionEvent::SelectDay(5)],
        );
        assert_eq!(selection.phase(PickerVariant::Date), SelectionPhase::Complete);
        assert_eq!(emitted, vec!["2024-03-05".to_string()]);
    }

    #[test]
    fn test_date_time_selection_waits_for_time() {
        let (selection, emitted) = apply(
            &PartialSelection::new(),
            PickerVariant::DateTime,
            vec![
                SelectionEvent::SelectYear(2024),
                SelectionEvent::SelectMonth(TEST_MARCH),
                SelectionEvent::SelectDay(5),
            ],
        );
        assert!(emitted.is_empty());
        assert_eq!(
            selection.phase(PickerVariant::DateTime),
            SelectionPhase::PartialSelecting
        );

        let step = transition(
            &selection,
            PickerVariant::DateTime,
            UTC,
            SelectionEvent::SelectTime("14:30".to_string()),
        );
        assert_eq!(step.emitted.as_deref(), Some("2024-03-05T14:30:00.000Z"));
    }

    #[test]
    fn test_month_change_always_clears_day() {
        let (selection, _) = apply(
            &PartialSelection::new(),
            PickerVariant::Date,
            vec![
                SelectionEvent::SelectYear(2024),
                SelectionEvent::SelectMonth(TEST_MARCH),
                SelectionEvent::SelectDay(5),
                SelectionEvent::SelectMonth(TEST_APRIL),
            ],
        );
        assert_eq!(selection.day, None);
        assert_eq!(selection.month, Some(TEST_APRIL));
        assert_eq!(selection.phase(PickerVariant::Date), SelectionPhase::PartialSelecting);
    }

    #[test]
    fn test_month_change_keeps_time() {
        let selection = PartialSelection {
            year: Some(2024),
            month: Some(TEST_MARCH),
            day: Some(5),
            time: Some("09:00".to_string()),
        };
        let step = transition(
            &selection,
            PickerVariant::DateTime,
            UTC,
            SelectionEvent::SelectMonth(TEST_APRIL),
        );
        assert_eq!(step.selection.time.as_deref(), Some("09:00"));
        assert_eq!(step.selection.day, None);
        assert_eq!(step.emitted, None);
    }

    #[test]
    fn test_day_before_month_is_ignored() {
        let start = PartialSelection {
            year: Some(2024),
            ..PartialSelection::new()
        };
        let step = transition(&start, PickerVariant::Date, UTC, SelectionEvent::SelectDay(5));
        assert!(!step.accepted);
        assert_eq!(step.selection, start);
        assert_eq!(step.emitted, None);

        let step = transition(
            &PartialSelection::new(),
            PickerVariant::Date,
            UTC,
            SelectionEvent::SelectDay(5),
        );
        assert!(step.selection.is_empty());
    }

    #[test]
    fn test_day_out_of_month_is_ignored() {
        let start = PartialSelection {
            year: Some(TEST_COMMON_YEAR),
            month: Some(TEST_FEBRUARY),
            ..PartialSelection::new()
        };
        assert!(!transition(&start, PickerVariant::Date, UTC, SelectionEvent::SelectDay(29)).accepted);
        assert!(!transition(&start, PickerVariant::Date, UTC, SelectionEvent::SelectDay(0)).accepted);
        assert!(transition(&start, PickerVariant::Date, UTC, SelectionEvent::SelectDay(28)).accepted);
    }

    #[test]
    fn test_time_rules() {
        let no_day = PartialSelection {
            year: Some(2024),
            month: Some(0),
            ..PartialSelection::new()
        };
        let event = SelectionEvent::SelectTime("10:00".to_string());
        assert!(!transition(&no_day, PickerVariant::DateTime, UTC, event.clone()).accepted);

        let with_day = PartialSelection {
            day: Some(1),
            ..no_day
        };
        assert!(!transition(&with_day, PickerVariant::Date, UTC, event).accepted);
        assert!(
            !transition(
                &with_day,
                PickerVariant::DateTime,
                UTC,
                SelectionEvent::SelectTime("25:00".to_string())
            )
            .accepted
        );

        let step = transition(
            &with_day,
            PickerVariant::DateTime,
            UTC,
            SelectionEvent::SelectTime("7:05".to_string()),
        );
        assert_eq!(step.selection.time.as_deref(), Some("07:05"));
    }

    #[test]
    fn test_invalid_month_is_ignored() {
        let step = transition(
            &PartialSelection::new(),
            PickerVariant::Date,
            UTC,
            SelectionEvent::SelectMonth(12),
        );
        assert!(!step.accepted);
    }

    #[test]
    fn test_complete_selection_re_emits_on_year_change() {
        let (selection, emitted) = apply(
            &PartialSelection::new(),
            PickerVariant::Date,
            vec![
                SelectionEvent::SelectYear(2024),
                SelectionEvent::SelectMonth(0),
                SelectionEvent::SelectDay(15),
                SelectionEvent::SelectYear(2025),
            ],
        );
        assert_eq!(emitted, vec!["2024-01-15".to_string(), "2025-01-15".to_string()]);
        assert_eq!(selection.year, Some(2025));
    }

    #[test]
    fn test_year_change_drops_leap_day() {
        let selection = PartialSelection {
            year: Some(TEST_LEAP_YEAR),
            month: Some(TEST_FEBRUARY),
            day: Some(29),
            time: None,
        };
        let step = transition(
            &selection,
            PickerVariant::Date,
            UTC,
            SelectionEvent::SelectYear(TEST_COMMON_YEAR),
        );
        assert_eq!(step.selection.day, None);
        assert_eq!(step.emitted, None);
    }

    #[test]
    fn test_clear_from_any_state() {
        for start in [
            PartialSelection::new(),
            PartialSelection {
                year: Some(2024),
                ..PartialSelection::new()
            },
            PartialSelection {
                year: Some(2024),
                month: Some(1),
                day: Some(2),
                time: Some("03:00".to_string()),
            },
        ] {
            let step = transition(&start, PickerVariant::DateTime, UTC, SelectionEvent::Clear);
            assert_eq!(step.emitted.as_deref(), Some(""));
            assert_eq!(step.selection.phase(PickerVariant::DateTime), SelectionPhase::Empty);
        }
    }

    #[test]
    fn test_from_value_round_trip() {
        let seeded = PartialSelection::from_value(
            "2024-03-05T14:30:00.000Z",
            PickerVariant::DateTime,
            UTC,
        )
        .unwrap();
        assert_eq!(seeded.year, Some(2024));
        assert_eq!(seeded.month, Some(TEST_MARCH));
        assert_eq!(seeded.day, Some(5));
        assert_eq!(seeded.time.as_deref(), Some("14:30"));

        let date_only = PartialSelection::from_value("2024-03-05", PickerVariant::Date, UTC).unwrap();
        assert_eq!(date_only.time, None);
        assert!(PartialSelection::from_value("garbage", PickerVariant::Date, UTC).is_none());
    }

    #[test]
    fn test_event_serialization() {
        let json = serde_json::to_string(&SelectionEvent::SelectMonth(2)).unwrap();
        assert_eq!(json, r#"{"event":"select_month","value":2}"#);
        let clear: SelectionEvent = serde_json::from_str(r#"{"event":"clear"}"#).unwrap();
        assert_eq!(clear, SelectionEvent::Clear);
    }

    #[test]
    fn test_variant_deserialization() {
        #[derive(Deserialize)]
        struct Wrapper {
            variant: PickerVariant,
        }
        let parsed: Wrapper = toml::from_str(r#"variant = "date_time""#).unwrap();
        assert_eq!(parsed.variant, PickerVariant::DateTime);
        let parsed: Wrapper = toml::from_str(r#"variant = "date""#).unwrap();
        assert_eq!(parsed.variant, PickerVariant::Date);
    }

    #[test]
    fn test_unrepresentable_year_is_ignored() {
        let step = transition(
            &PartialSelection::new(),
            PickerVariant::Date,
            UTC,
            SelectionEvent::SelectYear(300_000),
        );
        assert!(!step.accepted);
        assert!(step.selection.is_empty());

        let (selection, emitted) = apply(
            &PartialSelection::new(),
            PickerVariant::Date,
            vec![
                SelectionEvent::SelectYear(300_000),
                SelectionEvent::SelectMonth(0),
                SelectionEvent::SelectDay(1),
            ],
        );
        assert_eq!(selection.year, None);
        assert_ne!(selection.phase(PickerVariant::Date), SelectionPhase::Complete);
        assert!(emitted.is_empty());
    }
}
