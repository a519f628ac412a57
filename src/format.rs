//! Human-readable rendering of the committed value.
//!
//! Display is derived from the committed value only. An in-progress selection
//! never shows up in the trigger text until it has been emitted and handed back.

use crate::selection::PickerVariant;
use crate::value::parse_value;
use crate::zone::Zone;

const DATE_DISPLAY: &str = "%B %-d, %Y";
const DATE_TIME_DISPLAY: &str = "%b %-d, %Y, %I:%M %p";

/// Render `value` for the trigger control.
///
/// Empty and unparseable values render as the empty string; the caller shows
/// its placeholder instead.
///
/// ```
/// use datedrop::format::format_value;
/// use datedrop::selection::PickerVariant;
/// use datedrop::zone::Zone;
///
/// let utc = Zone::Named(chrono_tz::UTC);
/// assert_eq!(format_value("2024-03-05", PickerVariant::Date, utc), "March 5, 2024");
/// assert_eq!(
///     format_value("2024-03-05T14:30:00.000Z", PickerVariant::DateTime, utc),
///     "Mar 5, 2024, 02:30 PM"
/// );
/// ```
pub fn format_value(value: &str, variant: PickerVariant, zone: Zone) -> String {
    let Some(civil) = parse_value(value, zone) else {
        return String::new();
    };
    let pattern = match variant {
        PickerVariant::Date => DATE_DISPLAY,
        PickerVariant::DateTime => DATE_TIME_DISPLAY,
    };
    civil.format(pattern).to_string()
}

/// Like [`format_value`], falling back to `placeholder` when nothing renders.
pub fn display_or_placeholder(
    value: &str,
    placeholder: &str,
    variant: PickerVariant,
    zone: Zone,
) -> String {
    let formatted = format_value(value, variant, zone);
    if formatted.is_empty() {
        placeholder.to_string()
    } else {
        formatted
    }
}
