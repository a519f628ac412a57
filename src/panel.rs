//! Render-ready projection of a picker's dropdown panel.
//!
//! The rendering layer draws a [`PanelView`] and forwards clicks on its options
//! back to the picker as selection calls. Nothing here mutates the picker.

use chrono::{Datelike, NaiveDate};
use serde::Serialize;

use crate::calendar::{days_in_month, month_name, time_slots, year_range};
use crate::picker::DropdownPicker;

/// One entry of a dropdown column.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelOption<T> {
    pub value: T,
    pub label: String,
    pub selected: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PanelView {
    pub open: bool,
    pub years: Vec<PanelOption<i32>>,
    pub months: Vec<PanelOption<u32>>,
    /// Empty until year and month are chosen.
    pub days: Vec<PanelOption<u32>>,
    /// Empty for the date-only variant.
    pub times: Vec<PanelOption<String>>,
    /// Whether the time column accepts clicks yet.
    pub times_enabled: bool,
    /// Day of month to highlight as today, when the shown month is today's.
    pub today: Option<u32>,
}

impl PanelView {
    pub fn project(picker: &DropdownPicker, today: NaiveDate) -> Self {
        let settings = picker.settings();
        let selection = picker.selection();

        let (first, last) = settings.years;
        let mut year_values = year_range(first, 0, last.abs_diff(first));
        if let Some(year) = selection.year
            && !year_values.contains(&year)
        {
            year_values.push(year);
            year_values.sort_unstable();
        }
        let years = year_values
            .into_iter()
            .map(|year| PanelOption {
                value: year,
                label: year.to_string(),
                selected: selection.year == Some(year),
            })
            .collect();

        let months = (0..12)
            .map(|month| PanelOption {
                value: month,
                label: month_name(month).unwrap_or_default().to_string(),
                selected: selection.month == Some(month),
            })
            .collect();

        let days = match (selection.year, selection.month) {
            (Some(year), Some(month)) => (1..=days_in_month(year, month as i32))
                .map(|day| PanelOption {
                    value: day,
                    label: day.to_string(),
                    selected: selection.day == Some(day),
                })
                .collect(),
            _ => Vec::new(),
        };

        let times = if settings.variant.has_time() {
            let mut slots = time_slots(settings.time_interval);
            // Keep an off-grid committed time visible
            if let Some(time) = &selection.time
                && !slots.contains(time)
            {
                slots.push(time.clone());
                slots.sort();
            }
            slots
                .into_iter()
                .map(|slot| PanelOption {
                    selected: selection.time.as_ref() == Some(&slot),
                    label: slot.clone(),
                    value: slot,
                })
                .collect()
        } else {
            Vec::new()
        };

        let today = match (selection.year, selection.month) {
            (Some(year), Some(month)) if year == today.year() && month == today.month0() => {
                Some(today.day())
            }
            _ => None,
        };

        Self {
            open: picker.is_open(),
            years,
            months,
            days,
            times,
            times_enabled: settings.variant.has_time() && selection.day.is_some(),
            today,
        }
    }
}
