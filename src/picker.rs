//! Dropdown picker controller.
//!
//! [`DropdownPicker`] is one mounted picker instance. It owns the panel's open
//! state, the in-progress [`PartialSelection`] and the pointer subscription used
//! to detect clicks outside the picker. The committed value is owned by the
//! caller: the picker only proposes new values through its change callback and
//! learns about the caller's decision through [`DropdownPicker::set_value`].
//!
//! ```
//! use datedrop::picker::{DropdownPicker, PickerSettings};
//! use datedrop::pointer::PointerHub;
//! use datedrop::selection::PickerVariant;
//!
//! let hub = PointerHub::new();
//! let settings = PickerSettings::new(PickerVariant::Date);
//! let mut picker = DropdownPicker::mount(settings, "", &hub, |_| {}).unwrap();
//!
//! picker.toggle();
//! picker.select_year(2024);
//! picker.select_month(2);
//! let emitted = picker.select_day(5);
//! assert_eq!(emitted.as_deref(), Some("2024-03-05"));
//! ```

use anyhow::{Context, Result};
use serde::Serialize;

use crate::constants::{
    DEFAULT_DATE_PLACEHOLDER, DEFAULT_DATE_TIME_PLACEHOLDER, DEFAULT_TIME_INTERVAL,
    DEFAULT_YEARS_AFTER, DEFAULT_YEARS_BEFORE, MAXIMUM_YEAR_SPAN,
};
use crate::format::display_or_placeholder;
use crate::pointer::{PointerEvent, PointerEventSource, PointerSubscription, Rect};
use crate::selection::{PartialSelection, PickerVariant, SelectionEvent, SelectionPhase, transition};
use crate::zone::Zone;

/// Resolved per-instance settings.
#[derive(Debug, Clone, PartialEq)]
pub struct PickerSettings {
    pub variant: PickerVariant,
    pub placeholder: String,
    pub disabled: bool,
    /// Minutes between time slots (date-time variant).
    pub time_interval: u32,
    pub zone: Zone,
    /// First and last selectable year in the year dropdown.
    pub years: (i32, i32),
    /// Close the panel once a selection completes.
    pub close_on_complete: bool,
}

impl PickerSettings {
    /// Defaults for `variant`, with the year span centred on the clock's year.
    pub fn new(variant: PickerVariant) -> Self {
        use chrono::Datelike;

        let zone = Zone::Local;
        let current_year = zone.now().year();
        Self {
            variant,
            placeholder: default_placeholder(variant).to_string(),
            disabled: false,
            time_interval: DEFAULT_TIME_INTERVAL,
            zone,
            years: (
                current_year - DEFAULT_YEARS_BEFORE as i32,
                current_year + DEFAULT_YEARS_AFTER as i32,
            ),
            close_on_complete: false,
        }
    }

    pub fn with_zone(mut self, zone: Zone) -> Self {
        self.zone = zone;
        self
    }

    pub fn with_placeholder(mut self, placeholder: impl Into<String>) -> Self {
        self.placeholder = placeholder.into();
        self
    }

    pub fn with_disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    pub fn with_time_interval(mut self, minutes: u32) -> Self {
        self.time_interval = minutes;
        self
    }

    /// Year dropdown bounds, in either order. Spans wider than the
    /// configurable maximum on both sides are cut at the end.
    pub fn with_years(mut self, first: i32, last: i32) -> Self {
        let (first, last) = (first.min(last), first.max(last));
        let widest = first.saturating_add_unsigned(2 * MAXIMUM_YEAR_SPAN);
        self.years = (first, last.min(widest));
        self
    }

    pub fn with_close_on_complete(mut self, close: bool) -> Self {
        self.close_on_complete = close;
        self
    }
}

pub fn default_placeholder(variant: PickerVariant) -> &'static str {
    match variant {
        PickerVariant::Date => DEFAULT_DATE_PLACEHOLDER,
        PickerVariant::DateTime => DEFAULT_DATE_TIME_PLACEHOLDER,
    }
}

/// Serializable view of a picker for scripting and diagnostics.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PickerSnapshot {
    pub variant: PickerVariant,
    pub value: String,
    pub display: String,
    pub phase: SelectionPhase,
    pub open: bool,
    pub disabled: bool,
    pub selection: PartialSelection,
}

type ChangeCallback = Box<dyn FnMut(&str)>;

/// One mounted picker instance.
pub struct DropdownPicker {
    settings: PickerSettings,
    value: String,
    selection: PartialSelection,
    open: bool,
    bounds: Option<Rect>,
    subscription: Option<PointerSubscription>,
    on_change: ChangeCallback,
}

impl DropdownPicker {
    /// Mount a picker showing `value` and subscribe to `source`.
    pub fn mount<F>(
        settings: PickerSettings,
        value: &str,
        source: &dyn PointerEventSource,
        on_change: F,
    ) -> Result<Self>
    where
        F: FnMut(&str) + 'static,
    {
        let subscription = source
            .subscribe()
            .context("Failed to subscribe to pointer events")?;

        let selection =
            PartialSelection::from_value(value, settings.variant, settings.zone).unwrap_or_default();

        log_debug!(
            "Mounted {} picker (listener {}) with value '{}'",
            settings.variant.as_str(),
            subscription.id(),
            value
        );

        Ok(Self {
            settings,
            value: value.to_string(),
            selection,
            open: false,
            bounds: None,
            subscription: Some(subscription),
            on_change: Box::new(on_change),
        })
    }

    /// Tear the picker down, releasing its pointer subscription.
    pub fn unmount(self) {}

    pub fn settings(&self) -> &PickerSettings {
        &self.settings
    }

    pub fn value(&self) -> &str {
        &self.value
    }

    pub fn selection(&self) -> &PartialSelection {
        &self.selection
    }

    pub fn phase(&self) -> SelectionPhase {
        self.selection.phase(self.settings.variant)
    }

    pub fn is_open(&self) -> bool {
        self.open
    }

    pub fn is_disabled(&self) -> bool {
        self.settings.disabled
    }

    /// Text for the trigger control.
    pub fn display(&self) -> String {
        display_or_placeholder(
            &self.value,
            &self.settings.placeholder,
            self.settings.variant,
            self.settings.zone,
        )
    }

    pub fn snapshot(&self) -> PickerSnapshot {
        PickerSnapshot {
            variant: self.settings.variant,
            value: self.value.clone(),
            display: self.display(),
            phase: self.phase(),
            open: self.open,
            disabled: self.settings.disabled,
            selection: self.selection.clone(),
        }
    }

    // # Panel

    /// Trigger activation: flip the panel. Ignored while disabled.
    pub fn toggle(&mut self) {
        if self.settings.disabled {
            return;
        }
        self.set_open(!self.open);
    }

    pub fn open(&mut self) {
        if !self.settings.disabled {
            self.set_open(true);
        }
    }

    pub fn close(&mut self) {
        self.set_open(false);
    }

    /// Disabling also closes the panel.
    pub fn set_disabled(&mut self, disabled: bool) {
        self.settings.disabled = disabled;
        if disabled {
            self.set_open(false);
        }
    }

    /// Area the picker currently occupies on screen.
    pub fn set_bounds(&mut self, bounds: Rect) {
        self.bounds = Some(bounds);
    }

    pub fn bounds(&self) -> Option<Rect> {
        self.bounds
    }

    /// Close the panel if `event` landed outside the picker.
    ///
    /// Without reported bounds every event counts as outside. Returns whether
    /// the panel was closed by this event.
    pub fn handle_pointer(&mut self, event: &PointerEvent) -> bool {
        if !self.open {
            return false;
        }
        let inside = self
            .bounds
            .is_some_and(|bounds| bounds.contains(event.position));
        if inside {
            return false;
        }
        log_debug!(
            "Pointer at ({}, {}) outside picker, closing panel",
            event.position.x,
            event.position.y
        );
        self.set_open(false);
        true
    }

    /// Apply every pointer event queued on the subscription.
    pub fn pump_pointer_events(&mut self) -> usize {
        let events = match &self.subscription {
            Some(subscription) => subscription.drain(),
            None => Vec::new(),
        };
        for event in &events {
            self.handle_pointer(event);
        }
        events.len()
    }

    fn set_open(&mut self, open: bool) {
        if self.open != open {
            log_debug!("Panel {}", if open { "opened" } else { "closed" });
        }
        self.open = open;
    }

    // # Value synchronization

    /// The caller's committed value changed.
    ///
    /// A new non-empty, parseable value re-seeds the selection so reopening the
    /// panel shows it. Empty or malformed values leave an in-progress selection
    /// alone.
    pub fn set_value(&mut self, value: &str) {
        if value == self.value {
            return;
        }
        self.value = value.to_string();
        if let Some(seeded) =
            PartialSelection::from_value(value, self.settings.variant, self.settings.zone)
        {
            self.selection = seeded;
        }
    }

    // # Selection

    pub fn select_year(&mut self, year: i32) -> Option<String> {
        self.apply(SelectionEvent::SelectYear(year))
    }

    /// Zero-based month.
    pub fn select_month(&mut self, month: u32) -> Option<String> {
        self.apply(SelectionEvent::SelectMonth(month))
    }

    pub fn select_day(&mut self, day: u32) -> Option<String> {
        self.apply(SelectionEvent::SelectDay(day))
    }

    pub fn select_time(&mut self, time: &str) -> Option<String> {
        self.apply(SelectionEvent::SelectTime(time.to_string()))
    }

    /// Reset everything, emit the empty value and close the panel.
    pub fn clear(&mut self) -> Option<String> {
        self.apply(SelectionEvent::Clear)
    }

    /// Run one event through the state machine.
    ///
    /// Returns the emitted value, which has also been passed to the change
    /// callback. Disabled pickers ignore every event.
    pub fn apply(&mut self, event: SelectionEvent) -> Option<String> {
        if self.settings.disabled {
            return None;
        }

        let is_clear = event == SelectionEvent::Clear;
        let step = transition(&self.selection, self.settings.variant, self.settings.zone, event);
        if !step.accepted {
            log_debug!("Ignored out-of-order selection");
            return None;
        }
        self.selection = step.selection;

        if is_clear || (step.emitted.is_some() && self.settings.close_on_complete) {
            self.set_open(false);
        }

        if let Some(value) = &step.emitted {
            log_debug!("Emitting '{value}'");
            (self.on_change)(value);
        }
        step.emitted
    }
}

impl Drop for DropdownPicker {
    fn drop(&mut self) {
        if let Some(subscription) = self.subscription.take() {
            log_debug!("Releasing pointer listener {}", subscription.id());
        }
    }
}
