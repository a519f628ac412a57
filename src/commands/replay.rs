//! `replay` command: drive a picker from a script of events.
//!
//! One step per line; blank lines and `#` comments are skipped:
//!
//! ```text
//! bounds 0 0 240 320   # rendered area of the picker
//! open
//! year 2024
//! month 2              # zero-based: March
//! day 5
//! time 14:30
//! click 500 20         # outside: closes the panel
//! value 2024-04-01     # the caller commits a different value
//! clear
//! ```
//!
//! Emitted values are handed straight back to the picker as the committed
//! value, the way a caller storing the value in its own state would.

use anyhow::{Context, Result};
use std::cell::RefCell;
use std::path::Path;
use std::rc::Rc;

use crate::picker::{DropdownPicker, PickerSettings, PickerSnapshot};
use crate::pointer::{PointerEvent, PointerHub, Rect};
use crate::selection::SelectionEvent;

/// One line of a replay script.
#[derive(Debug, Clone, PartialEq)]
pub enum ScriptStep {
    Select(SelectionEvent),
    Open,
    Close,
    Toggle,
    Click { x: f32, y: f32 },
    Bounds(Rect),
    Value(String),
    Disable(bool),
}

impl ScriptStep {
    pub fn parse(line: &str) -> Result<Option<Self>> {
        let line = line.split('#').next().unwrap_or_default().trim();
        if line.is_empty() {
            return Ok(None);
        }

        let mut words = line.split_whitespace();
        let command = words.next().unwrap_or_default().to_ascii_lowercase();
        let args: Vec<&str> = words.collect();

        let step = match (command.as_str(), args.as_slice()) {
            ("year", [year]) => ScriptStep::Select(SelectionEvent::SelectYear(number(year)?)),
            ("month", [month]) => ScriptStep::Select(SelectionEvent::SelectMonth(number(month)?)),
            ("day", [day]) => ScriptStep::Select(SelectionEvent::SelectDay(number(day)?)),
            ("time", [time]) => ScriptStep::Select(SelectionEvent::SelectTime(time.to_string())),
            ("clear", []) => ScriptStep::Select(SelectionEvent::Clear),
            ("open", []) => ScriptStep::Open,
            ("close", []) => ScriptStep::Close,
            ("toggle", []) => ScriptStep::Toggle,
            ("click", [x, y]) => ScriptStep::Click {
                x: number(x)?,
                y: number(y)?,
            },
            ("bounds", [x, y, width, height]) => ScriptStep::Bounds(Rect::new(
                number(x)?,
                number(y)?,
                number(width)?,
                number(height)?,
            )),
            ("value", []) => ScriptStep::Value(String::new()),
            ("value", [value]) => ScriptStep::Value(value.to_string()),
            ("disable", []) => ScriptStep::Disable(true),
            ("enable", []) => ScriptStep::Disable(false),
            _ => anyhow::bail!("Unrecognized step '{line}'"),
        };
        Ok(Some(step))
    }
}

fn number<T>(word: &str) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::error::Error + Send + Sync + 'static,
{
    word.parse::<T>()
        .with_context(|| format!("Invalid number '{word}'"))
}

/// Parse a whole script, reporting the failing line number.
pub fn parse_script(content: &str) -> Result<Vec<ScriptStep>> {
    let mut steps = Vec::new();
    for (index, line) in content.lines().enumerate() {
        if let Some(step) =
            ScriptStep::parse(line).with_context(|| format!("Line {}", index + 1))?
        {
            steps.push(step);
        }
    }
    Ok(steps)
}

/// Outcome of a replay.
#[derive(Debug, Default)]
pub struct ReplayReport {
    /// Every value passed to the change callback, in order.
    pub emissions: Vec<String>,
    /// Picker state after each step.
    pub snapshots: Vec<PickerSnapshot>,
}

/// Run `steps` against a freshly mounted picker.
pub fn replay(settings: PickerSettings, initial: &str, steps: &[ScriptStep]) -> Result<ReplayReport> {
    let hub = PointerHub::new();
    let emissions = Rc::new(RefCell::new(Vec::new()));
    let sink = emissions.clone();
    let mut picker = DropdownPicker::mount(settings, initial, &hub, move |value| {
        sink.borrow_mut().push(value.to_string());
    })?;

    let mut snapshots = Vec::with_capacity(steps.len());
    for step in steps {
        match step {
            ScriptStep::Select(event) => {
                if let Some(value) = picker.apply(event.clone()) {
                    log_decorated!("Emitted \"{value}\"");
                    picker.set_value(&value);
                }
            }
            ScriptStep::Open => picker.open(),
            ScriptStep::Close => picker.close(),
            ScriptStep::Toggle => picker.toggle(),
            ScriptStep::Click { x, y } => {
                hub.dispatch(PointerEvent::at(*x, *y));
                picker.pump_pointer_events();
            }
            ScriptStep::Bounds(rect) => picker.set_bounds(*rect),
            ScriptStep::Value(value) => picker.set_value(value),
            ScriptStep::Disable(disabled) => picker.set_disabled(*disabled),
        }
        snapshots.push(picker.snapshot());
    }

    picker.unmount();
    if hub.listener_count() != 0 {
        log_warning!("Pointer listener still registered after unmount");
    }

    let emissions = emissions.borrow().clone();
    Ok(ReplayReport {
        emissions,
        snapshots,
    })
}

/// Entry point for `datedrop replay`.
pub fn run_replay(script: &str, json: bool, log_file: Option<&str>) -> Result<()> {
    let _redirect = match log_file {
        Some(path) => Some(crate::logger::Log::redirect_to_file(Path::new(path))?),
        None => None,
    };

    let content = std::fs::read_to_string(script)
        .with_context(|| format!("Failed to read script {script}"))?;
    let steps = parse_script(&content).with_context(|| format!("Invalid script {script}"))?;
    let settings = super::load_settings(None)?;

    if !json {
        log_version!();
        log_block_start!(
            "Replaying {} steps on a {} picker",
            steps.len(),
            settings.variant.as_str()
        );
    }

    let report = replay(settings, "", &steps)?;

    if json {
        for snapshot in &report.snapshots {
            println!("{}", serde_json::to_string(snapshot)?);
        }
        return Ok(());
    }

    if let Some(last) = report.snapshots.last() {
        log_block_start!("Final state: {}", last.phase);
        log_indented!("Display: {}", last.display);
        log_indented!("Value: \"{}\"", last.value);
        log_indented!("Panel: {}", if last.open { "open" } else { "closed" });
    }
    log_block_start!("{} emission(s)", report.emissions.len());
    for value in &report.emissions {
        log_indented!("\"{value}\"");
    }
    log_end!();
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::selection::{PickerVariant, SelectionPhase};
    use crate::zone::Zone;

    fn settings(variant: PickerVariant) -> PickerSettings {
        PickerSettings::new(variant).with_zone(Zone::Named(chrono_tz::UTC))
    }

    #[test]
    fn test_parse_steps() {
        assert_eq!(ScriptStep::parse("   ").unwrap(), None);
        assert_eq!(ScriptStep::parse("# note").unwrap(), None);
        assert_eq!(
            ScriptStep::parse("Month 2  # March").unwrap(),
            Some(ScriptStep::Select(SelectionEvent::SelectMonth(2)))
        );
        assert_eq!(
            ScriptStep::parse("click 10 20.5").unwrap(),
            Some(ScriptStep::Click { x: 10.0, y: 20.5 })
        );
        assert_eq!(
            ScriptStep::parse("value").unwrap(),
            Some(ScriptStep::Value(String::new()))
        );
        assert!(ScriptStep::parse("day").is_err());
        assert!(ScriptStep::parse("day five").is_err());
        assert!(ScriptStep::parse("teleport").is_err());
    }

    #[test]
    fn test_parse_script_reports_line() {
        let err = parse_script("open\nyear 2024\nmonth x\n").unwrap_err();
        assert!(format!("{err:#}").contains("Line 3"));
    }

    #[test]
    fn test_replay_full_session() {
        let steps = parse_script(
            "bounds 0 0 100 100\nopen\nyear 2024\nmonth 2\nday 5\ntime 14:30\nclick 300 300\n",
        )
        .unwrap();
        let report = replay(settings(PickerVariant::DateTime), "", &steps).unwrap();

        assert_eq!(report.emissions, vec!["2024-03-05T14:30:00.000Z".to_string()]);
        let last = report.snapshots.last().unwrap();
        assert_eq!(last.phase, SelectionPhase::Complete);
        assert!(!last.open);
        assert_eq!(last.display, "Mar 5, 2024, 02:30 PM");
    }

    #[test]
    fn test_replay_month_switch_requires_new_day() {
        let steps = parse_script("year 2024\nmonth 2\nday 5\nmonth 3\nday 5\n").unwrap();
        let report = replay(settings(PickerVariant::Date), "", &steps).unwrap();
        assert_eq!(
            report.emissions,
            vec!["2024-03-05".to_string(), "2024-04-05".to_string()]
        );
        assert_eq!(report.snapshots[3].selection.day, None);
    }

    #[test]
    fn test_replay_disabled_picker() {
        let steps = parse_script("disable\ntoggle\nyear 2024\nclear\n").unwrap();
        let report = replay(settings(PickerVariant::Date), "", &steps).unwrap();
        assert!(report.emissions.is_empty());
        assert!(report.snapshots.iter().all(|s| !s.open));
    }
}
