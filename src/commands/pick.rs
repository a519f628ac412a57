//! `pick` command: an interactive picker in the terminal.
//!
//! The panel is redrawn after every key press. Keys:
//! - `Left`/`Right`/`Tab`: move between the year, month, day and time columns
//! - `Up`/`Down`: move within a column
//! - `Enter`: choose the highlighted option (opens the panel when closed)
//! - `Space`: open or close the panel
//! - `c`: clear the value
//! - `Esc`/`q`/`Ctrl+C`: quit, printing the final value

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use crossterm::event::{KeyCode, KeyEvent, KeyModifiers};

use crate::calendar::month_short_name;
use crate::panel::{PanelOption, PanelView};
use crate::picker::DropdownPicker;
use crate::pointer::PointerHub;
use crate::selection::{PickerVariant, SelectionEvent};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Column {
    Year,
    Month,
    Day,
    Time,
}

impl Column {
    fn label(self) -> &'static str {
        match self {
            Column::Year => "Year",
            Column::Month => "Month",
            Column::Day => "Day",
            Column::Time => "Time",
        }
    }
}

#[derive(Debug, PartialEq, Eq)]
enum KeyOutcome {
    Continue,
    Quit,
}

/// Picker plus the keyboard cursor over its panel.
struct PickSession {
    picker: DropdownPicker,
    today: NaiveDate,
    column: Column,
    row: usize,
    committed: String,
}

impl PickSession {
    fn new(picker: DropdownPicker, today: NaiveDate) -> Self {
        let committed = picker.value().to_string();
        let mut session = Self {
            picker,
            today,
            column: Column::Year,
            row: 0,
            committed,
        };
        session.row = session.selected_row(Column::Year);
        session
    }

    fn view(&self) -> PanelView {
        PanelView::project(&self.picker, self.today)
    }

    fn columns(&self) -> Vec<Column> {
        let mut columns = vec![Column::Year, Column::Month, Column::Day];
        if self.picker.settings().variant.has_time() {
            columns.push(Column::Time);
        }
        columns
    }

    fn column_len(&self, view: &PanelView, column: Column) -> usize {
        match column {
            Column::Year => view.years.len(),
            Column::Month => view.months.len(),
            Column::Day => view.days.len(),
            Column::Time if view.times_enabled => view.times.len(),
            Column::Time => 0,
        }
    }

    /// Row of the selected option in `column`, or the first row.
    fn selected_row(&self, column: Column) -> usize {
        let view = self.view();
        let position = match column {
            Column::Year => selected_index(&view.years),
            Column::Month => selected_index(&view.months),
            Column::Day => selected_index(&view.days),
            Column::Time => selected_index(&view.times),
        };
        position
            .or_else(|| match column {
                // Start the year column on the current year
                Column::Year => view.years.iter().position(|o| o.value == self.today.year()),
                _ => None,
            })
            .unwrap_or(0)
    }

    fn move_column(&mut self, step: isize) {
        let columns = self.columns();
        let index = columns.iter().position(|c| *c == self.column).unwrap_or(0) as isize;
        let next = (index + step).rem_euclid(columns.len() as isize) as usize;
        self.column = columns[next];
        self.row = self.selected_row(self.column);
    }

    fn move_row(&mut self, step: isize) {
        let len = self.column_len(&self.view(), self.column);
        if len == 0 {
            self.row = 0;
            return;
        }
        self.row = (self.row as isize + step).clamp(0, len as isize - 1) as usize;
    }

    fn choose(&mut self) {
        if !self.picker.is_open() {
            self.picker.open();
            return;
        }

        let view = self.view();
        let event = match self.column {
            Column::Year => view.years.get(self.row).map(|o| SelectionEvent::SelectYear(o.value)),
            Column::Month => view.months.get(self.row).map(|o| SelectionEvent::SelectMonth(o.value)),
            Column::Day => view.days.get(self.row).map(|o| SelectionEvent::SelectDay(o.value)),
            Column::Time if view.times_enabled => view
                .times
                .get(self.row)
                .map(|o| SelectionEvent::SelectTime(o.value.clone())),
            Column::Time => None,
        };
        let Some(event) = event else {
            return;
        };

        if let Some(value) = self.picker.apply(event) {
            self.commit(value);
        }
        // Day options change with the month; keep the cursor inside the column
        self.move_row(0);
    }

    fn commit(&mut self, value: String) {
        self.picker.set_value(&value);
        self.committed = value;
    }

    fn handle_key(&mut self, key: KeyEvent) -> KeyOutcome {
        match key.code {
            KeyCode::Esc | KeyCode::Char('q') => return KeyOutcome::Quit,
            KeyCode::Char('c') if key.modifiers.contains(KeyModifiers::CONTROL) => {
                return KeyOutcome::Quit;
            }
            KeyCode::Char('c') => {
                if let Some(value) = self.picker.clear() {
                    self.commit(value);
                }
                self.row = self.selected_row(self.column);
            }
            KeyCode::Char(' ') => self.picker.toggle(),
            KeyCode::Enter => self.choose(),
            KeyCode::Left | KeyCode::BackTab => self.move_column(-1),
            KeyCode::Right | KeyCode::Tab => self.move_column(1),
            KeyCode::Up => self.move_row(-1),
            KeyCode::Down => self.move_row(1),
            _ => {}
        }
        KeyOutcome::Continue
    }

    fn render(&self) {
        log_version!();
        log_block_start!("{}", self.picker.display());
        if !self.picker.is_open() {
            log_indented!("(closed: Space or Enter opens the panel)");
            log_end!();
            return;
        }

        let view = self.view();
        for column in self.columns() {
            let marker = if column == self.column { ">" } else { " " };
            let options = match column {
                Column::Year => window(&view.years, self.row_for(column), |o| o.label.clone()),
                Column::Month => window(&view.months, self.row_for(column), |o| {
                    month_short_name(o.value).unwrap_or_default().to_string()
                }),
                Column::Day => window(&view.days, self.row_for(column), |o| {
                    if view.today == Some(o.value) {
                        format!("{}*", o.label)
                    } else {
                        o.label.clone()
                    }
                }),
                Column::Time if view.times_enabled => {
                    window(&view.times, self.row_for(column), |o| o.label.clone())
                }
                Column::Time => "(choose a day first)".to_string(),
            };
            log_indented!("{marker} {:<5} {options}", column.label());
        }
        log_pipe!();
        log_info!("Arrows move, Enter selects, c clears, Esc quits");
        log_end!();
    }

    fn row_for(&self, column: Column) -> Option<usize> {
        (column == self.column).then_some(self.row)
    }
}

fn selected_index<T>(options: &[PanelOption<T>]) -> Option<usize> {
    options.iter().position(|o| o.selected)
}

/// Up to seven options around the cursor (or the selection), bracketing the
/// selected option and underlining the cursor.
fn window<T>(
    options: &[PanelOption<T>],
    cursor: Option<usize>,
    label: impl Fn(&PanelOption<T>) -> String,
) -> String {
    if options.is_empty() {
        return "-".to_string();
    }
    let focus = cursor.or_else(|| selected_index(options)).unwrap_or(0);
    let start = focus.saturating_sub(3).min(options.len().saturating_sub(7));
    let end = (start + 7).min(options.len());

    options[start..end]
        .iter()
        .enumerate()
        .map(|(offset, option)| {
            let mut text = label(option);
            if option.selected {
                text = format!("[{text}]");
            }
            if cursor == Some(start + offset) {
                text = format!("\x1b[4m{text}\x1b[0m");
            }
            text
        })
        .collect::<Vec<_>>()
        .join(" ")
}

/// Disables raw mode when dropped.
struct RawModeGuard;

impl RawModeGuard {
    fn enable() -> Result<Self> {
        crossterm::terminal::enable_raw_mode()?;
        Ok(Self)
    }
}

impl Drop for RawModeGuard {
    fn drop(&mut self) {
        let _ = crossterm::terminal::disable_raw_mode();
    }
}

fn read_key() -> Result<KeyEvent> {
    use crossterm::event::{self, Event, KeyEventKind};

    let _raw = RawModeGuard::enable()?;
    loop {
        if let Event::Key(key) = event::read()?
            && key.kind != KeyEventKind::Release
        {
            return Ok(key);
        }
    }
}

fn clear_screen() -> Result<()> {
    use crossterm::{cursor::MoveTo, execute, terminal};

    execute!(
        std::io::stdout(),
        terminal::Clear(terminal::ClearType::All),
        MoveTo(0, 0)
    )?;
    Ok(())
}

/// Entry point for `datedrop pick`.
pub fn run_pick(with_time: Option<bool>, value: &str) -> Result<()> {
    let variant = with_time.map(|time| {
        if time {
            PickerVariant::DateTime
        } else {
            PickerVariant::Date
        }
    });
    let settings = super::load_settings(variant)?;
    let today = settings.zone.now().date();

    let hub = PointerHub::new();
    let mut picker = DropdownPicker::mount(settings, value, &hub, |value| {
        log_debug!("Change callback received \"{value}\"");
    })?;
    picker.open();

    let mut session = PickSession::new(picker, today);
    loop {
        clear_screen()?;
        session.render();
        if session.handle_key(read_key()?) == KeyOutcome::Quit {
            break;
        }
    }

    clear_screen()?;
    log_version!();
    if session.committed.is_empty() {
        log_block_start!("No value selected");
    } else {
        log_block_start!("Selected {}", session.picker.display());
        log_indented!("Value: {}", session.committed);
    }
    log_end!();
    Ok(())
}
