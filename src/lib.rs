//! # Datedrop
//!
//! A dropdown date and date-time picker: the selection state machine, value
//! encoding and display formatting, plus the command-line front-end built on
//! them.
//!
//! ## Architecture
//!
//! - **Calendar**: `calendar` for month lengths and time slots, `zone` for
//!   resolving civil times in a timezone, `clock` for "now"
//! - **Values**: `value` parses and encodes committed ISO-8601 values, `format`
//!   renders them for the trigger control
//! - **Selection**: `selection` holds the pure transition function over a
//!   partial selection
//! - **Picker**: `picker` is one mounted instance with its panel state and
//!   pointer subscription (`pointer`), `panel` projects it for rendering
//! - **Front-end**: `args`, `commands` and `config`, logging through `logger`

// Import macros from logger module for use in all submodules
#[macro_use]
pub mod logger;

pub mod args;
pub mod calendar;
pub mod clock;
pub mod commands;
pub mod config;
pub mod constants;
pub mod format;
pub mod panel;
pub mod picker;
pub mod pointer;
pub mod selection;
pub mod value;
pub mod zone;

pub use picker::{DropdownPicker, PickerSettings};
pub use selection::{PartialSelection, PickerVariant, SelectionEvent};
