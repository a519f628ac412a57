//! Command-line entry point.
//!
//! Parses arguments, applies the global options (debug output, timestamps,
//! configuration directory, frozen clock) and dispatches to the command
//! handlers in `datedrop::commands`.

use anyhow::Result;
use std::sync::Arc;

use datedrop::args::{CliAction, GlobalOptions, ParsedArgs};
use datedrop::clock::{self, FixedClock};
use datedrop::commands;
use datedrop::config;
use datedrop::constants::EXIT_FAILURE;
use datedrop::log_error_exit;
use datedrop::logger::Log;

fn main() {
    let parsed = ParsedArgs::parse(std::env::args().skip(1));

    if let Err(e) = apply_global_options(&parsed.options) {
        log_error_exit!("{e}");
        std::process::exit(EXIT_FAILURE);
    }

    if let Err(e) = run(parsed.action) {
        log_error_exit!("{e:#}");
        std::process::exit(EXIT_FAILURE);
    }
}

fn apply_global_options(options: &GlobalOptions) -> Result<()> {
    Log::set_debug(options.debug_enabled);
    Log::set_timestamps(options.timestamps);

    if let Some(instant) = &options.now {
        let fixed = FixedClock::parse(instant).map_err(anyhow::Error::msg)?;
        clock::init_clock(Arc::new(fixed));
    }

    config::set_config_dir(options.config_dir.clone())
}

fn run(action: CliAction) -> Result<()> {
    match action {
        CliAction::Days { year, month } => commands::calendar::run_days(year, month),
        CliAction::Slots { interval } => commands::calendar::run_slots(interval),
        CliAction::Format { value, with_time } => commands::format::run_format(&value, with_time),
        CliAction::Replay {
            script,
            json,
            log_file,
        } => commands::replay::run_replay(&script, json, log_file.as_deref()),
        CliAction::Pick { with_time, value } => commands::pick::run_pick(with_time, &value),
        CliAction::ShowConfig => commands::show_config(),
        CliAction::ShowHelp { topic } => commands::help::run_help_command(topic.as_deref()),
        CliAction::ShowVersion => {
            commands::help::display_version_info();
            Ok(())
        }
        CliAction::ShowHelpDueToError { message } => {
            commands::help::show_usage_error(&message, None);
            std::process::exit(EXIT_FAILURE);
        }
    }
}
