//! Help and version output.

use anyhow::Result;

/// Brief usage for a command, shown after an argument error.
pub fn show_command_usage(command: Option<&str>) {
    match command {
        Some("days") => log_block_start!("Usage: datedrop days <year> <month>"),
        Some("slots") => log_block_start!("Usage: datedrop slots [interval]"),
        Some("format") => log_block_start!("Usage: datedrop format <value> [--time]"),
        Some("replay") => {
            log_block_start!("Usage: datedrop replay <script> [--json] [--log <file>]")
        }
        Some("pick") => log_block_start!("Usage: datedrop pick [value] [--time | --date]"),
        _ => log_block_start!("Usage: datedrop [OPTIONS] <COMMAND>"),
    }
}

/// Report an argument error followed by usage.
pub fn show_usage_error(message: &str, command: Option<&str>) {
    log_version!();
    log_pipe!();
    log_error!("{message}");
    show_command_usage(command);
    log_indented!("Run 'datedrop help' for more information.");
    log_end!();
}

/// Run the help command for an optional topic.
pub fn run_help_command(topic: Option<&str>) -> Result<()> {
    match topic {
        None => display_general_help(),
        Some("days") => display_days_help(),
        Some("slots") => display_slots_help(),
        Some("format") => display_format_help(),
        Some("replay") => display_replay_help(),
        Some("pick") => display_pick_help(),
        Some("config") => display_config_help(),
        Some(unknown) => {
            log_version!();
            log_pipe!();
            log_warning!("Unknown command: {unknown}");
            log_end!();
            display_general_help();
        }
    }
    Ok(())
}

pub fn display_version_info() {
    log_version!();
    log_pipe!();
    crate::logger::emit_line("┗ ", env!("CARGO_PKG_DESCRIPTION"));
}

fn display_general_help() {
    log_version!();
    log_block_start!("{}", env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("datedrop [OPTIONS] <COMMAND>");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("    --timestamps       Prefix output lines with the time");
    log_indented!("    --now <instant>    Freeze the clock at an RFC 3339 instant");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("days <year> <month>    Number of days in a zero-based month");
    log_indented!("slots [interval]       List time slots for an interval in minutes");
    log_indented!("format <value>         Render a value the way the picker shows it");
    log_indented!("replay <script>        Run scripted events through a picker");
    log_indented!("pick [value]           Pick a date interactively");
    log_indented!("config                 Show the effective configuration");
    log_indented!("help [COMMAND]         Show detailed help for a command");
    log_end!();
}

fn display_days_help() {
    log_version!();
    log_block_start!("days - Number of days in a month");
    log_block_start!("Usage: datedrop days <year> <month>");
    log_block_start!("Arguments:");
    log_indented!("<year>   Calendar year, e.g. 2024");
    log_indented!("<month>  Zero-based month: 0 is January, 11 is December");
    log_indented!("         Months outside 0-11 roll over into adjacent years");
    log_block_start!("Examples:");
    log_indented!("datedrop days 2024 1    # February 2024: 29");
    log_indented!("datedrop days 2023 12   # January 2024: 31");
    log_end!();
}

fn display_slots_help() {
    log_version!();
    log_block_start!("slots - List selectable times of day");
    log_block_start!("Usage: datedrop slots [interval]");
    log_block_start!("Arguments:");
    log_indented!("[interval]  Minutes between slots (default: 30)");
    log_block_start!("Description:");
    log_indented!("Slots start at 00:00 and step forward until the end of the day.");
    log_indented!("Intervals that do not divide an hour drift across hours.");
    log_end!();
}

fn display_format_help() {
    log_version!();
    log_block_start!("format - Render a committed value");
    log_block_start!("Usage: datedrop format <value> [--time]");
    log_block_start!("Options:");
    log_indented!("-t, --time  Render as a date-time picker would");
    log_block_start!("Examples:");
    log_indented!("datedrop format 2024-03-05                        # March 5, 2024");
    log_indented!("datedrop format --time 2024-03-05T14:30:00.000Z   # Mar 5, 2024, 02:30 PM");
    log_pipe!();
    log_info!("Date-time values are shown in the configured timezone.");
    log_end!();
}

fn display_replay_help() {
    log_version!();
    log_block_start!("replay - Run scripted events through a picker");
    log_block_start!("Usage: datedrop replay <script> [--json] [--log <file>]");
    log_block_start!("Options:");
    log_indented!("--json        Print a JSON snapshot after every step");
    log_indented!("--log <file>  Write the log to a file instead of the terminal");
    log_block_start!("Script steps (one per line, # starts a comment):");
    log_indented!("year <n>, month <0-11>, day <n>, time <HH:MM>, clear");
    log_indented!("open, close, toggle, disable, enable");
    log_indented!("bounds <x> <y> <width> <height>, click <x> <y>");
    log_indented!("value [iso-8601]   Commit a value from outside the picker");
    log_end!();
}

fn display_pick_help() {
    log_version!();
    log_block_start!("pick - Pick a date interactively");
    log_block_start!("Usage: datedrop pick [value] [--time | --date]");
    log_block_start!("Options:");
    log_indented!("-t, --time  Pick a date and a time of day");
    log_indented!("    --date  Pick a date only");
    log_block_start!("Keys:");
    log_indented!("Left/Right/Tab  Switch column");
    log_indented!("Up/Down         Move within a column");
    log_indented!("Enter           Choose the highlighted option");
    log_indented!("Space           Open or close the panel");
    log_indented!("c               Clear the value");
    log_indented!("Esc/q           Quit");
    log_end!();
}

fn display_config_help() {
    log_version!();
    log_block_start!("config - Show the effective configuration");
    log_block_start!("Usage: datedrop config");
    log_block_start!("Description:");
    log_indented!("Reads datedrop.toml from the configuration directory");
    log_indented!("(~/.config/datedrop by default, or --config <dir>).");
    log_end!();
}
