//! `days` and `slots` commands: calendar arithmetic on the command line.

use anyhow::Result;

use crate::calendar::{days_in_month, month_name, normalize_month, time_slots};
use crate::constants::{DEFAULT_TIME_INTERVAL, MINUTES_PER_HOUR};

/// Print the length of a zero-based month.
pub fn run_days(year: i32, month: i32) -> Result<()> {
    let (resolved_year, resolved_month) = normalize_month(year, month);
    let days = days_in_month(year, month);

    log_version!();
    log_block_start!(
        "{} {} has {} days",
        month_name(resolved_month).unwrap_or("?"),
        resolved_year,
        days
    );
    if (resolved_year, resolved_month as i32) != (year, month) {
        log_indented!("Month {month} of {year} rolls over to the date above");
    }
    log_end!();
    Ok(())
}

/// Print every time slot for `interval` minutes.
pub fn run_slots(interval: Option<u32>) -> Result<()> {
    let interval = interval.unwrap_or(DEFAULT_TIME_INTERVAL);
    if interval == 0 {
        anyhow::bail!("Interval must be at least one minute");
    }

    let slots = time_slots(interval);
    log_version!();
    log_block_start!("{} slots every {} minutes", slots.len(), interval);
    if MINUTES_PER_HOUR % interval != 0 && interval % MINUTES_PER_HOUR != 0 {
        log_warning!("{interval} does not divide an hour; slots drift across hours");
    }
    for row in slots.chunks(8) {
        log_indented!("{}", row.join("  "));
    }
    log_end!();
    Ok(())
}
