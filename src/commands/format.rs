//! `format` command: show a committed value the way the trigger renders it.

use anyhow::Result;

use crate::format::format_value;
use crate::selection::PickerVariant;
use crate::value::is_valid_value;

pub fn run_format(value: &str, with_time: bool) -> Result<()> {
    let variant = if with_time {
        PickerVariant::DateTime
    } else {
        PickerVariant::Date
    };
    let settings = super::load_settings(Some(variant))?;

    log_version!();
    if !is_valid_value(value) {
        log_pipe!();
        log_warning!("'{value}' is not an ISO-8601 date; it renders as unset");
    }
    let rendered = format_value(value, variant, settings.zone);
    if rendered.is_empty() {
        log_block_start!("(empty) - placeholder \"{}\" is shown", settings.placeholder);
    } else {
        log_block_start!("{rendered}");
    }
    log_indented!("Variant: {}, timezone: {}", variant.as_str(), settings.zone);
    log_end!();
    Ok(())
}
