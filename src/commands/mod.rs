//! Command-line command handlers.
//!
//! Each subcommand lives in its own module. Commands that need picker settings
//! share [`load_settings`], which applies the configuration file and any
//! variant override given on the command line.

pub mod calendar;
pub mod format;
pub mod help;
pub mod pick;
pub mod replay;

use anyhow::Result;

use crate::config::{self, Config};
use crate::picker::PickerSettings;
use crate::selection::PickerVariant;

/// Load configuration and resolve picker settings for today.
pub(crate) fn load_settings(variant_override: Option<PickerVariant>) -> Result<PickerSettings> {
    let config = config::load()?;
    settings_from_config(&config, variant_override)
}

pub(crate) fn settings_from_config(
    config: &Config,
    variant_override: Option<PickerVariant>,
) -> Result<PickerSettings> {
    let mut config = config.clone();
    if let Some(variant) = variant_override {
        config.variant = Some(variant);
        // The configured placeholder belongs to the configured variant
        config.placeholder = None;
    }
    let today = config.zone()?.now().date();
    config.picker_settings(today)
}

/// Print the effective configuration.
pub fn show_config() -> Result<()> {
    let (config, source) = config::loading::load_with_source()?;
    log_version!();
    config.log_config(source.as_deref());
    if source.is_none() {
        log_indented!("Expected at: {}", config::get_config_path()?.display());
    }
    log_end!();
    Ok(())
}
