//! Configuration for datedrop pickers.
//!
//! Settings come from `datedrop.toml`, searched in this order:
//! 1. `<dir>/datedrop.toml` when `--config <dir>` was given
//! 2. `$XDG_CONFIG_HOME/datedrop/datedrop.toml`
//!
//! A missing file is not an error; every field has a default.
//!
//! ```toml
//! variant = "datetime"          # "date" or "datetime"
//! placeholder = "Pick a slot"   # Trigger text while no value is committed
//! disabled = false              # Ignore every interaction
//! time_interval = 30            # Minutes between time slots (1-720)
//! timezone = "Europe/Berlin"    # IANA zone, or "local"
//! years_before = 10             # Years offered before the current year
//! years_after = 10              # Years offered after the current year
//! close_on_complete = false     # Close the panel once a value is emitted
//! ```

pub mod loading;
pub mod validation;

use anyhow::Result;
use chrono::{Datelike, NaiveDate};
use serde::Deserialize;
use std::path::PathBuf;

use crate::constants::*;
use crate::picker::{PickerSettings, default_placeholder};
use crate::selection::PickerVariant;
use crate::zone::Zone;

pub use loading::{get_config_path, load, load_from_path, set_config_dir};

/// Raw configuration as written in `datedrop.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
pub struct Config {
    /// Which fields the picker collects. Defaults to `date`.
    pub variant: Option<PickerVariant>,
    /// Trigger text while no value is committed. Defaults per variant.
    pub placeholder: Option<String>,
    pub disabled: Option<bool>,
    /// Minutes between time slots for the date-time variant.
    pub time_interval: Option<u32>,
    /// IANA zone name or `"local"`.
    pub timezone: Option<String>,
    pub years_before: Option<u32>,
    pub years_after: Option<u32>,
    pub close_on_complete: Option<bool>,
}

impl Config {
    /// Load using automatic path detection. See [`loading::load`].
    pub fn load() -> Result<Self> {
        loading::load()
    }

    pub fn load_from_path(path: &std::path::Path) -> Result<Self> {
        loading::load_from_path(path)
    }

    pub fn get_config_path() -> Result<PathBuf> {
        loading::get_config_path()
    }

    pub fn variant(&self) -> PickerVariant {
        self.variant.unwrap_or_default()
    }

    pub fn zone(&self) -> Result<Zone> {
        match &self.timezone {
            Some(name) => Zone::parse(name),
            None => Ok(Zone::Local),
        }
    }

    /// Resolve defaults into per-instance settings.
    ///
    /// `today` anchors the span of selectable years.
    pub fn picker_settings(&self, today: NaiveDate) -> Result<PickerSettings> {
        let variant = self.variant();
        let year = today.year();
        let before = self.years_before.unwrap_or(DEFAULT_YEARS_BEFORE);
        let after = self.years_after.unwrap_or(DEFAULT_YEARS_AFTER);

        Ok(PickerSettings::new(variant)
            .with_zone(self.zone()?)
            .with_placeholder(
                self.placeholder
                    .clone()
                    .unwrap_or_else(|| default_placeholder(variant).to_string()),
            )
            .with_disabled(self.disabled.unwrap_or(false))
            .with_time_interval(self.time_interval.unwrap_or(DEFAULT_TIME_INTERVAL))
            .with_years(
                year.saturating_sub_unsigned(before),
                year.saturating_add_unsigned(after),
            )
            .with_close_on_complete(self.close_on_complete.unwrap_or(false)))
    }

    /// Print the effective configuration.
    pub fn log_config(&self, resolved_path: Option<&std::path::Path>) {
        let variant = self.variant();
        log_block_start!("Loaded configuration");
        match resolved_path {
            Some(path) => log_indented!("Source: {}", path.display()),
            None => log_indented!("Source: built-in defaults"),
        }
        log_indented!("Variant: {}", variant.as_str());
        log_indented!(
            "Placeholder: \"{}\"",
            self.placeholder
                .as_deref()
                .unwrap_or(default_placeholder(variant))
        );
        if self.disabled.unwrap_or(false) {
            log_indented!("Disabled: yes");
        }
        if variant.has_time() {
            log_indented!(
                "Time interval: {} minutes",
                self.time_interval.unwrap_or(DEFAULT_TIME_INTERVAL)
            );
        }
        log_indented!(
            "Timezone: {}",
            self.timezone.as_deref().unwrap_or("local")
        );
        log_indented!(
            "Year span: -{} / +{}",
            self.years_before.unwrap_or(DEFAULT_YEARS_BEFORE),
            self.years_after.unwrap_or(DEFAULT_YEARS_AFTER)
        );
    }
}
