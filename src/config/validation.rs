//! Configuration validation.
//!
//! Hard errors for values the picker cannot work with; warnings for values it
//! tolerates but that produce an irregular panel.

use anyhow::Result;

use super::Config;
use crate::constants::*;
use crate::zone::Zone;

pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(interval) = config.time_interval {
        if !(MINIMUM_TIME_INTERVAL..=MAXIMUM_TIME_INTERVAL).contains(&interval) {
            anyhow::bail!(
                "time_interval ({} minutes) must be between {} and {} minutes",
                interval,
                MINIMUM_TIME_INTERVAL,
                MAXIMUM_TIME_INTERVAL
            );
        }
        if MINUTES_PER_HOUR % interval != 0 && interval % MINUTES_PER_HOUR != 0 {
            log_warning!(
                "time_interval ({interval} minutes) does not divide an hour; the last slot before midnight will be irregular"
            );
        }
        if !config.variant.unwrap_or_default().has_time() {
            log_warning!("time_interval has no effect on the date-only picker");
        }
    }

    if let Some(name) = &config.timezone {
        Zone::parse(name)?;
    }

    for (field, value) in [
        ("years_before", config.years_before),
        ("years_after", config.years_after),
    ] {
        if let Some(years) = value
            && years > MAXIMUM_YEAR_SPAN
        {
            anyhow::bail!("{field} ({years}) must be at most {MAXIMUM_YEAR_SPAN}");
        }
    }

    if let Some(placeholder) = &config.placeholder
        && placeholder.trim().is_empty()
    {
        anyhow::bail!("placeholder must not be blank; omit it to use the default");
    }

    Ok(())
}
