//! Configuration validation functionality.
//!
//! Enum-valued keys are checked by serde while parsing; this pass covers the
//! numeric ranges serde cannot express.

use anyhow::Result;

use super::{ClockMode, Config};
use crate::common::constants::*;

/// Reject values the display cannot represent.
pub fn validate_config(config: &Config) -> Result<()> {
    if let Some(seconds) = config.timer_seconds
        && seconds > MAXIMUM_TIMER_SECONDS
    {
        anyhow::bail!(
            "timer_seconds ({}) must be between 0 and {} (99:59:59)",
            seconds,
            MAXIMUM_TIMER_SECONDS
        );
    }

    if timer_preset_hidden(config) {
        log_pipe!();
        log_warning!("timer_seconds is set but mode is \"clock\"");
        log_indented!("The preset is loaded but only shown after switching to timer mode");
    }

    Ok(())
}

/// A timer preset only shows after switching to timer mode; an omitted mode
/// is clock.
pub(crate) fn timer_preset_hidden(config: &Config) -> bool {
    config.timer_seconds.unwrap_or(DEFAULT_TIMER_SECONDS) > 0
        && config.mode.unwrap_or_default() == ClockMode::Clock
}
