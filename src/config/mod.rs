//! Settings for the clock display, loaded from `flipclock.toml`.
//!
//! The settings file is the collaborator that owns the clock's appearance.
//! Every key is optional; missing keys take the defaults below.
//!
//! ```toml
//! #[Display]
//! show_seconds = false   # Show the SS group (six cards instead of four)
//! theme = "dark"         # "dark" or "light"
//! use_24_hour = true     # false shows 12-hour time with an AM/PM marker
//! orientation = "auto"   # "auto" (portrait when the terminal is tall) or "portrait"
//!
//! #[Mode]
//! mode = "clock"         # "clock" or "timer"
//! timer_seconds = 0      # Countdown preloaded when the timer starts (0-359999)
//! ```
//!
//! The file is created with these defaults on first run. Changes are picked
//! up live through the file watcher or SIGUSR2. Keyboard toggles in the
//! display only change the running session.

pub mod builder;
pub mod loading;
pub mod validation;
pub mod watcher;

use anyhow::Result;
use serde::Deserialize;
use std::path::PathBuf;

use crate::common::constants::*;

pub use builder::create_default_config;
pub use loading::{get_config_path, get_custom_config_dir, load, load_from_path, set_config_dir};
pub use watcher::start_config_watcher;

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Dark,
    Light,
}

impl Theme {
    pub fn as_str(&self) -> &'static str {
        match self {
            Theme::Dark => "dark",
            Theme::Light => "light",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Theme::Dark => Theme::Light,
            Theme::Light => Theme::Dark,
        }
    }
}

/// What the cards count: local time or a countdown.
#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClockMode {
    #[default]
    Clock,
    Timer,
}

impl ClockMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            ClockMode::Clock => "clock",
            ClockMode::Timer => "timer",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            ClockMode::Clock => ClockMode::Timer,
            ClockMode::Timer => ClockMode::Clock,
        }
    }
}

#[derive(Debug, Deserialize, Clone, Copy, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Orientation {
    /// Portrait when the viewport is taller than wide.
    #[default]
    Auto,
    Portrait,
}

impl Orientation {
    pub fn as_str(&self) -> &'static str {
        match self {
            Orientation::Auto => "auto",
            Orientation::Portrait => "portrait",
        }
    }

    pub fn toggled(self) -> Self {
        match self {
            Orientation::Auto => Orientation::Portrait,
            Orientation::Portrait => Orientation::Auto,
        }
    }
}

/// Resolved settings for one render pass. Owned by the front-end and
/// handed to the clock controller by value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClockConfiguration {
    pub show_seconds: bool,
    pub theme: Theme,
    pub is_24_hour: bool,
    pub mode: ClockMode,
    pub orientation: Orientation,
}

impl Default for ClockConfiguration {
    fn default() -> Self {
        Self {
            show_seconds: DEFAULT_SHOW_SECONDS,
            theme: Theme::default(),
            is_24_hour: DEFAULT_USE_24_HOUR,
            mode: ClockMode::default(),
            orientation: Orientation::default(),
        }
    }
}

/// Contents of `flipclock.toml`.
#[derive(Debug, Deserialize, Clone, PartialEq, Default)]
#[serde(deny_unknown_fields)]
pub struct Config {
    pub show_seconds: Option<bool>,
    pub theme: Option<Theme>,
    pub use_24_hour: Option<bool>,
    pub mode: Option<ClockMode>,
    pub orientation: Option<Orientation>,
    /// Initial countdown in seconds, applied when the controller is created.
    pub timer_seconds: Option<u64>,
}

impl Config {
    /// Load configuration using the module's load function
    pub fn load() -> Result<Self> {
        load()
    }

    /// Load from path using the module's load_from_path function
    pub fn load_from_path(path: &PathBuf) -> Result<Self> {
        load_from_path(path)
    }

    /// Get configuration path using the module's get_config_path function
    pub fn get_config_path() -> Result<PathBuf> {
        get_config_path()
    }

    /// Settings with defaults filled in.
    pub fn clock_configuration(&self) -> ClockConfiguration {
        let defaults = ClockConfiguration::default();
        ClockConfiguration {
            show_seconds: self.show_seconds.unwrap_or(defaults.show_seconds),
            theme: self.theme.unwrap_or(defaults.theme),
            is_24_hour: self.use_24_hour.unwrap_or(defaults.is_24_hour),
            mode: self.mode.unwrap_or(defaults.mode),
            orientation: self.orientation.unwrap_or(defaults.orientation),
        }
    }

    pub fn timer_seconds(&self) -> u64 {
        self.timer_seconds.unwrap_or(DEFAULT_TIMER_SECONDS)
    }

    pub fn log_config(&self) {
        let resolved = self.clock_configuration();

        let source = match get_config_path() {
            Ok(path) => crate::common::utils::private_path(&path),
            Err(_) => "defaults".to_string(),
        };
        log_block_start!("Loaded configuration from {}", source);
        log_indented!("Mode: {}", resolved.mode.as_str());
        log_indented!(
            "Format: {}{}",
            if resolved.is_24_hour { "24-hour" } else { "12-hour" },
            if resolved.show_seconds { " with seconds" } else { "" }
        );
        log_indented!("Theme: {}", resolved.theme.as_str());
        log_indented!("Orientation: {}", resolved.orientation.as_str());

        if self.timer_seconds() > 0 {
            log_indented!(
                "Timer preset: {}",
                crate::common::utils::format_duration_hms(self.timer_seconds())
            );
        }
    }
}

#[cfg(test)]
mod tests;
