//! Default configuration file generation.
//!
//! The default file is written with aligned inline comments so it doubles as
//! documentation of every key.

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::common::constants::*;

/// Write a commented default `flipclock.toml` to `path`, creating parent
/// directories as needed.
pub fn create_default_config(path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context("Failed to create config directory")?;
    }

    fs::write(path, default_config_content())
        .with_context(|| format!("Failed to write default config to {}", path.display()))
}

/// Text of the default configuration file.
pub fn default_config_content() -> String {
    ConfigBuilder::new()
        .add_section("Display")
        .add_setting(
            "show_seconds",
            &DEFAULT_SHOW_SECONDS.to_string(),
            "Show the seconds cards (six cards instead of four)",
        )
        .add_setting(
            "theme",
            &format!("\"{DEFAULT_THEME}\""),
            "Colour scheme: \"dark\" or \"light\"",
        )
        .add_setting(
            "use_24_hour",
            &DEFAULT_USE_24_HOUR.to_string(),
            "false shows 12-hour time with an AM/PM marker",
        )
        .add_setting(
            "orientation",
            &format!("\"{DEFAULT_ORIENTATION}\""),
            "\"auto\" (portrait when the terminal is tall) or \"portrait\"",
        )
        .add_section("Mode")
        .add_setting(
            "mode",
            &format!("\"{DEFAULT_MODE}\""),
            "\"clock\" or \"timer\"",
        )
        .add_setting(
            "timer_seconds",
            &DEFAULT_TIMER_SECONDS.to_string(),
            "Countdown preloaded in timer mode (0-359999)",
        )
        .build()
}

struct ConfigBuilder {
    entries: Vec<ConfigEntry>,
}

enum ConfigEntry {
    Section(String),
    Setting { line: String, comment: String },
}

impl ConfigBuilder {
    fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    fn add_section(mut self, title: &str) -> Self {
        self.entries.push(ConfigEntry::Section(format!("#[{title}]")));
        self
    }

    fn add_setting(mut self, key: &str, value: &str, comment: &str) -> Self {
        self.entries.push(ConfigEntry::Setting {
            line: format!("{key} = {value}"),
            comment: format!("# {comment}"),
        });
        self
    }

    /// Join entries, padding settings so their comments line up.
    fn build(self) -> String {
        let width = self
            .entries
            .iter()
            .filter_map(|entry| match entry {
                ConfigEntry::Setting { line, .. } => Some(line.len()),
                ConfigEntry::Section(_) => None,
            })
            .max()
            .unwrap_or(0)
            + 1;

        let mut lines = Vec::new();
        for entry in self.entries {
            match entry {
                ConfigEntry::Section(title) => {
                    if !lines.is_empty() {
                        lines.push(String::new());
                    }
                    lines.push(title);
                }
                ConfigEntry::Setting { line, comment } => {
                    lines.push(format!("{line:<width$}{comment}"));
                }
            }
        }

        let mut content = lines.join("\n");
        content.push('\n');
        content
    }
}
