//! Application coordinator for the interactive display.
//!
//! Loads the configuration, installs signal handling and the config
//! watcher, then hands everything to [`Core`](crate::core::Core).
//!
//! ```no_run
//! use flipclock::FlipClock;
//!
//! # fn main() -> anyhow::Result<()> {
//! // Normal startup
//! FlipClock::new(false).run()?;
//!
//! // Preloaded timer, no header (e.g. launched from a script)
//! FlipClock::new(false)
//!     .with_timer(Some(300))
//!     .without_headers()
//!     .run()?;
//! # Ok(())
//! # }
//! ```

use anyhow::{Context, Result};

use crate::{
    config::{self, Config},
    core::{Core, CoreParams},
    io::signals::setup_signal_handler,
    time_source,
};

/// Builder for configuring and running the flip clock.
pub struct FlipClock {
    debug_enabled: bool,
    timer_seconds: Option<u64>,
    show_headers: bool,
}

impl FlipClock {
    pub fn new(debug_enabled: bool) -> Self {
        Self {
            debug_enabled,
            timer_seconds: None,
            show_headers: true,
        }
    }

    /// Preload the timer, overriding `timer_seconds` from the config.
    pub fn with_timer(mut self, timer_seconds: Option<u64>) -> Self {
        self.timer_seconds = timer_seconds;
        self
    }

    /// Skip the version header (already printed by the caller).
    pub fn without_headers(mut self) -> Self {
        self.show_headers = false;
        self
    }

    pub fn run(self) -> Result<()> {
        if self.show_headers {
            log_version!();
            if self.debug_enabled {
                log_pipe!();
                log_debug!("Debug mode enabled - showing detailed state changes");
            }
        }

        let config = Config::load().context("Configuration failed")?;
        let signal_state = setup_signal_handler(self.debug_enabled)?;

        if let Err(e) =
            config::start_config_watcher(signal_state.signal_sender.clone(), self.debug_enabled)
        {
            log_pipe!();
            log_warning!("Config file watching unavailable: {e}");
            log_indented!("Hot config reload disabled, use SIGUSR2 for manual reload");
        }

        config.log_config();

        let core = Core::new(CoreParams {
            config,
            signal_state,
            time_source: time_source::current(),
            debug_enabled: self.debug_enabled,
            timer_seconds: self.timer_seconds,
        });
        core.execute()?;

        log_end!();
        Ok(())
    }
}
