//! `flipclock print`: write the current display as one line of text.
//!
//! Output is plain (`21:45`, `09:45:30 PM`, `00:05:00`) so it can be piped
//! into status bars and scripts.

use anyhow::Result;
use std::sync::Arc;
use std::time::Instant;

use crate::common::logger::Log;
use crate::config::{ClockConfiguration, Config};
use crate::core::controller::ClockController;
use crate::core::timer::TimerState;
use crate::time_source::{self, TimeSource};

/// Handle the print command.
///
/// `timer_seconds` overrides the configured initial timer value.
pub fn handle_print_command(timer_seconds: Option<u64>) -> Result<()> {
    // Only the display line goes to stdout; loading may log a created file or
    // a warning. Errors still reach the caller's exit log.
    Log::set_enabled(false);
    let loaded = Config::load();
    Log::set_enabled(true);
    let config = loaded?;
    let seconds = timer_seconds.unwrap_or_else(|| config.timer_seconds());

    let line = render_line(config.clock_configuration(), seconds, time_source::current());
    println!("{line}");
    Ok(())
}

/// One display pass rendered as text.
pub fn render_line(
    config: ClockConfiguration,
    timer_seconds: u64,
    time_source: Arc<dyn TimeSource>,
) -> String {
    let controller = ClockController::with_timer(
        config,
        time_source,
        TimerState::with_remaining(timer_seconds),
        Instant::now(),
    );
    let display = controller.display();

    let mut line = display.characters.to_clock_string(config.show_seconds);
    if let Some(indicator) = display.indicator {
        line.push(' ');
        line.push_str(indicator.as_str());
    }
    line
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ClockMode;
    use crate::time_source::FixedTimeSource;

    #[test]
    fn test_clock_line() {
        let source = Arc::new(FixedTimeSource::at(21, 45, 30));
        let line = render_line(ClockConfiguration::default(), 0, source);
        assert_eq!(line, "21:45");
    }

    #[test]
    fn test_twelve_hour_line_with_seconds() {
        let config = ClockConfiguration {
            show_seconds: true,
            is_24_hour: false,
            ..ClockConfiguration::default()
        };
        let source = Arc::new(FixedTimeSource::at(21, 45, 30));
        assert_eq!(render_line(config, 0, source), "09:45:30 PM");
    }

    #[test]
    fn test_timer_line() {
        let config = ClockConfiguration {
            show_seconds: true,
            mode: ClockMode::Timer,
            ..ClockConfiguration::default()
        };
        let source = Arc::new(FixedTimeSource::at(8, 0, 0));
        assert_eq!(render_line(config, 3725, source), "01:02:05");
    }
}
