//! Application-wide constants: tick periods, display geometry, defaults and exit codes.

use std::time::Duration;

// # Tick Sources

/// Wall-clock refresh period while in clock mode.
pub const CLOCK_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Countdown decrement period while a timer is running.
pub const COUNTDOWN_TICK_INTERVAL: Duration = Duration::from_millis(1000);

/// Alternation period of the "TIME UP" alert frames.
pub const EXPIRY_BLINK_INTERVAL: Duration = Duration::from_millis(2000);

/// Window a digit must stay unchanged before its flip commits.
pub const FLIP_SETTLE_DELAY: Duration = Duration::from_millis(50);

// # Display

/// Number of flip cards (HH MM SS).
pub const DISPLAY_SLOTS: usize = 6;

/// Slots rendered when seconds are hidden.
pub const SLOTS_WITHOUT_SECONDS: usize = 4;

/// Alert frames shown when seconds are visible (six cards).
pub const ALERT_FRAME_A_WITH_SECONDS: [char; DISPLAY_SLOTS] = [' ', 'T', 'I', 'M', 'E', ' '];
pub const ALERT_FRAME_B_WITH_SECONDS: [char; DISPLAY_SLOTS] = [' ', ' ', 'U', 'P', ' ', ' '];

/// Alert frames shown when only four cards are visible.
pub const ALERT_FRAME_A_WITHOUT_SECONDS: [char; DISPLAY_SLOTS] = ['T', 'I', 'M', 'E', ' ', ' '];
pub const ALERT_FRAME_B_WITHOUT_SECONDS: [char; DISPLAY_SLOTS] = [' ', 'U', 'P', ' ', ' ', ' '];

/// Timer increments offered by the front-end: (label, seconds).
pub const TIMER_INCREMENTS: [(&str, u64); 5] = [
    ("+10S", 10),
    ("+1M", 60),
    ("+5M", 300),
    ("+10M", 600),
    ("+1H", 3600),
];

/// Upper bound for the configured initial timer value (99:59:59).
pub const MAXIMUM_TIMER_SECONDS: u64 = 99 * 3600 + 59 * 60 + 59;

/// Longest the event loop blocks waiting for input when nothing is scheduled.
pub const MAXIMUM_POLL_INTERVAL: Duration = Duration::from_millis(250);

// # Configuration Defaults

pub const DEFAULT_SHOW_SECONDS: bool = false;
pub const DEFAULT_USE_24_HOUR: bool = true;
pub const DEFAULT_THEME: &str = "dark";
pub const DEFAULT_MODE: &str = "clock";
pub const DEFAULT_ORIENTATION: &str = "auto";
pub const DEFAULT_TIMER_SECONDS: u64 = 0;

pub const CONFIG_FILE_NAME: &str = "flipclock.toml";
pub const CONFIG_DIR_NAME: &str = "flipclock";

// # Exit Codes

pub const EXIT_FAILURE: i32 = 1;
