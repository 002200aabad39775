//! Display formatting: from a clock or timer value to six flip-card symbols.
//!
//! The formatter is a pure function of its inputs. It always produces six
//! characters (HH MM SS); whether the last two are drawn is a layout concern.
//! An expired timer replaces the digits with one of two alert frames.

pub mod flip;
pub mod layout;

use crate::common::constants::*;
use crate::config::ClockMode;
use crate::time_source::WallTime;

/// AM/PM marker shown on the first card in 12-hour clock mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Meridiem {
    Am,
    Pm,
}

impl Meridiem {
    pub fn as_str(&self) -> &'static str {
        match self {
            Meridiem::Am => "AM",
            Meridiem::Pm => "PM",
        }
    }

    /// AM before noon, from the 24-hour value.
    pub fn from_hour(hour_24: u32) -> Self {
        if hour_24 < 12 { Meridiem::Am } else { Meridiem::Pm }
    }
}

/// Exactly six symbols, one per flip card.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DisplayCharacters(pub [char; DISPLAY_SLOTS]);

impl DisplayCharacters {
    pub fn slot(&self, index: usize) -> char {
        self.0[index]
    }

    /// Concatenate groups for non-interactive output, e.g. `12:05` or `12:05:09`.
    pub fn to_clock_string(&self, show_seconds: bool) -> String {
        let c = &self.0;
        let mut out = format!("{}{}:{}{}", c[0], c[1], c[2], c[3]);
        if show_seconds {
            out.push_str(&format!(":{}{}", c[4], c[5]));
        }
        out
    }
}

/// The raw value a display pass starts from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DisplayValue {
    /// Clock mode: local time of day.
    WallClock(WallTime),
    /// Timer mode: remaining seconds.
    Countdown(u64),
}

impl DisplayValue {
    pub fn mode(&self) -> ClockMode {
        match self {
            DisplayValue::WallClock(_) => ClockMode::Clock,
            DisplayValue::Countdown(_) => ClockMode::Timer,
        }
    }
}

/// Everything the formatter needs for one pass. The mode is carried by
/// the variant of `value`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct FormatRequest {
    pub use_24_hour: bool,
    pub show_seconds: bool,
    pub value: DisplayValue,
    pub expired: bool,
    /// `true` shows alert frame A ("TIME"), `false` frame B ("UP").
    pub blink_frame_a: bool,
}

/// Result of one formatting pass.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormattedDisplay {
    pub characters: DisplayCharacters,
    pub indicator: Option<Meridiem>,
}

/// Split a countdown into (hours, minutes, seconds).
pub fn split_seconds(total: u64) -> (u64, u64, u64) {
    (total / 3600, (total % 3600) / 60, total % 60)
}

/// Convert a 24-hour value to the 12-hour face: 0 → 12, 13 → 1, 12 → 12.
pub fn to_twelve_hour(hour_24: u32) -> (u32, Meridiem) {
    let meridiem = Meridiem::from_hour(hour_24);
    let hour = match hour_24 % 12 {
        0 => 12,
        h => h,
    };
    (hour, meridiem)
}

/// Two characters of a zero-padded group. Values past 99 keep their
/// leading two digits.
fn two_digits(value: u64) -> [char; 2] {
    let text = format!("{value:02}");
    let mut chars = text.chars();
    [chars.next().unwrap_or('0'), chars.next().unwrap_or('0')]
}

fn alert_frame(show_seconds: bool, frame_a: bool) -> [char; DISPLAY_SLOTS] {
    match (show_seconds, frame_a) {
        (true, true) => ALERT_FRAME_A_WITH_SECONDS,
        (true, false) => ALERT_FRAME_B_WITH_SECONDS,
        (false, true) => ALERT_FRAME_A_WITHOUT_SECONDS,
        (false, false) => ALERT_FRAME_B_WITHOUT_SECONDS,
    }
}

/// Map a request to its six characters and optional indicator.
pub fn format_display(request: &FormatRequest) -> FormattedDisplay {
    let (groups, indicator) = match request.value {
        DisplayValue::WallClock(time) => {
            let (hours, indicator) = if request.use_24_hour {
                (time.hours, None)
            } else {
                let (hours, meridiem) = to_twelve_hour(time.hours);
                (hours, Some(meridiem))
            };
            (
                [hours as u64, time.minutes as u64, time.seconds as u64],
                indicator,
            )
        }
        DisplayValue::Countdown(total) => {
            let (h, m, s) = split_seconds(total);
            ([h, m, s], None)
        }
    };

    let characters = if request.expired {
        alert_frame(request.show_seconds, request.blink_frame_a)
    } else {
        let [h, m, s] = groups.map(two_digits);
        [h[0], h[1], m[0], m[1], s[0], s[1]]
    };

    FormattedDisplay {
        characters: DisplayCharacters(characters),
        indicator,
    }
}
