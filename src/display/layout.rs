//! Screen arrangement of the flip cards.
//!
//! Layout depends on the configuration and the viewport only; it never
//! influences what the cards show.

use crate::common::constants::{DISPLAY_SLOTS, SLOTS_WITHOUT_SECONDS};
use crate::config::{ClockConfiguration, Orientation};

/// Terminal size in character cells.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    pub columns: u16,
    pub rows: u16,
}

impl Viewport {
    pub fn new(columns: u16, rows: u16) -> Self {
        Self { columns, rows }
    }

    /// Cells are roughly twice as tall as they are wide, so rows count
    /// double when comparing height against width.
    pub fn is_taller_than_wide(&self) -> bool {
        u32::from(self.rows) * 2 > u32::from(self.columns)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DigitSize {
    Large,
    ExtraLarge,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout {
    /// Card groups stacked vertically instead of side by side.
    pub portrait: bool,
    /// 4 (HH MM) or 6 (HH MM SS).
    pub visible_slots: usize,
    pub digit_size: DigitSize,
    /// Colon between HH and MM.
    pub first_separator: bool,
    /// Colon between MM and SS.
    pub second_separator: bool,
    /// Separators fade out while the alert is shown.
    pub separators_dimmed: bool,
}

pub fn compute_layout(config: &ClockConfiguration, viewport: Viewport, expired: bool) -> Layout {
    let portrait = match config.orientation {
        Orientation::Portrait => true,
        Orientation::Auto => viewport.is_taller_than_wide(),
    };

    let digit_size = if portrait || !config.show_seconds {
        DigitSize::ExtraLarge
    } else {
        DigitSize::Large
    };

    Layout {
        portrait,
        visible_slots: if config.show_seconds {
            DISPLAY_SLOTS
        } else {
            SLOTS_WITHOUT_SECONDS
        },
        digit_size,
        first_separator: !portrait,
        second_separator: !portrait && config.show_seconds,
        separators_dimmed: expired,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn config(show_seconds: bool, orientation: Orientation) -> ClockConfiguration {
        ClockConfiguration {
            show_seconds,
            orientation,
            ..ClockConfiguration::default()
        }
    }

    #[test]
    fn test_auto_orientation_follows_viewport() {
        let cfg = config(false, Orientation::Auto);
        assert!(!compute_layout(&cfg, Viewport::new(120, 40), false).portrait);
        assert!(compute_layout(&cfg, Viewport::new(60, 40), false).portrait);
    }

    #[test]
    fn test_forced_portrait() {
        let cfg = config(true, Orientation::Portrait);
        let layout = compute_layout(&cfg, Viewport::new(200, 20), false);
        assert!(layout.portrait);
        assert!(!layout.first_separator);
        assert!(!layout.second_separator);
        assert_eq!(layout.digit_size, DigitSize::ExtraLarge);
    }

    #[test]
    fn test_landscape_with_seconds() {
        let cfg = config(true, Orientation::Auto);
        let layout = compute_layout(&cfg, Viewport::new(200, 40), false);
        assert_eq!(layout.visible_slots, 6);
        assert_eq!(layout.digit_size, DigitSize::Large);
        assert!(layout.first_separator);
        assert!(layout.second_separator);
    }

    #[test]
    fn test_landscape_without_seconds() {
        let cfg = config(false, Orientation::Auto);
        let layout = compute_layout(&cfg, Viewport::new(200, 40), true);
        assert_eq!(layout.visible_slots, 4);
        assert_eq!(layout.digit_size, DigitSize::ExtraLarge);
        assert!(layout.first_separator);
        assert!(!layout.second_separator);
        assert!(layout.separators_dimmed);
    }
}
