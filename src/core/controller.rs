//! The clock controller: tick sources, timer state and the six flip cards.
//!
//! Everything here is driven by explicit instants. The event loop calls
//! [`ClockController::advance`] with the current `Instant`; tests pass
//! synthetic instants and a fixed time source, so no test ever sleeps.
//!
//! At most one tick source is armed at a time:
//!
//! | state                      | armed source |
//! |----------------------------|--------------|
//! | clock mode                 | clock        |
//! | timer mode, running        | countdown    |
//! | timer mode, expired        | blink        |
//! | timer mode, idle or paused | none         |
//!
//! Every state change recomputes the wanted source, cancels the others and
//! only then arms the wanted one.

use std::sync::Arc;
use std::time::Instant;

use crate::common::constants::*;
use crate::config::{ClockConfiguration, ClockMode};
use crate::core::tick::{TickKind, TickSource};
use crate::core::timer::{CountdownTick, TimerState};
use crate::display::flip::DigitFlipAnimator;
use crate::display::{DisplayValue, FormatRequest, FormattedDisplay, format_display};
use crate::time_source::{TimeSource, WallTime, read_wall_time};

/// What happened during one [`ClockController::advance`] call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AdvanceReport {
    /// Tick sources fired.
    pub ticks: usize,
    /// The countdown reached zero during this call.
    pub expired: bool,
    /// Cards that committed a new symbol.
    pub settled: usize,
    /// Cards that started or restarted a flip.
    pub retargeted: usize,
}

impl AdvanceReport {
    /// Whether anything visible changed.
    pub fn changed(&self) -> bool {
        self.ticks > 0 || self.settled > 0 || self.retargeted > 0
    }
}

pub struct ClockController {
    config: ClockConfiguration,
    time_source: Arc<dyn TimeSource>,
    timer: TimerState,
    wall_time: WallTime,
    /// Alert frame A ("TIME") when true, frame B ("UP") when false.
    blink_frame_a: bool,
    clock_tick: TickSource,
    countdown_tick: TickSource,
    blink_tick: TickSource,
    digits: [DigitFlipAnimator<char>; DISPLAY_SLOTS],
}

impl ClockController {
    pub fn new(config: ClockConfiguration, time_source: Arc<dyn TimeSource>, now: Instant) -> Self {
        Self::with_timer(config, time_source, TimerState::new(), now)
    }

    /// Start with a preloaded timer, e.g. from `timer_seconds` in the config.
    pub fn with_timer(
        config: ClockConfiguration,
        time_source: Arc<dyn TimeSource>,
        timer: TimerState,
        now: Instant,
    ) -> Self {
        let wall_time = read_wall_time(time_source.as_ref());
        let mut controller = Self {
            config,
            time_source,
            timer,
            wall_time,
            blink_frame_a: true,
            clock_tick: TickSource::new(TickKind::Clock, CLOCK_TICK_INTERVAL),
            countdown_tick: TickSource::new(TickKind::Countdown, COUNTDOWN_TICK_INTERVAL),
            blink_tick: TickSource::new(TickKind::Blink, EXPIRY_BLINK_INTERVAL),
            digits: std::array::from_fn(|_| DigitFlipAnimator::new(' ')),
        };

        // Cards mount showing the current value; there is nothing to flip from.
        let characters = controller.display().characters;
        for (slot, card) in controller.digits.iter_mut().enumerate() {
            card.reset(characters.slot(slot));
        }
        controller.reconcile_ticks(now);
        controller
    }

    // # Actions

    /// Switch between clock and timer.
    ///
    /// Entering clock mode clears an expired alert and pauses a running
    /// timer. Entering timer mode leaves the timer paused with whatever
    /// time it had left.
    pub fn set_mode(&mut self, mode: ClockMode, now: Instant) -> bool {
        if !self.switch_mode(mode, now) {
            return false;
        }
        self.retarget_digits(now);
        true
    }

    /// Add seconds to an idle timer. No upper bound.
    pub fn add_time(&mut self, delta_seconds: u64, now: Instant) -> bool {
        if !self.timer.add_time(delta_seconds) {
            return false;
        }
        self.retarget_digits(now);
        true
    }

    /// Start the countdown. Requires timer mode and time left.
    pub fn start(&mut self, now: Instant) -> bool {
        if self.config.mode != ClockMode::Timer || !self.timer.start() {
            return false;
        }
        self.reconcile_ticks(now);
        true
    }

    pub fn pause(&mut self, now: Instant) -> bool {
        if !self.timer.pause() {
            return false;
        }
        self.reconcile_ticks(now);
        true
    }

    /// Clear the alert and reset the timer to zero.
    pub fn dismiss(&mut self, now: Instant) -> bool {
        if !self.timer.dismiss() {
            return false;
        }
        self.blink_frame_a = true;
        self.reconcile_ticks(now);
        self.retarget_digits(now);
        true
    }

    /// Start when idle, pause when running.
    pub fn toggle_running(&mut self, now: Instant) -> bool {
        if self.timer.is_running() {
            self.pause(now)
        } else {
            self.start(now)
        }
    }

    /// Accept a new configuration pass from the settings owner.
    pub fn apply_config(&mut self, config: ClockConfiguration, now: Instant) {
        let previous = self.config;
        if previous == config {
            return;
        }

        // Mode last: the switch reads the new format settings.
        self.config = ClockConfiguration {
            mode: previous.mode,
            ..config
        };
        self.switch_mode(config.mode, now);

        if previous.show_seconds != config.show_seconds {
            // The seconds cards unmount or mount; either way they carry no
            // animation history.
            let characters = self.display().characters;
            for slot in SLOTS_WITHOUT_SECONDS..DISPLAY_SLOTS {
                self.digits[slot].reset(characters.slot(slot));
            }
        }

        self.retarget_digits(now);
    }

    // # Time

    /// Fire every tick due at or before `now` in order, then bring the cards
    /// up to date.
    pub fn advance(&mut self, now: Instant) -> AdvanceReport {
        let mut report = AdvanceReport::default();

        while let Some((kind, due)) = self.next_due_tick(now) {
            report.settled += self.settle_digits(due);

            if let Some(source) = self.source_mut(kind) {
                source.fire();
            }
            report.ticks += 1;
            if self.handle_tick(kind, due) {
                report.expired = true;
            }

            report.retargeted += self.retarget_digits(due);
        }

        report.retargeted += self.retarget_digits(now);
        report.settled += self.settle_digits(now);
        report
    }

    /// Earliest instant at which `advance` has work to do.
    pub fn next_deadline(&self) -> Option<Instant> {
        self.tick_sources()
            .iter()
            .filter_map(|source| source.next_due())
            .chain(self.digits.iter().filter_map(|card| card.next_deadline()))
            .min()
    }

    // # Queries

    /// Current formatted characters and AM/PM indicator.
    pub fn display(&self) -> FormattedDisplay {
        let value = match self.config.mode {
            ClockMode::Clock => DisplayValue::WallClock(self.wall_time),
            ClockMode::Timer => DisplayValue::Countdown(self.timer.remaining_seconds()),
        };

        format_display(&FormatRequest {
            use_24_hour: self.config.is_24_hour,
            show_seconds: self.config.show_seconds,
            value,
            expired: self.timer.is_expired(),
            blink_frame_a: self.blink_frame_a,
        })
    }

    pub fn config(&self) -> &ClockConfiguration {
        &self.config
    }

    pub fn timer(&self) -> &TimerState {
        &self.timer
    }

    pub fn wall_time(&self) -> WallTime {
        self.wall_time
    }

    pub fn blink_frame_a(&self) -> bool {
        self.blink_frame_a
    }

    /// Number of cards currently on screen.
    pub fn visible_slots(&self) -> usize {
        if self.config.show_seconds {
            DISPLAY_SLOTS
        } else {
            SLOTS_WITHOUT_SECONDS
        }
    }

    /// The on-screen cards, left to right.
    pub fn digits(&self) -> &[DigitFlipAnimator<char>] {
        &self.digits[..self.visible_slots()]
    }

    /// Tick sources currently armed.
    pub fn active_ticks(&self) -> Vec<TickKind> {
        self.tick_sources()
            .iter()
            .filter(|source| source.is_armed())
            .map(|source| source.kind())
            .collect()
    }

    // # Internals

    fn tick_sources(&self) -> [&TickSource; 3] {
        [&self.clock_tick, &self.countdown_tick, &self.blink_tick]
    }

    fn source_mut(&mut self, kind: TickKind) -> Option<&mut TickSource> {
        [
            &mut self.clock_tick,
            &mut self.countdown_tick,
            &mut self.blink_tick,
        ]
        .into_iter()
        .find(|source| source.kind() == kind)
    }

    fn wanted_tick(&self) -> Option<TickKind> {
        match self.config.mode {
            ClockMode::Clock => Some(TickKind::Clock),
            ClockMode::Timer if self.timer.is_expired() => Some(TickKind::Blink),
            ClockMode::Timer if self.timer.is_running() => Some(TickKind::Countdown),
            ClockMode::Timer => None,
        }
    }

    /// Cancel every source except the wanted one, then arm the wanted one if
    /// it is not already running.
    fn reconcile_ticks(&mut self, now: Instant) {
        let wanted = self.wanted_tick();

        for source in [
            &mut self.clock_tick,
            &mut self.countdown_tick,
            &mut self.blink_tick,
        ] {
            if Some(source.kind()) != wanted {
                source.cancel();
            }
        }

        if let Some(kind) = wanted
            && let Some(source) = self.source_mut(kind)
            && !source.is_armed()
        {
            source.arm(now);
        }
    }

    fn next_due_tick(&self, now: Instant) -> Option<(TickKind, Instant)> {
        self.tick_sources()
            .iter()
            .filter_map(|source| source.due_at(now).map(|due| (source.kind(), due)))
            .min_by_key(|(_, due)| *due)
    }

    /// Apply one tick. Returns `true` when the countdown expired.
    fn handle_tick(&mut self, kind: TickKind, due: Instant) -> bool {
        match kind {
            TickKind::Clock => {
                self.wall_time = read_wall_time(self.time_source.as_ref());
                false
            }
            TickKind::Countdown => match self.timer.tick() {
                CountdownTick::Expired => {
                    self.blink_frame_a = true;
                    self.reconcile_ticks(due);
                    true
                }
                CountdownTick::Counting => false,
                CountdownTick::Ignored => {
                    self.reconcile_ticks(due);
                    false
                }
            },
            TickKind::Blink => {
                self.blink_frame_a = !self.blink_frame_a;
                false
            }
        }
    }

    /// Offer the current characters to the visible cards. Returns how many
    /// cards started a new flip.
    /// Mode change without touching the cards.
    fn switch_mode(&mut self, mode: ClockMode, now: Instant) -> bool {
        if self.config.mode == mode {
            return false;
        }

        self.config.mode = mode;
        if mode == ClockMode::Clock {
            self.timer.clear_expired();
            self.timer.pause();
            self.blink_frame_a = true;
            self.wall_time = read_wall_time(self.time_source.as_ref());
        }

        self.reconcile_ticks(now);
        true
    }

    fn retarget_digits(&mut self, now: Instant) -> usize {
        let characters = self.display().characters;
        let visible = self.visible_slots();
        self.digits[..visible]
            .iter_mut()
            .enumerate()
            .map(|(slot, card)| card.set_target(characters.slot(slot), now))
            .filter(|changed| *changed)
            .count()
    }

    fn settle_digits(&mut self, now: Instant) -> usize {
        self.digits
            .iter_mut()
            .map(|card| card.poll(now))
            .filter(|settled| *settled)
            .count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::{Orientation, Theme};
    use crate::display::Meridiem;
    use crate::display::flip::FlipPhase;
    use crate::time_source::FixedTimeSource;
    use chrono::Duration as ChronoDuration;
    use std::time::Duration;

    fn secs(value: u64) -> Duration {
        Duration::from_secs(value)
    }

    fn ms(value: u64) -> Duration {
        Duration::from_millis(value)
    }

    fn timer_config(show_seconds: bool) -> ClockConfiguration {
        ClockConfiguration {
            show_seconds,
            theme: Theme::Dark,
            is_24_hour: true,
            mode: ClockMode::Timer,
            orientation: Orientation::Auto,
        }
    }

    fn clock_config(is_24_hour: bool) -> ClockConfiguration {
        ClockConfiguration {
            show_seconds: true,
            is_24_hour,
            ..ClockConfiguration::default()
        }
    }

    fn timer_controller(remaining: u64, show_seconds: bool) -> (ClockController, Instant) {
        let t0 = Instant::now();
        let source = Arc::new(FixedTimeSource::at(9, 30, 0));
        let controller = ClockController::with_timer(
            timer_config(show_seconds),
            source,
            TimerState::with_remaining(remaining),
            t0,
        );
        (controller, t0)
    }

    fn shown(controller: &ClockController) -> Vec<char> {
        controller.digits().iter().map(|card| *card.displayed()).collect()
    }

    #[test]
    fn test_cards_mount_without_animation() {
        let (controller, _) = timer_controller(125, true);
        assert_eq!(shown(&controller), vec!['0', '0', '0', '2', '0', '5']);
        assert!(
            controller
                .digits()
                .iter()
                .all(|card| card.phase() == FlipPhase::Idle)
        );
    }

    #[test]
    fn test_clock_mode_reads_time_source_each_tick() {
        let t0 = Instant::now();
        let source = Arc::new(FixedTimeSource::at(13, 59, 58));
        let mut controller = ClockController::new(clock_config(true), source.clone(), t0);

        assert_eq!(controller.active_ticks(), vec![TickKind::Clock]);
        assert_eq!(shown(&controller), vec!['1', '3', '5', '9', '5', '8']);

        source.advance(ChronoDuration::seconds(2));
        controller.advance(t0 + ms(500));
        assert_eq!(controller.wall_time(), WallTime::new(13, 59, 58));

        let report = controller.advance(t0 + secs(1));
        assert_eq!(report.ticks, 1);
        assert_eq!(controller.wall_time(), WallTime::new(14, 0, 0));

        controller.advance(t0 + secs(1) + FLIP_SETTLE_DELAY);
        assert_eq!(shown(&controller), vec!['1', '4', '0', '0', '0', '0']);
    }

    #[test]
    fn test_twelve_hour_indicator() {
        let t0 = Instant::now();
        let source = Arc::new(FixedTimeSource::at(0, 15, 0));
        let controller = ClockController::new(clock_config(false), source, t0);
        let display = controller.display();
        assert_eq!(&display.characters.0[..2], &['1', '2']);
        assert_eq!(display.indicator, Some(Meridiem::Am));
    }

    #[test]
    fn test_timer_mode_idle_has_no_tick() {
        let (controller, _) = timer_controller(0, true);
        assert!(controller.active_ticks().is_empty());
        assert_eq!(controller.next_deadline(), None);
    }

    #[test]
    fn test_countdown_decrements_once_per_second() {
        let (mut controller, t0) = timer_controller(3, true);
        assert!(controller.start(t0));
        assert_eq!(controller.active_ticks(), vec![TickKind::Countdown]);

        controller.advance(t0 + ms(999));
        assert_eq!(controller.timer().remaining_seconds(), 3);

        controller.advance(t0 + secs(1));
        assert_eq!(controller.timer().remaining_seconds(), 2);

        controller.advance(t0 + secs(2));
        assert_eq!(controller.timer().remaining_seconds(), 1);
    }

    #[test]
    fn test_last_second_expires_and_starts_blink() {
        let (mut controller, t0) = timer_controller(1, true);
        controller.start(t0);

        let report = controller.advance(t0 + secs(1));
        assert!(report.expired);

        let timer = controller.timer();
        assert_eq!(timer.remaining_seconds(), 0);
        assert!(!timer.is_running());
        assert!(timer.is_expired());
        assert_eq!(controller.active_ticks(), vec![TickKind::Blink]);
        assert_eq!(
            controller.display().characters.0,
            [' ', 'T', 'I', 'M', 'E', ' ']
        );
    }

    #[test]
    fn test_blink_alternates_every_two_seconds() {
        let (mut controller, t0) = timer_controller(1, true);
        controller.start(t0);
        let expired_at = t0 + secs(1);
        controller.advance(expired_at);

        let frame_a = [' ', 'T', 'I', 'M', 'E', ' '];
        let frame_b = [' ', ' ', 'U', 'P', ' ', ' '];

        controller.advance(expired_at + ms(1999));
        assert_eq!(controller.display().characters.0, frame_a);
        controller.advance(expired_at + secs(2));
        assert_eq!(controller.display().characters.0, frame_b);
        controller.advance(expired_at + secs(4));
        assert_eq!(controller.display().characters.0, frame_a);
        controller.advance(expired_at + secs(6));
        assert_eq!(controller.display().characters.0, frame_b);
    }

    #[test]
    fn test_catch_up_processes_ticks_in_order() {
        let (mut controller, t0) = timer_controller(2, true);
        controller.start(t0);

        // A stalled loop wakes up long after expiry: two countdown ticks,
        // then blink ticks at 4s and 6s after start.
        let report = controller.advance(t0 + secs(6));
        assert!(report.expired);
        assert_eq!(report.ticks, 4);
        assert_eq!(controller.timer().remaining_seconds(), 0);
        assert!(controller.blink_frame_a());
    }

    #[test]
    fn test_pause_cancels_countdown() {
        let (mut controller, t0) = timer_controller(10, true);
        controller.start(t0);
        controller.advance(t0 + secs(1));

        assert!(controller.pause(t0 + ms(1500)));
        assert!(controller.active_ticks().is_empty());

        controller.advance(t0 + secs(5));
        assert_eq!(controller.timer().remaining_seconds(), 9);
    }

    #[test]
    fn test_restart_after_pause_has_single_tick_source() {
        let (mut controller, t0) = timer_controller(10, true);
        controller.start(t0);
        controller.pause(t0 + ms(300));
        controller.start(t0 + ms(600));
        controller.pause(t0 + ms(700));
        controller.start(t0 + ms(800));

        assert_eq!(controller.active_ticks(), vec![TickKind::Countdown]);
        controller.advance(t0 + ms(1800));
        assert_eq!(controller.timer().remaining_seconds(), 9);
    }

    #[test]
    fn test_start_is_noop_without_time() {
        let (mut controller, t0) = timer_controller(0, true);
        let before = *controller.timer();
        assert!(!controller.start(t0));
        assert_eq!(*controller.timer(), before);
        assert!(controller.active_ticks().is_empty());
    }

    #[test]
    fn test_start_is_noop_in_clock_mode() {
        let t0 = Instant::now();
        let source = Arc::new(FixedTimeSource::at(8, 0, 0));
        let mut controller = ClockController::with_timer(
            clock_config(true),
            source,
            TimerState::with_remaining(60),
            t0,
        );
        assert!(!controller.start(t0));
        assert!(!controller.timer().is_running());
    }

    #[test]
    fn test_add_time_only_when_idle() {
        let (mut controller, t0) = timer_controller(0, true);
        assert!(controller.add_time(60, t0));
        assert!(controller.add_time(10, t0));
        assert_eq!(controller.timer().remaining_seconds(), 70);

        controller.start(t0);
        assert!(!controller.add_time(600, t0));
        assert_eq!(controller.timer().remaining_seconds(), 70);
    }

    #[test]
    fn test_add_time_flips_cards() {
        let (mut controller, t0) = timer_controller(0, true);
        controller.add_time(300, t0);

        let minute_card = &controller.digits()[3];
        assert_eq!(minute_card.phase(), FlipPhase::Transitioning);
        assert_eq!(*minute_card.displayed(), '0');
        assert_eq!(*minute_card.incoming(), '5');

        controller.advance(t0 + FLIP_SETTLE_DELAY);
        assert_eq!(shown(&controller), vec!['0', '0', '0', '5', '0', '0']);
    }

    #[test]
    fn test_rapid_increments_commit_only_final_value() {
        let (mut controller, t0) = timer_controller(0, true);
        controller.add_time(60, t0);
        controller.add_time(60, t0 + ms(20));
        controller.add_time(60, t0 + ms(40));

        // The first increment's window has passed but was superseded.
        controller.advance(t0 + ms(60));
        assert_eq!(*controller.digits()[3].displayed(), '0');

        controller.advance(t0 + ms(90));
        assert_eq!(*controller.digits()[3].displayed(), '3');
    }

    #[test]
    fn test_dismiss_resets_timer() {
        let (mut controller, t0) = timer_controller(1, true);
        controller.start(t0);
        controller.advance(t0 + secs(1));
        controller.advance(t0 + secs(3));
        assert!(!controller.blink_frame_a());

        assert!(controller.dismiss(t0 + secs(4)));
        assert_eq!(*controller.timer(), TimerState::new());
        assert!(controller.blink_frame_a());
        assert!(controller.active_ticks().is_empty());
        assert_eq!(
            controller.display().characters.0,
            ['0', '0', '0', '0', '0', '0']
        );
        assert!(!controller.dismiss(t0 + secs(5)));
    }

    #[test]
    fn test_switch_to_clock_clears_expiry() {
        let (mut controller, t0) = timer_controller(1, true);
        controller.start(t0);
        controller.advance(t0 + secs(1));

        assert!(controller.set_mode(ClockMode::Clock, t0 + secs(2)));
        assert!(!controller.timer().is_expired());
        assert_eq!(controller.active_ticks(), vec![TickKind::Clock]);

        assert!(controller.set_mode(ClockMode::Timer, t0 + secs(3)));
        assert!(controller.active_ticks().is_empty());
        assert_eq!(controller.timer().remaining_seconds(), 0);
    }

    #[test]
    fn test_switch_to_clock_pauses_running_timer() {
        let (mut controller, t0) = timer_controller(30, true);
        controller.start(t0);
        controller.advance(t0 + secs(1));

        controller.set_mode(ClockMode::Clock, t0 + ms(1500));
        assert!(!controller.timer().is_running());
        assert_eq!(controller.active_ticks(), vec![TickKind::Clock]);

        controller.set_mode(ClockMode::Timer, t0 + secs(2));
        assert_eq!(controller.timer().remaining_seconds(), 29);
        assert!(!controller.timer().is_running());
    }

    #[test]
    fn test_set_same_mode_is_noop() {
        let (mut controller, t0) = timer_controller(30, true);
        controller.start(t0);
        assert!(!controller.set_mode(ClockMode::Timer, t0 + ms(500)));
        assert!(controller.timer().is_running());
        assert_eq!(
            controller.next_deadline(),
            Some(t0 + COUNTDOWN_TICK_INTERVAL)
        );
    }

    #[test]
    fn test_hiding_seconds_unmounts_cards() {
        let (mut controller, t0) = timer_controller(75, true);
        assert_eq!(controller.digits().len(), 6);

        controller.apply_config(timer_config(false), t0);
        assert_eq!(controller.digits().len(), 4);

        controller.add_time(10, t0);
        controller.apply_config(timer_config(true), t0 + ms(10));
        let seconds_card = &controller.digits()[5];
        assert_eq!(seconds_card.phase(), FlipPhase::Idle);
        assert_eq!(*seconds_card.displayed(), '5');
    }

    #[test]
    fn test_config_pass_with_mode_and_format_change_targets_final_value() {
        let (mut controller, t0) = timer_controller(42, true);
        let config = clock_config(false);

        // 09:30:00 in 12-hour form.
        controller.apply_config(config, t0 + ms(10));
        assert_eq!(*controller.config(), config);
        assert_eq!(controller.active_ticks(), vec![TickKind::Clock]);
        assert_eq!(controller.display().indicator, Some(Meridiem::Am));

        let expected = controller.display().characters;
        for (slot, card) in controller.digits().iter().enumerate() {
            assert_eq!(*card.incoming(), expected.slot(slot));
            assert_eq!(card.is_transitioning(), *card.displayed() != expected.slot(slot));
        }

        controller.advance(t0 + ms(10) + FLIP_SETTLE_DELAY);
        assert_eq!(shown(&controller), vec!['0', '9', '3', '0', '0', '0']);
    }

    #[test]
    fn test_alert_frame_follows_seconds_setting() {
        let (mut controller, t0) = timer_controller(1, false);
        controller.start(t0);
        controller.advance(t0 + secs(1));
        assert_eq!(
            controller.display().characters.0,
            ['T', 'I', 'M', 'E', ' ', ' ']
        );
    }

    #[test]
    fn test_next_deadline_prefers_settle() {
        let (mut controller, t0) = timer_controller(0, true);
        controller.add_time(10, t0);
        assert_eq!(controller.next_deadline(), Some(t0 + FLIP_SETTLE_DELAY));
    }

    #[test]
    fn test_toggle_running() {
        let (mut controller, t0) = timer_controller(5, true);
        assert!(controller.toggle_running(t0));
        assert!(controller.timer().is_running());
        assert!(controller.toggle_running(t0 + ms(100)));
        assert!(!controller.timer().is_running());
    }
}
