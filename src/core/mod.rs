//! Core application loop.
//!
//! The `Core` struct owns the clock controller and the terminal front-end
//! and runs the interactive loop:
//!
//! - advance the controller to the current instant (ticks and flips)
//! - redraw when something visible changed
//! - drain signal and watcher messages (reload, shutdown)
//! - wait for input until the next scheduled deadline
//!
//! The loop never sleeps past a tick or settle deadline and never blocks
//! longer than `MAXIMUM_POLL_INTERVAL`, so shutdown requests are noticed
//! promptly.

pub mod controller;
pub mod tick;
pub mod timer;

use anyhow::{Context, Result};
use crossterm::event::{self, Event};
use std::sync::Arc;
use std::sync::mpsc::TryRecvError;
use std::time::{Duration, Instant};

use crate::{
    common::{constants::*, logger::Log, utils},
    config::{self, ClockConfiguration, Config},
    core::{controller::ClockController, tick::TickKind, timer::TimerState},
    display::layout::Viewport,
    io::{
        signals::{ReloadOutcome, SignalMessage, SignalState, reload_configuration},
        terminal::{TerminalGuard, current_viewport},
    },
    time_source::TimeSource,
    ui::{
        Renderer, Scene,
        input::{Action, action_for_key},
    },
};

/// Dependencies for creating a Core instance.
pub(crate) struct CoreParams {
    pub config: Config,
    pub signal_state: SignalState,
    pub time_source: Arc<dyn TimeSource>,
    pub debug_enabled: bool,
    /// Overrides `timer_seconds` from the config file.
    pub timer_seconds: Option<u64>,
}

pub(crate) struct Core {
    controller: ClockController,
    signal_state: SignalState,
    debug_enabled: bool,
    renderer: Renderer,
    viewport: Viewport,
    needs_redraw: bool,
    /// Last tick source reported in debug output.
    active_tick: Option<TickKind>,
}

/// Whether the loop should keep going after handling an event.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Flow {
    Continue,
    Exit,
}

impl Core {
    pub fn new(params: CoreParams) -> Self {
        let timer_seconds = params
            .timer_seconds
            .unwrap_or_else(|| params.config.timer_seconds());
        let controller = ClockController::with_timer(
            params.config.clock_configuration(),
            params.time_source,
            TimerState::with_remaining(timer_seconds),
            Instant::now(),
        );

        let active_tick = controller.active_ticks().first().copied();

        Self {
            controller,
            signal_state: params.signal_state,
            debug_enabled: params.debug_enabled,
            renderer: Renderer::new(),
            viewport: current_viewport(),
            needs_redraw: true,
            active_tick,
        }
    }

    /// Take over the terminal and run until quit or a shutdown signal.
    pub fn execute(mut self) -> Result<()> {
        if let Some(custom_dir) = config::get_custom_config_dir() {
            log_block_start!("Base directory: {}", utils::private_path(&custom_dir));
        }
        log_block_start!("Starting display...");

        // The display owns stdout from here; a log file keeps receiving lines.
        Log::set_enabled(false);
        let result = TerminalGuard::enter()
            .context("Failed to initialize terminal")
            .and_then(|mut terminal| {
                let result = self.main_loop();
                terminal.restore();
                result
            });
        Log::set_enabled(true);

        let timer = self.controller.timer();
        if self.controller.config().mode == config::ClockMode::Timer && timer.remaining_seconds() > 0
        {
            log_decorated!(
                "Timer left at {}",
                utils::format_duration_hms(timer.remaining_seconds())
            );
        }
        result
    }

    fn main_loop(&mut self) -> Result<()> {
        while self.signal_state.is_running() {
            let report = self.controller.advance(Instant::now());
            if report.expired && self.debug_enabled {
                log_pipe!();
                log_info!("Timer finished");
            }
            self.log_tick_change();

            if report.changed() || self.needs_redraw {
                let scene = Scene::capture(&self.controller, self.viewport);
                self.renderer.draw(&scene, self.viewport)?;
                self.needs_redraw = false;
            }

            if self.process_signals() == Flow::Exit {
                break;
            }

            let timeout = self.poll_timeout(Instant::now());
            if event::poll(timeout).context("Failed to poll terminal events")? {
                let event = event::read().context("Failed to read terminal event")?;
                if self.handle_event(event) == Flow::Exit {
                    break;
                }
            }
        }

        Ok(())
    }

    fn log_tick_change(&mut self) {
        let active = self.controller.active_ticks().first().copied();
        if active == self.active_tick {
            return;
        }
        self.active_tick = active;

        if self.debug_enabled {
            log_pipe!();
            log_debug!(
                "Tick source: {}",
                active.map_or("none", |kind| kind.as_str())
            );
        }
    }

    /// Time until the next controller deadline, capped so signals stay responsive.
    fn poll_timeout(&self, now: Instant) -> Duration {
        self.controller
            .next_deadline()
            .map(|deadline| deadline.saturating_duration_since(now))
            .unwrap_or(MAXIMUM_POLL_INTERVAL)
            .min(MAXIMUM_POLL_INTERVAL)
    }

    fn process_signals(&mut self) -> Flow {
        loop {
            match self.signal_state.signal_receiver.try_recv() {
                Ok(SignalMessage::Reload) => {
                    if let ReloadOutcome::Applied(config) = reload_configuration() {
                        self.apply_reloaded(config);
                    }
                }
                Ok(SignalMessage::Shutdown) => return Flow::Exit,
                Err(TryRecvError::Empty) => return Flow::Continue,
                // Every sender is gone; nothing can ask us to stop any more
                // except the keyboard.
                Err(TryRecvError::Disconnected) => return Flow::Continue,
            }
        }
    }

    fn apply_reloaded(&mut self, config: ClockConfiguration) {
        if self.debug_enabled {
            log_pipe!();
            log_debug!("Applying reloaded configuration:");
            log_indented!("Mode: {}", config.mode.as_str());
            log_indented!("Theme: {}", config.theme.as_str());
            log_indented!("Show seconds: {}", config.show_seconds);
            log_indented!("24-hour: {}", config.is_24_hour);
            log_indented!("Orientation: {}", config.orientation.as_str());
        }
        self.controller.apply_config(config, Instant::now());
        self.needs_redraw = true;
    }

    fn handle_event(&mut self, event: Event) -> Flow {
        match event {
            Event::Key(key) => match action_for_key(key) {
                Some(action) => self.handle_action(action, Instant::now()),
                None => Flow::Continue,
            },
            Event::Resize(columns, rows) => {
                self.viewport = Viewport::new(columns, rows);
                self.needs_redraw = true;
                Flow::Continue
            }
            _ => Flow::Continue,
        }
    }

    fn handle_action(&mut self, action: Action, now: Instant) -> Flow {
        let mut config = *self.controller.config();
        match action {
            Action::Quit => return Flow::Exit,
            Action::ToggleSeconds => config.show_seconds = !config.show_seconds,
            Action::ToggleTheme => config.theme = config.theme.toggled(),
            Action::ToggleHourFormat => config.is_24_hour = !config.is_24_hour,
            Action::ToggleMode => config.mode = config.mode.toggled(),
            Action::ToggleOrientation => config.orientation = config.orientation.toggled(),
            Action::AddTime(seconds) => {
                if self.controller.config().mode == config::ClockMode::Timer {
                    self.controller.add_time(seconds, now);
                }
            }
            Action::StartPause => {
                if self.controller.toggle_running(now) && self.debug_enabled {
                    log_pipe!();
                    log_debug!(
                        "Timer {} at {}",
                        if self.controller.timer().is_running() {
                            "started"
                        } else {
                            "paused"
                        },
                        utils::format_duration_hms(self.controller.timer().remaining_seconds())
                    );
                }
            }
            Action::Dismiss => {
                self.controller.dismiss(now);
            }
        }

        if config != *self.controller.config() {
            self.controller.apply_config(config, now);
        }
        self.needs_redraw = true;
        Flow::Continue
    }
}
