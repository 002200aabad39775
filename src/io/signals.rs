//! Unix signal handling.
//!
//! A background thread turns signals into [`SignalMessage`]s on the same
//! channel the config watcher uses, so the main loop has one place to drain.

use anyhow::{Context, Result};
use signal_hook::{
    consts::signal::{SIGHUP, SIGINT, SIGTERM, SIGUSR2},
    iterator::Signals,
};
use std::{
    sync::Arc,
    sync::atomic::{AtomicBool, Ordering},
    sync::mpsc::{Receiver, Sender},
    thread,
};

use crate::config::{ClockConfiguration, Config};

/// Messages delivered to the main loop from signal and watcher threads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SignalMessage {
    /// Re-read the configuration file (SIGUSR2 or file change).
    Reload,
    /// Leave the main loop (SIGTERM, SIGINT, SIGHUP).
    Shutdown,
}

/// Signal handling state shared between threads.
pub struct SignalState {
    /// Cleared once a shutdown signal arrives.
    pub running: Arc<AtomicBool>,
    pub signal_receiver: Receiver<SignalMessage>,
    /// Cloned into the config watcher.
    pub signal_sender: Sender<SignalMessage>,
}

impl SignalState {
    pub fn is_running(&self) -> bool {
        self.running.load(Ordering::SeqCst)
    }
}

/// Result of handling a reload message.
#[derive(Debug, Clone, PartialEq)]
pub enum ReloadOutcome {
    Applied(ClockConfiguration),
    /// The file failed to parse or validate; the caller keeps its settings.
    Rejected,
}

/// Re-read the configuration. A broken file is logged and ignored.
pub fn reload_configuration() -> ReloadOutcome {
    match Config::load() {
        Ok(config) => ReloadOutcome::Applied(config.clock_configuration()),
        Err(e) => {
            log_pipe!();
            log_error!("Failed to reload config: {e}");
            log_indented!("Continuing with previous configuration");
            ReloadOutcome::Rejected
        }
    }
}

/// Register handlers and spawn the signal thread.
pub fn setup_signal_handler(debug_enabled: bool) -> Result<SignalState> {
    let running = Arc::new(AtomicBool::new(true));
    let (signal_sender, signal_receiver) = std::sync::mpsc::channel::<SignalMessage>();

    let mut signals = Signals::new([SIGINT, SIGTERM, SIGHUP, SIGUSR2])
        .context("failed to register signal handlers")?;

    let running_clone = running.clone();
    let sender_clone = signal_sender.clone();

    thread::spawn(move || {
        for sig in signals.forever() {
            match sig {
                SIGUSR2 => {
                    if debug_enabled {
                        log_pipe!();
                        log_info!("Received configuration reload signal");
                    }
                    if sender_clone.send(SignalMessage::Reload).is_err() {
                        break;
                    }
                }
                SIGINT | SIGTERM | SIGHUP => {
                    if debug_enabled {
                        log_pipe!();
                        log_info!("Received {}, shutting down", signal_name(sig));
                    }
                    running_clone.store(false, Ordering::SeqCst);
                    let _ = sender_clone.send(SignalMessage::Shutdown);
                    break;
                }
                _ => {}
            }
        }
    });

    Ok(SignalState {
        running,
        signal_receiver,
        signal_sender,
    })
}

fn signal_name(sig: i32) -> &'static str {
    match sig {
        SIGINT => "SIGINT",
        SIGTERM => "SIGTERM",
        SIGHUP => "SIGHUP",
        SIGUSR2 => "SIGUSR2",
        _ => "unknown signal",
    }
}
