//! File watching for hot config reloading.
//!
//! Watches the directory holding `flipclock.toml` (editors often replace the
//! file instead of writing it in place) and forwards a reload message to the
//! main loop when the file changes.

use anyhow::{Context, Result};
use notify::{
    Config as NotifyConfig, Event, EventKind, RecommendedWatcher, RecursiveMode, Watcher,
};
use std::path::{Path, PathBuf};
use std::sync::mpsc::Sender;
use std::thread;
use std::time::{Duration, Instant};

use super::get_config_path;
use crate::common::utils::private_path;
use crate::io::signals::SignalMessage;

/// Editors write in several steps; collapse them into one reload.
const DEBOUNCE_MS: u64 = 500;

/// Configuration file watcher that monitors for changes and triggers reloads.
pub struct ConfigWatcher {
    signal_sender: Sender<SignalMessage>,
    debug_enabled: bool,
    config_path: PathBuf,
}

impl ConfigWatcher {
    pub fn new(
        signal_sender: Sender<SignalMessage>,
        config_path: PathBuf,
        debug_enabled: bool,
    ) -> Self {
        Self {
            signal_sender,
            debug_enabled,
            config_path,
        }
    }

    /// Spawn the watcher thread. Returns once the watch is registered.
    pub fn start(self) -> Result<()> {
        let watch_dir = self
            .config_path
            .parent()
            .map(Path::to_path_buf)
            .context("Config path has no parent directory")?;

        if self.debug_enabled {
            log_pipe!();
            log_debug!("Starting config file watcher for hot reload:");
            log_indented!("Watching: {}", private_path(&self.config_path));
        }

        let (tx, rx) = std::sync::mpsc::channel();

        let mut watcher = RecommendedWatcher::new(
            move |res: Result<Event, notify::Error>| {
                if let Ok(event) = res
                    && matches!(
                        event.kind,
                        EventKind::Create(_) | EventKind::Modify(_) | EventKind::Remove(_)
                    )
                {
                    let _ = tx.send(event);
                }
            },
            NotifyConfig::default(),
        )
        .context("Failed to create file watcher")?;

        watcher
            .watch(&watch_dir, RecursiveMode::NonRecursive)
            .with_context(|| format!("Failed to watch directory: {}", watch_dir.display()))?;

        let ConfigWatcher {
            signal_sender,
            debug_enabled,
            config_path,
        } = self;

        thread::spawn(move || {
            // The watcher stops when dropped; keep it alive with the thread.
            let _watcher = watcher;
            let mut last_reload: Option<Instant> = None;

            for event in rx {
                if !affects_config(&event, &config_path) {
                    continue;
                }

                if last_reload.is_some_and(|at| at.elapsed() < Duration::from_millis(DEBOUNCE_MS))
                {
                    continue;
                }

                if debug_enabled {
                    log_pipe!();
                    log_info!("Configuration file change detected");
                }

                if signal_sender.send(SignalMessage::Reload).is_err() {
                    // Main loop is gone.
                    break;
                }
                last_reload = Some(Instant::now());
            }
        });

        Ok(())
    }
}

/// Whether `event` touches the config file (or an editor temp copy of it).
fn affects_config(event: &Event, config_path: &Path) -> bool {
    let Some(config_name) = config_path.file_name().and_then(|n| n.to_str()) else {
        return false;
    };

    event.paths.iter().any(|path| {
        path == config_path
            || (path.parent() == config_path.parent()
                && path
                    .file_name()
                    .and_then(|n| n.to_str())
                    .is_some_and(|name| name.starts_with(config_name)))
    })
}

/// Start watching the active config file.
pub fn start_config_watcher(
    signal_sender: Sender<SignalMessage>,
    debug_enabled: bool,
) -> Result<()> {
    let config_path = get_config_path()?;
    ConfigWatcher::new(signal_sender, config_path, debug_enabled).start()
}

#[cfg(test)]
mod tests {
    use super::*;
    use notify::event::{CreateKind, ModifyKind};

    fn event(kind: EventKind, path: &str) -> Event {
        Event::new(kind).add_path(PathBuf::from(path))
    }

    #[test]
    fn test_config_write_is_detected() {
        let config = Path::new("/tmp/flipclock/flipclock.toml");
        let ev = event(
            EventKind::Modify(ModifyKind::Any),
            "/tmp/flipclock/flipclock.toml",
        );
        assert!(affects_config(&ev, config));
    }

    #[test]
    fn test_editor_temp_file_is_detected() {
        let config = Path::new("/tmp/flipclock/flipclock.toml");
        let ev = event(
            EventKind::Create(CreateKind::File),
            "/tmp/flipclock/flipclock.toml.swp",
        );
        assert!(affects_config(&ev, config));
    }

    #[test]
    fn test_unrelated_file_is_ignored() {
        let config = Path::new("/tmp/flipclock/flipclock.toml");
        let ev = event(
            EventKind::Modify(ModifyKind::Any),
            "/tmp/flipclock/notes.txt",
        );
        assert!(!affects_config(&ev, config));
    }
}
