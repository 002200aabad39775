//! Structured logging with box-drawing output.
//!
//! flipclock logs in blocks: a version header, pipe-prefixed sections and a
//! terminator. While the full-screen display owns the terminal, stdout output
//! is switched off; when `--log <file>` is given every line is routed to a
//! background writer thread instead and keeps flowing.
//!
//! ## Conventions
//!
//! - `log_block_start!` opens a new conceptual block (`┃` spacer then `┣ message`).
//! - `log_decorated!` continues a block (`┣ message`).
//! - `log_indented!` lists details under a block line (`┃   message`).
//! - `log_pipe!` inserts a spacer before a level message.
//! - `log_version!` / `log_end!` frame the whole run.
//! - `log_info!`, `log_warning!`, `log_error!`, `log_debug!`, `log_critical!`
//!   carry a coloured `[LEVEL]` tag.
//! - `log_error_exit!` closes the log with an error (`┗[ERROR]`).

use std::io::Write;
use std::sync::OnceLock;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{Sender, channel};

static LOGGING_ENABLED: AtomicBool = AtomicBool::new(true);

static LOG_CHANNEL: OnceLock<Sender<LogMessage>> = OnceLock::new();

enum LogMessage {
    Formatted(String),
    Shutdown,
}

/// Logging switches and helpers shared by the macros.
pub struct Log;

impl Log {
    /// Enable or disable stdout logging.
    ///
    /// File logging is unaffected so a `--log` session keeps its full record
    /// while the display is on screen.
    pub fn set_enabled(enabled: bool) {
        LOGGING_ENABLED.store(enabled, Ordering::SeqCst);
    }

    /// Whether a line would currently be written anywhere.
    pub fn is_enabled() -> bool {
        Self::is_file_logging() || LOGGING_ENABLED.load(Ordering::SeqCst)
    }

    /// Whether output is routed to a log file.
    pub fn is_file_logging() -> bool {
        LOG_CHANNEL.get().is_some()
    }

    /// Route all log output to `file_path` until the returned guard is dropped.
    pub fn start_file_logging(file_path: String) -> anyhow::Result<LoggerGuard> {
        let (tx, rx) = channel();

        LOG_CHANNEL
            .set(tx.clone())
            .map_err(|_| anyhow::anyhow!("Logger channel already initialized"))?;

        let handle = std::thread::spawn(move || {
            let mut file = std::fs::File::create(&file_path)?;

            loop {
                match rx.recv() {
                    Ok(LogMessage::Formatted(text)) => file.write_all(text.as_bytes())?,
                    Ok(LogMessage::Shutdown) | Err(_) => {
                        file.flush()?;
                        break;
                    }
                }
            }

            Ok::<(), anyhow::Error>(())
        });

        Ok(LoggerGuard {
            tx,
            handle: Some(handle),
        })
    }

    /// `[HH:MM:SS] ` of the simulated clock, empty outside simulation.
    pub fn get_timestamp_prefix() -> String {
        if crate::time_source::is_initialized() && crate::time_source::is_simulated() {
            format!("[{}] ", crate::time_source::now().format("%H:%M:%S"))
        } else {
            String::new()
        }
    }
}

/// Keeps the file writer thread alive; flushes and joins it on drop.
pub struct LoggerGuard {
    tx: Sender<LogMessage>,
    handle: Option<std::thread::JoinHandle<anyhow::Result<()>>>,
}

impl Drop for LoggerGuard {
    fn drop(&mut self) {
        let _ = self.tx.send(LogMessage::Shutdown);
        if let Some(handle) = self.handle.take() {
            let _ = handle.join();
        }
    }
}

fn strip_ansi_codes(text: &str) -> String {
    let mut result = String::with_capacity(text.len());
    let mut chars = text.chars().peekable();

    while let Some(ch) = chars.next() {
        if ch == '\x1b' && chars.peek() == Some(&'[') {
            chars.next();
            for ch in chars.by_ref() {
                if ch == 'm' {
                    break;
                }
            }
        } else {
            result.push(ch);
        }
    }

    result
}

/// Write one formatted line to the active sink. Used by the macros.
pub fn write_output(text: &str) {
    if let Some(tx) = LOG_CHANNEL.get() {
        let _ = tx.send(LogMessage::Formatted(strip_ansi_codes(text)));
    } else if LOGGING_ENABLED.load(Ordering::SeqCst) {
        print!("{text}");
        let _ = std::io::stdout().flush();
    }
}

/// Shared expansion for every logging macro: `$layout` receives the
/// timestamp prefix and the rendered message.
#[doc(hidden)]
#[macro_export]
macro_rules! __log_line {
    ($layout:expr, $($message:tt)+) => {{
        use $crate::common::logger::Log;
        if Log::is_enabled() {
            let prefix = Log::get_timestamp_prefix();
            let message = $crate::__log_message!($($message)+);
            let layout: fn(&str, &str) -> String = $layout;
            $crate::common::logger::write_output(&layout(&prefix, &message));
        }
    }};
}

#[doc(hidden)]
#[macro_export]
macro_rules! __log_message {
    ($fmt:literal $($arg:tt)*) => {
        format!($fmt $($arg)*)
    };
    ($expr:expr) => {
        format!("{}", $expr)
    };
}

/// Log a message as part of the current block.
#[macro_export]
macro_rules! log_decorated {
    ($($message:tt)+) => {
        $crate::__log_line!(|p, m| format!("{p}┣ {m}\n"), $($message)+)
    };
}

/// Log a detail line nested under a block message.
#[macro_export]
macro_rules! log_indented {
    ($($message:tt)+) => {
        $crate::__log_line!(|p, m| format!("{p}┃   {m}\n"), $($message)+)
    };
}

/// Log an empty spacer line.
#[macro_export]
macro_rules! log_pipe {
    () => {
        $crate::__log_line!(|p, _| format!("{p}┃\n"), "")
    };
}

/// Start a new block of related messages.
#[macro_export]
macro_rules! log_block_start {
    ($($message:tt)+) => {
        $crate::__log_line!(|p, m| format!("{p}┃\n{p}┣ {m}\n"), $($message)+)
    };
}

/// Log the version header.
#[macro_export]
macro_rules! log_version {
    () => {
        $crate::__log_line!(
            |p, m| format!("{p}┏ flipclock v{m} ━━╸\n"),
            env!("CARGO_PKG_VERSION")
        )
    };
}

/// Log the final terminator.
#[macro_export]
macro_rules! log_end {
    () => {
        $crate::__log_line!(|p, _| format!("{p}╹\n"), "")
    };
}

#[macro_export]
macro_rules! log_warning {
    ($($message:tt)+) => {
        $crate::__log_line!(|p, m| format!("{p}┣[\x1b[33mWARNING\x1b[0m] {m}\n"), $($message)+)
    };
}

#[macro_export]
macro_rules! log_error {
    ($($message:tt)+) => {
        $crate::__log_line!(|p, m| format!("{p}┣[\x1b[31mERROR\x1b[0m] {m}\n"), $($message)+)
    };
}

/// Log an error that ends the run.
#[macro_export]
macro_rules! log_error_exit {
    ($($message:tt)+) => {
        $crate::__log_line!(
            |p, m| format!("{p}┃\n{p}┗[\x1b[31mERROR\x1b[0m] {m}\n"),
            $($message)+
        )
    };
}

#[macro_export]
macro_rules! log_info {
    ($($message:tt)+) => {
        $crate::__log_line!(|p, m| format!("{p}┣[\x1b[32mINFO\x1b[0m] {m}\n"), $($message)+)
    };
}

#[macro_export]
macro_rules! log_debug {
    ($($message:tt)+) => {
        $crate::__log_line!(|p, m| format!("{p}┣[\x1b[32mDEBUG\x1b[0m] {m}\n"), $($message)+)
    };
}

#[macro_export]
macro_rules! log_critical {
    ($($message:tt)+) => {
        $crate::__log_line!(|p, m| format!("{p}┣[\x1b[31mCRITICAL\x1b[0m] {m}\n"), $($message)+)
    };
}
