//! Command-line argument parsing.
//!
//! Hand-rolled: a handful of flags, one optional subcommand (`print`), and
//! anything unrecognised falls back to help.

use crate::common::constants::MAXIMUM_TIMER_SECONDS;

/// Start point and speed for a simulated clock.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulateArgs {
    /// `YYYY-MM-DD HH:MM:SS`, validated when the time source is created.
    pub start_time: String,
    pub multiplier: f64,
}

/// Represents the parsed command-line arguments and their intended actions.
#[derive(Debug, PartialEq)]
pub enum CliAction {
    /// Run the full-screen display.
    Run {
        debug_enabled: bool,
        config_dir: Option<String>,
        log_file: Option<String>,
        simulate: Option<SimulateArgs>,
        timer_seconds: Option<u64>,
    },
    /// Print the current display once and exit.
    Print {
        config_dir: Option<String>,
        simulate: Option<SimulateArgs>,
        timer_seconds: Option<u64>,
    },
    ShowHelp,
    ShowVersion,
    ShowHelpDueToError,
}

/// Result of parsing command-line arguments.
pub struct ParsedArgs {
    pub action: CliAction,
}

impl ParsedArgs {
    /// Parse arguments; the first item is the program name and is skipped.
    pub fn parse<I, S>(args: I) -> ParsedArgs
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let args_vec: Vec<String> = args
            .into_iter()
            .skip(1)
            .map(|s| s.as_ref().to_string())
            .collect();

        let mut debug_enabled = false;
        let mut display_help = false;
        let mut display_version = false;
        let mut unknown_arg_found = false;
        let mut print_command = false;
        let mut config_dir: Option<String> = None;
        let mut log_file: Option<String> = None;
        let mut simulate: Option<SimulateArgs> = None;
        let mut timer_seconds: Option<u64> = None;

        let mut i = 0;
        while i < args_vec.len() {
            let arg = args_vec[i].as_str();
            match arg {
                "--help" | "-h" => display_help = true,
                "--version" | "-V" | "-v" => display_version = true,
                "--debug" | "-d" => debug_enabled = true,
                "--config" | "-c" => match args_vec.get(i + 1) {
                    Some(dir) if !dir.starts_with('-') => {
                        config_dir = Some(dir.clone());
                        i += 1;
                    }
                    _ => {
                        log_warning!("--config requires a directory path");
                        unknown_arg_found = true;
                    }
                },
                "--log" | "-l" => match args_vec.get(i + 1) {
                    Some(file) if !file.starts_with('-') => {
                        log_file = Some(file.clone());
                        i += 1;
                    }
                    _ => {
                        log_warning!("--log requires a file path");
                        unknown_arg_found = true;
                    }
                },
                "--timer" | "-t" => match args_vec.get(i + 1).map(|v| parse_timer_seconds(v)) {
                    Some(Ok(seconds)) => {
                        timer_seconds = Some(seconds);
                        i += 1;
                    }
                    Some(Err(message)) => {
                        log_warning!("{message}");
                        unknown_arg_found = true;
                        i += 1;
                    }
                    None => {
                        log_warning!("--timer requires a number of seconds");
                        unknown_arg_found = true;
                    }
                },
                "--simulate" | "-S" => match args_vec.get(i + 1) {
                    Some(start_time) if !start_time.starts_with('-') => {
                        i += 1;
                        let mut multiplier = 1.0;
                        if let Some(value) = args_vec.get(i + 1)
                            && let Ok(parsed) = value.parse::<f64>()
                        {
                            i += 1;
                            if parsed > 0.0 && parsed.is_finite() {
                                multiplier = parsed;
                            } else {
                                log_warning!("Simulation multiplier must be positive");
                                unknown_arg_found = true;
                            }
                        }
                        simulate = Some(SimulateArgs {
                            start_time: start_time.clone(),
                            multiplier,
                        });
                    }
                    _ => {
                        log_warning!("--simulate requires a start time \"YYYY-MM-DD HH:MM:SS\"");
                        unknown_arg_found = true;
                    }
                },
                "print" | "p" if !print_command => print_command = true,
                _ => {
                    log_warning!("Unknown argument: {arg}");
                    unknown_arg_found = true;
                }
            }
            i += 1;
        }

        let action = if display_version {
            CliAction::ShowVersion
        } else if display_help {
            CliAction::ShowHelp
        } else if unknown_arg_found {
            CliAction::ShowHelpDueToError
        } else if print_command {
            CliAction::Print {
                config_dir,
                simulate,
                timer_seconds,
            }
        } else {
            CliAction::Run {
                debug_enabled,
                config_dir,
                log_file,
                simulate,
                timer_seconds,
            }
        };

        ParsedArgs { action }
    }

    /// Convenience method to parse from std::env::args()
    pub fn from_env() -> ParsedArgs {
        Self::parse(std::env::args())
    }
}

/// Accepts plain seconds or `[HH:]MM:SS`.
fn parse_timer_seconds(value: &str) -> Result<u64, String> {
    let parts: Vec<&str> = value.split(':').collect();
    if parts.len() > 3 {
        return Err(format!("Invalid timer value: {value}"));
    }

    let mut total: u64 = 0;
    for (index, part) in parts.iter().enumerate() {
        let number: u64 = part
            .parse()
            .map_err(|_| format!("Invalid timer value: {value}"))?;
        if index > 0 && number > 59 {
            return Err(format!("Invalid timer value: {value}"));
        }
        total = total.saturating_mul(60).saturating_add(number);
    }

    if total > MAXIMUM_TIMER_SECONDS {
        return Err(format!(
            "Timer value {value} exceeds the maximum of 99:59:59"
        ));
    }
    Ok(total)
}

/// Displays version information using custom logging style.
pub fn display_version_info() {
    log_version!();
    log_pipe!();
    println!("┗ {}", env!("CARGO_PKG_DESCRIPTION"));
}

/// Displays custom help message using logger methods.
pub fn display_help() {
    log_version!();
    log_block_start!(env!("CARGO_PKG_DESCRIPTION"));
    log_block_start!("Usage:");
    log_indented!("flipclock [OPTIONS] [COMMAND]");
    log_block_start!("Options:");
    log_indented!("-c, --config <dir>     Use custom configuration directory");
    log_indented!("-d, --debug            Enable detailed debug output");
    log_indented!("-l, --log <file>       Write log output to a file");
    log_indented!("-t, --timer <time>     Preload the timer (seconds or [HH:]MM:SS)");
    log_indented!("-S, --simulate <start> [multiplier]");
    log_indented!("                       Run with a simulated clock from \"YYYY-MM-DD HH:MM:SS\"");
    log_indented!("-h, --help             Print help information");
    log_indented!("-V, --version          Print version information");
    log_block_start!("Commands:");
    log_indented!("print, p               Print the current display once and exit");
    log_block_start!("Keys:");
    log_indented!("s / t / h / m / o      Toggle seconds, theme, 12/24h, mode, orientation");
    log_indented!("1-5                    Add 10s, 1m, 5m, 10m or 1h to an idle timer");
    log_indented!("space                  Start or pause the timer");
    log_indented!("enter                  Dismiss the TIME UP alert");
    log_indented!("q / Esc / Ctrl+C       Quit");
    log_end!();
}
