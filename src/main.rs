//! Main application entry point.
//!
//! Parses the command line and dispatches:
//!
//! - help and version output
//! - `print`: one line of text, then exit
//! - otherwise the full-screen display via `FlipClock::new(debug).run()`
//!
//! Setup that must happen before anything reads the clock or the config
//! (config directory, log file, simulated time) is done here.

use anyhow::Result;

use flipclock::{
    FlipClock,
    args::{self, CliAction, ParsedArgs},
    commands,
    common::{constants::EXIT_FAILURE, logger::Log},
    config, log_error_exit, log_version,
};

fn main() {
    if let Err(e) = run() {
        log_error_exit!("{e}");
        eprintln!("{e:?}");
        std::process::exit(EXIT_FAILURE);
    }
}

fn run() -> Result<()> {
    match ParsedArgs::from_env().action {
        CliAction::ShowVersion => args::display_version_info(),
        CliAction::ShowHelp => args::display_help(),
        CliAction::ShowHelpDueToError => {
            args::display_help();
            std::process::exit(EXIT_FAILURE);
        }
        CliAction::Print {
            config_dir,
            simulate,
            timer_seconds,
        } => {
            config::set_config_dir(config_dir)?;
            if let Some(simulate) = simulate {
                commands::simulate::install_simulated_clock(&simulate)?;
            }
            commands::print::handle_print_command(timer_seconds)?;
        }
        CliAction::Run {
            debug_enabled,
            config_dir,
            log_file,
            simulate,
            timer_seconds,
        } => {
            config::set_config_dir(config_dir)?;

            // Simulated time goes in first so every log line carries its timestamp.
            let simulation = simulate
                .map(|args| {
                    commands::simulate::install_simulated_clock(&args)
                        .map(|start| (start, args.multiplier))
                })
                .transpose()?;

            let _log_guard = log_file
                .map(|path| {
                    let guard = Log::start_file_logging(path.clone());
                    if guard.is_ok() {
                        println!("Logging to {path}");
                    }
                    guard
                })
                .transpose()?;

            log_version!();
            if let Some((start, multiplier)) = simulation {
                commands::simulate::log_simulation(start, multiplier);
            }

            FlipClock::new(debug_enabled)
                .with_timer(timer_seconds)
                .without_headers()
                .run()?;
        }
    }

    Ok(())
}
