//! `--simulate`: run against an accelerated clock instead of the system time.

use anyhow::{Result, anyhow};
use chrono::{DateTime, Local};
use std::sync::Arc;

use crate::args::SimulateArgs;
use crate::time_source::{self, SimulatedTimeSource};

/// Install a simulated time source starting at `args.start_time`.
///
/// Must run before anything reads the clock; the first installed source wins.
pub fn install_simulated_clock(args: &SimulateArgs) -> Result<DateTime<Local>> {
    let start = time_source::parse_datetime(&args.start_time)
        .map_err(|e| anyhow!("Invalid start time: {e}"))?;

    time_source::init_time_source(Arc::new(SimulatedTimeSource::new(start, args.multiplier)));
    Ok(start)
}

/// Announce the simulation in the run header.
pub fn log_simulation(start: DateTime<Local>, multiplier: f64) {
    log_block_start!("Simulation Mode");
    log_decorated!("Starting at {}", start.format("%Y-%m-%d %H:%M:%S"));
    log_indented!("Time acceleration: {multiplier}x");
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_invalid_start_time_is_rejected() {
        let args = SimulateArgs {
            start_time: "tomorrow at noon".to_string(),
            multiplier: 1.0,
        };
        let err = install_simulated_clock(&args).unwrap_err();
        assert!(err.to_string().contains("Invalid start time"));
    }
}
