//! Wall-clock abstraction for real, simulated and fixed time.
//!
//! The clock controller never calls `Local::now()` directly; it reads the
//! wall time through a [`TimeSource`] handed to it at construction. The
//! binary installs one process-wide source at startup (real time, or a
//! simulated source for `--simulate`), and tests substitute a
//! [`FixedTimeSource`] they can move by hand.

use chrono::{DateTime, Duration as ChronoDuration, Local, TimeZone, Timelike};
use once_cell::sync::OnceCell;
use std::sync::Arc;
use std::time::Instant;

static TIME_SOURCE: OnceCell<Arc<dyn TimeSource>> = OnceCell::new();

/// Provider of the current local time.
pub trait TimeSource: Send + Sync {
    /// Get the current time
    fn now(&self) -> DateTime<Local>;

    /// Check if this is a simulated time source
    fn is_simulated(&self) -> bool;
}

/// Local time of day as displayed by the clock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WallTime {
    /// 0-23
    pub hours: u32,
    /// 0-59
    pub minutes: u32,
    /// 0-59
    pub seconds: u32,
}

impl WallTime {
    pub fn new(hours: u32, minutes: u32, seconds: u32) -> Self {
        Self {
            hours,
            minutes,
            seconds,
        }
    }

    /// Decompose a local datetime. Leap seconds fold into second 59.
    pub fn from_datetime<Tz: TimeZone>(datetime: &DateTime<Tz>) -> Self {
        Self {
            hours: datetime.hour(),
            minutes: datetime.minute(),
            seconds: datetime.second().min(59),
        }
    }
}

/// Read the current wall time from `source`.
pub fn read_wall_time(source: &dyn TimeSource) -> WallTime {
    WallTime::from_datetime(&source.now())
}

/// The system clock.
pub struct RealTimeSource;

impl TimeSource for RealTimeSource {
    fn now(&self) -> DateTime<Local> {
        Local::now()
    }

    fn is_simulated(&self) -> bool {
        false
    }
}

/// Time that starts at a chosen moment and runs at a multiple of real time.
///
/// A multiplier of 60.0 shows one simulated minute per real second, which
/// makes hour rollovers and 12-hour boundaries quick to inspect.
pub struct SimulatedTimeSource {
    start_time: DateTime<Local>,
    multiplier: f64,
    started_at: Instant,
}

impl SimulatedTimeSource {
    /// Non-positive multipliers fall back to real speed.
    pub fn new(start_time: DateTime<Local>, multiplier: f64) -> Self {
        Self {
            start_time,
            multiplier: if multiplier > 0.0 { multiplier } else { 1.0 },
            started_at: Instant::now(),
        }
    }

    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    fn simulated_at(&self, real_elapsed: std::time::Duration) -> DateTime<Local> {
        let simulated_millis = (real_elapsed.as_secs_f64() * self.multiplier * 1000.0) as i64;
        self.start_time + ChronoDuration::milliseconds(simulated_millis)
    }
}

impl TimeSource for SimulatedTimeSource {
    fn now(&self) -> DateTime<Local> {
        self.simulated_at(self.started_at.elapsed())
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// A clock that only moves when told to.
#[cfg(any(test, feature = "testing-support"))]
pub struct FixedTimeSource {
    current: std::sync::Mutex<DateTime<Local>>,
}

#[cfg(any(test, feature = "testing-support"))]
impl FixedTimeSource {
    pub fn new(start: DateTime<Local>) -> Self {
        Self {
            current: std::sync::Mutex::new(start),
        }
    }

    /// Today at `hours:minutes:seconds` local time.
    pub fn at(hours: u32, minutes: u32, seconds: u32) -> Self {
        let naive = Local::now()
            .date_naive()
            .and_hms_opt(hours, minutes, seconds)
            .expect("valid time of day");
        let local = Local
            .from_local_datetime(&naive)
            .earliest()
            .expect("representable local time");
        Self::new(local)
    }

    pub fn set(&self, time: DateTime<Local>) {
        *self.current.lock().unwrap() = time;
    }

    pub fn advance(&self, by: ChronoDuration) {
        let mut guard = self.current.lock().unwrap();
        *guard += by;
    }
}

#[cfg(any(test, feature = "testing-support"))]
impl TimeSource for FixedTimeSource {
    fn now(&self) -> DateTime<Local> {
        *self.current.lock().unwrap()
    }

    fn is_simulated(&self) -> bool {
        true
    }
}

/// Install the process-wide time source. Only the first call wins.
pub fn init_time_source(source: Arc<dyn TimeSource>) {
    TIME_SOURCE.set(source).ok();
}

/// Check if the time source has been initialized
pub fn is_initialized() -> bool {
    TIME_SOURCE.get().is_some()
}

/// The process-wide source, defaulting to real time.
pub fn current() -> Arc<dyn TimeSource> {
    TIME_SOURCE
        .get_or_init(|| Arc::new(RealTimeSource))
        .clone()
}

/// Get the current time from the global time source
pub fn now() -> DateTime<Local> {
    current().now()
}

/// Check if we're running in simulation mode
pub fn is_simulated() -> bool {
    current().is_simulated()
}

/// Parse a datetime string in the format "YYYY-MM-DD HH:MM:SS"
pub fn parse_datetime(s: &str) -> Result<DateTime<Local>, String> {
    use chrono::NaiveDateTime;

    let naive = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S")
        .map_err(|e| format!("Invalid datetime format: {e}. Use YYYY-MM-DD HH:MM:SS"))?;

    Local
        .from_local_datetime(&naive)
        .earliest()
        .ok_or_else(|| "Ambiguous or invalid local time".to_string())
}
