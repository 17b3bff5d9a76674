use failure::{bail, Error};
use std::sync::{Mutex, PoisonError};
use std::thread;
use std::time::{Duration, Instant};

/// Source of the current time for debounce decisions.
pub trait Clock: Send + Sync {
    fn now(&self) -> Instant;

    /// Lets the given time pass.
    fn sleep(&self, duration: Duration);
}

/// Wall clock of the running system.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    fn sleep(&self, duration: Duration) {
        thread::sleep(duration)
    }
}

/// Clock that only moves when told to.
///
/// Sleeping advances it immediately, so replays with long waits
/// finish instantly.
#[derive(Debug)]
pub struct ManualClock {
    origin: Instant,
    elapsed: Mutex<Duration>,
}

impl ManualClock {
    pub fn new() -> Self {
        ManualClock {
            origin: Instant::now(),
            elapsed: Mutex::new(Duration::from_millis(0)),
        }
    }

    pub fn advance(&self, by: Duration) {
        *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner) += by;
    }

    pub fn elapsed(&self) -> Duration {
        *self.elapsed.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl Default for ManualClock {
    fn default() -> Self {
        ManualClock::new()
    }
}

impl Clock for ManualClock {
    fn now(&self) -> Instant {
        self.origin + self.elapsed()
    }

    fn sleep(&self, duration: Duration) {
        self.advance(duration)
    }
}

/// Converts whole seconds specified as a float to a duration.
///
/// Maximum accuracy of the returned duration is microseconds,
/// sub-microseconds are truncated.
///
/// Negative, `NaN` and infinite inputs return an error, as do
/// durations whose whole seconds do not fit into `u64`.
pub fn to_duration(secs: f64) -> Result<Duration, Error> {
    if !secs.is_finite() {
        bail!(
            "Duration must be a finite, non-NaN number, instead got: {}",
            secs
        )
    } else if secs < 0.0 {
        bail!("Duration may not be negative: {}", secs)
    } else {
        const MAX_SECS: f64 = std::u64::MAX as f64;

        let whole_secs_floating = secs.trunc();
        if whole_secs_floating > MAX_SECS {
            bail!("Duration is too high, numeric overflow: {}", secs)
        }

        let micros = ((secs - whole_secs_floating) * 1_000_000.0) as u32;

        Ok(Duration::new(whole_secs_floating as u64, micros * 1_000))
    }
}
