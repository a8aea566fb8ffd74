use std::fmt;
use std::ops::Sub;
use std::time::{Duration, Instant};

use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// SimTime
// ---------------------------------------------------------------------------

/// Integer-nanosecond simulation clock.
///
/// Avoids floating-point accumulation errors by tracking elapsed time as a
/// monotonically increasing `u64` nanosecond count.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default, Serialize, Deserialize,
)]
pub struct SimTime {
    nanos: u64,
}

impl SimTime {
    /// Create a new `SimTime` at zero.
    #[must_use]
    pub const fn new() -> Self {
        Self { nanos: 0 }
    }

    /// Create a `SimTime` from a raw nanosecond count.
    #[must_use]
    pub const fn from_nanos(nanos: u64) -> Self {
        Self { nanos }
    }

    /// Create a `SimTime` from seconds (as `f64`).
    #[must_use]
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn from_secs(secs: f64) -> Self {
        Self {
            nanos: (secs * 1_000_000_000.0) as u64,
        }
    }

    /// Raw nanosecond count.
    #[must_use]
    pub const fn nanos(&self) -> u64 {
        self.nanos
    }

    /// Elapsed seconds as `f64`.
    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn secs_f64(&self) -> f64 {
        self.nanos as f64 / 1_000_000_000.0
    }

    /// Convert to a standard [`Duration`].
    #[must_use]
    pub const fn to_duration(&self) -> Duration {
        Duration::from_nanos(self.nanos)
    }

    /// Advance the clock by `delta_nanos` nanoseconds.
    pub const fn advance(&mut self, delta_nanos: u64) {
        self.nanos = self.nanos.saturating_add(delta_nanos);
    }

    /// Advance the clock by `delta_secs` seconds.
    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    pub fn advance_secs(&mut self, delta_secs: f64) {
        let delta_nanos = (delta_secs * 1_000_000_000.0) as u64;
        self.advance(delta_nanos);
    }
}

impl Sub for SimTime {
    type Output = Duration;

    /// Subtract two `SimTime` values, yielding a [`Duration`].
    /// Uses saturating subtraction to prevent underflow.
    fn sub(self, rhs: Self) -> Duration {
        Duration::from_nanos(self.nanos.saturating_sub(rhs.nanos))
    }
}

impl fmt::Display for SimTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let total_secs = self.nanos / 1_000_000_000;
        let remaining_nanos = self.nanos % 1_000_000_000;
        let millis = remaining_nanos / 1_000_000;
        let micros = (remaining_nanos % 1_000_000) / 1_000;
        write!(f, "{total_secs}.{millis:03}{micros:03}s")
    }
}

// ---------------------------------------------------------------------------
// RatePacer
// ---------------------------------------------------------------------------

/// Real-time pacing for the control loop.
///
/// Compares elapsed simulated time against the wall clock measured from
/// [`start`](Self::start). When simulation leads, [`pace`](Self::pace)
/// sleeps the difference; when it lags, the loop continues immediately —
/// there is no catch-up stepping.
#[derive(Debug, Clone)]
pub struct RatePacer {
    started: Instant,
}

impl RatePacer {
    /// Begin pacing from now.
    #[must_use]
    pub fn start() -> Self {
        Self {
            started: Instant::now(),
        }
    }

    /// Wall-clock time elapsed since [`start`](Self::start).
    #[must_use]
    pub fn wall_elapsed(&self) -> Duration {
        self.started.elapsed()
    }

    /// How far simulated time is ahead of the wall clock, if at all.
    #[must_use]
    pub fn lead(&self, sim_elapsed: Duration) -> Option<Duration> {
        sim_elapsed.checked_sub(self.started.elapsed())
    }

    /// Sleep until the wall clock catches up with `sim_elapsed`.
    ///
    /// Returns the duration slept (zero when simulation is behind).
    pub fn pace(&self, sim_elapsed: Duration) -> Duration {
        match self.lead(sim_elapsed) {
            Some(lead) if !lead.is_zero() => {
                std::thread::sleep(lead);
                lead
            }
            _ => Duration::ZERO,
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
