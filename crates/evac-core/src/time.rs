//! Simulation time model.
//!
//! Time is a monotonically increasing `Tick` counter; the mapping to
//! simulated seconds lives in `SimClock`:
//!
//!   elapsed_secs = tick * step_interval_secs
//!
//! Using an integer tick as the canonical time unit keeps schedule
//! comparisons exact; only the seconds conversion is floating point.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── Tick ─────────────────────────────────────────────────────────────────────

/// An absolute simulation tick counter.
#[derive(Copy, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Debug, Default)]
#[derive(Serialize, Deserialize)]
pub struct Tick(pub u64);

impl Tick {
    pub const ZERO: Tick = Tick(0);

    /// Return the tick `n` steps after `self`.
    #[inline]
    pub fn offset(self, n: u64) -> Tick {
        Tick(self.0 + n)
    }
}

impl std::ops::Add<u64> for Tick {
    type Output = Tick;
    #[inline]
    fn add(self, rhs: u64) -> Tick {
        Tick(self.0 + rhs)
    }
}

impl std::ops::Sub for Tick {
    type Output = u64;
    #[inline]
    fn sub(self, rhs: Tick) -> u64 {
        self.0 - rhs.0
    }
}

impl fmt::Display for Tick {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "T{}", self.0)
    }
}

// ── SimClock ──────────────────────────────────────────────────────────────────

/// Converts between tick counts and simulated seconds.
///
/// `SimClock` is cheap to copy and intentionally holds no heap data.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimClock {
    /// How many simulated seconds one tick represents.
    pub step_interval_secs: f64,
    /// The current tick — advanced by `SimClock::advance()` each iteration.
    pub current_tick: Tick,
}

impl SimClock {
    pub fn new(step_interval_secs: f64) -> Self {
        Self { step_interval_secs, current_tick: Tick::ZERO }
    }

    /// Advance the clock by one tick.
    #[inline]
    pub fn advance(&mut self) {
        self.current_tick = Tick(self.current_tick.0 + 1);
    }

    /// Elapsed simulated seconds since tick 0.
    #[inline]
    pub fn elapsed_secs(&self) -> f64 {
        self.current_tick.0 as f64 * self.step_interval_secs
    }
}

impl fmt::Display for SimClock {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({:.0}s)", self.current_tick, self.elapsed_secs())
    }
}

// ── SimConfig ─────────────────────────────────────────────────────────────────

/// Top-level simulation configuration.
///
/// Typically loaded from a JSON file by the application crate and passed to
/// the simulation builder.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct SimConfig {
    /// Tick budget: the run stops here even if agents are still moving.
    pub total_ticks: u64,

    /// Simulated seconds per tick.
    pub step_interval_secs: f64,

    /// Master RNG seed.  The same seed always produces identical results.
    pub seed: u64,

    /// Scale parameter of the Rayleigh-distributed decision delay (seconds).
    pub decision_rayleigh_scale_secs: f64,

    /// Fixed alert-to-decision offset added to every decision delay (seconds).
    pub decision_offset_secs: f64,

    /// Radius of the forward-facing leader scan (same unit as coordinates).
    pub leader_scan_radius: f64,

    /// Half-angle of the leader scan cone, in radians.
    pub leader_cone_half_angle_rad: f64,

    /// Report output every N ticks.  1 = every tick.
    pub output_interval_ticks: u64,
}

impl SimConfig {
    /// The tick at which the simulation ends (exclusive upper bound).
    #[inline]
    pub fn end_tick(&self) -> Tick {
        Tick(self.total_ticks)
    }

    /// Construct a `SimClock` pre-configured for this run.
    pub fn make_clock(&self) -> SimClock {
        SimClock::new(self.step_interval_secs)
    }
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            total_ticks: 1_000,
            step_interval_secs: 1.0,
            seed: 0,
            decision_rayleigh_scale_secs: 60.0,
            decision_offset_secs: 30.0,
            leader_scan_radius: 50.0,
            leader_cone_half_angle_rad: std::f64::consts::FRAC_PI_4,
            output_interval_ticks: 1,
        }
    }
}
