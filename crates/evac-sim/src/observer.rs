//! Simulation observer trait for progress reporting and data collection.

use evac_agent::StatusCounts;
use evac_core::{ResidentId, Tick};

/// Callbacks invoked by [`Sim::run`][crate::Sim::run] at key points in the
/// tick loop.
///
/// All methods have default no-op implementations so implementors only need
/// to override what they care about.
pub trait SimObserver {
    /// Called at the very start of each tick, before the hazard advances.
    fn on_tick_start(&mut self, _tick: Tick) {}

    /// Called once for the tick a resident reaches shelter, with the elapsed
    /// simulated seconds since the run started.  Residents that never reach
    /// a terminal state produce no such call.
    fn on_evacuated(&mut self, _id: ResidentId, _tick: Tick, _elapsed_secs: f64) {}

    /// Called at the end of every tick with the committed status counts.
    fn on_tick_end(&mut self, _tick: Tick, _counts: &StatusCounts) {}

    /// Called at reporting intervals (every `config.output_interval_ticks`
    /// ticks) — the hook output writers record rows from.
    fn on_report(&mut self, _tick: Tick, _elapsed_secs: f64, _counts: &StatusCounts) {}

    /// Called once after the final tick completes.
    fn on_sim_end(&mut self, _final_tick: Tick, _counts: &StatusCounts) {}
}

/// A [`SimObserver`] that does nothing.  Use when you need to call `run` but
/// don't want progress callbacks.
pub struct NoopObserver;

impl SimObserver for NoopObserver {}
