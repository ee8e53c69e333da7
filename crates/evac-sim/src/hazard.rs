//! Hazard boundary interface.
//!
//! The engine never computes hazard growth — fire spread, flood fill, plume
//! drift all live in application code.  The orchestrator only needs two
//! things: a once-per-tick `advance` callback and a containment predicate.

use evac_core::{Point, SimClock};

/// An externally owned, time-varying hazard region.
pub trait Hazard {
    /// Advance the hazard to the state for the tick about to be processed.
    /// Called exactly once per tick, before any resident is stepped.
    fn advance(&mut self, clock: &SimClock);

    /// `true` if `point` lies inside the hazard boundary.  A resident whose
    /// position satisfies this is dead this tick, whatever its prior state.
    fn contains(&self, point: Point) -> bool;
}

/// A hazard that never arrives.  Useful for pure traffic studies and tests.
pub struct NoHazard;

impl Hazard for NoHazard {
    fn advance(&mut self, _clock: &SimClock) {}

    fn contains(&self, _point: Point) -> bool {
        false
    }
}
