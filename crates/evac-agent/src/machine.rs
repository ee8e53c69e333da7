//! The per-tick state machine for one resident.
//!
//! [`step_resident`] is a pure function: it reads one resident's slice of the
//! [`ResidentStore`] plus externally supplied observations and returns the
//! state to commit at the end of the tick.  It never writes — the
//! orchestrator steps every resident against the same start-of-tick snapshot
//! and commits all outcomes together, so no resident observes another's
//! same-tick update.
//!
//! Transition priority within one tick:
//!
//! 1. hazard containment → `Dead`, unconditionally;
//! 2. decision gate: before the threshold (or with no route) → `Waiting`;
//! 3. car-following speed update and movement along the route;
//! 4. remaining distance ≤ 0 → `Evacuated`, evacuation time recorded once.

use log::debug;

use evac_core::{Point, ResidentId, Vec2};
use evac_traffic::{GmParams, Leader, update_speed};

use crate::store::{ResidentStore, Status};

// ── Inputs ────────────────────────────────────────────────────────────────────

/// What the orchestrator observed for this resident, computed against the
/// previous tick's committed state.
#[derive(Copy, Clone, Debug)]
pub struct Observation {
    /// `true` if the resident's position lies inside the hazard boundary.
    pub in_hazard: bool,

    /// Nearest evacuating agent inside the forward-facing cone, if any.
    pub leader: Option<Leader>,
}

/// Per-tick constants shared by every resident's step.
pub struct StepContext<'a> {
    /// Elapsed simulated seconds at the *start* of this tick.
    pub elapsed_secs: f64,

    /// Simulated seconds per tick.
    pub dt: f64,

    /// Car-following parameters.
    pub params: &'a GmParams,
}

// ── Outcome ───────────────────────────────────────────────────────────────────

/// The state to commit for one resident at the end of the tick.
#[derive(Clone, Debug)]
pub struct StepOutcome {
    pub status: Status,
    pub pos: Point,
    pub speed: f64,
    pub heading: Vec2,
    pub remaining: f64,
    /// `Some` only on the tick the resident reaches shelter.
    pub evac_time_secs: Option<f64>,
}

// ── Step ──────────────────────────────────────────────────────────────────────

/// Evaluate one resident's transitions for this tick.
///
/// Returns `None` for residents already in a terminal state — there is
/// nothing to commit.
pub fn step_resident(
    store: &ResidentStore,
    id: ResidentId,
    obs: Observation,
    ctx: &StepContext<'_>,
) -> Option<StepOutcome> {
    let i = id.index();
    let status = store.status[i];
    if status.is_terminal() {
        return None;
    }

    let mut outcome = StepOutcome {
        status,
        pos: store.pos[i],
        speed: store.speed[i],
        heading: store.heading[i],
        remaining: store.remaining[i],
        evac_time_secs: None,
    };

    // 1. Hazard check — absolute priority, overrides everything else.
    if obs.in_hazard {
        outcome.status = Status::Dead;
        outcome.speed = 0.0;
        return Some(outcome);
    }

    // 2. Decision gate.  Residents with no reachable shelter have an empty
    //    route and wait out the run.
    let route = &store.route[i];
    if ctx.elapsed_secs < store.decision_secs[i] || route.is_empty() {
        outcome.status = Status::Waiting;
        return Some(outcome);
    }
    outcome.status = Status::Evacuating;

    // 3. Speed from the car-following model, then advance along the route.
    outcome.speed = update_speed(store.speed[i], obs.leader, ctx.params, ctx.dt);

    let Some(arc) = route.project(store.pos[i]) else {
        // Unreachable for non-empty routes; hold position.
        debug!("{id}: projection undefined, holding position this tick");
        return Some(outcome);
    };

    let total = route.total_length();
    let target = (arc + outcome.speed * ctx.dt).min(total);
    match route.point_at(target) {
        Some(new_pos) => {
            if let Some(direction) = outcome.pos.to(new_pos).normalized() {
                outcome.heading = direction;
            }
            outcome.pos = new_pos;
            // Decrement by the distance actually travelled; at the route end
            // pin to zero so projection round-off cannot strand the resident
            // one epsilon short of completion.
            outcome.remaining = if target >= total {
                0.0
            } else {
                outcome.remaining - (target - arc)
            };
        }
        None => {
            // Float slack pushed the target off the route; skip the move
            // rather than fail.  Not an error.
            debug!("{id}: arc {target:.6} outside route, holding position this tick");
        }
    }

    // 4. Completion.
    if outcome.remaining <= 0.0 {
        outcome.status = Status::Evacuated;
        outcome.speed = 0.0;
        outcome.evac_time_secs = Some(ctx.elapsed_secs + ctx.dt);
    }

    Some(outcome)
}
