//! GM general car-following law.
//!
//! Acceleration of the follower is proportional to the speed difference with
//! the vehicle ahead, scaled by the follower's own speed (exponent `m`) and
//! the inverse square of the space headway:
//!
//! ```text
//! acc = alpha * v_f^m / h^2 * (v_f - v_l)
//! ```
//!
//! Two parameter variants exist in the domain: a metric one with `m = 0`
//! (calibrated for 35 mph free-flow speed and 250 veh/mi/lane jam density)
//! and a legacy imperial one with `m = 2` and headway in feet.

use serde::{Deserialize, Serialize};

/// Conversion factor for the GM sensitivity: 1 mi²/h expressed in m²/s.
const ALPHA_MI2_PER_HR_TO_M2_PER_S: f64 = 719.444;

// ── Parameters ────────────────────────────────────────────────────────────────

/// Car-following parameters.  Units must be consistent with the coordinate
/// system (metres/seconds for [`GmParams::metric`]).
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct GmParams {
    /// Free-flow speed cap.
    pub max_speed: f64,

    /// Free-flow acceleration applied when no leader is in range.
    pub acceleration: f64,

    /// Space headway below which the follower performs a hard stop.
    pub headway_threshold: f64,

    /// Sensitivity `alpha` of the GM law.
    pub alpha: f64,

    /// Speed exponent `m` of the GM law.
    pub speed_exponent: f64,
}

impl GmParams {
    /// Metric variant: `m = 0`, 2 m hard-stop headway, 10 m/s free-flow
    /// speed, 1.524 m/s² acceleration, alpha 0.14 mi²/h converted to m²/s.
    pub fn metric() -> Self {
        Self {
            max_speed: 10.0,
            acceleration: 1.524,
            headway_threshold: 2.0,
            alpha: 0.14 * ALPHA_MI2_PER_HR_TO_M2_PER_S,
            speed_exponent: 0.0,
        }
    }

    /// Legacy imperial variant: `m = 2`, 6 ft hard-stop headway, speeds in
    /// ft/s.  Kept for comparison runs against older studies.
    pub fn legacy(max_speed: f64, acceleration: f64, alpha_mi2_per_hr: f64) -> Self {
        Self {
            max_speed,
            acceleration,
            headway_threshold: 6.0,
            alpha: alpha_mi2_per_hr * ALPHA_MI2_PER_HR_TO_M2_PER_S,
            speed_exponent: 2.0,
        }
    }
}

// ── Leader ────────────────────────────────────────────────────────────────────

/// Observed state of the vehicle ahead.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Leader {
    /// Leader speed.
    pub speed: f64,

    /// Space headway: Euclidean distance between follower and leader.
    pub headway: f64,
}

// ── Speed update ──────────────────────────────────────────────────────────────

/// One step of the GM law: the follower's speed for the next tick.
///
/// - No leader: accelerate freely, capped at `max_speed`.
/// - Headway below `headway_threshold`: hard stop (exactly `0`).
/// - Otherwise apply the GM acceleration, then cap the result so the follower
///   cannot close to less than the threshold within one tick — if the raw
///   update would overshoot `(h - threshold) / dt`, it is limited to that
///   closing speed or the leader's speed, whichever is smaller.
///
/// The result is always within `[0, max_speed]`.
pub fn update_speed(follower_speed: f64, leader: Option<Leader>, params: &GmParams, dt: f64) -> f64 {
    let Some(Leader { speed: leader_speed, headway }) = leader else {
        return (follower_speed + params.acceleration * dt).min(params.max_speed);
    };

    if headway < params.headway_threshold {
        return 0.0;
    }

    let acc = params.alpha * follower_speed.powf(params.speed_exponent) / (headway * headway)
        * (follower_speed - leader_speed);
    let mut updated = follower_speed + acc * dt;

    // Never close below the threshold in a single tick.
    let closing_cap = (headway - params.headway_threshold) / dt;
    if updated > closing_cap {
        updated = closing_cap.min(leader_speed);
    }

    updated.clamp(0.0, params.max_speed)
}
