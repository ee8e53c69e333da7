//! Start-of-tick snapshot and the forward-cone leader query.
//!
//! Captured once per tick after the hazard advances and before any resident
//! is stepped.  All spatial observations for the tick are answered from this
//! snapshot, which is what makes the update semantics synchronous: the
//! point index over evacuating residents is rebuilt here every tick, never
//! patched mid-tick.

use evac_core::{Point, ResidentId, Vec2};
use evac_spatial::PointIndex;
use evac_traffic::Leader;

use evac_agent::{ResidentStore, Status};

/// Immutable copy of the per-resident state the step phase may observe.
pub struct TickSnapshot {
    /// Positions of the evacuating residents, parallel to `ids`.
    positions: Vec<Point>,

    /// Speeds of the evacuating residents, parallel to `ids`.
    speeds: Vec<f64>,

    /// `ResidentId` of each indexed entry (index slots are dense, resident
    /// ids are not — only evacuating residents are candidates for leader).
    ids: Vec<ResidentId>,

    /// R-tree over `positions`.  `None` when nobody is evacuating.
    index: Option<PointIndex>,
}

impl TickSnapshot {
    /// Capture the evacuating subset of `store`.
    pub fn capture(store: &ResidentStore) -> Self {
        let mut positions = Vec::new();
        let mut speeds = Vec::new();
        let mut ids = Vec::new();
        for id in store.ids() {
            if store.status[id.index()] == Status::Evacuating {
                positions.push(store.pos[id.index()]);
                speeds.push(store.speed[id.index()]);
                ids.push(id);
            }
        }
        let index = (!positions.is_empty()).then(|| PointIndex::build(&positions));
        Self { positions, speeds, ids, index }
    }

    /// Nearest *other* evacuating resident inside the forward-facing cone
    /// `heading ± half-angle` within `radius` of `pos`.
    ///
    /// Ties on distance break to the lowest `ResidentId`.  Returns `None`
    /// when nobody qualifies (including when nobody is evacuating at all) —
    /// free-flow driving, not an error.
    pub fn leader_for(
        &self,
        me: ResidentId,
        pos: Point,
        heading: Vec2,
        radius: f64,
        cos_half_angle: f64,
    ) -> Option<Leader> {
        let index = self.index.as_ref()?;
        // A resident that has never moved has no heading and thus no cone.
        let facing = heading.normalized()?;

        let mut best: Option<(f64, ResidentId, usize)> = None;
        for (slot, candidate_pos) in index.within_radius(pos, radius) {
            let slot = slot as usize;
            let other = self.ids[slot];
            if other == me {
                continue;
            }
            let offset = pos.to(candidate_pos);
            let distance = offset.length();
            // A coincident agent is "ahead" by convention: the headway of 0
            // must reach the car-following model so it hard-stops.
            if distance > 0.0 {
                match offset.normalized() {
                    Some(dir) if facing.dot(dir) >= cos_half_angle => {}
                    _ => continue,
                }
            }
            let better = match best {
                None => true,
                Some((d, id, _)) => {
                    distance < d || (distance == d && other < id)
                }
            };
            if better {
                best = Some((distance, other, slot));
            }
        }

        best.map(|(distance, _, slot)| Leader { speed: self.speeds[slot], headway: distance })
    }

    /// Number of evacuating residents captured.
    pub fn evacuating(&self) -> usize {
        self.positions.len()
    }
}
