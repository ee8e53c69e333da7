//! Resident storage: `Status`, `StatusCounts`, and the SoA `ResidentStore`.

use evac_core::{Point, ResidentId, ShelterId, Vec2};

use crate::route::Route;

// ── Status ────────────────────────────────────────────────────────────────────

/// Lifecycle status of a resident.
///
/// Transitions are monotone: `Waiting → Evacuating → {Evacuated, Dead}`, with
/// `Dead` reachable from any non-terminal state.  `Evacuated` and `Dead` are
/// terminal and never revisited.
#[derive(Copy, Clone, Debug, PartialEq, Eq, Hash)]
pub enum Status {
    /// Has not yet passed its decision-time threshold (or has no route).
    Waiting,
    /// Moving along its assigned route.
    Evacuating,
    /// Reached the shelter.  Terminal.
    Evacuated,
    /// Overtaken by the hazard.  Terminal.
    Dead,
}

impl Status {
    #[inline]
    pub fn is_terminal(self) -> bool {
        matches!(self, Status::Evacuated | Status::Dead)
    }
}

// ── StatusCounts ──────────────────────────────────────────────────────────────

/// Per-tick aggregate: how many residents are in each status.
#[derive(Copy, Clone, Debug, Default, PartialEq, Eq)]
pub struct StatusCounts {
    pub waiting: usize,
    pub evacuating: usize,
    pub evacuated: usize,
    pub dead: usize,
}

impl StatusCounts {
    pub fn tally(store: &ResidentStore) -> Self {
        let mut counts = StatusCounts::default();
        for &status in &store.status {
            match status {
                Status::Waiting => counts.waiting += 1,
                Status::Evacuating => counts.evacuating += 1,
                Status::Evacuated => counts.evacuated += 1,
                Status::Dead => counts.dead += 1,
            }
        }
        counts
    }

    /// `true` when every resident is in a terminal state — the run can stop.
    pub fn all_terminal(&self) -> bool {
        self.waiting == 0 && self.evacuating == 0
    }

    pub fn total(&self) -> usize {
        self.waiting + self.evacuating + self.evacuated + self.dead
    }
}

// ── ResidentStore ─────────────────────────────────────────────────────────────

/// Structure-of-Arrays storage for all resident state.
///
/// Every `Vec` field has exactly `count` elements; the `ResidentId` value is
/// the index into all of them.  Residents are created once before the run and
/// mutated in place every tick until terminal; they are never removed.
#[derive(Default)]
pub struct ResidentStore {
    /// Number of residents.  Equals the length of every SoA `Vec`.
    pub count: usize,

    /// Current position.
    pub pos: Vec<Point>,

    /// Current speed (units/second).
    pub speed: Vec<f64>,

    /// Unit direction of the last movement; initially along the first route
    /// segment.  `Vec2::ZERO` for residents with no route.
    pub heading: Vec<Vec2>,

    /// Remaining route distance.  Non-increasing while `Evacuating`.
    pub remaining: Vec<f64>,

    /// Per-resident decision-time threshold in seconds, fixed at creation
    /// (Rayleigh draw plus alert-to-decision offset).
    pub decision_secs: Vec<f64>,

    /// Lifecycle status.
    pub status: Vec<Status>,

    /// Elapsed seconds at which the resident reached shelter; `None` until
    /// then, written exactly once.
    pub evac_time_secs: Vec<Option<f64>>,

    /// Assigned route from the snapped origin to the chosen shelter.
    pub route: Vec<Route>,

    /// The shelter the route leads to; `ShelterId::INVALID` when no shelter
    /// is reachable.
    pub shelter: Vec<ShelterId>,
}

impl ResidentStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_capacity(count: usize) -> Self {
        Self {
            count: 0,
            pos: Vec::with_capacity(count),
            speed: Vec::with_capacity(count),
            heading: Vec::with_capacity(count),
            remaining: Vec::with_capacity(count),
            decision_secs: Vec::with_capacity(count),
            status: Vec::with_capacity(count),
            evac_time_secs: Vec::with_capacity(count),
            route: Vec::with_capacity(count),
            shelter: Vec::with_capacity(count),
        }
    }

    /// Append a resident and return its id.
    ///
    /// A resident with an empty `route` has no reachable shelter: it is
    /// created `Waiting` and stays `Waiting` for the whole run unless the
    /// hazard reaches it first.
    pub fn push(
        &mut self,
        origin: Point,
        route: Route,
        shelter: ShelterId,
        decision_secs: f64,
    ) -> ResidentId {
        let id = ResidentId(self.count as u32);
        let heading = route.initial_heading().unwrap_or(Vec2::ZERO);
        self.pos.push(origin);
        self.speed.push(0.0);
        self.heading.push(heading);
        self.remaining.push(route.total_length());
        self.decision_secs.push(decision_secs);
        self.status.push(Status::Waiting);
        self.evac_time_secs.push(None);
        self.route.push(route);
        self.shelter.push(shelter);
        self.count += 1;
        id
    }

    pub fn is_empty(&self) -> bool {
        self.count == 0
    }

    pub fn ids(&self) -> impl Iterator<Item = ResidentId> {
        (0..self.count as u32).map(ResidentId)
    }
}
