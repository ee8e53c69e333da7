//! The `Sim` struct and its tick loop.

use evac_agent::{Observation, ResidentStore, StatusCounts, StepContext, StepOutcome, step_resident};
use evac_core::{ResidentId, SimClock, SimConfig};
use evac_spatial::{PathCache, RoadNetwork};
use evac_traffic::GmParams;

use crate::hazard::Hazard;
use crate::observer::SimObserver;
use crate::snapshot::TickSnapshot;
use crate::SimResult;

/// The main simulation runner.
///
/// `Sim<H>` holds all run state and drives the tick loop:
///
/// 1. **Hazard phase**: ask the external hazard to advance one tick.
/// 2. **Snapshot phase**: capture positions/speeds/statuses as committed at
///    the end of the previous tick, and build the point index over the
///    evacuating subset.
/// 3. **Step phase**: evaluate every non-terminal resident's state machine
///    against the snapshot (hazard containment, leader cone query,
///    car-following speed, route advance).
/// 4. **Commit phase**: write all outcomes back, in ascending `ResidentId`
///    order, reporting newly evacuated residents to the observer.
/// 5. **Report phase**: tally status counts and hand them to the observer.
///
/// The run terminates when every resident is terminal or the configured tick
/// budget is exhausted.
///
/// Create via [`SimBuilder`][crate::SimBuilder].
pub struct Sim<H: Hazard> {
    /// Global configuration (tick budget, seed, step interval, …).
    pub config: SimConfig,

    /// Simulation clock — tracks the current tick and elapsed seconds.
    pub clock: SimClock,

    /// Road network.  Read-only for the whole run.
    pub network: RoadNetwork,

    /// Precomputed shortest paths.  Read-only during stepping.
    pub cache: PathCache,

    /// Shelter positions (already snapped to the network at build time).
    pub shelters: Vec<evac_core::Point>,

    /// All per-resident state (SoA arrays).
    pub residents: ResidentStore,

    /// The externally owned hazard region.
    pub hazard: H,

    /// Car-following parameters shared by every resident.
    pub params: GmParams,

    /// Cached `cos` of the leader-cone half-angle.
    pub(crate) cos_half_angle: f64,
}

impl<H: Hazard> Sim<H> {
    // ── Public API ────────────────────────────────────────────────────────

    /// Run from the current tick until the tick budget is exhausted or every
    /// resident is terminal.  Observer hooks fire at every tick boundary;
    /// use [`NoopObserver`][crate::NoopObserver] if you don't need them.
    pub fn run<O: SimObserver>(&mut self, observer: &mut O) -> SimResult<()> {
        loop {
            let now = self.clock.current_tick;
            if now >= self.config.end_tick() {
                break;
            }

            observer.on_tick_start(now);
            let counts = self.process_tick(observer);
            observer.on_tick_end(now, &counts);
            if self.config.output_interval_ticks > 0
                && now.0.is_multiple_of(self.config.output_interval_ticks)
            {
                observer.on_report(now, self.clock.elapsed_secs(), &counts);
            }

            if counts.all_terminal() {
                break;
            }
        }
        let final_counts = StatusCounts::tally(&self.residents);
        observer.on_sim_end(self.clock.current_tick, &final_counts);
        Ok(())
    }

    /// Run exactly `n` ticks from the current position (ignores the budget
    /// and the all-terminal check).  Useful for tests and incremental
    /// stepping.
    pub fn run_ticks<O: SimObserver>(&mut self, n: u64, observer: &mut O) -> SimResult<()> {
        for _ in 0..n {
            let now = self.clock.current_tick;
            observer.on_tick_start(now);
            let counts = self.process_tick(observer);
            observer.on_tick_end(now, &counts);
        }
        Ok(())
    }

    /// Status counts for the current committed state.
    pub fn counts(&self) -> StatusCounts {
        StatusCounts::tally(&self.residents)
    }

    // ── Core tick processing ──────────────────────────────────────────────

    fn process_tick<O: SimObserver>(&mut self, observer: &mut O) -> StatusCounts {
        let now = self.clock.current_tick;

        // ── Phase 1: hazard update (external) ─────────────────────────────
        self.hazard.advance(&self.clock);

        // ── Phase 2: start-of-tick snapshot ───────────────────────────────
        //
        // Every observation below reads this snapshot, so resident `i`'s
        // leader query never sees resident `i-1`'s same-tick movement.
        let snapshot = TickSnapshot::capture(&self.residents);

        let ctx = StepContext {
            elapsed_secs: self.clock.elapsed_secs(),
            dt: self.config.step_interval_secs,
            params: &self.params,
        };

        // ── Phase 3: step every non-terminal resident ─────────────────────
        let outcomes: Vec<(ResidentId, StepOutcome)> = self
            .residents
            .ids()
            .filter_map(|id| {
                let i = id.index();
                let obs = Observation {
                    in_hazard: self.hazard.contains(self.residents.pos[i]),
                    leader: snapshot.leader_for(
                        id,
                        self.residents.pos[i],
                        self.residents.heading[i],
                        self.config.leader_scan_radius,
                        self.cos_half_angle,
                    ),
                };
                step_resident(&self.residents, id, obs, &ctx).map(|out| (id, out))
            })
            .collect();

        // ── Phase 4: commit all writes ────────────────────────────────────
        self.clock.advance();
        for (id, out) in outcomes {
            let i = id.index();
            self.residents.status[i] = out.status;
            self.residents.pos[i] = out.pos;
            self.residents.speed[i] = out.speed;
            self.residents.heading[i] = out.heading;
            self.residents.remaining[i] = out.remaining;
            if let Some(secs) = out.evac_time_secs {
                // Recorded exactly once: step_resident skips terminal states.
                self.residents.evac_time_secs[i] = Some(secs);
                observer.on_evacuated(id, now, secs);
            }
        }

        // ── Phase 5: aggregate counts ─────────────────────────────────────
        StatusCounts::tally(&self.residents)
    }
}
