//! Fluent builder for constructing a [`Sim`].
//!
//! The builder owns everything that happens once, before the first tick:
//! precomputing the path cache, assigning each resident the route to its
//! nearest reachable shelter, and drawing per-resident decision times.

use log::warn;

use evac_agent::{ResidentStore, Route};
use evac_core::{Point, ResidentId, ShelterId, SimConfig};
use evac_spatial::{PathCache, PathResult, RoadNetwork};
use evac_traffic::GmParams;

use crate::hazard::Hazard;
use crate::sim::Sim;
use crate::{SimError, SimResult};

/// Fluent builder for [`Sim<H>`].
///
/// # Required inputs
///
/// - [`SimConfig`] — tick budget, seed, step interval, decision and cone
///   parameters
/// - [`RoadNetwork`] — the graph residents move on
/// - `H: Hazard` — the hazard boundary (use [`NoHazard`][crate::NoHazard]
///   for pure traffic runs)
/// - `.shelters(…)` and `.residents(…)` — at least one of each
///
/// # Optional inputs
///
/// | Method        | Default               |
/// |---------------|-----------------------|
/// | `.params(p)`  | `GmParams::metric()`  |
/// | `.cache(c)`   | empty `PathCache`     |
///
/// A cache loaded from disk via
/// [`load_cache`][evac_spatial::load_cache] can be passed in with `.cache`;
/// `build` tops it up with whatever pairs are missing.
pub struct SimBuilder<H: Hazard> {
    config: SimConfig,
    network: RoadNetwork,
    hazard: H,
    shelters: Vec<Point>,
    origins: Vec<Point>,
    params: GmParams,
    cache: PathCache,
}

impl<H: Hazard> SimBuilder<H> {
    /// Create a builder with all required scalar inputs.
    pub fn new(config: SimConfig, network: RoadNetwork, hazard: H) -> Self {
        Self {
            config,
            network,
            hazard,
            shelters: Vec::new(),
            origins: Vec::new(),
            params: GmParams::metric(),
            cache: PathCache::new(),
        }
    }

    /// Shelter positions.  Snapped to the network during `build`.
    pub fn shelters(mut self, shelters: Vec<Point>) -> Self {
        self.shelters = shelters;
        self
    }

    /// Resident origin positions, one per resident, in `ResidentId` order.
    pub fn residents(mut self, origins: Vec<Point>) -> Self {
        self.origins = origins;
        self
    }

    /// Car-following parameters (default [`GmParams::metric`]).
    pub fn params(mut self, params: GmParams) -> Self {
        self.params = params;
        self
    }

    /// Seed the path cache, typically from
    /// [`load_cache`][evac_spatial::load_cache].
    pub fn cache(mut self, cache: PathCache) -> Self {
        self.cache = cache;
        self
    }

    /// Precompute paths, assign routes and decision times, and return a
    /// ready-to-run [`Sim`].
    pub fn build(mut self) -> SimResult<Sim<H>> {
        if self.shelters.is_empty() {
            return Err(SimError::NoShelters);
        }
        if self.origins.is_empty() {
            return Err(SimError::NoResidents);
        }

        // One pass over origins × shelters fills the cache; every per-agent
        // query below (and during the run) is then an O(1) lookup.
        self.network
            .batch_precompute(&mut self.cache, &self.origins, &self.shelters)?;

        let mut residents = ResidentStore::with_capacity(self.origins.len());
        for (i, &origin) in self.origins.iter().enumerate() {
            let id = ResidentId(i as u32);
            let (route, shelter) = assign_route(&self.network, &mut self.cache, origin, &self.shelters)?;
            if route.is_empty() {
                warn!("{id}: no shelter reachable from {origin}; resident will wait out the run");
            }

            // Decision time: Rayleigh-distributed delay plus the fixed
            // alert-to-decision offset, drawn from the resident's own
            // deterministic RNG stream.
            let mut rng = evac_core::ResidentRng::new(self.config.seed, id);
            let decision_secs = self.config.decision_offset_secs
                + rng.rayleigh(self.config.decision_rayleigh_scale_secs);

            // Residents start at their snapped origin: route geometry and
            // position must agree for arc-length projection.
            let start = route.points().first().copied().unwrap_or(origin);
            residents.push(start, route, shelter, decision_secs);
        }

        let cos_half_angle = self.config.leader_cone_half_angle_rad.cos();
        Ok(Sim {
            clock: self.config.make_clock(),
            config: self.config,
            network: self.network,
            cache: self.cache,
            shelters: self.shelters,
            residents,
            hazard: self.hazard,
            params: self.params,
            cos_half_angle,
        })
    }
}

/// Shortest path from `origin` to every shelter; keep the shortest.
///
/// Ties break to the lowest shelter index.  Returns an empty route (and
/// `ShelterId::INVALID`) when no shelter is reachable.
fn assign_route(
    network: &RoadNetwork,
    cache: &mut PathCache,
    origin: Point,
    shelters: &[Point],
) -> SimResult<(Route, ShelterId)> {
    let mut best: Option<(f64, ShelterId, Vec<Point>)> = None;
    for (s, &shelter) in shelters.iter().enumerate() {
        match network.shortest_path(cache, origin, shelter)? {
            PathResult::Path { points, length } => {
                if best.as_ref().is_none_or(|(l, _, _)| length < *l) {
                    best = Some((length, ShelterId(s as u16), points));
                }
            }
            PathResult::NoPath => {}
        }
    }
    Ok(match best {
        Some((_, shelter, points)) => (Route::from_points(points), shelter),
        None => (Route::empty(), ShelterId::INVALID),
    })
}
