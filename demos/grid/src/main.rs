//! grid — evacuation demo on a synthetic street grid.
//!
//! A wildfire ignites at the south-west corner of a 10×10-block grid and
//! grows outward at constant speed.  Residents scattered across the grid
//! decide to leave after a Rayleigh-distributed delay and drive, under
//! car-following dynamics, to whichever of two shelters is closest by road.
//!
//! The demo also exercises path-cache persistence: the first run computes
//! all origin-shelter routes and saves them; later runs with the same
//! geometry load the file instead of recomputing.

mod network;

use std::path::Path;
use std::time::Instant;

use anyhow::Result;

use evac_core::{Point, SimClock, SimConfig, SimRng};
use evac_sim::{Hazard, SimBuilder};
use evac_spatial::{load_cache, save_cache, RoadNetwork};
use evac_output::{CsvWriter, SimOutputObserver};

use network::grid_polylines;

// ── Constants ─────────────────────────────────────────────────────────────────

const RESIDENT_COUNT: usize = 200;
const SEED:           u64   = 42;
const GRID_BLOCKS:    usize = 10;
const BLOCK_METERS:   f64   = 150.0;

const STEP_SECS:      f64 = 1.0;
const TOTAL_TICKS:    u64 = 3_600; // one simulated hour

const FIRE_SPEED_MPS: f64 = 0.4;

const CACHE_PATH: &str = "output/grid/route_cache.json";

// ── Hazard ────────────────────────────────────────────────────────────────────

/// A circular fire front growing outward at constant speed.
struct GrowingFire {
    center: Point,
    radius: f64,
    speed_mps: f64,
}

impl GrowingFire {
    fn new(center: Point, speed_mps: f64) -> Self {
        Self { center, radius: 0.0, speed_mps }
    }
}

impl Hazard for GrowingFire {
    fn advance(&mut self, clock: &SimClock) {
        self.radius = clock.elapsed_secs() * self.speed_mps;
    }

    fn contains(&self, point: Point) -> bool {
        self.center.distance(point) <= self.radius
    }
}

// ── main ──────────────────────────────────────────────────────────────────────

fn main() -> Result<()> {
    env_logger::init();

    let side = GRID_BLOCKS as f64 * BLOCK_METERS;
    println!("=== grid — evacuation demo ===");
    println!("Residents: {RESIDENT_COUNT}  |  Grid: {GRID_BLOCKS}×{GRID_BLOCKS} blocks  |  Seed: {SEED}");
    println!();

    // 1. Road network.
    let net = RoadNetwork::from_polylines(&grid_polylines(GRID_BLOCKS, BLOCK_METERS));
    println!("Road network: {} nodes, {} directed edges", net.node_count(), net.edge_count());

    // 2. Shelters at the north-west and north-east corners, away from the
    //    ignition point.
    let shelters = vec![Point::new(0.0, side), Point::new(side, side)];

    // 3. Residents at uniformly random positions (snapped to the nearest
    //    intersection by the builder).
    let mut rng = SimRng::new(SEED);
    let origins: Vec<Point> = (0..RESIDENT_COUNT)
        .map(|_| Point::new(rng.gen_range(0.0..side), rng.gen_range(0.0..side)))
        .collect();

    // 4. Config: 1-second ticks, Rayleigh decision delay of a few minutes.
    let config = SimConfig {
        total_ticks: TOTAL_TICKS,
        step_interval_secs: STEP_SECS,
        seed: SEED,
        decision_rayleigh_scale_secs: 180.0,
        decision_offset_secs: 30.0,
        leader_scan_radius: 50.0,
        leader_cone_half_angle_rad: std::f64::consts::FRAC_PI_4,
        output_interval_ticks: 60,
    };

    // 5. Route cache: reuse a previous run's paths when the geometry matches.
    std::fs::create_dir_all("output/grid")?;
    let cache_path = Path::new(CACHE_PATH);
    let loaded = load_cache(cache_path, &net)?;
    let cache_was_loaded = loaded.is_some();
    if cache_was_loaded {
        println!("Loaded route cache from {CACHE_PATH}");
    }

    // 6. Build the sim.
    let fire = GrowingFire::new(Point::new(0.0, 0.0), FIRE_SPEED_MPS);
    let mut builder = SimBuilder::new(config, net, fire)
        .shelters(shelters)
        .residents(origins);
    if let Some(cache) = loaded {
        builder = builder.cache(cache);
    }
    let mut sim = builder.build()?;
    println!("Route cache: {} entries", sim.cache.len());

    // 7. Output.
    let writer = CsvWriter::new(Path::new("output/grid"))?;
    let mut obs = SimOutputObserver::new(writer);

    // 8. Run.
    let t0 = Instant::now();
    sim.run(&mut obs)?;
    let elapsed = t0.elapsed();

    if let Some(e) = obs.take_error() {
        eprintln!("output error: {e}");
    }

    // 9. Persist the cache for the next run.
    if !cache_was_loaded {
        save_cache(cache_path, &sim.network, &sim.cache)?;
        println!("Saved route cache to {CACHE_PATH}");
    }

    // 10. Summary.
    let counts = sim.counts();
    println!();
    println!("Simulation complete in {:.3} s ({} ticks)", elapsed.as_secs_f64(), sim.clock.current_tick.0);
    println!("  waiting    : {}", counts.waiting);
    println!("  evacuating : {}", counts.evacuating);
    println!("  evacuated  : {}", counts.evacuated);
    println!("  dead       : {}", counts.dead);
    println!();
    println!("Wrote output/grid/tick_counts.csv and output/grid/evacuations.csv");

    Ok(())
}
