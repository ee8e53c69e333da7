//! `evac-agent` — resident state and the per-tick evacuation state machine.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                 |
//! |-------------|----------------------------------------------------------|
//! | [`route`]   | `Route` — polyline with arc-length projection            |
//! | [`store`]   | `Status`, `StatusCounts`, `ResidentStore` (SoA arrays)   |
//! | [`machine`] | `step_resident`, `Observation`, `StepContext`, `StepOutcome` |
//!
//! The state machine is a pure function over one resident's slice of the
//! store plus externally supplied observations (hazard containment, leader in
//! range).  The orchestrator in `evac-sim` computes observations from the
//! previous tick's committed snapshot, calls [`machine::step_resident`] for
//! every resident, then commits all outcomes at once.

pub mod machine;
pub mod route;
pub mod store;


pub use machine::{Observation, StepContext, StepOutcome, step_resident};
pub use route::Route;
pub use store::{ResidentStore, Status, StatusCounts};
