//! `evac-core` — foundational types for the evacuation movement engine.
//!
//! This crate is a dependency of every other `evac-*` crate.  It intentionally
//! has no `evac-*` dependencies and minimal external ones (only `rand`,
//! `serde`, and `thiserror`).
//!
//! # What lives here
//!
//! | Module    | Contents                                          |
//! |-----------|---------------------------------------------------|
//! | [`ids`]   | `ResidentId`, `NodeId`, `EdgeId`, `ShelterId`     |
//! | [`geo`]   | `Point`, `Vec2`, Euclidean distance               |
//! | [`time`]  | `Tick`, `SimClock`, `SimConfig`                   |
//! | [`rng`]   | `ResidentRng` (per-agent), `SimRng` (global)      |
//! | [`error`] | `EvacError`, `EvacResult`                         |

pub mod error;
pub mod geo;
pub mod ids;
pub mod rng;
pub mod time;


// ── Re-exports ────────────────────────────────────────────────────────────────

pub use error::{EvacError, EvacResult};
pub use geo::{Point, Vec2};
pub use ids::{EdgeId, NodeId, ResidentId, ShelterId};
pub use rng::{ResidentRng, SimRng};
pub use time::{SimClock, SimConfig, Tick};
