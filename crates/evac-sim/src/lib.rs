//! `evac-sim` — the simulation orchestrator.
//!
//! # Crate layout
//!
//! | Module       | Contents                                                |
//! |--------------|---------------------------------------------------------|
//! | [`hazard`]   | `Hazard` trait (boundary query), `NoHazard`             |
//! | [`snapshot`] | start-of-tick state snapshot and the leader cone query  |
//! | [`sim`]      | `Sim` — the tick loop                                   |
//! | [`builder`]  | `SimBuilder` — route assignment and decision draws      |
//! | [`observer`] | `SimObserver` callbacks, `NoopObserver`                 |
//! | [`error`]    | `SimError`, `SimResult<T>`                              |
//!
//! # Update semantics
//!
//! Stepping is single-threaded and **synchronous**: every resident's hazard
//! and leader observations for tick `t` are computed against the state
//! committed at the end of tick `t − 1`.  No resident ever sees another's
//! same-tick update, so results do not depend on the order residents are
//! processed in.

pub mod builder;
pub mod error;
pub mod hazard;
pub mod observer;
pub mod sim;
pub mod snapshot;

#[cfg(test)]
mod tests;

pub use builder::SimBuilder;
pub use error::{SimError, SimResult};
pub use hazard::{Hazard, NoHazard};
pub use observer::{NoopObserver, SimObserver};
pub use sim::Sim;
