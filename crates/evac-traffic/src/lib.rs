//! `evac-traffic` — the Gazis–Herman–Rothery (GM) car-following law.
//!
//! A single pure function maps (follower speed, optional leader, parameters,
//! step interval) to an updated speed.  The model is stateless and
//! side-effect-free; callers own all state updates.

pub mod gm;


pub use gm::{GmParams, Leader, update_speed};
