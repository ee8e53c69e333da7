//! `evac-spatial` — road network, spatial indexing, routing, and path caching.
//!
//! # Crate layout
//!
//! | Module      | Contents                                                  |
//! |-------------|-----------------------------------------------------------|
//! | [`index`]   | `PointIndex` — R-tree nearest-neighbour / range queries   |
//! | [`network`] | `RoadNetwork` (CSR + `PointIndex`), polyline construction |
//! | [`astar`]   | A* search with Euclidean heuristic, `PathResult`          |
//! | [`cache`]   | `PathCache`, batch precompute, fingerprinted persistence  |
//! | [`error`]   | `SpatialError`, `SpatialResult<T>`                        |

pub mod astar;
pub mod cache;
pub mod error;
pub mod index;
pub mod network;

#[cfg(test)]
mod tests;

pub use astar::PathResult;
pub use cache::{PathCache, load_cache, save_cache};
pub use error::{SpatialError, SpatialResult};
pub use index::PointIndex;
pub use network::{Polyline, RoadNetwork};
