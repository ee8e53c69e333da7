//! Spatial-subsystem error type.
//!
//! Note what is *not* here: "no path between two nodes" is a cacheable value
//! ([`PathResult::NoPath`][crate::PathResult::NoPath]), not an error.

use thiserror::Error;

/// Errors produced by `evac-spatial`.
#[derive(Debug, Error)]
pub enum SpatialError {
    /// Nearest-neighbour query against an index with no points.  This is a
    /// precondition violation (an empty graph cannot snap anything), not a
    /// recoverable condition.
    #[error("spatial query on an empty index")]
    EmptyIndex,

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("cache persistence error: {0}")]
    Persist(#[from] serde_json::Error),
}

pub type SpatialResult<T> = Result<T, SpatialError>;
