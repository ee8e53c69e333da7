//! Orchestrator error type.

use thiserror::Error;

use evac_spatial::SpatialError;

/// Errors produced while building or running a simulation.
#[derive(Debug, Error)]
pub enum SimError {
    #[error("spatial error: {0}")]
    Spatial(#[from] SpatialError),

    #[error("no shelters supplied; residents would have nowhere to route to")]
    NoShelters,

    #[error("no residents supplied")]
    NoResidents,
}

pub type SimResult<T> = Result<T, SimError>;
