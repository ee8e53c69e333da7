//! Path cache: in-memory lookup plus fingerprinted on-disk persistence.
//!
//! The cache maps `(snapped origin, snapped destination)` to a previously
//! computed [`PathResult`].  During the simulation it is read-only; all
//! population happens up front via
//! [`RoadNetwork::batch_precompute`][crate::network::RoadNetwork::batch_precompute].
//!
//! # Persistence
//!
//! [`save_cache`] writes a single JSON document holding the node list, the
//! edge list with weights, the serialized spatial index, the path dictionary,
//! and a fingerprint of the graph geometry.  [`load_cache`] only returns the
//! paths when the persisted fingerprint matches the live graph — a mismatch
//! (or an unreadable file) discards the store and the caller rebuilds from
//! source geometry.  A stale cache is never served.

use std::fs::File;
use std::io::{BufReader, BufWriter, ErrorKind};
use std::path::Path as FsPath;

use log::warn;
use rustc_hash::FxHashMap;
use serde::{Deserialize, Serialize};

use evac_core::{NodeId, Point};

use crate::astar::PathResult;
use crate::index::PointIndex;
use crate::network::RoadNetwork;
use crate::SpatialResult;

// ── PathCache ─────────────────────────────────────────────────────────────────

/// Mapping from snapped endpoint pairs to shortest-path results.
#[derive(Default)]
pub struct PathCache {
    map: FxHashMap<(NodeId, NodeId), PathResult>,
}

impl PathCache {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn get(&self, from: NodeId, to: NodeId) -> Option<&PathResult> {
        self.map.get(&(from, to))
    }

    #[inline]
    pub fn insert(&mut self, from: NodeId, to: NodeId, result: PathResult) {
        self.map.insert((from, to), result);
    }

    pub fn len(&self) -> usize {
        self.map.len()
    }

    pub fn is_empty(&self) -> bool {
        self.map.is_empty()
    }
}

// ── Persistence ───────────────────────────────────────────────────────────────

/// On-disk form of the cache: graph geometry, spatial index, and paths, all
/// keyed by the geometry fingerprint.
#[derive(Serialize, Deserialize)]
struct PersistedCache {
    fingerprint: u64,
    nodes: Vec<Point>,
    edges: Vec<(NodeId, NodeId, f64)>,
    index: PointIndex,
    paths: Vec<(NodeId, NodeId, PathResult)>,
}

/// Write `cache` (with `network`'s geometry and fingerprint) to `path`.
pub fn save_cache(
    path: &FsPath,
    network: &RoadNetwork,
    cache: &PathCache,
) -> SpatialResult<()> {
    let edges = (0..network.edge_count())
        .map(|i| (network.edge_from[i], network.edge_to[i], network.edge_length[i]))
        .collect();

    // Sorted for a stable file: FxHashMap iteration order is arbitrary.
    let mut paths: Vec<(NodeId, NodeId, PathResult)> = cache
        .map
        .iter()
        .map(|(&(from, to), result)| (from, to, result.clone()))
        .collect();
    paths.sort_unstable_by_key(|&(from, to, _)| (from, to));

    let persisted = PersistedCache {
        fingerprint: network.fingerprint(),
        nodes: network.node_pos.clone(),
        edges,
        index: PointIndex::build(&network.node_pos),
        paths,
    };

    let file = BufWriter::new(File::create(path)?);
    serde_json::to_writer(file, &persisted)?;
    Ok(())
}

/// Load a persisted cache from `path`, validating it against `network`.
///
/// Returns `Ok(None)` — rebuild required — when the file does not exist, is
/// corrupt, or was written for different geometry.  Corruption and
/// fingerprint mismatches are logged; only genuine I/O failures (permission
/// errors and the like) surface as `Err`.
pub fn load_cache(path: &FsPath, network: &RoadNetwork) -> SpatialResult<Option<PathCache>> {
    let file = match File::open(path) {
        Ok(f) => f,
        Err(e) if e.kind() == ErrorKind::NotFound => return Ok(None),
        Err(e) => return Err(e.into()),
    };

    let persisted: PersistedCache = match serde_json::from_reader(BufReader::new(file)) {
        Ok(p) => p,
        Err(e) => {
            warn!("discarding corrupt path cache {}: {e}", path.display());
            return Ok(None);
        }
    };

    if persisted.fingerprint != network.fingerprint() {
        warn!(
            "discarding path cache {}: geometry fingerprint mismatch (cache {:#x}, graph {:#x})",
            path.display(),
            persisted.fingerprint,
            network.fingerprint(),
        );
        return Ok(None);
    }

    let mut cache = PathCache::new();
    for (from, to, result) in persisted.paths {
        cache.insert(from, to, result);
    }
    Ok(Some(cache))
}
