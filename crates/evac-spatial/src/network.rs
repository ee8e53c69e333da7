//! Road network representation built from input polylines.
//!
//! # Data layout
//!
//! The graph uses **Compressed Sparse Row (CSR)** format for outgoing edges.
//! Given a `NodeId n`, its outgoing edges occupy the slice:
//!
//! ```text
//! edge_to[ node_out_start[n] .. node_out_start[n+1] ]
//! ```
//!
//! The network is logically undirected: every polyline segment becomes two
//! directed edges with the same Euclidean length.  Node identity is exact
//! coordinate equality — two polylines that share an endpoint bit-for-bit
//! share a junction node.
//!
//! The graph is immutable after construction; shortest-path results
//! accumulate in a separate [`PathCache`][crate::PathCache].

use log::warn;
use rustc_hash::{FxHashMap, FxHashSet, FxHasher};

use evac_core::{EdgeId, NodeId, Point};

use crate::index::PointIndex;
use crate::{SpatialError, SpatialResult};

/// An ordered coordinate sequence describing one road centreline.
pub type Polyline = Vec<Point>;

// ── RoadNetwork ───────────────────────────────────────────────────────────────

/// Undirected road graph (stored as paired directed edges in CSR form) plus a
/// spatial index over its nodes for snapping.
pub struct RoadNetwork {
    /// Position of each node, indexed by `NodeId`.
    pub node_pos: Vec<Point>,

    /// CSR row pointer.  Outgoing edges of node `n` are at EdgeIds
    /// `node_out_start[n] .. node_out_start[n+1]`.  Length = node_count + 1.
    pub node_out_start: Vec<u32>,

    /// Source node of each directed edge.
    pub edge_from: Vec<NodeId>,

    /// Destination node of each directed edge.
    pub edge_to: Vec<NodeId>,

    /// Euclidean length of each edge — the shortest-path weight.
    pub edge_length: Vec<f64>,

    /// Nearest-node index over `node_pos`.
    index: PointIndex,
}

impl RoadNetwork {
    /// Build the graph from input polylines.
    ///
    /// For every consecutive coordinate pair within each polyline, one
    /// undirected edge weighted by Euclidean distance is inserted.  Repeated
    /// identical edges are idempotent.  Degenerate records — polylines with
    /// fewer than two points, zero-length segments — are skipped with a
    /// warning rather than aborting construction.
    pub fn from_polylines(polylines: &[Polyline]) -> Self {
        let mut nodes: Vec<Point> = Vec::new();
        let mut node_ids: FxHashMap<(u64, u64), NodeId> = FxHashMap::default();
        let mut seen: FxHashSet<(NodeId, NodeId)> = FxHashSet::default();
        let mut raw: Vec<(NodeId, NodeId, f64)> = Vec::new();

        let mut intern = |p: Point, nodes: &mut Vec<Point>| -> NodeId {
            *node_ids.entry(p.key()).or_insert_with(|| {
                let id = NodeId(nodes.len() as u32);
                nodes.push(p);
                id
            })
        };

        for (i, line) in polylines.iter().enumerate() {
            if line.len() < 2 {
                warn!("skipping degenerate polyline {i}: {} point(s)", line.len());
                continue;
            }
            for pair in line.windows(2) {
                let (start, end) = (pair[0], pair[1]);
                let length = start.distance(end);
                if length == 0.0 {
                    warn!("skipping zero-length segment at {start} in polyline {i}");
                    continue;
                }
                let a = intern(start, &mut nodes);
                let b = intern(end, &mut nodes);
                // Undirected: normalise the pair so a repeat in either
                // direction is recognised.
                let key = (a.min(b), a.max(b));
                if seen.insert(key) {
                    raw.push((a, b, length));
                    raw.push((b, a, length));
                }
            }
        }

        Self::from_parts(nodes, raw)
    }

    /// Assemble CSR arrays and the spatial index from interned nodes and
    /// directed edges.
    pub(crate) fn from_parts(nodes: Vec<Point>, mut raw: Vec<(NodeId, NodeId, f64)>) -> Self {
        let node_count = nodes.len();

        // Sort by (source, destination) for CSR construction and so that
        // out-edge iteration order is independent of input order.
        raw.sort_unstable_by_key(|&(from, to, _)| (from, to));

        let edge_from: Vec<NodeId> = raw.iter().map(|&(f, _, _)| f).collect();
        let edge_to: Vec<NodeId> = raw.iter().map(|&(_, t, _)| t).collect();
        let edge_length: Vec<f64> = raw.iter().map(|&(_, _, l)| l).collect();

        let mut node_out_start = vec![0u32; node_count + 1];
        for &(from, _, _) in &raw {
            node_out_start[from.index() + 1] += 1;
        }
        for i in 1..=node_count {
            node_out_start[i] += node_out_start[i - 1];
        }
        debug_assert_eq!(node_out_start[node_count] as usize, raw.len());

        let index = PointIndex::build(&nodes);

        Self { node_pos: nodes, node_out_start, edge_from, edge_to, edge_length, index }
    }

    // ── Graph dimensions ──────────────────────────────────────────────────

    pub fn node_count(&self) -> usize {
        self.node_pos.len()
    }

    pub fn edge_count(&self) -> usize {
        self.edge_to.len()
    }

    pub fn is_empty(&self) -> bool {
        self.node_pos.is_empty()
    }

    // ── Graph traversal ───────────────────────────────────────────────────

    /// Iterator over the `EdgeId`s of all outgoing edges from `node`.
    ///
    /// This is a contiguous index range — no heap allocation.
    #[inline]
    pub fn out_edges(&self, node: NodeId) -> impl Iterator<Item = EdgeId> + '_ {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        (start..end).map(|i| EdgeId(i as u32))
    }

    /// Out-degree of `node`.
    #[inline]
    pub fn out_degree(&self, node: NodeId) -> usize {
        let start = self.node_out_start[node.index()] as usize;
        let end = self.node_out_start[node.index() + 1] as usize;
        end - start
    }

    // ── Spatial queries ───────────────────────────────────────────────────

    /// The graph node nearest to `point` — how every arbitrary coordinate
    /// enters the graph.  Ties break to the lowest `NodeId`.
    ///
    /// # Errors
    ///
    /// `SpatialError::EmptyIndex` if the network has no nodes; an empty graph
    /// cannot answer path queries and the caller must treat this as fatal.
    pub fn snap(&self, point: Point) -> SpatialResult<NodeId> {
        self.index
            .nearest(point)
            .map(|(slot, _)| NodeId(slot))
            .ok_or(SpatialError::EmptyIndex)
    }

    // ── Fingerprint ───────────────────────────────────────────────────────

    /// Hash of the graph geometry (node coordinates, edge endpoints, and
    /// weights).  Persisted alongside the path cache: a loaded cache is only
    /// valid for the exact geometry it was computed from.
    pub fn fingerprint(&self) -> u64 {
        use std::hash::{Hash, Hasher};

        let mut h = FxHasher::default();
        self.node_pos.len().hash(&mut h);
        for p in &self.node_pos {
            p.key().hash(&mut h);
        }
        self.edge_to.len().hash(&mut h);
        for i in 0..self.edge_to.len() {
            self.edge_from[i].hash(&mut h);
            self.edge_to[i].hash(&mut h);
            self.edge_length[i].to_bits().hash(&mut h);
        }
        h.finish()
    }
}
