//! A* shortest-path search over the road network.
//!
//! The heuristic is straight-line Euclidean distance to the goal.  Edge
//! weights *are* true Euclidean lengths, so the heuristic is admissible and
//! consistent and the first settled goal is optimal.
//!
//! "No path" (origin and destination in disconnected components) is a value,
//! [`PathResult::NoPath`], propagated and cached as data — never an error.

use std::cmp::Ordering;
use std::collections::BinaryHeap;

use serde::{Deserialize, Serialize};

use evac_core::{EdgeId, NodeId, Point};

use crate::cache::PathCache;
use crate::network::RoadNetwork;
use crate::SpatialResult;

// ── PathResult ────────────────────────────────────────────────────────────────

/// Outcome of a shortest-path query between two snapped nodes.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub enum PathResult {
    /// An ordered coordinate sequence from origin to destination whose
    /// segments are graph edges, plus the total path length.
    Path { points: Vec<Point>, length: f64 },

    /// The endpoints lie in disconnected components.  Cached like any other
    /// result so the search is never repeated.
    NoPath,
}

impl PathResult {
    pub fn is_path(&self) -> bool {
        matches!(self, PathResult::Path { .. })
    }
}

// ── Heap entry ────────────────────────────────────────────────────────────────

/// Open-set entry ordered by `f = g + h`, lowest first, with `NodeId` as a
/// deterministic tie-break.
struct Candidate {
    f: f64,
    node: NodeId,
}

impl PartialEq for Candidate {
    fn eq(&self, other: &Self) -> bool {
        self.cmp(other) == Ordering::Equal
    }
}
impl Eq for Candidate {}

impl Ord for Candidate {
    fn cmp(&self, other: &Self) -> Ordering {
        // Reversed so BinaryHeap (a max-heap) pops the lowest f first.
        other
            .f
            .total_cmp(&self.f)
            .then_with(|| other.node.cmp(&self.node))
    }
}

impl PartialOrd for Candidate {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

// ── Search ────────────────────────────────────────────────────────────────────

impl RoadNetwork {
    /// Shortest path between the snapped endpoints of `start` and `end`.
    ///
    /// Checks `cache` first; on a miss, runs A* and stores the result —
    /// including `NoPath` — before returning.  Repeated calls for the same
    /// endpoint pair are therefore O(1) and bytewise identical.
    ///
    /// # Errors
    ///
    /// Only [`SpatialError::EmptyIndex`][crate::SpatialError::EmptyIndex]
    /// when the network has no nodes to snap to.
    pub fn shortest_path(
        &self,
        cache: &mut PathCache,
        start: Point,
        end: Point,
    ) -> SpatialResult<PathResult> {
        let from = self.snap(start)?;
        let to = self.snap(end)?;

        if let Some(hit) = cache.get(from, to) {
            return Ok(hit.clone());
        }
        let result = self.astar(from, to);
        cache.insert(from, to, result.clone());
        Ok(result)
    }

    /// Compute and cache the full origin × destination cross-product.
    ///
    /// Run once before the simulation starts so every per-tick query is a
    /// cache lookup.
    pub fn batch_precompute(
        &self,
        cache: &mut PathCache,
        origins: &[Point],
        destinations: &[Point],
    ) -> SpatialResult<()> {
        for &origin in origins {
            for &destination in destinations {
                self.shortest_path(cache, origin, destination)?;
            }
        }
        Ok(())
    }

    /// Uncached A* between two graph nodes.
    pub fn astar(&self, from: NodeId, to: NodeId) -> PathResult {
        if from == to {
            return PathResult::Path { points: vec![self.node_pos[from.index()]], length: 0.0 };
        }

        let n = self.node_count();
        let goal = self.node_pos[to.index()];

        // g[v] = best known true cost to reach v.
        let mut g = vec![f64::INFINITY; n];
        // prev_edge[v] = edge that reached v; EdgeId::INVALID for unreached nodes.
        let mut prev_edge = vec![EdgeId::INVALID; n];

        g[from.index()] = 0.0;

        let mut open = BinaryHeap::new();
        open.push(Candidate { f: self.node_pos[from.index()].distance(goal), node: from });

        while let Some(Candidate { f, node }) = open.pop() {
            if node == to {
                return self.reconstruct(prev_edge, from, to, g[to.index()]);
            }

            // Skip stale heap entries (a shorter g was found after this push).
            if f > g[node.index()] + self.node_pos[node.index()].distance(goal) {
                continue;
            }

            for edge in self.out_edges(node) {
                let neighbor = self.edge_to[edge.index()];
                let tentative = g[node.index()] + self.edge_length[edge.index()];
                if tentative < g[neighbor.index()] {
                    g[neighbor.index()] = tentative;
                    prev_edge[neighbor.index()] = edge;
                    open.push(Candidate {
                        f: tentative + self.node_pos[neighbor.index()].distance(goal),
                        node: neighbor,
                    });
                }
            }
        }

        PathResult::NoPath
    }

    fn reconstruct(
        &self,
        prev_edge: Vec<EdgeId>,
        from: NodeId,
        to: NodeId,
        length: f64,
    ) -> PathResult {
        let mut rev = vec![to];
        let mut cur = to;
        while cur != from {
            let e = prev_edge[cur.index()];
            debug_assert_ne!(e, EdgeId::INVALID);
            cur = self.edge_from[e.index()];
            rev.push(cur);
        }
        let points = rev
            .into_iter()
            .rev()
            .map(|node| self.node_pos[node.index()])
            .collect();
        PathResult::Path { points, length }
    }
}
