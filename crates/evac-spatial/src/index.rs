//! `PointIndex` — nearest-neighbour lookup over a fixed point set.
//!
//! Thin wrapper around an `rstar` R-tree.  Built once from an immutable point
//! list; never mutated afterwards.  Each entry remembers its insertion index
//! (`slot`) so results map straight back into the owner's parallel arrays and
//! so equidistant candidates resolve deterministically.

use rstar::{AABB, PointDistance, RTree, RTreeObject};
use serde::{Deserialize, Serialize};

use evac_core::Point;

// ── R-tree entry ──────────────────────────────────────────────────────────────

/// Entry stored in the R-tree: a 2-D point plus its insertion index.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct IndexedPoint {
    point: [f64; 2],
    slot: u32,
}

impl RTreeObject for IndexedPoint {
    type Envelope = AABB<[f64; 2]>;
    fn envelope(&self) -> Self::Envelope {
        AABB::from_point(self.point)
    }
}

impl PointDistance for IndexedPoint {
    /// Squared Euclidean distance — the tree only needs a monotone metric.
    fn distance_2(&self, point: &[f64; 2]) -> f64 {
        let dx = self.point[0] - point[0];
        let dy = self.point[1] - point[1];
        dx * dx + dy * dy
    }
}

// ── PointIndex ────────────────────────────────────────────────────────────────

/// Immutable nearest-neighbour index over a fixed point set.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PointIndex {
    tree: RTree<IndexedPoint>,
    len: usize,
}

impl PointIndex {
    /// Bulk-load an index over `points`.  Slot `i` refers to `points[i]`.
    pub fn build(points: &[Point]) -> Self {
        let entries: Vec<IndexedPoint> = points
            .iter()
            .enumerate()
            .map(|(i, p)| IndexedPoint { point: [p.x, p.y], slot: i as u32 })
            .collect();
        Self { tree: RTree::bulk_load(entries), len: points.len() }
    }

    pub fn len(&self) -> usize {
        self.len
    }

    pub fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// Slot and position of the point closest to `p`.
    ///
    /// When several points are exactly equidistant, the one with the lowest
    /// insertion index wins, so repeated queries are fully deterministic.
    /// Returns `None` only for an empty index.
    pub fn nearest(&self, p: Point) -> Option<(u32, Point)> {
        let query = [p.x, p.y];
        let mut iter = self.tree.nearest_neighbor_iter(&query);
        let first = iter.next()?;
        let best_d2 = first.distance_2(&query);

        // The iterator yields in non-decreasing distance; scan the equidistant
        // prefix and keep the lowest slot.
        let mut best = first;
        for entry in iter {
            if entry.distance_2(&query) > best_d2 {
                break;
            }
            if entry.slot < best.slot {
                best = entry;
            }
        }
        Some((best.slot, Point::new(best.point[0], best.point[1])))
    }

    /// All points within `radius` of `p`, in unspecified order.
    ///
    /// An empty index (or no points in range) yields nothing — this is the
    /// "no leader found" case, not an error.
    pub fn within_radius(&self, p: Point, radius: f64) -> impl Iterator<Item = (u32, Point)> + '_ {
        self.tree
            .locate_within_distance([p.x, p.y], radius * radius)
            .map(|e| (e.slot, Point::new(e.point[0], e.point[1])))
    }
}
