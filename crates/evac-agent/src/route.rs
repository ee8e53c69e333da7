//! Assigned evacuation route: a polyline with arc-length bookkeeping.
//!
//! Movement along a route is one-dimensional: a resident's position maps to
//! an arc length via projection onto the polyline, advances by
//! `speed * step_interval`, and maps back to a coordinate.  Prefix sums of
//! segment lengths make both directions O(segments) worst case with no
//! allocation per tick.

use evac_core::{Point, Vec2};

/// An ordered coordinate sequence plus cumulative segment lengths.
///
/// An empty route (no points) means "no reachable shelter"; a single-point
/// route is a zero-length trip whose origin already is the shelter node.
#[derive(Clone, Debug, Default)]
pub struct Route {
    points: Vec<Point>,
    /// `cumulative[i]` = arc length from the route start to `points[i]`.
    cumulative: Vec<f64>,
}

impl Route {
    /// The empty route: no reachable shelter, the resident never moves.
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn from_points(points: Vec<Point>) -> Self {
        let mut cumulative = Vec::with_capacity(points.len());
        let mut total = 0.0;
        for (i, p) in points.iter().enumerate() {
            if i > 0 {
                total += points[i - 1].distance(*p);
            }
            cumulative.push(total);
        }
        Self { points, cumulative }
    }

    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    pub fn points(&self) -> &[Point] {
        &self.points
    }

    /// Total arc length; `0.0` for empty and single-point routes.
    pub fn total_length(&self) -> f64 {
        self.cumulative.last().copied().unwrap_or(0.0)
    }

    /// Unit direction of the first segment — the initial heading of a
    /// resident placed at the route start.  `None` for routes with no
    /// positive-length segment.
    pub fn initial_heading(&self) -> Option<Vec2> {
        self.points
            .windows(2)
            .find_map(|pair| pair[0].to(pair[1]).normalized())
    }

    /// Arc length of the point on the route closest to `p`.
    ///
    /// Scans every segment, projecting `p` onto it (clamped to the segment),
    /// and returns the arc position of the overall closest projection.
    /// Returns `None` for an empty route.
    pub fn project(&self, p: Point) -> Option<f64> {
        if self.points.is_empty() {
            return None;
        }
        if self.points.len() == 1 {
            return Some(0.0);
        }

        let mut best_d2 = f64::INFINITY;
        let mut best_arc = 0.0;
        for (i, pair) in self.points.windows(2).enumerate() {
            let (a, b) = (pair[0], pair[1]);
            let seg = a.to(b);
            let seg_len2 = seg.dot(seg);
            // Zero-length segments never survive graph construction, but
            // guard anyway: project onto the point itself.
            let t = if seg_len2 > 0.0 {
                (a.to(p).dot(seg) / seg_len2).clamp(0.0, 1.0)
            } else {
                0.0
            };
            let candidate = a.offset(seg.scale(t));
            let dx = candidate.x - p.x;
            let dy = candidate.y - p.y;
            let d2 = dx * dx + dy * dy;
            if d2 < best_d2 {
                best_d2 = d2;
                best_arc = self.cumulative[i] + seg_len2.sqrt() * t;
            }
        }
        Some(best_arc)
    }

    /// The coordinate at arc length `arc` from the route start.
    ///
    /// `None` when `arc` lies outside `[0, total_length]` (beyond a small
    /// float-slack tolerance at the end) — the caller treats that as "no
    /// movement this tick" rather than an error.
    pub fn point_at(&self, arc: f64) -> Option<Point> {
        if self.points.is_empty() || arc < 0.0 {
            return None;
        }
        let total = self.total_length();
        if arc >= total {
            // Allow float slack at the very end; reject genuine overshoot.
            const END_SLACK: f64 = 1e-9;
            return (arc - total <= END_SLACK * total.max(1.0))
                .then(|| *self.points.last().unwrap());
        }

        // First vertex with cumulative > arc bounds the containing segment.
        let hi = self.cumulative.partition_point(|&c| c <= arc);
        debug_assert!(hi > 0 && hi < self.points.len());
        let (a, b) = (self.points[hi - 1], self.points[hi]);
        let seg_len = self.cumulative[hi] - self.cumulative[hi - 1];
        let t = (arc - self.cumulative[hi - 1]) / seg_len;
        Some(a.offset(a.to(b).scale(t)))
    }
}
