//! Planar coordinate type and vector utilities.
//!
//! The engine works in an already-projected plane (metres or whatever unit
//! the input shapefile was projected to), so distances are plain Euclidean —
//! no great-circle math.  `f64` keeps node identity exact: graph nodes are
//! deduplicated by coordinate bit pattern, and any rounding would split one
//! junction into several.

use serde::{Deserialize, Serialize};

/// A planar coordinate.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[inline]
    pub fn distance(self, other: Point) -> f64 {
        let dx = other.x - self.x;
        let dy = other.y - self.y;
        (dx * dx + dy * dy).sqrt()
    }

    /// Displacement vector from `self` to `other`.
    #[inline]
    pub fn to(self, other: Point) -> Vec2 {
        Vec2 { x: other.x - self.x, y: other.y - self.y }
    }

    /// The point reached by moving `self` along `v`.
    #[inline]
    pub fn offset(self, v: Vec2) -> Point {
        Point { x: self.x + v.x, y: self.y + v.y }
    }

    /// Bit-exact identity key.  Two points are the same graph node iff their
    /// keys are equal; using the raw bit patterns sidesteps the hashing
    /// hazards of `f64`.
    #[inline]
    pub fn key(self) -> (u64, u64) {
        (self.x.to_bits(), self.y.to_bits())
    }
}

impl std::fmt::Display for Point {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "({:.3}, {:.3})", self.x, self.y)
    }
}

// ── Vec2 ──────────────────────────────────────────────────────────────────────

/// A planar displacement / direction vector.
#[derive(Copy, Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Vec2 {
    pub x: f64,
    pub y: f64,
}

impl Vec2 {
    pub const ZERO: Vec2 = Vec2 { x: 0.0, y: 0.0 };

    #[inline]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    #[inline]
    pub fn length(self) -> f64 {
        (self.x * self.x + self.y * self.y).sqrt()
    }

    #[inline]
    pub fn dot(self, other: Vec2) -> f64 {
        self.x * other.x + self.y * other.y
    }

    #[inline]
    pub fn scale(self, s: f64) -> Vec2 {
        Vec2 { x: self.x * s, y: self.y * s }
    }

    /// Unit vector in the same direction, or `None` for the zero vector
    /// (an agent that has not moved yet has no heading).
    pub fn normalized(self) -> Option<Vec2> {
        let len = self.length();
        if len > 0.0 {
            Some(Vec2 { x: self.x / len, y: self.y / len })
        } else {
            None
        }
    }
}
