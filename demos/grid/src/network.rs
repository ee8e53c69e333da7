//! Synthetic street-grid geometry.
//!
//! An N×N block grid of bidirectional streets: every horizontal and vertical
//! street is one polyline with a vertex at each intersection, so the builder
//! interns shared corner nodes automatically.

use evac_core::Point;
use evac_spatial::Polyline;

/// Build the polylines for a square grid of `blocks` × `blocks` city blocks
/// with `block_len` metres per side.
pub fn grid_polylines(blocks: usize, block_len: f64) -> Vec<Polyline> {
    let n = blocks + 1; // intersections per side
    let mut lines = Vec::with_capacity(2 * n);

    // Horizontal streets.
    for row in 0..n {
        let y = row as f64 * block_len;
        lines.push((0..n).map(|col| Point::new(col as f64 * block_len, y)).collect());
    }
    // Vertical streets.
    for col in 0..n {
        let x = col as f64 * block_len;
        lines.push((0..n).map(|row| Point::new(x, row as f64 * block_len)).collect());
    }

    lines
}
