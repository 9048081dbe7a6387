//! Renderer-facing geometry.
//!
//! Helpers shared by every drawing backend. Nothing here feeds back into the
//! simulation: an edge that is not drawable this frame stays in the edge
//! collection.

use serde::Serialize;

use crate::graph::{Edge, Node};

/// A drawable edge segment in relative coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct EdgeSegment {
    pub x1: f64,
    pub y1: f64,
    pub x2: f64,
    pub y2: f64,
    /// `min(edge, a, b)` opacity.
    pub opacity: f64,
}

impl EdgeSegment {
    /// Scale the segment to pixels, `scale` being the longer viewport side.
    pub fn scaled(self, scale: f64) -> Self {
        Self {
            x1: self.x1 * scale,
            y1: self.y1 * scale,
            x2: self.x2 * scale,
            y2: self.y2 * scale,
            opacity: self.opacity,
        }
    }
}

/// Segment for `edge` between its endpoint nodes `a` and `b`.
///
/// The segment is trimmed to touch each circle's circumference. Returns
/// `None` when the circles overlap, since there is nothing to draw between
/// them.
pub fn edge_segment(edge: &Edge, a: &Node, b: &Node) -> Option<EdgeSegment> {
    let dx = a.x - b.x;
    let dy = a.y - b.y;
    let mag = dx.hypot(dy);
    // NaN distances count as overlapping
    if !(mag > a.radius + b.radius) {
        return None;
    }
    // Unit vector pointing from b to a
    let (ux, uy) = (dx / mag, dy / mag);
    Some(EdgeSegment {
        x1: a.x - ux * a.radius,
        y1: a.y - uy * a.radius,
        x2: b.x + ux * b.radius,
        y2: b.y + uy * b.radius,
        opacity: edge.opacity.min(a.opacity).min(b.opacity),
    })
}
