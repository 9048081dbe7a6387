//! Node type and related structures.
//!
//! Nodes are the floating circles of the animation. Each node has:
//! - An engine-local identifier (used as an edge endpoint handle)
//! - Position (x, y) in relative coordinates
//! - Radius, always positive under a valid configuration
//! - Velocity (vx, vy) driving a damped random walk
//! - Opacity for fade-in/fade-out

use serde::Serialize;
use std::fmt;

use super::fade::Fade;

/// Engine-local node identifier.
///
/// Issued sequentially by a single simulation instance. The counter wraps
/// after 2^32 spawns, so ids are unique among live nodes only while fewer
/// than that many have been issued. It wraps a u32 for efficient storage
/// and WebAssembly interop.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct NodeId(pub u32);

impl NodeId {
    /// Create a new NodeId from a raw u32.
    #[inline]
    pub fn new(id: u32) -> Self {
        Self(id)
    }

    /// Get the raw u32 value.
    #[inline]
    pub fn raw(self) -> u32 {
        self.0
    }
}

impl fmt::Display for NodeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Node({})", self.0)
    }
}

impl From<u32> for NodeId {
    #[inline]
    fn from(id: u32) -> Self {
        Self(id)
    }
}

impl From<NodeId> for u32 {
    #[inline]
    fn from(id: NodeId) -> Self {
        id.0
    }
}

/// A floating node.
///
/// Positions are relative: the longer viewport side maps to 1.0, so a node
/// normally lives in `[0, rel_width] × [0, rel_height]`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Node {
    pub id: NodeId,
    pub x: f64,
    pub y: f64,
    pub radius: f64,
    pub vx: f64,
    pub vy: f64,
    pub opacity: f64,
}

impl Node {
    /// Create a node at rest and fully transparent.
    pub fn new(id: NodeId, x: f64, y: f64, radius: f64) -> Self {
        Self {
            id,
            x,
            y,
            radius,
            vx: 0.0,
            vy: 0.0,
            opacity: 0.0,
        }
    }

    /// Euclidean distance between the centers of two nodes.
    #[inline]
    pub fn distance_to(&self, other: &Node) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }

    /// Signed distance to the nearest border of a `width × height`
    /// rectangle anchored at the origin. Negative outside.
    #[inline]
    pub fn insideness(&self, width: f64, height: f64) -> f64 {
        self.x.min(width - self.x).min(self.y).min(height - self.y)
    }
}

impl Fade for Node {
    #[inline]
    fn opacity(&self) -> f64 {
        self.opacity
    }

    #[inline]
    fn opacity_mut(&mut self) -> &mut f64 {
        &mut self.opacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_id() {
        let id = NodeId::new(42);
        assert_eq!(id.raw(), 42);
        assert_eq!(id.0, 42);
        assert_eq!(format!("{}", id), "Node(42)");
    }

    #[test]
    fn test_node_id_conversion() {
        let id: NodeId = 123.into();
        let raw: u32 = id.into();
        assert_eq!(raw, 123);
    }

    #[test]
    fn test_new_node_is_transparent_and_at_rest() {
        let node = Node::new(NodeId(0), 0.25, 0.5, 0.01);
        assert_eq!(node.opacity(), 0.0);
        assert_eq!((node.vx, node.vy), (0.0, 0.0));
        assert!(!node.is_alive());
    }

    #[test]
    fn test_insideness() {
        let node = Node::new(NodeId(0), 0.1, 0.3, 0.01);
        // Closest border is the left one
        assert!((node.insideness(1.0, 0.5) - 0.1).abs() < 1e-12);

        let outside = Node::new(NodeId(1), 1.05, 0.3, 0.01);
        assert!(outside.insideness(1.0, 0.5) < 0.0);
    }

    #[test]
    fn test_distance() {
        let a = Node::new(NodeId(0), 0.0, 0.0, 0.01);
        let b = Node::new(NodeId(1), 0.3, 0.4, 0.01);
        assert!((a.distance_to(&b) - 0.5).abs() < 1e-12);
    }
}
