//! Edge type and related structures.
//!
//! Edges are undirected connections between two distinct nodes. Each edge
//! has:
//! - An unordered endpoint key, `(A, B)` and `(B, A)` being the same edge
//! - Opacity for fade-in/fade-out

use serde::Serialize;
use std::fmt;

use super::fade::Fade;
use super::node::NodeId;

/// Unordered endpoint pair identifying an edge.
///
/// The smaller id is always stored first, so equality and hashing are
/// symmetric in the endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize)]
pub struct EdgeKey {
    low: NodeId,
    high: NodeId,
}

impl EdgeKey {
    /// Create a key for the edge between `a` and `b`.
    #[inline]
    pub fn new(a: NodeId, b: NodeId) -> Self {
        if a <= b {
            Self { low: a, high: b }
        } else {
            Self { low: b, high: a }
        }
    }

    /// Both endpoints, smaller id first.
    #[inline]
    pub fn endpoints(self) -> (NodeId, NodeId) {
        (self.low, self.high)
    }
}

impl fmt::Display for EdgeKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Edge({}-{})", self.low.0, self.high.0)
    }
}

/// A live edge.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Edge {
    /// One endpoint, as chosen when the edge was created.
    pub a: NodeId,
    /// The other endpoint.
    pub b: NodeId,
    pub opacity: f64,
}

impl Edge {
    /// Create a fully transparent edge between two distinct nodes.
    pub fn new(a: NodeId, b: NodeId) -> Self {
        debug_assert_ne!(a, b, "edge endpoints must be distinct");
        Self { a, b, opacity: 0.0 }
    }

    /// Create an edge from an endpoint key.
    pub fn from_key(key: EdgeKey) -> Self {
        let (a, b) = key.endpoints();
        Self::new(a, b)
    }

    /// The symmetric identity of this edge.
    #[inline]
    pub fn key(&self) -> EdgeKey {
        EdgeKey::new(self.a, self.b)
    }
}

impl Fade for Edge {
    #[inline]
    fn opacity(&self) -> f64 {
        self.opacity
    }

    #[inline]
    fn opacity_mut(&mut self) -> &mut f64 {
        &mut self.opacity
    }
}
