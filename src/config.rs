//! Simulation configuration.
//!
//! Two layers:
//! - [`SimulationConfig`]: engine units, consumed directly by the simulation.
//! - [`AnimatedNodesOptions`]: the user-facing options object passed in from
//!   JavaScript. Its scales are friendlier (repulsion 0-100, extra edges in
//!   percent) and every field is optional.
//!
//! Range constraints are documented preconditions. Out-of-range values are
//! not rejected; they produce degenerate animation, never a panic.

use rand::Rng;
use serde::Deserialize;

/// Rule for drawing the radius of a newly spawned node.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum NodeSize {
    /// `(uniform(0, 1) + base) * scale`. Biased towards small nodes when
    /// `base` is small.
    Skewed { base: f64, scale: f64 },
    /// Uniform in `[min, max)`.
    Uniform { min: f64, max: f64 },
    /// Every node gets the same radius.
    Fixed { radius: f64 },
}

impl NodeSize {
    /// Draw one radius.
    pub fn sample<R: Rng + ?Sized>(&self, rng: &mut R) -> f64 {
        match *self {
            NodeSize::Skewed { base, scale } => (rng.r#gen::<f64>() + base) * scale,
            NodeSize::Uniform { min, max } => min + rng.r#gen::<f64>() * (max - min),
            NodeSize::Fixed { radius } => radius,
        }
    }
}

impl Default for NodeSize {
    fn default() -> Self {
        NodeSize::Skewed {
            base: 0.35,
            scale: 0.03,
        }
    }
}

/// Engine configuration in simulation units.
#[derive(Debug, Clone, PartialEq)]
pub struct SimulationConfig {
    /// Target node count (default: 16).
    pub amount: usize,
    /// Scale applied to velocity when integrating position (default: 5e-5).
    pub speed: f64,
    /// Opacity gained per frame while fading in, in `(0, 1]` (default: 0.06).
    pub fade_in_per_frame: f64,
    /// Opacity change per frame while fading out, in `[-1, 0)` (default: -0.03).
    pub fade_out_per_frame: f64,
    /// Repulsion strength, `>= 0` (default: 1e-5).
    pub repulsion: f64,
    /// Exponent of the radius discount on edge weights, in `[0, 1]` (default: 0.1).
    pub radii_weight_power: f64,
    /// Insideness below which nodes fade out, usually negative (default: -0.02).
    pub border_fade: f64,
    /// Extra non-tree edges as a fraction of tree size, `>= 0` (default: 0.75).
    pub extra_edge_proportion: f64,
    /// Radius rule for new nodes.
    pub node_size: NodeSize,
}

impl Default for SimulationConfig {
    fn default() -> Self {
        AnimatedNodesOptions::default().into()
    }
}

/// Node options as exposed to JavaScript.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct NodeOptions {
    pub amount: f64,
    /// 0 - 100.
    pub speed: f64,
    pub fade_in_per_frame: f64,
    pub fade_out_per_frame: f64,
    /// 0 - 100.
    pub repulsion: f64,
    pub size: NodeSize,
}

impl Default for NodeOptions {
    fn default() -> Self {
        Self {
            amount: 16.0,
            speed: 0.5,
            fade_in_per_frame: 0.06,
            fade_out_per_frame: -0.03,
            repulsion: 10.0,
            size: NodeSize::default(),
        }
    }
}

/// Edge options as exposed to JavaScript.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EdgeOptions {
    /// Percent of extra edges relative to the spanning tree, 0 - 100.
    pub extra_edge_proportion: f64,
}

impl Default for EdgeOptions {
    fn default() -> Self {
        Self {
            extra_edge_proportion: 75.0,
        }
    }
}

/// Top-level options object accepted by the WASM constructor.
///
/// ```json
/// {
///   "nodes": { "amount": 30, "repulsion": 3, "size": { "kind": "fixed", "radius": 0.02 } },
///   "edges": { "extraEdgeProportion": 50 },
///   "radiiWeightPower": 0.1,
///   "borderFade": -0.02,
///   "speed": 20
/// }
/// ```
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AnimatedNodesOptions {
    pub nodes: NodeOptions,
    pub edges: EdgeOptions,
    pub radii_weight_power: f64,
    pub border_fade: f64,
    /// Logic ticks per second.
    pub speed: f64,
}

impl Default for AnimatedNodesOptions {
    fn default() -> Self {
        Self {
            nodes: NodeOptions::default(),
            edges: EdgeOptions::default(),
            radii_weight_power: 0.1,
            border_fade: -0.02,
            speed: 20.0,
        }
    }
}

impl AnimatedNodesOptions {
    /// Milliseconds between two logic ticks, for the external scheduler.
    pub fn tick_interval_ms(&self) -> u32 {
        if self.speed > 0.0 {
            (1000.0 / self.speed).floor() as u32
        } else {
            u32::MAX
        }
    }
}

impl From<AnimatedNodesOptions> for SimulationConfig {
    fn from(options: AnimatedNodesOptions) -> Self {
        let nodes = options.nodes;
        Self {
            // `as` saturates: negative and NaN amounts become 0
            amount: nodes.amount.round() as usize,
            speed: nodes.speed * 1e-4,
            fade_in_per_frame: nodes.fade_in_per_frame,
            fade_out_per_frame: nodes.fade_out_per_frame,
            repulsion: nodes.repulsion * 1e-6,
            radii_weight_power: options.radii_weight_power,
            border_fade: options.border_fade,
            extra_edge_proportion: options.edges.extra_edge_proportion / 100.0,
            node_size: nodes.size,
        }
    }
}
