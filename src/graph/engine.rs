//! Simulation - the per-frame node/edge engine.
//!
//! The Simulation owns the node and edge collections and advances them one
//! logical tick at a time:
//! - Nodes drift on a damped random walk, repel each other, and fade in or
//!   out to track a target population that ramps up over the first frames.
//! - Edges are re-selected every frame from a minimum spanning tree plus
//!   extra short edges, and fade in or out towards that ideal set.
//!
//! The Simulation never draws. Renderers read the collections between
//! steps and mirror entity lifecycles through [`LifecycleHooks`].

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};
use std::collections::{HashMap, HashSet};

use super::edge::{Edge, EdgeKey};
use super::fade::Fade;
use super::node::{Node, NodeId};
use crate::config::SimulationConfig;
use crate::error::{Result, SimulationError};
use crate::layout::{force_field, spanning_tree};

/// Velocity retained per frame by the random walk.
const VELOCITY_DAMPING: f64 = 0.99;

/// Amplitude of the per-frame velocity kick.
const VELOCITY_JITTER: f64 = 0.3;

/// Frames between two increments of the target population.
const RAMP_FRAMES_PER_NODE: u64 = 3;

/// Observer of entity lifecycles.
///
/// Called synchronously during [`Simulation::step_frame_with`], so a renderer
/// can allocate and free presentation resources in lockstep with the engine.
/// All methods default to no-ops.
pub trait LifecycleHooks {
    /// A node entered the collection (opacity 0).
    fn node_created(&mut self, _node: &Node) {}
    /// A node faded out and left the collection.
    fn node_removed(&mut self, _node: &Node) {}
    /// An edge entered the collection (opacity 0).
    fn edge_created(&mut self, _edge: &Edge) {}
    /// An edge faded out, or lost an endpoint, and left the collection.
    fn edge_removed(&mut self, _edge: &Edge) {}
}

impl LifecycleHooks for () {}

/// The animation engine.
///
/// Generic over the random source so runs can be replayed from a seed.
pub struct Simulation<R = SmallRng> {
    config: SimulationConfig,
    rng: R,

    /// Viewport width relative to its longer side
    rel_width: f64,

    /// Viewport height relative to its longer side
    rel_height: f64,

    frame_number: u64,

    nodes: Vec<Node>,
    edges: Vec<Edge>,

    /// Next node ID to assign
    next_node_id: u32,
}

impl Simulation<SmallRng> {
    /// Create a simulation with a seeded default random source.
    pub fn with_seed(config: SimulationConfig, seed: u64) -> Self {
        Self::new(config, SmallRng::seed_from_u64(seed))
    }
}

impl<R: Rng> Simulation<R> {
    /// Create a simulation at frame 0 with no nodes.
    ///
    /// The viewport is the unit square until [`set_dimensions`] is called.
    ///
    /// [`set_dimensions`]: Simulation::set_dimensions
    pub fn new(config: SimulationConfig, rng: R) -> Self {
        Self {
            nodes: Vec::new(),
            edges: Vec::new(),
            config,
            rng,
            rel_width: 1.0,
            rel_height: 1.0,
            frame_number: 0,
            next_node_id: 0,
        }
    }

    // =========================================================================
    // Setup
    // =========================================================================

    /// Set the viewport size in any unit (typically pixels).
    ///
    /// The longer side maps to 1.0. Non-positive or non-finite sizes are
    /// rejected and the previous dimensions are kept.
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> Result<()> {
        let valid = |v: f64| v.is_finite() && v > 0.0;
        if !valid(width) || !valid(height) {
            tracing::warn!(width, height, "rejected viewport dimensions");
            return Err(SimulationError::InvalidDimensions { width, height });
        }
        let max = width.max(height);
        self.rel_width = width / max;
        self.rel_height = height / max;
        tracing::debug!(
            rel_width = self.rel_width,
            rel_height = self.rel_height,
            "viewport resized"
        );
        Ok(())
    }

    /// Current configuration.
    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }

    /// Replace the configuration. Takes effect on the next step.
    pub fn set_config(&mut self, config: SimulationConfig) {
        self.config = config;
    }

    // =========================================================================
    // Stepping
    // =========================================================================

    /// Advance one tick without observers.
    pub fn step_frame(&mut self) {
        self.step_frame_with(&mut ());
    }

    /// Advance one tick, reporting entity lifecycle changes to `hooks`.
    pub fn step_frame_with<H: LifecycleHooks + ?Sized>(&mut self, hooks: &mut H) {
        self.update_nodes(hooks);
        self.update_edges(hooks);
        self.frame_number += 1;
        tracing::trace!(
            frame = self.frame_number,
            nodes = self.nodes.len(),
            edges = self.edges.len(),
            "frame stepped"
        );
    }

    /// Target population for the current frame.
    ///
    /// Ramps up by one node every few frames so nodes do not all appear at
    /// once, capped at the configured amount.
    pub fn ideal_node_count(&self) -> usize {
        let ramp = self.frame_number / RAMP_FRAMES_PER_NODE;
        usize::try_from(ramp)
            .unwrap_or(usize::MAX)
            .min(self.config.amount)
    }

    fn update_nodes<H: LifecycleHooks + ?Sized>(&mut self, hooks: &mut H) {
        let ideal = self.ideal_node_count();
        let speed = self.config.speed;
        let (width, height) = (self.rel_width, self.rel_height);

        let mut kept: Vec<Node> = Vec::with_capacity(self.nodes.len());
        for mut node in std::mem::take(&mut self.nodes) {
            node.x += node.vx * speed;
            node.y += node.vy * speed;
            node.vx = node.vx * VELOCITY_DAMPING + (self.rng.r#gen::<f64>() - 0.5) * VELOCITY_JITTER;
            node.vy = node.vy * VELOCITY_DAMPING + (self.rng.r#gen::<f64>() - 0.5) * VELOCITY_JITTER;

            // Fade out near the borders, or beyond the target population
            let wanted = kept.len() < ideal && node.insideness(width, height) > self.config.border_fade;
            node.fade(if wanted {
                self.config.fade_in_per_frame
            } else {
                self.config.fade_out_per_frame
            });

            if node.is_alive() {
                kept.push(node);
            } else {
                hooks.node_removed(&node);
            }
        }

        let spawned = ideal.saturating_sub(kept.len());
        for _ in 0..spawned {
            let x = self.rng.r#gen::<f64>() * width;
            let y = self.rng.r#gen::<f64>() * height;
            let radius = self.config.node_size.sample(&mut self.rng);
            let node = Node::new(self.issue_node_id(), x, y, radius);
            hooks.node_created(&node);
            kept.push(node);
        }
        if spawned > 0 {
            tracing::debug!(spawned, ideal, total = kept.len(), "nodes spawned");
        }

        self.nodes = kept;
        force_field::apply_repulsion(&mut self.nodes, self.config.repulsion);
    }

    fn update_edges<H: LifecycleHooks + ?Sized>(&mut self, hooks: &mut H) {
        let ideal = spanning_tree::ideal_edges(
            &self.nodes,
            self.config.radii_weight_power,
            self.config.extra_edge_proportion,
        );
        let ideal_keys: Vec<EdgeKey> = ideal
            .pairs
            .iter()
            .map(|&(i, j)| EdgeKey::new(self.nodes[i].id, self.nodes[j].id))
            .collect();
        let ideal_set: HashSet<EdgeKey> = ideal_keys.iter().copied().collect();

        let opacity_of: HashMap<NodeId, f64> =
            self.nodes.iter().map(|n| (n.id, n.opacity)).collect();
        // A node that already left the collection counts as fully faded
        let endpoint_opacity = |id: NodeId| opacity_of.get(&id).copied().unwrap_or(0.0);

        // `ideal.target` may exceed the pairs that exist; never size from it
        let capacity = ideal.pairs.len().max(self.edges.len());
        let mut kept: Vec<Edge> = Vec::with_capacity(capacity);
        let mut live: HashSet<EdgeKey> = HashSet::with_capacity(capacity);
        for mut edge in std::mem::take(&mut self.edges) {
            // Edges share the node fade rates
            edge.fade(if ideal_set.contains(&edge.key()) {
                self.config.fade_in_per_frame
            } else {
                self.config.fade_out_per_frame
            });

            let visible = edge
                .opacity
                .min(endpoint_opacity(edge.a))
                .min(endpoint_opacity(edge.b));
            if visible > 0.0 {
                live.insert(edge.key());
                kept.push(edge);
            } else {
                hooks.edge_removed(&edge);
            }
        }

        // Backfill: missing tree edges first, then extras
        for key in ideal_keys {
            if kept.len() >= ideal.target {
                break;
            }
            if live.insert(key) {
                let edge = Edge::from_key(key);
                hooks.edge_created(&edge);
                kept.push(edge);
            }
        }

        self.edges = kept;
    }

    fn issue_node_id(&mut self) -> NodeId {
        let id = NodeId(self.next_node_id);
        self.next_node_id = self.next_node_id.wrapping_add(1);
        id
    }

    // =========================================================================
    // Read Access
    // =========================================================================

    /// Live nodes in iteration order.
    pub fn nodes(&self) -> &[Node] {
        &self.nodes
    }

    /// Live edges.
    pub fn edges(&self) -> &[Edge] {
        &self.edges
    }

    /// Look up a live node by ID.
    pub fn node(&self, id: NodeId) -> Option<&Node> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Get the number of nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Get the number of edges.
    pub fn edge_count(&self) -> usize {
        self.edges.len()
    }

    /// Number of completed steps.
    pub fn frame_number(&self) -> u64 {
        self.frame_number
    }

    /// Viewport width relative to its longer side.
    pub fn rel_width(&self) -> f64 {
        self.rel_width
    }

    /// Viewport height relative to its longer side.
    pub fn rel_height(&self) -> f64 {
        self.rel_height
    }
}
