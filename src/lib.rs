//! Floating Nodes - WASM Module
//!
//! This module provides the simulation engine behind the animated floating
//! graph nodes background. It is compiled to WebAssembly and exposes a
//! JavaScript-friendly API via wasm-bindgen; drawing stays on the JS side.
//!
//! # Architecture
//!
//! - `graph`: Node/edge entities, union-find, and the per-frame `Simulation`
//! - `layout`: Repulsion field and spanning-tree edge selection
//! - `config`: Engine configuration and the JS options object
//! - `render`: Backend-agnostic drawing geometry
//! - `error`: Error types

use js_sys::{Function, Reflect};
use serde::Serialize;
use std::collections::HashMap;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub mod config;
pub mod error;
pub mod graph;
pub mod layout;
pub mod render;

pub use config::{AnimatedNodesOptions, NodeSize, SimulationConfig};
pub use error::SimulationError;
pub use graph::{Edge, EdgeKey, Fade, LifecycleHooks, Node, NodeId, Simulation};

/// Initialize the WASM module.
#[wasm_bindgen(start)]
pub fn init() {
    console_error_panic_hook::set_once();
}

/// JavaScript lifecycle callbacks.
///
/// Node callbacks receive the node id. Edge callbacks receive both endpoint
/// ids. A throwing callback is logged and does not interrupt the step.
#[derive(Default)]
struct JsHooks {
    on_node_created: Option<Function>,
    on_node_removed: Option<Function>,
    on_edge_created: Option<Function>,
    on_edge_removed: Option<Function>,
}

impl JsHooks {
    fn from_object(hooks: &JsValue) -> Self {
        let get = |name: &str| {
            Reflect::get(hooks, &JsValue::from_str(name))
                .ok()
                .and_then(|value| value.dyn_into::<Function>().ok())
        };
        Self {
            on_node_created: get("onNodeCreated"),
            on_node_removed: get("onNodeRemoved"),
            on_edge_created: get("onEdgeCreated"),
            on_edge_removed: get("onEdgeRemoved"),
        }
    }

    fn report(name: &str, result: Result<JsValue, JsValue>) {
        if let Err(err) = result {
            web_sys::console::error_2(&JsValue::from_str(&format!("{name} hook threw")), &err);
        }
    }

    fn node_event(callback: &Option<Function>, name: &str, node: &Node) {
        if let Some(f) = callback {
            Self::report(name, f.call1(&JsValue::NULL, &JsValue::from(node.id.raw())));
        }
    }

    fn edge_event(callback: &Option<Function>, name: &str, edge: &Edge) {
        if let Some(f) = callback {
            Self::report(
                name,
                f.call2(
                    &JsValue::NULL,
                    &JsValue::from(edge.a.raw()),
                    &JsValue::from(edge.b.raw()),
                ),
            );
        }
    }
}

impl LifecycleHooks for JsHooks {
    fn node_created(&mut self, node: &Node) {
        Self::node_event(&self.on_node_created, "onNodeCreated", node);
    }

    fn node_removed(&mut self, node: &Node) {
        Self::node_event(&self.on_node_removed, "onNodeRemoved", node);
    }

    fn edge_created(&mut self, edge: &Edge) {
        Self::edge_event(&self.on_edge_created, "onEdgeCreated", edge);
    }

    fn edge_removed(&mut self, edge: &Edge) {
        Self::edge_event(&self.on_edge_removed, "onEdgeRemoved", edge);
    }
}

/// Serializable view of one settled frame.
#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Snapshot<'a> {
    frame_number: u64,
    rel_width: f64,
    rel_height: f64,
    nodes: &'a [Node],
    edges: &'a [Edge],
}

fn parse_options(options: JsValue) -> Result<AnimatedNodesOptions, JsValue> {
    if options.is_undefined() || options.is_null() {
        return Ok(AnimatedNodesOptions::default());
    }
    serde_wasm_bindgen::from_value(options).map_err(Into::into)
}

/// Main entry point for the animation engine.
///
/// This struct wraps the internal Simulation and provides the public API
/// exposed to JavaScript.
#[wasm_bindgen]
pub struct AnimatedNodesWasm {
    engine: Simulation,
    hooks: JsHooks,
    tick_interval_ms: u32,
}

#[wasm_bindgen]
impl AnimatedNodesWasm {
    /// Create an engine from an options object (or `undefined` for defaults).
    ///
    /// Seeded from `Math.random()`.
    #[wasm_bindgen(constructor)]
    pub fn new(options: JsValue) -> Result<AnimatedNodesWasm, JsValue> {
        let high = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        let low = (js_sys::Math::random() * f64::from(u32::MAX)) as u64;
        Self::build(options, (high << 32) | low)
    }

    /// Create an engine with a fixed seed, for reproducible animations.
    #[wasm_bindgen(js_name = withSeed)]
    pub fn with_seed(options: JsValue, seed: u32) -> Result<AnimatedNodesWasm, JsValue> {
        Self::build(options, u64::from(seed))
    }

    fn build(options: JsValue, seed: u64) -> Result<AnimatedNodesWasm, JsValue> {
        let options = parse_options(options)?;
        let tick_interval_ms = options.tick_interval_ms();
        Ok(Self {
            engine: Simulation::with_seed(options.into(), seed),
            hooks: JsHooks::default(),
            tick_interval_ms,
        })
    }

    // =========================================================================
    // Lifecycle
    // =========================================================================

    /// Set the viewport size. Throws on non-positive or non-finite sizes.
    #[wasm_bindgen(js_name = setDimensions)]
    pub fn set_dimensions(&mut self, width: f64, height: f64) -> Result<(), JsError> {
        if let Err(err) = self.engine.set_dimensions(width, height) {
            web_sys::console::warn_1(&JsValue::from_str(&err.to_string()));
            return Err(err.into());
        }
        Ok(())
    }

    /// Register lifecycle callbacks.
    ///
    /// Accepts `{ onNodeCreated, onNodeRemoved, onEdgeCreated, onEdgeRemoved }`;
    /// missing entries are ignored. Replaces any previous registration.
    #[wasm_bindgen(js_name = setHooks)]
    pub fn set_hooks(&mut self, hooks: JsValue) {
        self.hooks = JsHooks::from_object(&hooks);
    }

    /// Advance the simulation by one logic tick.
    #[wasm_bindgen(js_name = stepFrame)]
    pub fn step_frame(&mut self) {
        self.engine.step_frame_with(&mut self.hooks);
    }

    /// Milliseconds between logic ticks, as configured by `speed`.
    #[wasm_bindgen(js_name = tickInterval)]
    pub fn tick_interval(&self) -> u32 {
        self.tick_interval_ms
    }

    #[wasm_bindgen(js_name = frameNumber)]
    pub fn frame_number(&self) -> f64 {
        self.engine.frame_number() as f64
    }

    #[wasm_bindgen(js_name = relWidth)]
    pub fn rel_width(&self) -> f64 {
        self.engine.rel_width()
    }

    #[wasm_bindgen(js_name = relHeight)]
    pub fn rel_height(&self) -> f64 {
        self.engine.rel_height()
    }

    // =========================================================================
    // Node Buffers
    // =========================================================================

    /// Get the number of nodes.
    #[wasm_bindgen(js_name = nodeCount)]
    pub fn node_count(&self) -> u32 {
        self.engine.node_count() as u32
    }

    /// Node ids, in the same order as every other node buffer.
    #[wasm_bindgen(js_name = nodeIds)]
    pub fn node_ids(&self) -> Vec<u32> {
        self.engine.nodes().iter().map(|n| n.id.raw()).collect()
    }

    /// Node positions as [x0, y0, x1, y1, ...] in relative coordinates.
    #[wasm_bindgen(js_name = nodePositions)]
    pub fn node_positions(&self) -> Vec<f64> {
        self.engine
            .nodes()
            .iter()
            .flat_map(|n| [n.x, n.y])
            .collect()
    }

    #[wasm_bindgen(js_name = nodeRadii)]
    pub fn node_radii(&self) -> Vec<f64> {
        self.engine.nodes().iter().map(|n| n.radius).collect()
    }

    #[wasm_bindgen(js_name = nodeOpacities)]
    pub fn node_opacities(&self) -> Vec<f64> {
        self.engine.nodes().iter().map(|n| n.opacity).collect()
    }

    // =========================================================================
    // Edge Buffers
    // =========================================================================

    /// Get the number of edges.
    #[wasm_bindgen(js_name = edgeCount)]
    pub fn edge_count(&self) -> u32 {
        self.engine.edge_count() as u32
    }

    /// Edge endpoints as node ids [a0, b0, a1, b1, ...].
    #[wasm_bindgen(js_name = edgeEndpoints)]
    pub fn edge_endpoints(&self) -> Vec<u32> {
        self.engine
            .edges()
            .iter()
            .flat_map(|e| [e.a.raw(), e.b.raw()])
            .collect()
    }

    #[wasm_bindgen(js_name = edgeOpacities)]
    pub fn edge_opacities(&self) -> Vec<f64> {
        self.engine.edges().iter().map(|e| e.opacity).collect()
    }

    /// Drawable edge segments as [x1, y1, x2, y2, opacity, ...].
    ///
    /// Coordinates are multiplied by `scale`, normally the longer canvas
    /// side in pixels. Edges whose endpoint circles overlap are left out.
    #[wasm_bindgen(js_name = edgeSegments)]
    pub fn edge_segments(&self, scale: f64) -> Vec<f64> {
        collect_edge_segments(&self.engine, scale)
    }

    /// Full frame as a plain JS object `{ frameNumber, relWidth, relHeight, nodes, edges }`.
    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = Snapshot {
            frame_number: self.engine.frame_number(),
            rel_width: self.engine.rel_width(),
            rel_height: self.engine.rel_height(),
            nodes: self.engine.nodes(),
            edges: self.engine.edges(),
        };
        serde_wasm_bindgen::to_value(&snapshot).map_err(Into::into)
    }
}

fn collect_edge_segments<R: rand::Rng>(engine: &Simulation<R>, scale: f64) -> Vec<f64> {
    let by_id: HashMap<NodeId, &Node> = engine.nodes().iter().map(|n| (n.id, n)).collect();
    let mut out = Vec::with_capacity(engine.edge_count() * 5);
    for edge in engine.edges() {
        let (Some(a), Some(b)) = (by_id.get(&edge.a), by_id.get(&edge.b)) else {
            continue;
        };
        if let Some(seg) = render::edge_segment(edge, a, b).map(|s| s.scaled(scale)) {
            out.extend_from_slice(&[seg.x1, seg.y1, seg.x2, seg.y2, seg.opacity]);
        }
    }
    out
}
