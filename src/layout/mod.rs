//! Per-frame layout algorithms.
//!
//! This module provides the CPU-side passes the simulation runs every frame:
//! the repulsion field that spreads nodes apart, and the spanning-tree based
//! selection of which node pairs should be connected.

pub mod force_field;
pub mod spanning_tree;

pub use force_field::apply_repulsion;
pub use spanning_tree::{IdealEdges, WeightedPair, ideal_edges};
