//! Graph entities and the simulation engine.
//!
//! Nodes and edges are plain value data with an opacity lifecycle. The
//! [`Simulation`] owns both collections and rewrites them once per frame;
//! renderers observe changes through [`LifecycleHooks`].

mod disjoint_set;
mod edge;
mod engine;
mod fade;
mod node;

pub use disjoint_set::DisjointSet;
pub use edge::{Edge, EdgeKey};
pub use engine::{LifecycleHooks, Simulation};
pub use fade::Fade;
pub use node::{Node, NodeId};
