//! Taproot Graph: breadth-first caller discovery and tree rendering.
//!
//! [`GraphBuilder`] sweeps a source tree for call sites of a target
//! symbol, resolves each hit to its enclosing function through the
//! language registry, and accumulates a [`CallGraph`]. [`render_tree`]
//! prints the finished graph as one indented tree per root caller.

pub mod builder;
pub mod graph;
pub mod render;

#[cfg(test)]
pub mod tests;

pub use builder::GraphBuilder;
pub use graph::{CallGraph, CallNode, CallRecord, NodeId};
pub use render::render_tree;
