//! Data Models
//!
//! This module contains the core data structures of the conversation graph:
//!
//! - `ChatNode` - One question/answer exchange
//! - `ChatEdge` - A directed relationship from a parent exchange to a
//!   derived exchange (continue or fork)
//! - `Position` - Layout coordinate stored on behalf of the renderer
//!
//! Nodes are owned exclusively by the graph store; edges are immutable once
//! created (deleted, never mutated).

mod edge;
mod node;

pub use edge::{Anchor, ChatEdge, EdgeRelation};
pub use node::{ChatNode, NodeStatus, Position};
