//! DialogMap Conversation-Graph Engine
//!
//! This crate maintains an evolving directed graph of question/answer
//! exchanges. Any exchange can be continued (next turn in the same thread)
//! or forked (parallel branch from the same point); answers are populated
//! asynchronously by an external engine while the graph stays editable.
//!
//! # Architecture
//!
//! - **Single Authority**: one in-memory graph store owns all nodes and
//!   edges; an id index is reconciled in lockstep with every mutation
//! - **Structural Invariants**: single parent per node and acyclicity are
//!   enforced before any edge is committed
//! - **Id-bound Async**: in-flight answer generations write back strictly by
//!   node id, so the graph can be edited freely while requests are pending
//! - **No Global State**: all actions go through an explicit
//!   [`ConversationService`] handle
//!
//! # Modules
//!
//! - [`models`] - Data structures (ChatNode, ChatEdge, Position)
//! - [`graph`] - Authoritative store, id index, domain events
//! - [`services`] - Lifecycle orchestration, validation, upstream resolution

pub mod graph;
pub mod models;
pub mod services;

// Re-export commonly used types
pub use graph::*;
pub use models::*;
pub use services::*;
