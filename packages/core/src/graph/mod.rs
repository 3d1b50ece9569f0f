//! Graph Layer
//!
//! The authoritative home of all nodes and edges:
//!
//! - `ConversationGraph` - primitive, synchronous mutations with referential
//!   integrity and monotonic id allocation
//! - `NodeIndex` - id lookup kept in lockstep with every mutation
//! - `GraphEvent` - broadcast domain events mirroring state changes
//!
//! Structural rules (single parent, acyclicity) are deliberately NOT
//! enforced here; that is the validator's job in the services layer. The
//! store only guarantees that edges never reference missing nodes and that
//! the index never drifts from the node set.

pub mod error;
pub mod events;
pub mod index;
pub mod store;

pub use error::GraphStoreError;
pub use events::{GraphEvent, EVENT_CHANNEL_CAPACITY};
pub use index::NodeIndex;
pub use store::{ConversationGraph, GraphSnapshot, GraphStats, RemovedNode};
