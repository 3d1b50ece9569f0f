//! Domain Events
//!
//! Every observable graph change is mirrored onto a broadcast channel so
//! renderers and other observers can react without polling. Events mirror
//! state, they are not the state: a lagging receiver misses history but the
//! graph itself is always current.

use crate::models::{ChatEdge, ChatNode};
use serde::{Deserialize, Serialize};

/// Broadcast channel capacity for graph events.
///
/// 128 provides headroom for burst operations (rapid node creation) while
/// limiting memory overhead. Observer lag is acceptable - observers track
/// current state, not history.
pub const EVENT_CHANNEL_CAPACITY: usize = 128;

/// An observable change to the conversation graph
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "camelCase")]
pub enum GraphEvent {
    /// A node was inserted (status `Loading`, answer pending)
    #[serde(rename_all = "camelCase")]
    NodeCreated { node: ChatNode },

    /// An edge was committed after passing the structural checks
    #[serde(rename_all = "camelCase")]
    EdgeCreated { edge: ChatEdge },

    /// An in-flight generation completed and the node is now `Ready`
    #[serde(rename_all = "camelCase")]
    AnswerReady { node_id: String },

    /// Generation failed; the node is now `Failed` with the fallback text
    #[serde(rename_all = "camelCase")]
    AnswerFailed { node_id: String, reason: String },

    /// A node and all its incident edges were removed atomically
    #[serde(rename_all = "camelCase")]
    NodeDeleted {
        node_id: String,
        removed_edge_ids: Vec<String>,
    },
}
