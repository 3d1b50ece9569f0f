//! Service Layer Error Types
//!
//! Structural violations (`DuplicateParent`, `CycleDetected`) and stale-id
//! lookups (`NodeNotFound`) are recoverable warnings: the offending mutation
//! is aborted, the graph is untouched, and the caller decides how to surface
//! the message. Store errors wrapped here indicate programming mistakes.

use crate::graph::GraphStoreError;
use thiserror::Error;

/// Conversation operation errors
#[derive(Error, Debug)]
pub enum ConversationError {
    /// Target already has a parent edge on its Top anchor
    #[error("Node {target_id} already has a parent connection")]
    DuplicateParent { target_id: String },

    /// The proposed edge would close a directed cycle
    #[error("Connecting {source_id} -> {target_id} would create a cycle")]
    CycleDetected {
        source_id: String,
        target_id: String,
    },

    /// Stale id from a lagging view; carries the current valid ids so the
    /// caller can render a useful diagnostic
    #[error("Node not found: {node_id} (known nodes: {})", known_ids.join(", "))]
    NodeNotFound {
        node_id: String,
        known_ids: Vec<String>,
    },

    /// Primitive store operation failed
    #[error("Graph store error: {0}")]
    Store(#[from] GraphStoreError),
}

impl ConversationError {
    /// Create a duplicate parent warning
    pub fn duplicate_parent(target_id: impl Into<String>) -> Self {
        Self::DuplicateParent {
            target_id: target_id.into(),
        }
    }

    /// Create a cycle warning
    pub fn cycle_detected(source_id: impl Into<String>, target_id: impl Into<String>) -> Self {
        Self::CycleDetected {
            source_id: source_id.into(),
            target_id: target_id.into(),
        }
    }

    /// Create a stale-id warning listing the currently valid node ids
    pub fn node_not_found(node_id: impl Into<String>, known_ids: Vec<String>) -> Self {
        Self::NodeNotFound {
            node_id: node_id.into(),
            known_ids,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_node_not_found_lists_known_ids() {
        let err = ConversationError::node_not_found(
            "node-9",
            vec!["node-1".to_string(), "node-2".to_string()],
        );
        let message = err.to_string();
        assert!(message.contains("node-9"));
        assert!(message.contains("node-1, node-2"));
    }
}
