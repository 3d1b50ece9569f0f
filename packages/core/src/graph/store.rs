//! Conversation Graph Store
//!
//! The single authoritative owner of all nodes and edges. Operations here
//! are synchronous, total, and primitive:
//!
//! - they guarantee referential integrity (`add_edge` rejects a missing
//!   endpoint with `DanglingReference`) and index/store lockstep
//! - they do NOT enforce structural rules (single parent, acyclicity);
//!   callers go through the validator before committing an edge
//!
//! Nodes are kept in creation order; the numeric suffix of an id doubles as
//! the creation ordinal. Id counters are session-monotonic and never rewind,
//! so ids are never reused even after deletions.

use crate::graph::error::GraphStoreError;
use crate::graph::index::NodeIndex;
use crate::models::{ChatEdge, ChatNode, NodeStatus};
use serde::Serialize;

/// Result of removing a node: the node itself plus every incident edge id
///
/// Deletion is atomic from the caller's perspective; the removed edge ids
/// let observers reconcile without diffing the edge list.
#[derive(Debug, Clone)]
pub struct RemovedNode {
    pub node: ChatNode,
    pub removed_edge_ids: Vec<String>,
}

/// Serializable copy of the whole graph, in creation order
///
/// What a renderer consumes to draw the flow; taken under the read guard so
/// it is always internally consistent.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphSnapshot {
    pub nodes: Vec<ChatNode>,
    pub edges: Vec<ChatEdge>,
}

/// Counts for the diagnostics surface
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStats {
    /// Nodes currently in the store
    pub node_count: usize,
    /// Edges currently in the store
    pub edge_count: usize,
    /// Nodes with an answer request still in flight
    pub loading_count: usize,
}

/// Authoritative set of nodes and edges with a lockstep id index
#[derive(Debug, Default)]
pub struct ConversationGraph {
    /// Nodes in creation order
    nodes: Vec<ChatNode>,
    /// Edges in creation order
    edges: Vec<ChatEdge>,
    /// id → slot index, reconciled with every mutation
    index: NodeIndex,
    /// Next node ordinal (monotonic, never reused)
    next_node: u64,
    /// Next edge ordinal (monotonic, never reused)
    next_edge: u64,
}

impl ConversationGraph {
    pub fn new() -> Self {
        Self::default()
    }

    /// Allocate a fresh node id (`node-<n>`)
    pub fn next_node_id(&mut self) -> String {
        self.next_node += 1;
        format!("node-{}", self.next_node)
    }

    /// Allocate a fresh edge id (`edge-<n>`)
    pub fn next_edge_id(&mut self) -> String {
        self.next_edge += 1;
        format!("edge-{}", self.next_edge)
    }

    /// Insert a node
    ///
    /// Fails with `DuplicateId` if the id is already present. The index is
    /// updated in the same call.
    pub fn add_node(&mut self, node: ChatNode) -> Result<(), GraphStoreError> {
        if self.index.contains(&node.id) {
            return Err(GraphStoreError::duplicate_id(&node.id));
        }
        self.index.insert(node.id.clone(), self.nodes.len());
        self.nodes.push(node);
        Ok(())
    }

    /// Remove a node and all edges where it is source or target
    ///
    /// Returns `None` if the id is unknown. The node list, edge list, and
    /// index are all reconciled before this returns, so no reader can
    /// observe a partial removal.
    pub fn remove_node(&mut self, id: &str) -> Option<RemovedNode> {
        let slot = self.index.remove(id)?;
        let node = self.nodes.remove(slot);
        self.index.shift_after_removal(slot);

        let mut removed_edge_ids = Vec::new();
        self.edges.retain(|edge| {
            if edge.touches(id) {
                removed_edge_ids.push(edge.id.clone());
                false
            } else {
                true
            }
        });

        Some(RemovedNode {
            node,
            removed_edge_ids,
        })
    }

    /// Insert an edge
    ///
    /// Guarantees referential integrity only: both endpoints must exist.
    /// Structural rules are checked upstream by the validator.
    pub fn add_edge(&mut self, edge: ChatEdge) -> Result<(), GraphStoreError> {
        if !self.index.contains(&edge.source_id) {
            return Err(GraphStoreError::dangling_reference(&edge.id, &edge.source_id));
        }
        if !self.index.contains(&edge.target_id) {
            return Err(GraphStoreError::dangling_reference(&edge.id, &edge.target_id));
        }
        if self.edges.iter().any(|e| e.id == edge.id) {
            return Err(GraphStoreError::duplicate_id(&edge.id));
        }
        self.edges.push(edge);
        Ok(())
    }

    /// Look up a node through the index
    pub fn get_node(&self, id: &str) -> Option<&ChatNode> {
        self.index.get(id).map(|slot| &self.nodes[slot])
    }

    /// Mutable lookup through the index
    pub fn get_node_mut(&mut self, id: &str) -> Option<&mut ChatNode> {
        let slot = self.index.get(id)?;
        Some(&mut self.nodes[slot])
    }

    /// Full-scan lookup over the node list
    ///
    /// Exists so the indexed path and the enumeration path can be checked
    /// against each other; both must agree on node identity.
    pub fn scan_node(&self, id: &str) -> Option<&ChatNode> {
        self.nodes.iter().find(|n| n.id == id)
    }

    /// Whether the node exists
    pub fn contains_node(&self, id: &str) -> bool {
        self.index.contains(id)
    }

    /// All nodes in creation order
    pub fn nodes(&self) -> &[ChatNode] {
        &self.nodes
    }

    /// All edges in creation order
    pub fn edges(&self) -> &[ChatEdge] {
        &self.edges
    }

    /// Edges whose target is the given node
    pub fn edges_into<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ChatEdge> {
        self.edges.iter().filter(move |e| e.target_id == id)
    }

    /// Edges whose source is the given node
    pub fn edges_from<'a>(&'a self, id: &'a str) -> impl Iterator<Item = &'a ChatEdge> {
        self.edges.iter().filter(move |e| e.source_id == id)
    }

    /// Current node ids in creation order
    ///
    /// Used for the stale-id diagnostics carried by `NodeNotFound` warnings.
    pub fn node_ids(&self) -> Vec<String> {
        self.nodes.iter().map(|n| n.id.clone()).collect()
    }

    /// Serializable copy of all nodes and edges
    pub fn snapshot(&self) -> GraphSnapshot {
        GraphSnapshot {
            nodes: self.nodes.clone(),
            edges: self.edges.clone(),
        }
    }

    /// Diagnostics counts
    pub fn stats(&self) -> GraphStats {
        GraphStats {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            loading_count: self
                .nodes
                .iter()
                .filter(|n| n.status == NodeStatus::Loading)
                .count(),
        }
    }

    /// Check that the index key set equals the node id set exactly
    ///
    /// The store maintains this invariant internally; the check exists for
    /// tests and diagnostics.
    pub fn verify_index(&self) -> bool {
        if self.index.len() != self.nodes.len() {
            return false;
        }
        self.nodes
            .iter()
            .enumerate()
            .all(|(slot, node)| self.index.get(&node.id) == Some(slot))
    }
}
