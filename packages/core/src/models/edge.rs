//! Edge Data Structures
//!
//! A `ChatEdge` records that one exchange was derived from another, either
//! as the next turn in the same thread (`Continue`) or as a parallel branch
//! (`Fork`). The target anchor is always `Top`: a node's single parent slot.
//! Edges are immutable once created - they are deleted, never mutated.

use serde::{Deserialize, Serialize};

/// Relationship carried by an edge
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum EdgeRelation {
    /// Next turn in the same thread
    Continue,
    /// Alternative branch from this point
    Fork,
}

/// Endpoint slot an edge attaches to on a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Anchor {
    /// The single parent slot; every edge targets this
    Top,
    /// Source slot for continue edges
    Bottom,
    /// Source slot for fork edges
    Right,
}

impl EdgeRelation {
    /// The source anchor this relation departs from
    ///
    /// Continue edges leave the bottom of the parent, forks leave the right.
    pub fn source_anchor(self) -> Anchor {
        match self {
            EdgeRelation::Continue => Anchor::Bottom,
            EdgeRelation::Fork => Anchor::Right,
        }
    }
}

/// A directed relationship from a parent exchange to a derived exchange
///
/// # Fields
///
/// - `id`: Unique identifier (`edge-<n>`, session-monotonic, never reused)
/// - `source_id` / `target_id`: Endpoint node ids; both must exist when the
///   edge is committed
/// - `relation`: `Continue` or `Fork`
/// - `source_anchor`: `Bottom` for continue, `Right` for fork
/// - `target_anchor`: Always `Top` (the single-parent slot)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatEdge {
    pub id: String,
    pub source_id: String,
    pub target_id: String,
    pub relation: EdgeRelation,
    pub source_anchor: Anchor,
    pub target_anchor: Anchor,
}

impl ChatEdge {
    /// Create an edge for the given relation with the standard anchors
    pub fn new(
        id: impl Into<String>,
        source_id: impl Into<String>,
        target_id: impl Into<String>,
        relation: EdgeRelation,
    ) -> Self {
        Self {
            id: id.into(),
            source_id: source_id.into(),
            target_id: target_id.into(),
            relation,
            source_anchor: relation.source_anchor(),
            target_anchor: Anchor::Top,
        }
    }

    /// Whether this edge occupies the target's single parent slot
    pub fn claims_parent_slot(&self) -> bool {
        self.target_anchor == Anchor::Top
    }

    /// Whether the given node is one of this edge's endpoints
    pub fn touches(&self, node_id: &str) -> bool {
        self.source_id == node_id || self.target_id == node_id
    }
}
