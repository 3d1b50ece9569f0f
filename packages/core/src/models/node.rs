//! Node Data Structures
//!
//! This module defines the `ChatNode` struct: one question/answer exchange
//! in the conversation graph.
//!
//! # Lifecycle
//!
//! A node is created in `Loading` with no answer, then transitions exactly
//! once: to `Ready` when the answer engine returns text, or to `Failed`
//! when it errors (a fixed fallback message is stored so the exchange stays
//! renderable). Only the lifecycle manager performs these transitions; the
//! graph store treats nodes as opaque.
//!
//! # Examples
//!
//! ```rust
//! use dialogmap_core::models::{ChatNode, NodeStatus, Position};
//!
//! let node = ChatNode::new("node-1", "What is a closure?", Position::new(120.0, 80.0));
//! assert_eq!(node.status, NodeStatus::Loading);
//! assert!(node.answer.is_none());
//! ```

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Answer population state of a node
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum NodeStatus {
    /// Answer request dispatched, no result yet
    Loading,
    /// Answer text populated successfully
    Ready,
    /// Answer generation failed; fallback message populated
    Failed,
}

/// 2D layout coordinate supplied by the layout collaborator
///
/// Stored on node creation and passed through unchanged; the engine never
/// interprets coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Position {
    pub x: f64,
    pub y: f64,
}

impl Position {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// One question/answer exchange in the conversation graph
///
/// # Fields
///
/// - `id`: Unique identifier (`node-<n>`, session-monotonic, never reused)
/// - `question`: The question text this exchange was created with
/// - `answer`: Answer text once populated (`None` while `Loading`)
/// - `status`: Current lifecycle state
/// - `position`: Layout coordinate (stored, never interpreted)
/// - `created_at` / `modified_at`: Timestamps; `modified_at` is touched on
///   every status transition
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatNode {
    /// Unique identifier (numeric suffix encodes creation order)
    pub id: String,

    /// Question text
    pub question: String,

    /// Answer text, absent until the exchange leaves `Loading`
    #[serde(skip_serializing_if = "Option::is_none")]
    pub answer: Option<String>,

    /// Lifecycle state
    pub status: NodeStatus,

    /// Layout coordinate
    pub position: Position,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last modification timestamp
    pub modified_at: DateTime<Utc>,
}

impl ChatNode {
    /// Create a new node in `Loading` state with no answer
    pub fn new(id: impl Into<String>, question: impl Into<String>, position: Position) -> Self {
        let now = Utc::now();
        Self {
            id: id.into(),
            question: question.into(),
            answer: None,
            status: NodeStatus::Loading,
            position,
            created_at: now,
            modified_at: now,
        }
    }

    /// Whether an answer request is still in flight
    pub fn is_loading(&self) -> bool {
        self.status == NodeStatus::Loading
    }

    /// The numeric suffix of the id, used for creation-order sorting
    ///
    /// Non-digit characters are stripped; an id with no digits sorts as 0.
    pub fn creation_ordinal(&self) -> u64 {
        let digits: String = self.id.chars().filter(|c| c.is_ascii_digit()).collect();
        digits.parse().unwrap_or(0)
    }
}
