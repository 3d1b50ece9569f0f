//! Graph Store Error Types
//!
//! Errors at this layer are programming errors, not user mistakes: a caller
//! handed the store an edge with a missing endpoint or tried to reuse an
//! id. User-facing structural warnings live in the services layer.

use thiserror::Error;

/// Primitive store operation errors
#[derive(Error, Debug)]
pub enum GraphStoreError {
    /// Edge refers to a node that is not in the store
    #[error("Edge {edge_id} references missing node: {missing_id}")]
    DanglingReference { edge_id: String, missing_id: String },

    /// Node or edge id already present (ids are never reused in a session)
    #[error("Duplicate id: {id}")]
    DuplicateId { id: String },
}

impl GraphStoreError {
    /// Create a dangling reference error
    pub fn dangling_reference(edge_id: impl Into<String>, missing_id: impl Into<String>) -> Self {
        Self::DanglingReference {
            edge_id: edge_id.into(),
            missing_id: missing_id.into(),
        }
    }

    /// Create a duplicate id error
    pub fn duplicate_id(id: impl Into<String>) -> Self {
        Self::DuplicateId { id: id.into() }
    }
}
