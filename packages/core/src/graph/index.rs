//! Node Id Index
//!
//! Fast id→slot lookup over the store's node list, reconciled in lockstep
//! with every mutation. Replaces the two independent lookup paths of the
//! original design (transient ref-map vs. state list) with one index whose
//! key set is guaranteed to equal the node id set after every operation.

use std::collections::HashMap;

/// Mirror mapping of node id → slot in the store's node list
///
/// The index never outlives a mutation un-reconciled: `insert` accompanies
/// every node insertion and `remove`/`shift_after_removal` every deletion.
#[derive(Debug, Default)]
pub struct NodeIndex {
    slots: HashMap<String, usize>,
}

impl NodeIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a node at the given slot
    pub fn insert(&mut self, id: impl Into<String>, slot: usize) {
        self.slots.insert(id.into(), slot);
    }

    /// Look up a node's slot
    pub fn get(&self, id: &str) -> Option<usize> {
        self.slots.get(id).copied()
    }

    /// Whether the id is indexed
    pub fn contains(&self, id: &str) -> bool {
        self.slots.contains_key(id)
    }

    /// Remove an id, returning its former slot
    pub fn remove(&mut self, id: &str) -> Option<usize> {
        self.slots.remove(id)
    }

    /// Shift slots after a removal at `removed_slot`
    ///
    /// The store's node list is contiguous; removing slot n moves every
    /// later node down by one.
    pub fn shift_after_removal(&mut self, removed_slot: usize) {
        for slot in self.slots.values_mut() {
            if *slot > removed_slot {
                *slot -= 1;
            }
        }
    }

    /// Number of indexed ids
    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    /// All indexed ids, unordered
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.slots.keys().map(String::as_str)
    }
}
