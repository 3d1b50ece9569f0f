//! Structural Validator
//!
//! Enforces the two structural invariants before any edge is committed:
//!
//! - **Single parent**: at most one edge may target a node's Top anchor
//! - **Acyclicity**: no edge may close a directed cycle
//!
//! Both checks walk the graph as it exists right now; on rejection the
//! caller aborts the mutation and the graph is left untouched. The cycle
//! walk carries a visited set so it terminates even on diamond ancestries
//! (multiple paths to a shared ancestor) or a pre-existing cycle.

use crate::graph::ConversationGraph;
use crate::services::error::ConversationError;
use std::collections::HashSet;

/// Whether any existing edge targets `node_id` on its Top anchor
pub fn has_incoming_top_edge(graph: &ConversationGraph, node_id: &str) -> bool {
    graph
        .edges_into(node_id)
        .any(|edge| edge.claims_parent_slot())
}

/// Whether an edge `source_id -> target_id` would close a directed cycle
///
/// True if the endpoints coincide, or if `target_id` is already an ancestor
/// of `source_id`: the walk ascends edges backward (target→source) starting
/// from `source_id` and looks for `target_id` among the ancestors, because
/// an existing path `target ⇝ source` plus the new edge is exactly a cycle.
pub fn would_create_cycle(graph: &ConversationGraph, source_id: &str, target_id: &str) -> bool {
    if source_id == target_id {
        return true;
    }

    let mut visited: HashSet<&str> = HashSet::new();
    let mut stack: Vec<&str> = vec![source_id];

    while let Some(current) = stack.pop() {
        if !visited.insert(current) {
            continue;
        }
        for edge in graph.edges_into(current) {
            if edge.source_id == target_id {
                return true;
            }
            stack.push(&edge.source_id);
        }
    }

    false
}

/// Edge-commit protocol: approve or reject a proposed parent edge
///
/// Rejects with `DuplicateParent` if the target's parent slot is taken, or
/// `CycleDetected` if the edge would close a cycle. Callers commit the edge
/// only after this returns `Ok`.
pub fn check_edge(
    graph: &ConversationGraph,
    source_id: &str,
    target_id: &str,
) -> Result<(), ConversationError> {
    if has_incoming_top_edge(graph, target_id) {
        return Err(ConversationError::duplicate_parent(target_id));
    }
    if would_create_cycle(graph, source_id, target_id) {
        return Err(ConversationError::cycle_detected(source_id, target_id));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatEdge, ChatNode, EdgeRelation, Position};

    fn graph_with_chain() -> (ConversationGraph, Vec<String>) {
        // node-1 -> node-2 -> node-3
        let mut graph = ConversationGraph::new();
        let mut ids = Vec::new();
        for q in ["a", "b", "c"] {
            let id = graph.next_node_id();
            graph
                .add_node(ChatNode::new(&id, q, Position::new(0.0, 0.0)))
                .unwrap();
            ids.push(id);
        }
        for pair in ids.windows(2) {
            let edge_id = graph.next_edge_id();
            graph
                .add_edge(ChatEdge::new(
                    &edge_id,
                    &pair[0],
                    &pair[1],
                    EdgeRelation::Continue,
                ))
                .unwrap();
        }
        (graph, ids)
    }

    #[test]
    fn test_has_incoming_top_edge() {
        let (graph, ids) = graph_with_chain();
        assert!(!has_incoming_top_edge(&graph, &ids[0]));
        assert!(has_incoming_top_edge(&graph, &ids[1]));
        assert!(has_incoming_top_edge(&graph, &ids[2]));
    }

    #[test]
    fn test_self_edge_is_a_cycle() {
        let (graph, ids) = graph_with_chain();
        assert!(would_create_cycle(&graph, &ids[0], &ids[0]));
    }

    #[test]
    fn test_back_edge_is_a_cycle() {
        let (graph, ids) = graph_with_chain();
        // node-3 -> node-1 closes the chain
        assert!(would_create_cycle(&graph, &ids[2], &ids[0]));
        // forward edge node-1 -> node-3 only shortcuts, no cycle
        assert!(!would_create_cycle(&graph, &ids[0], &ids[2]));
    }

    #[test]
    fn test_cycle_walk_terminates_on_diamond() {
        // a -> b, a -> c, b -> d, c -> d: two paths reach a from d
        let mut graph = ConversationGraph::new();
        let ids: Vec<String> = (0..4)
            .map(|i| {
                let id = graph.next_node_id();
                graph
                    .add_node(ChatNode::new(&id, format!("q{}", i), Position::new(0.0, 0.0)))
                    .unwrap();
                id
            })
            .collect();
        for (s, t) in [(0, 1), (0, 2), (1, 3), (2, 3)] {
            let edge_id = graph.next_edge_id();
            graph
                .add_edge(ChatEdge::new(&edge_id, &ids[s], &ids[t], EdgeRelation::Fork))
                .unwrap();
        }

        assert!(would_create_cycle(&graph, &ids[3], &ids[0]));
        assert!(!would_create_cycle(&graph, &ids[0], &ids[3]));
    }

    #[test]
    fn test_check_edge_rejects_in_order() {
        let (graph, ids) = graph_with_chain();

        // Parent slot on node-2 is taken
        assert!(matches!(
            check_edge(&graph, &ids[2], &ids[1]),
            Err(ConversationError::DuplicateParent { .. })
        ));

        // node-1 has a free parent slot but the edge closes a cycle
        assert!(matches!(
            check_edge(&graph, &ids[2], &ids[0]),
            Err(ConversationError::CycleDetected { .. })
        ));
    }
}
