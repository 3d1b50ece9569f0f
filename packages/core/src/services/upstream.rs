//! Upstream Resolver
//!
//! Reconstructs the ordered chain of ancestor exchanges for a node, both for
//! the conversation-history view and for assembling the context handed to
//! the answer engine.
//!
//! # Traversal
//!
//! Starting at a node, the resolver emits it tagged `Current`, then walks
//! every incoming edge backward, tagging each ancestor with the relation of
//! the edge that links it to its child on the discovered path. A visited set
//! shared across the whole walk guarantees each node is emitted at most once
//! and the walk terminates on diamond ancestries.
//!
//! # Ordering
//!
//! Traversal order is discovery order. Display and context assembly use
//! creation order instead: the numeric suffix of the node id, ties broken by
//! full string comparison.

use crate::graph::ConversationGraph;
use crate::models::{ChatNode, EdgeRelation};
use dialogmap_answer_engine::ChatTurn;
use serde::Serialize;
use std::collections::HashSet;

/// How an upstream entry relates to the exchange below it
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum UpstreamRelation {
    /// The node the resolution started from
    Current,
    /// Reached over a continue edge
    Continue,
    /// Reached over a fork edge
    Fork,
}

impl From<EdgeRelation> for UpstreamRelation {
    fn from(relation: EdgeRelation) -> Self {
        match relation {
            EdgeRelation::Continue => UpstreamRelation::Continue,
            EdgeRelation::Fork => UpstreamRelation::Fork,
        }
    }
}

/// One resolved ancestor (or the start node itself)
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UpstreamEntry {
    pub node: ChatNode,
    pub relation: UpstreamRelation,
}

/// Resolve the upstream chain of `node_id`, start node first
///
/// Returns an empty vec if the node does not exist. Each reachable ancestor
/// appears exactly once even when multiple paths converge on it.
pub fn resolve_upstream(graph: &ConversationGraph, node_id: &str) -> Vec<UpstreamEntry> {
    let Some(start) = graph.get_node(node_id) else {
        return Vec::new();
    };

    let mut visited: HashSet<String> = HashSet::new();
    visited.insert(start.id.clone());

    let mut entries = vec![UpstreamEntry {
        node: start.clone(),
        relation: UpstreamRelation::Current,
    }];
    collect_ancestors(graph, node_id, &mut visited, &mut entries);

    tracing::debug!(
        node_id,
        resolved = entries.len(),
        "resolved upstream chain"
    );
    entries
}

/// Walk incoming edges backward, appending unvisited ancestors
fn collect_ancestors(
    graph: &ConversationGraph,
    node_id: &str,
    visited: &mut HashSet<String>,
    entries: &mut Vec<UpstreamEntry>,
) {
    for edge in graph.edges_into(node_id) {
        if !visited.insert(edge.source_id.clone()) {
            continue;
        }
        // add_edge enforces referential integrity, so the source must exist
        if let Some(source) = graph.get_node(&edge.source_id) {
            entries.push(UpstreamEntry {
                node: source.clone(),
                relation: edge.relation.into(),
            });
            collect_ancestors(graph, &edge.source_id, visited, entries);
        }
    }
}

/// Sort entries into creation order (oldest exchange first)
///
/// Creation order is the numeric suffix of the id; ties fall back to full
/// string comparison so the order is total.
pub fn sort_by_creation(entries: &mut [UpstreamEntry]) {
    entries.sort_by(|a, b| {
        a.node
            .creation_ordinal()
            .cmp(&b.node.creation_ordinal())
            .then_with(|| a.node.id.cmp(&b.node.id))
    });
}

/// Flatten a resolved upstream into engine turns, ending with `question`
///
/// Ancestors contribute a human turn for their question and, when an answer
/// is present, an assistant turn. An exchange still loading (or failed
/// before this node was created) contributes its question only. The new
/// question is appended last.
pub fn conversation_context(entries: &[UpstreamEntry], question: &str) -> Vec<ChatTurn> {
    let mut ordered = entries.to_vec();
    sort_by_creation(&mut ordered);

    let mut turns = Vec::with_capacity(ordered.len() * 2 + 1);
    for entry in &ordered {
        turns.push(ChatTurn::human(&entry.node.question));
        if let Some(answer) = &entry.node.answer {
            turns.push(ChatTurn::assistant(answer));
        }
    }
    turns.push(ChatTurn::human(question));
    turns
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::{ChatEdge, ChatNode, NodeStatus, Position};
    use dialogmap_answer_engine::TurnRole;

    fn add_node(graph: &mut ConversationGraph, question: &str) -> String {
        let id = graph.next_node_id();
        graph
            .add_node(ChatNode::new(&id, question, Position::new(0.0, 0.0)))
            .unwrap();
        id
    }

    fn link(graph: &mut ConversationGraph, source: &str, target: &str, relation: EdgeRelation) {
        let edge_id = graph.next_edge_id();
        graph
            .add_edge(ChatEdge::new(&edge_id, source, target, relation))
            .unwrap();
    }

    #[test]
    fn test_rootless_node_resolves_to_itself() {
        let mut graph = ConversationGraph::new();
        let a = add_node(&mut graph, "a");

        let entries = resolve_upstream(&graph, &a);
        assert_eq!(entries.len(), 1);
        assert_eq!(entries[0].node.id, a);
        assert_eq!(entries[0].relation, UpstreamRelation::Current);
    }

    #[test]
    fn test_missing_node_resolves_empty() {
        let graph = ConversationGraph::new();
        assert!(resolve_upstream(&graph, "node-1").is_empty());
    }

    #[test]
    fn test_chain_resolution_tags_relations() {
        let mut graph = ConversationGraph::new();
        let a = add_node(&mut graph, "a");
        let b = add_node(&mut graph, "b");
        let c = add_node(&mut graph, "c");
        link(&mut graph, &a, &b, EdgeRelation::Continue);
        link(&mut graph, &b, &c, EdgeRelation::Fork);

        let entries = resolve_upstream(&graph, &c);
        assert_eq!(entries.len(), 3);
        assert_eq!(entries[0].node.id, c);
        assert_eq!(entries[0].relation, UpstreamRelation::Current);
        assert_eq!(entries[1].node.id, b);
        assert_eq!(entries[1].relation, UpstreamRelation::Fork);
        assert_eq!(entries[2].node.id, a);
        assert_eq!(entries[2].relation, UpstreamRelation::Continue);
    }

    #[test]
    fn test_diamond_ancestry_emits_each_ancestor_once() {
        // a -> b, a -> c, b -> d, c -> d
        let mut graph = ConversationGraph::new();
        let a = add_node(&mut graph, "a");
        let b = add_node(&mut graph, "b");
        let c = add_node(&mut graph, "c");
        let d = add_node(&mut graph, "d");
        link(&mut graph, &a, &b, EdgeRelation::Continue);
        link(&mut graph, &a, &c, EdgeRelation::Fork);
        link(&mut graph, &b, &d, EdgeRelation::Continue);
        link(&mut graph, &c, &d, EdgeRelation::Fork);

        let entries = resolve_upstream(&graph, &d);
        assert_eq!(entries.len(), 4);

        let mut seen: Vec<&str> = entries.iter().map(|e| e.node.id.as_str()).collect();
        seen.sort();
        seen.dedup();
        assert_eq!(seen.len(), 4);
    }

    #[test]
    fn test_sort_by_creation_uses_numeric_suffix() {
        let mut graph = ConversationGraph::new();
        // Allocate up past node-9 so lexicographic order would be wrong
        let ids: Vec<String> = (0..12).map(|i| add_node(&mut graph, &format!("q{}", i))).collect();
        for pair in ids.windows(2) {
            link(&mut graph, &pair[0], &pair[1], EdgeRelation::Continue);
        }

        let mut entries = resolve_upstream(&graph, &ids[11]);
        sort_by_creation(&mut entries);

        let order: Vec<u64> = entries.iter().map(|e| e.node.creation_ordinal()).collect();
        assert_eq!(order, (1..=12).collect::<Vec<u64>>());
    }

    #[test]
    fn test_context_skips_unanswered_ancestors() {
        let mut graph = ConversationGraph::new();
        let a = add_node(&mut graph, "first");
        let b = add_node(&mut graph, "second");
        link(&mut graph, &a, &b, EdgeRelation::Continue);

        // a answered, b still loading
        {
            let node = graph.get_node_mut(&a).unwrap();
            node.answer = Some("first answer".to_string());
            node.status = NodeStatus::Ready;
        }

        let entries = resolve_upstream(&graph, &b);
        let turns = conversation_context(&entries, "third");

        let roles: Vec<TurnRole> = turns.iter().map(|t| t.role).collect();
        assert_eq!(
            roles,
            vec![
                TurnRole::Human,     // first
                TurnRole::Assistant, // first answer
                TurnRole::Human,     // second (no answer yet)
                TurnRole::Human,     // third (new question, always last)
            ]
        );
        assert_eq!(turns.last().unwrap().text, "third");
        assert_eq!(turns[0].text, "first");
    }
}
