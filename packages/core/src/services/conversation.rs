//! Conversation Service - Node Lifecycle and User Actions
//!
//! This module orchestrates the full life of an exchange:
//!
//! 1. Synchronous allocation: node (and parent edge, when deriving from an
//!    existing exchange) committed together under one write guard
//! 2. Asynchronous population: the upstream context is handed to the answer
//!    engine on a spawned task; the result is written back strictly by id
//! 3. Completion: the node transitions exactly once to `Ready` or `Failed`
//! 4. Deletion: node, incident edges, and index entry removed atomically
//!
//! # Concurrency
//!
//! Graph mutations never span a suspension point: a mutation takes the write
//! guard, runs to completion, and releases it. The only await between
//! allocation and write-back is the engine call itself, which holds no
//! guard. Because in-flight requests are bound to node ids rather than
//! positions, unrelated exchanges can be created and deleted freely while
//! answers are pending; a request whose node was deleted mid-flight simply
//! finds no node to write to and is discarded. Cancellation is not
//! supported, and any timeout belongs to the engine.
//!
//! # No Ambient State
//!
//! `ConversationService` is an explicit, cloneable handle. Callers hold it
//! and pass it where needed; there is no global action registry.

use crate::graph::{ConversationGraph, GraphEvent, GraphSnapshot, GraphStats, EVENT_CHANNEL_CAPACITY};
use crate::models::{ChatEdge, ChatNode, EdgeRelation, NodeStatus, Position};
use crate::services::error::ConversationError;
use crate::services::layout;
use crate::services::upstream::{self, UpstreamEntry, UpstreamRelation};
use crate::services::validator;
use chrono::Utc;
use dialogmap_answer_engine::{AnswerEngine, ChatTurn};
use std::sync::Arc;
use tokio::sync::{broadcast, RwLock};
use tokio_stream::wrappers::BroadcastStream;

/// Fixed answer text stored when generation fails
///
/// The node transitions to `Failed` but stays renderable and continuable.
pub const ANSWER_FALLBACK: &str =
    "Something went wrong while generating this answer. Please try again.";

/// Lifecycle manager and user action surface for the conversation graph
///
/// Cloning is cheap and every clone operates on the same graph. All
/// operations identify nodes by id; none hold positional references across
/// calls.
///
/// # Examples
///
/// ```
/// use dialogmap_core::{ConversationService, Position};
/// use dialogmap_answer_engine::CannedAnswerEngine;
/// use std::sync::Arc;
///
/// #[tokio::main]
/// async fn main() -> Result<(), Box<dyn std::error::Error>> {
///     let service = ConversationService::new(Arc::new(CannedAnswerEngine::default()));
///
///     let root = service.create_root("What is ownership?", Position::new(0.0, 0.0)).await?;
///     let next = service.continue_from(&root, "And borrowing?").await?;
///
///     let view = service.upstream_view(&next).await?;
///     assert_eq!(view.len(), 2);
///     Ok(())
/// }
/// ```
#[derive(Clone)]
pub struct ConversationService {
    graph: Arc<RwLock<ConversationGraph>>,
    engine: Arc<dyn AnswerEngine>,
    events: broadcast::Sender<GraphEvent>,
}

impl ConversationService {
    /// Create a service with an empty graph
    pub fn new(engine: Arc<dyn AnswerEngine>) -> Self {
        let (events, _) = broadcast::channel(EVENT_CHANNEL_CAPACITY);
        Self {
            graph: Arc::new(RwLock::new(ConversationGraph::new())),
            engine,
            events,
        }
    }

    /// Subscribe to graph events
    pub fn subscribe(&self) -> broadcast::Receiver<GraphEvent> {
        self.events.subscribe()
    }

    /// Subscribe to graph events as a stream
    pub fn event_stream(&self) -> BroadcastStream<GraphEvent> {
        BroadcastStream::new(self.events.subscribe())
    }

    /// Create a root exchange at a user-chosen position
    ///
    /// The node is inserted in `Loading` state and the answer request is
    /// dispatched before this returns; the returned id is immediately valid
    /// for continue/fork/delete.
    pub async fn create_root(
        &self,
        question: &str,
        position: Position,
    ) -> Result<String, ConversationError> {
        let node_id = {
            let mut graph = self.graph.write().await;
            let node_id = graph.next_node_id();
            let node = ChatNode::new(&node_id, question, position);
            graph.add_node(node.clone())?;
            self.emit(GraphEvent::NodeCreated { node });
            node_id
        };

        tracing::info!(node_id = %node_id, "created root exchange");
        self.dispatch_answer(node_id.clone(), vec![ChatTurn::human(question)]);
        Ok(node_id)
    }

    /// Continue the thread below an existing exchange
    ///
    /// Position is derived from the source (same column, next row).
    pub async fn continue_from(
        &self,
        source_id: &str,
        question: &str,
    ) -> Result<String, ConversationError> {
        self.create_from(source_id, question, EdgeRelation::Continue)
            .await
    }

    /// Branch a parallel thread beside an existing exchange
    ///
    /// Position is derived from the source (same row, next column).
    pub async fn fork_from(
        &self,
        source_id: &str,
        question: &str,
    ) -> Result<String, ConversationError> {
        self.create_from(source_id, question, EdgeRelation::Fork).await
    }

    /// Shared derivation path for continue and fork
    ///
    /// Node and edge are committed as one step: the edge is validated before
    /// the node is inserted, so a rejected edge can never strand an
    /// orphaned, unreachable node.
    async fn create_from(
        &self,
        source_id: &str,
        question: &str,
        relation: EdgeRelation,
    ) -> Result<String, ConversationError> {
        let (node_id, context) = {
            let mut graph = self.graph.write().await;

            let source = match graph.get_node(source_id) {
                Some(source) => source,
                None => {
                    let known = graph.node_ids();
                    tracing::warn!(source_id = %source_id, known = known.len(), "stale source id");
                    return Err(ConversationError::node_not_found(source_id, known));
                }
            };
            let position = match relation {
                EdgeRelation::Continue => layout::continue_position(source.position),
                EdgeRelation::Fork => layout::fork_position(source.position),
            };

            let node_id = graph.next_node_id();
            if let Err(warning) = validator::check_edge(&graph, source_id, &node_id) {
                tracing::warn!(source_id = %source_id, error = %warning, "edge rejected, node not created");
                return Err(warning);
            }

            let node = ChatNode::new(&node_id, question, position);
            graph.add_node(node.clone())?;

            let edge_id = graph.next_edge_id();
            let edge = ChatEdge::new(&edge_id, source_id, &node_id, relation);
            graph.add_edge(edge.clone())?;

            self.emit(GraphEvent::NodeCreated { node });
            self.emit(GraphEvent::EdgeCreated { edge });

            // Ancestors only; the new node's question goes in last by itself
            let entries: Vec<UpstreamEntry> = upstream::resolve_upstream(&graph, &node_id)
                .into_iter()
                .filter(|entry| entry.relation != UpstreamRelation::Current)
                .collect();
            (node_id, upstream::conversation_context(&entries, question))
        };

        tracing::info!(node_id = %node_id, source_id = %source_id, ?relation, "derived exchange");
        self.dispatch_answer(node_id.clone(), context);
        Ok(node_id)
    }

    /// Commit a user-drawn edge between two existing exchanges
    ///
    /// Runs the full edge-commit protocol; on `DuplicateParent` or
    /// `CycleDetected` the graph is left exactly as it was.
    pub async fn connect(
        &self,
        source_id: &str,
        target_id: &str,
        relation: EdgeRelation,
    ) -> Result<String, ConversationError> {
        let mut graph = self.graph.write().await;

        for id in [source_id, target_id] {
            if !graph.contains_node(id) {
                return Err(ConversationError::node_not_found(id, graph.node_ids()));
            }
        }
        if let Err(warning) = validator::check_edge(&graph, source_id, target_id) {
            tracing::warn!(
                source_id = %source_id,
                target_id = %target_id,
                error = %warning,
                "edge rejected"
            );
            return Err(warning);
        }

        let edge_id = graph.next_edge_id();
        let edge = ChatEdge::new(&edge_id, source_id, target_id, relation);
        graph.add_edge(edge.clone())?;
        self.emit(GraphEvent::EdgeCreated { edge });
        Ok(edge_id)
    }

    /// Delete an exchange and every edge touching it
    ///
    /// Atomic under one write guard: no reader observes the node without its
    /// edges or vice versa. Returns the removed edge ids. An in-flight
    /// answer for the deleted node is discarded when it completes.
    pub async fn delete_node(&self, node_id: &str) -> Result<Vec<String>, ConversationError> {
        let mut graph = self.graph.write().await;

        match graph.remove_node(node_id) {
            Some(removed) => {
                tracing::info!(
                    node_id = %node_id,
                    removed_edges = removed.removed_edge_ids.len(),
                    "deleted exchange"
                );
                self.emit(GraphEvent::NodeDeleted {
                    node_id: node_id.to_string(),
                    removed_edge_ids: removed.removed_edge_ids.clone(),
                });
                Ok(removed.removed_edge_ids)
            }
            None => {
                let known = graph.node_ids();
                tracing::warn!(node_id = %node_id, known = known.len(), "delete of unknown node");
                Err(ConversationError::node_not_found(node_id, known))
            }
        }
    }

    /// Resolved upstream chain of an exchange, oldest first
    ///
    /// This is the conversation-history view: the node itself plus every
    /// ancestor, each exactly once, in creation order.
    pub async fn upstream_view(
        &self,
        node_id: &str,
    ) -> Result<Vec<UpstreamEntry>, ConversationError> {
        let graph = self.graph.read().await;
        if !graph.contains_node(node_id) {
            return Err(ConversationError::node_not_found(node_id, graph.node_ids()));
        }
        let mut entries = upstream::resolve_upstream(&graph, node_id);
        upstream::sort_by_creation(&mut entries);
        Ok(entries)
    }

    /// Copy of a single node
    pub async fn get_node(&self, node_id: &str) -> Option<ChatNode> {
        self.graph.read().await.get_node(node_id).cloned()
    }

    /// Serializable copy of the whole graph
    pub async fn snapshot(&self) -> GraphSnapshot {
        self.graph.read().await.snapshot()
    }

    /// Diagnostics counts
    pub async fn stats(&self) -> GraphStats {
        self.graph.read().await.stats()
    }

    /// Hand the assembled context to the engine on its own task
    ///
    /// The write-back looks the node up by id; if the node was deleted while
    /// the request was in flight the result is discarded.
    fn dispatch_answer(&self, node_id: String, turns: Vec<ChatTurn>) {
        let graph = Arc::clone(&self.graph);
        let engine = Arc::clone(&self.engine);
        let events = self.events.clone();

        tokio::spawn(async move {
            let result = engine.generate(&turns).await;

            let mut graph = graph.write().await;
            let Some(node) = graph.get_node_mut(&node_id) else {
                tracing::debug!(node_id = %node_id, "node gone before answer arrived, discarding");
                return;
            };

            match result {
                Ok(answer) => {
                    node.answer = Some(answer);
                    node.status = NodeStatus::Ready;
                    node.modified_at = Utc::now();
                    tracing::info!(node_id = %node_id, "answer ready");
                    let _ = events.send(GraphEvent::AnswerReady { node_id });
                }
                Err(err) => {
                    node.answer = Some(ANSWER_FALLBACK.to_string());
                    node.status = NodeStatus::Failed;
                    node.modified_at = Utc::now();
                    tracing::warn!(node_id = %node_id, error = %err, "answer generation failed");
                    let _ = events.send(GraphEvent::AnswerFailed {
                        node_id,
                        reason: err.to_string(),
                    });
                }
            }
        });
    }

    /// Best-effort event emission; lagging or absent receivers are fine
    fn emit(&self, event: GraphEvent) {
        let _ = self.events.send(event);
    }
}
