//! Conversation Services
//!
//! The business layer on top of the graph store:
//!
//! - `ConversationService` - node lifecycle orchestration and the user
//!   action surface (create/continue/fork/connect/delete/view)
//! - `validator` - structural checks run before any edge is committed
//! - `upstream` - ancestor-chain resolution and context assembly
//! - `layout` - derived positions for continued and forked nodes
//!
//! Services coordinate between the store and the answer engine; all graph
//! mutations happen synchronously under one write guard and never span a
//! suspension point.

pub mod conversation;
pub mod error;
pub mod layout;
pub mod upstream;
pub mod validator;

pub use conversation::{ConversationService, ANSWER_FALLBACK};
pub use error::ConversationError;
pub use upstream::{UpstreamEntry, UpstreamRelation};
