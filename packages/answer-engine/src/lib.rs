//! DialogMap Answer Engine - Conversation Answer Generation Boundary
//!
//! This crate defines the boundary between the conversation-graph engine and
//! whatever actually produces answers: a hosted LLM, a local model, or a
//! deterministic stand-in for tests.
//!
//! # Features
//!
//! - **Opaque Contract**: `AnswerEngine::generate` takes ordered conversation
//!   turns and returns answer text or a generic error; retry policy lives
//!   behind the trait, never in the caller
//! - **Turn Model**: `ChatTurn`/`TurnRole` describe the resolved upstream
//!   conversation, oldest turn first, the new question last
//! - **Canned Engine**: `CannedAnswerEngine` produces deterministic markdown
//!   replies with configurable latency for tests, benches, and demos
//!
//! # Example
//!
//! ```
//! use dialogmap_answer_engine::{AnswerEngine, CannedAnswerEngine, ChatTurn, TurnRole};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let engine = CannedAnswerEngine::default();
//!     let turns = vec![ChatTurn::new(TurnRole::Human, "What is a fork?")];
//!
//!     let answer = engine.generate(&turns).await?;
//!     assert!(answer.contains("What is a fork?"));
//!     Ok(())
//! }
//! ```

pub mod config;
pub mod engine;
pub mod error;
pub mod turn;

// Re-export main types
pub use config::AnswerEngineConfig;
pub use engine::{AnswerEngine, CannedAnswerEngine};
pub use error::{AnswerEngineError, Result};
pub use turn::{ChatTurn, TurnRole};
