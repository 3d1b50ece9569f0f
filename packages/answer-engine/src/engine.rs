//! Answer Engine Trait and Canned Implementation
//!
//! The conversation-graph core treats answer generation as an opaque async
//! call: ordered turns in, answer text or a generic error out. Everything
//! else (model choice, prompting, retries, timeouts) lives behind the trait.

use crate::config::AnswerEngineConfig;
use crate::error::AnswerEngineError;
use crate::turn::{ChatTurn, TurnRole};
use async_trait::async_trait;
use std::time::Duration;

/// Opaque asynchronous answer producer
///
/// Implementations consume the resolved upstream conversation (oldest turn
/// first, the new question last) and produce the answer text for the final
/// question. The caller has no retry contract with the engine; a returned
/// error is final from the caller's perspective.
#[async_trait]
pub trait AnswerEngine: Send + Sync {
    /// Generate an answer for the final question in `turns`
    async fn generate(&self, turns: &[ChatTurn]) -> anyhow::Result<String>;
}

/// Deterministic local engine for tests, benches, and demos
///
/// Produces a short markdown reply that echoes the final question, after an
/// optional simulated latency. Stands in for a hosted model wherever a real
/// backend is unavailable or undesirable (CI, benchmarks).
#[derive(Debug, Clone)]
pub struct CannedAnswerEngine {
    config: AnswerEngineConfig,
    latency: Duration,
}

impl Default for CannedAnswerEngine {
    fn default() -> Self {
        Self {
            config: AnswerEngineConfig::default(),
            latency: Duration::from_millis(0),
        }
    }
}

impl CannedAnswerEngine {
    /// Create a canned engine with the given configuration
    pub fn new(config: AnswerEngineConfig) -> Result<Self, AnswerEngineError> {
        config
            .validate()
            .map_err(AnswerEngineError::Config)?;
        Ok(Self {
            config,
            latency: Duration::from_millis(0),
        })
    }

    /// Simulate backend latency before each reply
    pub fn with_latency(mut self, latency: Duration) -> Self {
        self.latency = latency;
        self
    }

    /// The configuration this engine was built with
    pub fn config(&self) -> &AnswerEngineConfig {
        &self.config
    }
}

#[async_trait]
impl AnswerEngine for CannedAnswerEngine {
    async fn generate(&self, turns: &[ChatTurn]) -> anyhow::Result<String> {
        let question = turns
            .iter()
            .rev()
            .find(|t| t.role == TurnRole::Human)
            .ok_or(AnswerEngineError::EmptyPrompt)?;

        if !self.latency.is_zero() {
            tokio::time::sleep(self.latency).await;
        }

        tracing::debug!(
            model = %self.config.model,
            turns = turns.len(),
            "generating canned answer"
        );

        Ok(format!(
            "### Reply\n\nThis is a reply to \"{}\".\n\n- first point\n- second point\n- third point\n",
            question.text
        ))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tokio_test::assert_err;

    #[tokio::test]
    async fn test_canned_reply_echoes_question() {
        let engine = CannedAnswerEngine::default();
        let turns = vec![
            ChatTurn::human("first question"),
            ChatTurn::assistant("first answer"),
            ChatTurn::human("second question"),
        ];

        let answer = engine.generate(&turns).await.unwrap();
        assert!(answer.contains("second question"));
        assert!(!answer.contains("first question"));
    }

    #[tokio::test]
    async fn test_empty_prompt_rejected() {
        let engine = CannedAnswerEngine::default();
        assert_err!(engine.generate(&[]).await);

        // Assistant-only history has no question to answer
        let turns = vec![ChatTurn::assistant("orphaned answer")];
        assert_err!(engine.generate(&turns).await);
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AnswerEngineConfig {
            model: String::new(),
            ..Default::default()
        };
        assert!(CannedAnswerEngine::new(config).is_err());
    }
}
