//! Configuration for the answer generation engine

use serde::{Deserialize, Serialize};

/// Upper bound on backend retries
///
/// Retry policy belongs entirely to the engine implementation; the graph
/// core never retries. This cap keeps a misconfigured engine from hammering
/// a backend indefinitely.
const MAX_SUPPORTED_RETRIES: u32 = 10;

/// Configuration for an answer generation backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnswerEngineConfig {
    /// Model name or identifier
    pub model: String,

    /// Sampling temperature passed to the backend
    pub temperature: f64,

    /// Maximum retries the engine may perform on transient backend failures
    pub max_retries: u32,
}

impl Default for AnswerEngineConfig {
    fn default() -> Self {
        Self {
            model: "gemini-2.5-pro".to_string(),
            temperature: 0.7,
            max_retries: 2,
        }
    }
}

impl AnswerEngineConfig {
    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.model.is_empty() {
            return Err("model cannot be empty".to_string());
        }

        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(format!(
                "temperature must be in [0.0, 2.0], got {}",
                self.temperature
            ));
        }

        if self.max_retries > MAX_SUPPORTED_RETRIES {
            return Err(format!(
                "max_retries cannot exceed {}",
                MAX_SUPPORTED_RETRIES
            ));
        }

        Ok(())
    }
}
