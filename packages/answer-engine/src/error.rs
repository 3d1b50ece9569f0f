//! Error types for the answer generation engine

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnswerEngineError {
    #[error("Prompt is empty - at least one turn is required")]
    EmptyPrompt,

    #[error("Answer backend failed: {0}")]
    Backend(String),

    #[error("Invalid configuration: {0}")]
    Config(String),
}

pub type Result<T> = std::result::Result<T, AnswerEngineError>;
