//! Conversation Turn Types
//!
//! A resolved upstream conversation is handed to the answer engine as an
//! ordered sequence of turns: oldest exchange first, the new question last.
//! The core crate assembles the sequence; this crate only defines its shape.

use serde::{Deserialize, Serialize};

/// Speaker role for a single conversation turn
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TurnRole {
    /// A question asked by the user
    Human,
    /// An answer produced by a previous generation
    Assistant,
}

/// One (role, text) turn in the conversation handed to the engine
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChatTurn {
    /// Who produced this turn
    pub role: TurnRole,

    /// Turn text (question or answer)
    pub text: String,
}

impl ChatTurn {
    /// Create a new turn
    pub fn new(role: TurnRole, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Shorthand for a human question turn
    pub fn human(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Human, text)
    }

    /// Shorthand for an assistant answer turn
    pub fn assistant(text: impl Into<String>) -> Self {
        Self::new(TurnRole::Assistant, text)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_turn_serialization() {
        let turn = ChatTurn::human("Why is the sky blue?");
        let value = serde_json::to_value(&turn).unwrap();
        assert_eq!(value["role"], "human");
        assert_eq!(value["text"], "Why is the sky blue?");
    }

    #[test]
    fn test_turn_deserialization() {
        let turn: ChatTurn = serde_json::from_value(json!({
            "role": "assistant",
            "text": "Rayleigh scattering."
        }))
        .unwrap();
        assert_eq!(turn.role, TurnRole::Assistant);
        assert_eq!(turn.text, "Rayleigh scattering.");
    }
}
