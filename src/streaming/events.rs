//! Streaming event types for incremental answers

use serde::{Deserialize, Serialize};

use crate::types::Answer;

/// Answer streaming event
///
/// Every stream yields zero or more `Delta` events followed by exactly
/// one terminal item: `Completed`, or an error through the stream's
/// `Result` wrapper. Nothing follows the terminal item.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum AnswerStreamEvent {
    /// Incremental answer text
    Delta {
        /// The incremental text, exactly as the server sent it
        delta: String,
    },
    /// Stream end with the full accumulated answer
    Completed {
        /// Final answer in the uniform result shape
        answer: Answer,
    },
}

impl AnswerStreamEvent {
    /// True for the terminal `Completed` event.
    pub const fn is_terminal(&self) -> bool {
        matches!(self, Self::Completed { .. })
    }

    /// Delta text, when this is a delta event.
    pub fn delta(&self) -> Option<&str> {
        match self {
            Self::Delta { delta } => Some(delta),
            Self::Completed { .. } => None,
        }
    }
}
