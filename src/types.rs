//! Request and Response Types
//!
//! Wire-level types for the ask, quiz, and transcription operations.
//! Field names serialize in camelCase to match the backend contract.

use serde::{Deserialize, Serialize};

/// A question directed at a subject's tutor.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AskRequest {
    /// Subject the question belongs to
    pub subject_id: String,
    /// The question text
    pub text: String,
    /// Optional narrower scope (module, chapter) within the subject
    #[serde(skip_serializing_if = "Option::is_none")]
    pub scope_id: Option<String>,
}

impl AskRequest {
    /// Creates a question for a subject.
    pub fn new(subject_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            subject_id: subject_id.into(),
            text: text.into(),
            scope_id: None,
        }
    }

    /// Narrows the question to a scope within the subject.
    pub fn with_scope(mut self, scope_id: impl Into<String>) -> Self {
        self.scope_id = Some(scope_id.into());
        self
    }
}

/// The uniform answer shape produced by both the streaming and buffered
/// paths.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Answer {
    /// Full answer text
    pub answer: String,
}

impl Answer {
    /// Wraps answer text in the uniform result shape.
    pub fn new(answer: impl Into<String>) -> Self {
        Self {
            answer: answer.into(),
        }
    }

    /// The answer text.
    pub fn text(&self) -> &str {
        &self.answer
    }
}

/// Parameters for quiz generation.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizRequest {
    /// Subject to draw questions from
    pub subject_id: String,
    /// Module within the subject
    pub module_id: String,
    /// Target number of questions
    pub question_count: u32,
}

impl QuizRequest {
    /// Creates a quiz request for a subject/module pair.
    pub fn new(
        subject_id: impl Into<String>,
        module_id: impl Into<String>,
        question_count: u32,
    ) -> Self {
        Self {
            subject_id: subject_id.into(),
            module_id: module_id.into(),
            question_count,
        }
    }
}

/// One generated quiz question.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct QuizQuestion {
    /// Question text
    pub question: String,
    /// Answer options, in display order
    pub options: Vec<String>,
    /// Index of the correct option
    pub answer_index: usize,
    /// Optional explanation shown after answering
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub explanation: Option<String>,
}

/// A generated quiz.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Quiz {
    /// Generated questions, in order
    pub questions: Vec<QuizQuestion>,
}

impl Quiz {
    /// Number of questions in the quiz.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// True when the quiz has no questions.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }
}

/// Parameters for a transcription request.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct TranscriptionRequest {
    /// Reference to previously uploaded study media
    pub media_id: String,
}

impl TranscriptionRequest {
    /// Creates a transcription request for a media reference.
    pub fn new(media_id: impl Into<String>) -> Self {
        Self {
            media_id: media_id.into(),
        }
    }
}

/// A completed transcription.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Transcript {
    /// Transcribed text
    pub text: String,
}

/// How an ask call talks to the backend.
///
/// The mode is chosen by the caller per call, typically from a feature
/// flag read once at call time. An in-flight session never changes mode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AskMode {
    /// Stream the answer incrementally (default)
    #[default]
    Streaming,
    /// Single buffered request/response
    Buffered,
}

impl AskMode {
    /// Maps the streaming feature flag to a mode.
    pub const fn from_streaming_flag(enabled: bool) -> Self {
        if enabled {
            Self::Streaming
        } else {
            Self::Buffered
        }
    }

    /// True for the streaming mode.
    pub const fn is_streaming(&self) -> bool {
        matches!(self, Self::Streaming)
    }
}
