//! Capability traits
//!
//! The client implements these seams; tests and embedders can substitute
//! their own transports behind them.

use async_trait::async_trait;

use crate::error::TutorError;
use crate::streaming::{AnswerStream, AnswerStreamHandle};
use crate::types::{Answer, AskRequest, Quiz, QuizRequest, Transcript, TranscriptionRequest};

/// Question answering, buffered and streamed.
#[async_trait]
pub trait QaCapability: Send + Sync {
    /// Buffered ask: one request, one parsed `Answer`.
    async fn ask(&self, request: AskRequest) -> Result<Answer, TutorError>;

    /// Streamed ask: yields deltas, then exactly one terminal item.
    async fn ask_stream(&self, request: AskRequest) -> Result<AnswerStream, TutorError>;

    /// Streamed ask with a first-class cancellation handle.
    async fn ask_stream_with_cancel(
        &self,
        request: AskRequest,
    ) -> Result<AnswerStreamHandle, TutorError> {
        let stream = self.ask_stream(request).await?;
        let (cancellable, cancel) = crate::utils::cancel::make_cancellable_stream(stream);
        Ok(AnswerStreamHandle {
            stream: cancellable,
            cancel,
        })
    }
}

/// Quiz generation.
#[async_trait]
pub trait QuizCapability: Send + Sync {
    async fn generate_quiz(&self, request: QuizRequest) -> Result<Quiz, TutorError>;
}

/// Media transcription.
#[async_trait]
pub trait TranscriptionCapability: Send + Sync {
    async fn transcribe(&self, request: TranscriptionRequest) -> Result<Transcript, TutorError>;
}
