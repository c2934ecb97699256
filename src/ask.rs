//! Ask Orchestration
//!
//! Layers the classic callback surface over the typed answer stream and
//! routes one call to the streaming or buffered transport. Resolution is
//! exactly-once: per call, either the success callbacks fire or the error
//! callback does, never both, and never twice.

use std::sync::Arc;

use futures_util::StreamExt;
use tracing::error;

use crate::error::TutorError;
use crate::streaming::AnswerStreamEvent;
use crate::traits::QaCapability;
use crate::types::{Answer, AskMode, AskRequest};

/// Callbacks for one ask call. All optional.
///
/// Ordering guarantees:
/// - Streaming mode: every `on_delta` call (arrival order) precedes
///   `on_complete`, which precedes `on_success`.
/// - Buffered mode: `on_delta` and `on_complete` never fire.
/// - Exactly one of `on_success` / `on_error` fires per call.
#[derive(Clone, Default)]
pub struct AskOptions {
    /// One call per chunk with the incremental text (streaming mode only)
    pub on_delta: Option<Arc<dyn Fn(&str) + Send + Sync>>,
    /// Full accumulated text, after the last delta (streaming mode only)
    pub on_complete: Option<Arc<dyn Fn(&str) + Send + Sync>>,
    /// Uniform result shape on success
    pub on_success: Option<Arc<dyn Fn(&Answer) + Send + Sync>>,
    /// Classified error on failure
    pub on_error: Option<Arc<dyn Fn(&TutorError) + Send + Sync>>,
}

/// Executes one ask call in the given mode, driving the callbacks.
///
/// The mode was sampled by the caller before this call; nothing in here
/// re-reads configuration, so a flag flip cannot affect a session already
/// in flight.
pub async fn ask_with_options(
    qa: &(impl QaCapability + ?Sized),
    request: AskRequest,
    mode: AskMode,
    options: AskOptions,
) -> Result<Answer, TutorError> {
    match mode {
        AskMode::Streaming => ask_streaming(qa, request, options).await,
        AskMode::Buffered => ask_buffered(qa, request, options).await,
    }
}

async fn ask_streaming(
    qa: &(impl QaCapability + ?Sized),
    request: AskRequest,
    options: AskOptions,
) -> Result<Answer, TutorError> {
    let mut stream = match qa.ask_stream(request).await {
        Ok(stream) => stream,
        Err(err) => return fail(&options, err, "Failed to get streaming answer"),
    };

    let mut acc_text = String::new();
    let mut final_answer: Option<Answer> = None;

    while let Some(item) = stream.next().await {
        match item {
            Ok(AnswerStreamEvent::Delta { delta }) => {
                if let Some(cb) = &options.on_delta {
                    cb(&delta);
                }
                acc_text.push_str(&delta);
            }
            Ok(AnswerStreamEvent::Completed { answer }) => {
                final_answer = Some(answer);
                break;
            }
            Err(err) => return fail(&options, err, "Failed to get streaming answer"),
        }
    }

    // A cancelled stream can end with no terminal item; the text received
    // so far is still the answer.
    let answer = final_answer.unwrap_or_else(|| Answer::new(acc_text));

    if let Some(cb) = &options.on_complete {
        cb(answer.text());
    }
    succeed(&options, answer)
}

async fn ask_buffered(
    qa: &(impl QaCapability + ?Sized),
    request: AskRequest,
    options: AskOptions,
) -> Result<Answer, TutorError> {
    match qa.ask(request).await {
        Ok(answer) => succeed(&options, answer),
        Err(err) => fail(&options, err, "Failed to get answer"),
    }
}

fn succeed(options: &AskOptions, answer: Answer) -> Result<Answer, TutorError> {
    if let Some(cb) = &options.on_success {
        cb(&answer);
    }
    Ok(answer)
}

fn fail(options: &AskOptions, err: TutorError, notice: &str) -> Result<Answer, TutorError> {
    error!(error = %err, category = ?err.category(), "{notice}");
    if let Some(cb) = &options.on_error {
        cb(&err);
    }
    Err(err)
}
