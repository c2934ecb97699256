//! Stream Factory
//!
//! Turns a prepared HTTP request into an `AnswerStream`: sends it,
//! classifies transport and status failures, then drives the response
//! body through frame decoding and interpretation.
//!
//! Terminal discipline: every stream produced here ends with exactly one
//! terminal item. A `done` frame completes it, a server error frame or a
//! transport failure fails it, and a body that just ends completes it
//! with whatever text accumulated. Nothing is yielded after the terminal
//! item, so frames behind a `done` are never even read.

use futures_util::StreamExt;
use tracing::{debug, warn};

use crate::error::TutorError;
use crate::streaming::decoder::FrameDecoder;
use crate::streaming::events::AnswerStreamEvent;
use crate::streaming::interpreter::{FrameEvent, interpret_frame};
use crate::streaming::processor::AnswerAccumulator;
use crate::streaming::types::AnswerStream;

/// Stream Factory
///
/// Stateless; both operations take everything they need as arguments.
pub struct StreamFactory;

impl StreamFactory {
    /// Sends the request and returns the answer stream.
    ///
    /// Fails fast (before any stream exists) on send errors and
    /// non-success statuses. No retries at any layer.
    pub async fn create_answer_stream(
        request: reqwest::RequestBuilder,
    ) -> Result<AnswerStream, TutorError> {
        fn map_send_error(e: reqwest::Error) -> TutorError {
            if e.is_timeout() {
                return TutorError::TimeoutError(format!("Request timed out: {e}"));
            }
            if e.is_connect() {
                return TutorError::ConnectionError(format!("Connection error: {e}"));
            }
            TutorError::HttpError(format!("Failed to send request: {e}"))
        }

        let response = request.send().await.map_err(map_send_error)?;

        let status = response.status();
        if !status.is_success() {
            let text = response.text().await.unwrap_or_default();
            let message = if text.trim().is_empty() {
                format!("request failed with status {status}")
            } else {
                text.trim().to_string()
            };
            debug!(code = status.as_u16(), "answer request rejected");
            return Err(TutorError::api_error(status.as_u16(), message));
        }

        Ok(Self::stream_from_response(response))
    }

    /// Drives the response body: bytes to frames to events.
    fn stream_from_response(response: reqwest::Response) -> AnswerStream {
        let stream = async_stream::stream! {
            let mut bytes = Box::pin(response.bytes_stream());
            let mut decoder = FrameDecoder::new();
            let mut acc = AnswerAccumulator::new();

            while let Some(read) = bytes.next().await {
                let chunk = match read {
                    Ok(chunk) => chunk,
                    Err(e) => {
                        warn!(error = %e, partial_len = acc.len(), "answer stream read failed");
                        yield Err(TutorError::HttpError(format!("Stream read error: {e}")));
                        return;
                    }
                };

                for frame in decoder.feed(&chunk) {
                    match interpret_frame(&frame) {
                        Some(FrameEvent::Chunk(text)) => {
                            acc.push_chunk(&text);
                            yield Ok(AnswerStreamEvent::Delta { delta: text });
                        }
                        Some(FrameEvent::Done) => {
                            yield Ok(AnswerStreamEvent::Completed { answer: acc.finalize() });
                            return;
                        }
                        Some(FrameEvent::Error(message)) => {
                            warn!(partial_len = acc.len(), "server aborted the answer");
                            yield Err(TutorError::StreamError(message));
                            return;
                        }
                        None => {}
                    }
                }
            }

            // Body ended without a done frame. The accumulated text is the
            // answer; an unterminated tail is dropped by the decoder.
            let discarded_tail = decoder.finish().map_or(0, |tail| tail.len());
            debug!(
                partial_len = acc.len(),
                discarded_tail, "stream ended without done frame, completing with accumulated text"
            );
            yield Ok(AnswerStreamEvent::Completed { answer: acc.finalize() });
        };

        Box::pin(stream)
    }
}
