//! Frame interpretation.
//!
//! Complete frames become protocol events. A frame is only meaningful
//! when it starts with the `data: ` prefix and carries a JSON object with
//! one of the known fields; everything else is ignored so keep-alives and
//! garbled frames never disturb an in-flight answer.

use serde::Deserialize;
use tracing::{trace, warn};

use crate::defaults::protocol::DATA_PREFIX;

/// Protocol events carried by individual frames.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FrameEvent {
    /// Incremental answer text
    Chunk(String),
    /// The answer is complete
    Done,
    /// The server aborted the answer; message is verbatim
    Error(String),
}

/// One JSON payload carried by a `data: ` frame.
#[derive(Debug, Deserialize)]
struct FramePayload {
    #[serde(default)]
    chunk: Option<String>,
    #[serde(default)]
    done: Option<bool>,
    #[serde(default)]
    error: Option<String>,
}

/// Interprets one complete frame.
///
/// Returns `None` for frames that carry no event: missing prefix,
/// malformed JSON, or a payload without any known field. Malformed frames
/// are logged and skipped; they never abort the stream.
pub fn interpret_frame(frame: &str) -> Option<FrameEvent> {
    let Some(data) = frame.strip_prefix(DATA_PREFIX) else {
        if !frame.is_empty() {
            trace!(frame = %preview(frame), "ignoring non-data frame");
        }
        return None;
    };

    let payload: FramePayload = match serde_json::from_str(data) {
        Ok(payload) => payload,
        Err(err) => {
            warn!(error = %err, frame = %preview(frame), "skipping malformed frame");
            return None;
        }
    };

    // Precedence: an error outranks everything, done outranks chunk.
    if let Some(message) = payload.error {
        return Some(FrameEvent::Error(message));
    }
    if payload.done == Some(true) {
        return Some(FrameEvent::Done);
    }
    if let Some(chunk) = payload.chunk {
        return Some(FrameEvent::Chunk(chunk));
    }
    if payload.done == Some(false) {
        // Known field, but it carries no event.
        return None;
    }

    warn!(frame = %preview(frame), "skipping frame without a known field");
    None
}

/// Truncates a frame for log output.
fn preview(frame: &str) -> String {
    const MAX: usize = 120;
    if frame.len() <= MAX {
        frame.to_string()
    } else {
        let cut = frame
            .char_indices()
            .take_while(|(i, _)| *i <= MAX)
            .last()
            .map_or(0, |(i, _)| i);
        format!("{}...", &frame[..cut])
    }
}
