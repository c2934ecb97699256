//! Answer accumulation.
//!
//! Chunks arrive as deltas; the accumulator is the single place the
//! running text lives. Append-only, arrival order, no trimming.

use crate::types::Answer;

/// Collects chunk text into the final answer.
#[derive(Debug, Default)]
pub struct AnswerAccumulator {
    text: String,
    finished: bool,
}

impl AnswerAccumulator {
    /// Creates an empty accumulator.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one chunk. Order of calls is arrival order.
    pub fn push_chunk(&mut self, chunk: &str) {
        self.text.push_str(chunk);
    }

    /// The text accumulated so far.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Bytes accumulated so far, for diagnostics on failure paths.
    pub fn len(&self) -> usize {
        self.text.len()
    }

    /// True when nothing has been accumulated.
    pub fn is_empty(&self) -> bool {
        self.text.is_empty()
    }

    /// True once the accumulator has produced its final answer.
    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Freezes accumulation and returns the uniform answer shape.
    pub fn finalize(&mut self) -> Answer {
        self.finished = true;
        Answer::new(self.text.clone())
    }
}
