//! Frame decoding for the streamed answer body.
//!
//! The backend separates frames with a blank line (`\n\n`). Network reads
//! do not respect frame boundaries, so the decoder keeps the unterminated
//! tail of every read and prepends it to the next one. The carry-over is
//! kept as raw bytes: the delimiter is plain ASCII, so a byte search can
//! never match inside a multi-byte UTF-8 scalar, and text conversion
//! happens only on complete frames.

use tracing::debug;

use crate::defaults::protocol::FRAME_DELIMITER;

/// Splits an incoming byte stream into delimiter-terminated frames.
///
/// One `feed` call may complete zero, one, or many frames depending on
/// how the server's writes were coalesced in transit.
#[derive(Debug, Default)]
pub struct FrameDecoder {
    /// Bytes after the last complete frame, waiting for their delimiter
    carry: Vec<u8>,
}

impl FrameDecoder {
    /// Creates an empty decoder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends one read's bytes and returns every frame it completed, in
    /// order, without their delimiters.
    pub fn feed(&mut self, bytes: &[u8]) -> Vec<String> {
        self.carry.extend_from_slice(bytes);

        let mut frames = Vec::new();
        while let Some(pos) = find_delimiter(&self.carry) {
            let frame_bytes: Vec<u8> = self
                .carry
                .drain(..pos + FRAME_DELIMITER.len())
                .take(pos)
                .collect();
            frames.push(String::from_utf8_lossy(&frame_bytes).into_owned());
        }
        frames
    }

    /// Bytes currently carried between reads.
    pub fn pending_len(&self) -> usize {
        self.carry.len()
    }

    /// Consumes the decoder, returning a non-empty unterminated tail.
    ///
    /// The tail never parses as a frame; it exists for logging when the
    /// body ends mid-frame.
    pub fn finish(self) -> Option<String> {
        if self.carry.is_empty() {
            None
        } else {
            let tail = String::from_utf8_lossy(&self.carry).into_owned();
            debug!(tail_len = tail.len(), "stream ended with unterminated frame tail");
            Some(tail)
        }
    }
}

fn find_delimiter(buf: &[u8]) -> Option<usize> {
    buf.windows(FRAME_DELIMITER.len())
        .position(|window| window == FRAME_DELIMITER)
}
