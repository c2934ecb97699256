//! Default Configuration Values
//!
//! Centralizes the default values used throughout the client so they are
//! easy to find and adjust.

use std::time::Duration;

/// HTTP client default configurations
pub mod http {
    use super::*;

    /// Default request timeout.
    ///
    /// Generous because streamed answers stay open while the model
    /// produces text.
    pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

    /// Default connection timeout
    pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

    /// Default User-Agent string for HTTP requests
    pub const USER_AGENT: &str = concat!("tutorwire/", env!("CARGO_PKG_VERSION"));
}

/// Backend endpoint paths, joined onto the configured base URL
pub mod endpoints {
    /// Streaming ask endpoint
    pub const ASK_STREAM: &str = "/api/tutor/ask/stream";

    /// Buffered ask endpoint
    pub const ASK: &str = "/api/tutor/ask";

    /// Quiz generation endpoint
    pub const QUIZ: &str = "/api/tutor/quiz";

    /// Transcription endpoint
    pub const TRANSCRIBE: &str = "/api/tutor/transcribe";
}

/// Wire protocol constants for the streamed answer body
pub mod protocol {
    /// Frame delimiter: two newlines end a frame
    pub const FRAME_DELIMITER: &[u8] = b"\n\n";

    /// Prefix marking a frame as a data event
    pub const DATA_PREFIX: &str = "data: ";
}
