//! Core Streaming Types
//!
//! Defines the main types used for consuming streamed answers.

use futures::Stream;
use std::pin::Pin;

use crate::error::TutorError;

pub use crate::streaming::events::AnswerStreamEvent;

/// Answer Stream - the primary interface for streamed answers
///
/// A pinned, boxed stream yielding `AnswerStreamEvent` items. Exactly one
/// terminal item (a `Completed` event or an `Err`) ends every stream.
pub type AnswerStream = Pin<Box<dyn Stream<Item = Result<AnswerStreamEvent, TutorError>> + Send>>;

/// Answer stream with first-class cancellation handle
///
/// # Example
/// ```rust,no_run
/// # use tutorwire::prelude::*;
/// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
/// # let client = TutorClient::builder().base_url("https://api.example.com").build()?;
/// let handle = client
///     .ask_stream_with_cancel(AskRequest::new("bio-101", "What is osmosis?"))
///     .await?;
///
/// // Consume handle.stream ...
///
/// // Cancel if needed
/// handle.cancel.cancel();
/// # Ok(())
/// # }
/// ```
pub struct AnswerStreamHandle {
    /// The underlying answer stream
    pub stream: AnswerStream,
    /// Handle to cancel the stream
    pub cancel: crate::utils::cancel::CancelHandle,
}
