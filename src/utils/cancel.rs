//! Cancellation utilities
//!
//! First-class cancellation for in-flight answer streams.

use tokio_util::sync::CancellationToken;

use crate::streaming::AnswerStream;

/// A handle that can be used to request cancellation.
#[derive(Clone, Debug)]
pub struct CancelHandle {
    token: CancellationToken,
}

impl CancelHandle {
    fn new() -> Self {
        Self {
            token: CancellationToken::new(),
        }
    }

    /// Request cancellation. A wrapped stream observing this handle stops
    /// yielding as soon as possible, even while waiting for the server.
    /// Dropping the cancelled stream closes the underlying HTTP connection
    /// so the server stops producing text.
    pub fn cancel(&self) {
        self.token.cancel();
    }

    /// Check if cancellation was requested.
    pub fn is_cancelled(&self) -> bool {
        self.token.is_cancelled()
    }

    /// A future that resolves when cancellation is requested.
    pub fn cancelled(&self) -> tokio_util::sync::WaitForCancellationFuture<'_> {
        self.token.cancelled()
    }
}

// Stream-based cancellation is implemented via async_stream to avoid pin projection.

/// Make an `AnswerStream` cancellable and return its cancel handle.
pub fn make_cancellable_stream(stream: AnswerStream) -> (AnswerStream, CancelHandle) {
    let handle = CancelHandle::new();
    let token = handle.token.clone();
    let mut inner = stream;
    let s = async_stream::stream! {
        use futures::StreamExt;
        loop {
            tokio::select! {
                _ = token.cancelled() => break,
                item = inner.next() => {
                    let Some(item) = item else { break };
                    yield item;
                }
            }
        }
    };
    (Box::pin(s), handle)
}
