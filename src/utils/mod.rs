//! Utility modules
//!
//! Small helpers used throughout the library.

pub mod cancel;

pub use cancel::{CancelHandle, make_cancellable_stream};
