//! Streaming Module
//!
//! Everything involved in consuming a streamed answer:
//! - Frame decoding with a persistent carry-over buffer
//! - Frame interpretation into protocol events
//! - Answer accumulation
//! - The stream factory that wires them to an HTTP response

mod decoder;
mod events;
mod factory;
mod interpreter;
mod processor;
mod types;

// Re-exports
pub use decoder::*;
pub use events::*;
pub use factory::*;
pub use interpreter::*;
pub use processor::*;
pub use types::*;
