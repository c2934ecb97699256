//! # Tutorwire - Streaming Q&A Client Library
//!
//! Tutorwire is a client library for tutoring backends that answer study
//! questions over a frame-delimited streaming protocol, with a buffered
//! JSON fallback for environments that cannot consume streams.
#![deny(unsafe_code)]
//!
//! ## Features
//!
//! - **Streaming First**: Answers arrive as incremental deltas decoded from
//!   `data:`-prefixed frames, exposed as a typed event stream.
//! - **Buffered Fallback**: The same ask surface over a single JSON request,
//!   selected per call with [`types::AskMode`].
//! - **Capability Separation**: Traits distinguish question answering, quiz
//!   generation, and transcription sharing.
//! - **Type Safety**: Request and response shapes are plain serde types;
//!   protocol errors surface as one [`error::TutorError`] enum.
//! - **HTTP Customization**: Supports passing in a reqwest client and custom
//!   HTTP configurations.
//! - **Cancellation**: Cooperative cancel handles stop in-flight answers
//!   between events.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use tutorwire::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TutorClient::builder()
//!         .base_url("https://tutor.example.com")
//!         .api_key("your-api-key")
//!         .build()?;
//!
//!     let answer = client
//!         .ask(AskRequest::new("bio-101", "What is osmosis?"))
//!         .await?;
//!     println!("{}", answer.text());
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Streaming
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use tutorwire::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TutorClient::builder()
//!         .base_url("https://tutor.example.com")
//!         .build()?;
//!
//!     let mut stream = client
//!         .ask_stream(AskRequest::new("bio-101", "Explain photosynthesis"))
//!         .await?;
//!     while let Some(event) = stream.next().await {
//!         match event? {
//!             AnswerStreamEvent::Delta { delta } => print!("{delta}"),
//!             AnswerStreamEvent::Completed { answer } => {
//!                 println!();
//!                 println!("({} chars)", answer.text().len());
//!             }
//!         }
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod ask;
pub mod client;
pub mod config;
pub mod defaults;
pub mod error;
pub mod streaming;
pub mod tracing;
pub mod traits;
pub mod types;
pub mod utils;

pub use error::TutorError;

/// Convenient pre-import module
pub mod prelude {
    pub use crate::ask::{AskOptions, ask_with_options};
    pub use crate::client::{TutorClient, TutorClientBuilder};
    pub use crate::config::{ClientConfig, HttpConfig};
    pub use crate::error::{ErrorCategory, TutorError};
    pub use crate::streaming::*;
    pub use crate::traits::{QaCapability, QuizCapability, TranscriptionCapability};
    pub use crate::types::{
        Answer, AskMode, AskRequest, Quiz, QuizQuestion, QuizRequest, Transcript,
        TranscriptionRequest,
    };
    pub use crate::utils::cancel::CancelHandle;
}
