//! Question answering for docqa.
//!
//! Ties the other crates together: a question plus uploaded files becomes an
//! assembled context, one completion request, and a post-processed answer
//! recorded in the session transcript.
//!
//! # Example
//! ```no_run
//! use std::sync::Arc;
//! use docqa_chat::{AnswerGenerator, AnswerPipeline, ChatSession};
//! use docqa_documents::{ContextAssembler, GroundingText};
//! use docqa_llm::OpenAiClient;
//!
//! # async fn example() {
//! let generator = AnswerGenerator::new(Arc::new(OpenAiClient::new("sk-...")), "gpt-3.5-turbo");
//! let pipeline = AnswerPipeline::new(generator, ContextAssembler::default());
//! let mut session = ChatSession::new(GroundingText::empty());
//!
//! match session.ask(&pipeline, "Hello", &[]).await {
//!     Ok(answered) => println!("{}", answered.answer),
//!     Err(e) => println!("{}", e),
//! }
//! # }
//! ```

pub mod error;
pub mod generator;
pub mod pipeline;
pub mod postprocess;
pub mod session;

#[cfg(test)]
pub(crate) mod testing;

// Re-export main types
pub use error::AnswerError;
pub use generator::{AnswerGenerator, DEFAULT_TEMPERATURE};
pub use pipeline::{AnswerPipeline, AnsweredQuestion};
pub use postprocess::{postprocess, redact_urls, OFF_TOPIC_REFUSAL, REDACTED_URL};
pub use session::{ChatSession, ChatTurn, TurnHandle, TurnStatus};
