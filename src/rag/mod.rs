//! RAG (Retrieval-Augmented Generation) for question answering over a
//! single ingested document.
//!
//! Provides context assembly from retrieved chunks and the streaming
//! respond pipeline.

pub mod context;
mod responder;

pub use context::format_context_for_prompt;
pub use responder::{Responder, RespondOptions};
