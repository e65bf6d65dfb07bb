//! Svar - Document Q&A with Retrieval-Augmented Generation
//!
//! An embeddable engine for asking questions about uploaded documents, with streaming answers.
//!
//! The name "Svar" comes from the Norwegian/Scandinavian word for "answer."
//!
//! # Overview
//!
//! Svar allows you to:
//! - Ingest plain-text documents into isolated in-memory sessions
//! - Retrieve the chunks most relevant to a question by cosine similarity
//! - Stream grounded answers fragment by fragment as the model produces them
//! - Manage session lifetime with capacity and idle eviction
//!
//! # Architecture
//!
//! The library is organized into several modules:
//!
//! - `config` - Configuration management
//! - `chunking` - Sliding-window document chunking
//! - `embedding` - Embedding generation
//! - `vector_index` - Per-session similarity search
//! - `session` - Session lifecycle and registry
//! - `rag` - Context assembly and the respond pipeline
//! - `generation` - Streaming completion backends
//! - `engine` - Pipeline coordination
//!
//! # Example
//!
//! ```rust,no_run
//! use futures::StreamExt;
//! use svar::config::Settings;
//! use svar::engine::Engine;
//! use svar::rag::RespondOptions;
//!
//! #[tokio::main]
//! async fn main() -> svar::Result<()> {
//!     let settings = Settings::load()?;
//!     let engine = Engine::new(settings)?;
//!
//!     // Ingest a document and ask a question about it
//!     let result = engine.ingest("notes.txt", "The sky is blue.").await?;
//!     let mut answer = engine
//!         .respond(result.session_id, "What color is the sky?", &RespondOptions::default())
//!         .await?;
//!     while let Some(fragment) = answer.next().await {
//!         print!("{}", fragment?);
//!     }
//!
//!     Ok(())
//! }
//! ```

pub mod chunking;
pub mod config;
pub mod embedding;
pub mod engine;
pub mod error;
pub mod generation;
pub mod openai;
pub mod rag;
pub mod session;
pub mod vector_index;

pub use error::{Result, SvarError};
