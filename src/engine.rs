//! Engine wiring and top-level session operations.
//!
//! The engine owns one chunker, one embedder, one generator, and the
//! session registry, and runs every operation end to end, from ingesting
//! a document through answering questions against it.

use std::sync::Arc;
use std::time::Duration;

use serde::{Deserialize, Serialize};
use tracing::{info, instrument};
use uuid::Uuid;

use crate::chunking::CharacterChunker;
use crate::config::{Prompts, Settings};
use crate::embedding::{Embedder, OpenAIEmbedder};
use crate::error::{Result, SvarError};
use crate::generation::{FragmentStream, Generator, OpenAIGenerator};
use crate::rag::{Responder, RespondOptions};
use crate::session::{Session, SessionInfo, SessionRegistry};
use crate::vector_index::VectorIndex;

/// Outcome of ingesting a document.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IngestResult {
    pub session_id: Uuid,
    pub source_name: String,
    pub chunk_count: usize,
}

/// Ties chunking, embedding, retrieval, and generation together.
pub struct Engine {
    settings: Settings,
    chunker: CharacterChunker,
    embedder: Arc<dyn Embedder>,
    registry: SessionRegistry,
    responder: Responder,
}

impl Engine {
    /// Build an engine from settings, using the OpenAI backends.
    pub fn new(settings: Settings) -> Result<Self> {
        let embedder = Arc::new(OpenAIEmbedder::new(&settings.provider, &settings.embedding));
        let generator = Arc::new(OpenAIGenerator::new(&settings.provider));
        Self::with_components(settings, embedder, generator)
    }

    /// Build an engine with caller-supplied embedding and generation backends.
    pub fn with_components(
        settings: Settings,
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
    ) -> Result<Self> {
        settings.validate()?;

        let prompts = Prompts::load(
            settings.prompts.custom_dir.as_deref(),
            Some(&settings.prompts.variables),
        )?;
        let chunker = CharacterChunker::new(
            settings.chunking.chunk_size as usize,
            settings.chunking.overlap as usize,
        );
        let registry = SessionRegistry::new(settings.sessions.max_sessions as usize);
        let responder = Responder::new(
            Arc::clone(&embedder),
            generator,
            prompts,
            settings.generation.clone(),
            settings.retrieval.clone(),
        );

        Ok(Self {
            settings,
            chunker,
            embedder,
            registry,
            responder,
        })
    }

    /// Chunk, embed, and index a document, returning the new session.
    ///
    /// Nothing is registered until every chunk is embedded and indexed, so
    /// a failed ingestion leaves no session behind.
    #[instrument(skip(self, text), fields(source = %source_name))]
    pub async fn ingest(&self, source_name: &str, text: &str) -> Result<IngestResult> {
        if text.trim().is_empty() {
            return Err(SvarError::EmptyDocument);
        }

        let chunks = self.chunker.chunk(text);
        let texts: Vec<String> = chunks.iter().map(|c| c.text.clone()).collect();
        let vectors = self.embedder.embed_batch(&texts).await?;

        let mut index = VectorIndex::with_dimensions(self.embedder.dimensions());
        for (chunk, vector) in chunks.into_iter().zip(vectors) {
            index.insert(chunk, vector)?;
        }

        let session_id = Uuid::new_v4();
        let session = self
            .registry
            .register(Session::new(session_id, source_name, index));
        info!(
            session_id = %session_id,
            chunks = session.chunk_count(),
            "Ingested document"
        );

        Ok(IngestResult {
            session_id,
            source_name: source_name.to_string(),
            chunk_count: session.chunk_count(),
        })
    }

    /// Stream an answer to a question against a session's document.
    pub async fn respond(
        &self,
        session_id: Uuid,
        query: &str,
        options: &RespondOptions,
    ) -> Result<FragmentStream> {
        let session = self.registry.get(session_id)?;
        self.responder.respond(&session, query, options).await
    }

    /// Stream a plain chat completion, no document retrieval involved.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        options: &RespondOptions,
    ) -> Result<FragmentStream> {
        self.responder.chat(system, user, options).await
    }

    /// Metadata for one session.
    pub fn session_info(&self, session_id: Uuid) -> Result<SessionInfo> {
        self.registry.info(session_id)
    }

    /// Remove a session and its index, returning its final metadata.
    pub fn clear_session(&self, session_id: Uuid) -> Result<SessionInfo> {
        let info = self.registry.clear(session_id)?;
        info!(session_id = %session_id, "Cleared session");
        Ok(info)
    }

    /// Metadata for all live sessions, newest first.
    pub fn sessions(&self) -> Vec<SessionInfo> {
        self.registry.list()
    }

    /// Evict sessions idle past the configured timeout, returning the count.
    pub fn evict_idle_sessions(&self) -> usize {
        let timeout = Duration::from_secs(self.settings.sessions.idle_timeout_seconds);
        self.registry.evict_idle(timeout)
    }

    /// The engine's effective settings.
    pub fn settings(&self) -> &Settings {
        &self.settings
    }
}
