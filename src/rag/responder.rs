//! Streaming response generation over retrieved context.

use super::context::format_context_for_prompt;
use crate::config::{GenerationSettings, Prompts, RetrievalSettings};
use crate::embedding::Embedder;
use crate::error::Result;
use crate::generation::{FragmentStream, GenerationRequest, Generator};
use crate::session::Session;
use std::collections::HashMap;
use std::sync::Arc;
use tracing::{debug, instrument};

/// Per-request overrides for generation and retrieval settings.
#[derive(Debug, Clone, Default)]
pub struct RespondOptions {
    /// Model override for this request.
    pub model: Option<String>,
    /// Temperature override for this request.
    pub temperature: Option<f32>,
    /// Completion length cap override for this request.
    pub max_tokens: Option<u32>,
    /// Number of context chunks to retrieve for this request.
    pub top_k: Option<usize>,
}

/// Runs the retrieve, assemble, generate pipeline for a session.
pub struct Responder {
    embedder: Arc<dyn Embedder>,
    generator: Arc<dyn Generator>,
    prompts: Prompts,
    generation: GenerationSettings,
    retrieval: RetrievalSettings,
}

impl Responder {
    /// Create a responder from its components and effective settings.
    pub fn new(
        embedder: Arc<dyn Embedder>,
        generator: Arc<dyn Generator>,
        prompts: Prompts,
        generation: GenerationSettings,
        retrieval: RetrievalSettings,
    ) -> Self {
        Self {
            embedder,
            generator,
            prompts,
            generation,
            retrieval,
        }
    }

    /// Answer a question against a session's document, streaming fragments.
    ///
    /// The query is embedded and the most similar chunks are retrieved;
    /// the rendered prompt then streams through the generator. When nothing
    /// is retrieved the context slot carries an explicit notice instead.
    #[instrument(skip(self, session, query, options), fields(session_id = %session.id()))]
    pub async fn respond(
        &self,
        session: &Session,
        query: &str,
        options: &RespondOptions,
    ) -> Result<FragmentStream> {
        let query_embedding = self.embedder.embed(query).await?;

        let top_k = options.top_k.unwrap_or(self.retrieval.top_k as usize);
        let results = session.index().search(&query_embedding, top_k);
        debug!(
            retrieved = results.len(),
            top_score = ?results.first().map(|r| r.score),
            "Retrieved context chunks"
        );

        let context = if results.is_empty() {
            self.prompts.rag.no_context.clone()
        } else {
            format_context_for_prompt(&results)
        };

        let mut vars = HashMap::new();
        vars.insert("context".to_string(), context);
        vars.insert("question".to_string(), query.to_string());

        let system = self
            .prompts
            .render_with_custom(&self.prompts.rag.system, &vars);
        let user = self.prompts.render_with_custom(&self.prompts.rag.user, &vars);

        self.generate(system, user, &self.generation.model, options)
            .await
    }

    /// Stream a plain chat completion without retrieval.
    pub async fn chat(
        &self,
        system: &str,
        user: &str,
        options: &RespondOptions,
    ) -> Result<FragmentStream> {
        self.generate(
            system.to_string(),
            user.to_string(),
            &self.generation.chat_model,
            options,
        )
        .await
    }

    async fn generate(
        &self,
        system: String,
        user: String,
        default_model: &str,
        options: &RespondOptions,
    ) -> Result<FragmentStream> {
        let request = GenerationRequest {
            system,
            user,
            model: options
                .model
                .clone()
                .unwrap_or_else(|| default_model.to_string()),
            temperature: options.temperature.unwrap_or(self.generation.temperature),
            max_tokens: options.max_tokens.or(self.generation.max_tokens),
        };
        self.generator.stream_complete(request).await
    }
}
