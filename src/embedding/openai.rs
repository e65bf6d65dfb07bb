//! OpenAI embeddings implementation.

use super::Embedder;
use crate::config::{EmbeddingSettings, ProviderSettings};
use crate::error::{Result, SvarError};
use crate::openai::create_client;
use async_openai::error::OpenAIError;
use async_openai::types::{CreateEmbeddingRequestArgs, EmbeddingInput};
use async_trait::async_trait;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Attempts per batch before a transient failure is surfaced.
const MAX_ATTEMPTS: u32 = 3;
/// Delay before the first retry; doubles on each subsequent one.
const INITIAL_BACKOFF: Duration = Duration::from_millis(500);

/// OpenAI-based embedder.
pub struct OpenAIEmbedder {
    client: async_openai::Client<async_openai::config::OpenAIConfig>,
    model: String,
    dimensions: usize,
}

impl OpenAIEmbedder {
    /// Create a new OpenAI embedder from provider and embedding settings.
    pub fn new(provider: &ProviderSettings, embedding: &EmbeddingSettings) -> Self {
        Self {
            client: create_client(provider),
            model: embedding.model.clone(),
            dimensions: embedding.dimensions as usize,
        }
    }

    /// One embedding API call for a single batch.
    async fn request_embeddings(
        &self,
        texts: &[String],
    ) -> std::result::Result<Vec<Vec<f32>>, OpenAIError> {
        let request = CreateEmbeddingRequestArgs::default()
            .model(&self.model)
            .input(EmbeddingInput::StringArray(texts.to_vec()))
            .dimensions(self.dimensions as u32)
            .build()?;

        let response = self.client.embeddings().create(request).await?;

        // Sort by index to ensure correct order
        let mut data = response.data;
        data.sort_by_key(|e| e.index);
        Ok(data.into_iter().map(|e| e.embedding).collect())
    }

    /// Run one batch, retrying transient failures with doubling backoff.
    async fn request_embeddings_with_retry(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        let mut attempt = 1;
        let mut backoff = INITIAL_BACKOFF;
        loop {
            match self.request_embeddings(texts).await {
                Ok(vectors) => return Ok(vectors),
                Err(e) if attempt < MAX_ATTEMPTS && is_transient(&e) => {
                    warn!(attempt, error = %e, "Embedding request failed, retrying");
                    tokio::time::sleep(backoff).await;
                    backoff *= 2;
                    attempt += 1;
                }
                Err(e) => return Err(SvarError::EmbeddingUnavailable(e.to_string())),
            }
        }
    }
}

#[async_trait]
impl Embedder for OpenAIEmbedder {
    #[instrument(skip(self, text))]
    async fn embed(&self, text: &str) -> Result<Vec<f32>> {
        let embeddings = self.embed_batch(&[text.to_string()]).await?;
        embeddings
            .into_iter()
            .next()
            .ok_or_else(|| SvarError::EmbeddingUnavailable("Empty embedding response".to_string()))
    }

    #[instrument(skip(self, texts), fields(count = texts.len()))]
    async fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }

        debug!("Generating embeddings for {} texts", texts.len());

        // OpenAI has a limit on batch size, process in chunks
        const BATCH_SIZE: usize = 100;
        let mut all_embeddings = Vec::with_capacity(texts.len());

        for batch in texts.chunks(BATCH_SIZE) {
            let vectors = self.request_embeddings_with_retry(batch).await?;
            if vectors.len() != batch.len() {
                return Err(SvarError::EmbeddingUnavailable(format!(
                    "Provider returned {} embeddings for {} inputs",
                    vectors.len(),
                    batch.len()
                )));
            }
            all_embeddings.extend(vectors);
        }

        for vector in &all_embeddings {
            if vector.len() != self.dimensions {
                return Err(SvarError::DimensionMismatch {
                    expected: self.dimensions,
                    actual: vector.len(),
                });
            }
        }

        debug!("Generated {} embeddings", all_embeddings.len());
        Ok(all_embeddings)
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }
}

/// Whether an error is worth retrying.
fn is_transient(error: &OpenAIError) -> bool {
    match error {
        OpenAIError::Reqwest(e) => e.is_timeout() || e.is_connect() || e.is_request(),
        OpenAIError::ApiError(api) => {
            let message = api.message.to_lowercase();
            message.contains("rate limit")
                || message.contains("overloaded")
                || message.contains("server error")
        }
        _ => false,
    }
}
